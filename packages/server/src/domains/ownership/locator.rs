//! Resource locator: which resource a guarded request targets.

use std::collections::HashMap;
use std::fmt;

use crate::common::{AuthError, Principal, Role};

/// Name of the path placeholder that carries the target id
pub const ID_PARAM: &str = "id";

/// Resource families the guard knows how to resolve ownership for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    Author,
    News,
    Comment,
}

impl ResourceFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceFamily::Author => "author",
            ResourceFamily::News => "news",
            ResourceFamily::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guarded operation, named after the handler it protects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindById,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FindById => "findById",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the host knows about the request being guarded
///
/// `path_params` holds the already-routed placeholders. `None` means the
/// router matched no parameterised route at all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path: String,
    pub path_params: Option<HashMap<String, String>>,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            path_params: None,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Numeric value of the `id` placeholder
    pub fn target_id(&self) -> Result<i64, AuthError> {
        let params = self
            .path_params
            .as_ref()
            .ok_or(AuthError::RequestContextMissing)?;

        let raw = params.get(ID_PARAM).ok_or_else(|| {
            AuthError::MalformedRequest("ID parameter is missing in the request".to_string())
        })?;

        raw.trim()
            .parse()
            .map_err(|_| AuthError::MalformedRequest(format!("ID parameter is not numeric: {}", raw)))
    }
}

/// A classified target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceReference {
    pub family: ResourceFamily,
    pub id: i64,
}

/// Outcome of locating a guarded request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Privileged caller on a path where role bypass applies
    Bypass,
    Resource(ResourceReference),
}

/// True when ADMIN/MODERATOR may skip ownership verification for this path.
///
/// News paths never bypass, and comment paths lose the bypass for `update`
/// only; comment deletes still bypass. Matching is by substring, so any path
/// mentioning "news" is excluded.
pub fn bypass_applies(path: &str, operation: Operation) -> bool {
    !(path.contains("news") || (path.contains("comment") && operation == Operation::Update))
}

/// Pick the resource family from the path.
///
/// Checked in order `/author`, `/news`, `/comment`. The author family is only
/// considered for callers holding USER; privileged callers reach author paths
/// through the bypass instead.
pub fn classify(path: &str, principal: &Principal) -> Option<ResourceFamily> {
    if path.contains("/author") && principal.has_role(Role::User) {
        Some(ResourceFamily::Author)
    } else if path.contains("/news") {
        Some(ResourceFamily::News)
    } else if path.contains("/comment") {
        Some(ResourceFamily::Comment)
    } else {
        None
    }
}

/// Locate the target of a guarded call.
///
/// The id is extracted first, so a request without one fails before any
/// ownership lookup happens.
pub fn locate(
    request: &RequestContext,
    operation: Operation,
    principal: &Principal,
) -> Result<Location, AuthError> {
    let id = request.target_id()?;

    if bypass_applies(&request.path, operation) && principal.is_privileged() {
        return Ok(Location::Bypass);
    }

    classify(&request.path, principal)
        .map(|family| Location::Resource(ResourceReference { family, id }))
        .ok_or_else(|| AuthError::Unroutable(request.path.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Principal {
        Principal::new("alice", [Role::User])
    }

    fn admin() -> Principal {
        Principal::new("root", [Role::Admin])
    }

    fn request(path: &str, id: &str) -> RequestContext {
        RequestContext::new(path).with_param(ID_PARAM, id)
    }

    #[test]
    fn test_bypass_condition_is_asymmetric() {
        assert!(bypass_applies("/api/v1/author/9", Operation::Delete));
        assert!(bypass_applies("/api/v1/author/9", Operation::Update));
        assert!(bypass_applies("/api/v1/comment/4", Operation::Delete));
        assert!(!bypass_applies("/api/v1/comment/4", Operation::Update));
        assert!(!bypass_applies("/api/v1/news/3", Operation::Delete));
        assert!(!bypass_applies("/api/v1/news/3", Operation::Update));
    }

    #[test]
    fn test_privileged_caller_bypasses_author_paths() {
        let location = locate(&request("/api/v1/author/9", "9"), Operation::Delete, &admin());
        assert_eq!(location.unwrap(), Location::Bypass);
    }

    #[test]
    fn test_moderator_deleting_comment_bypasses() {
        let moderator = Principal::new("mod", [Role::Moderator]);
        let location = locate(&request("/api/v1/comment/4", "4"), Operation::Delete, &moderator);
        assert_eq!(location.unwrap(), Location::Bypass);
    }

    #[test]
    fn test_privileged_caller_on_news_is_classified() {
        let location = locate(&request("/api/v1/news/3", "3"), Operation::Update, &admin());
        assert_eq!(
            location.unwrap(),
            Location::Resource(ResourceReference {
                family: ResourceFamily::News,
                id: 3
            })
        );
    }

    #[test]
    fn test_user_on_author_path_is_classified_as_author() {
        let location = locate(&request("/api/v1/author/5", "5"), Operation::Update, &user());
        assert_eq!(
            location.unwrap(),
            Location::Resource(ResourceReference {
                family: ResourceFamily::Author,
                id: 5
            })
        );
    }

    #[test]
    fn test_comment_update_by_user_is_classified_as_comment() {
        let location = locate(&request("/api/v1/comment/4", "4"), Operation::Update, &user());
        assert!(matches!(
            location,
            Ok(Location::Resource(ResourceReference {
                family: ResourceFamily::Comment,
                id: 4
            }))
        ));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let ctx = RequestContext::new("/api/v1/author/5").with_param("slug", "x");
        assert!(matches!(
            locate(&ctx, Operation::Update, &admin()),
            Err(AuthError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_non_numeric_id_is_malformed() {
        assert!(matches!(
            locate(&request("/api/v1/news/abc", "abc"), Operation::Update, &user()),
            Err(AuthError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_no_path_params_is_missing_context() {
        let ctx = RequestContext::new("/api/v1/news/3");
        assert!(matches!(
            locate(&ctx, Operation::Update, &user()),
            Err(AuthError::RequestContextMissing)
        ));
    }

    #[test]
    fn test_unknown_family_without_bypass_is_unroutable() {
        let result = locate(&request("/api/v1/category/2", "2"), Operation::Update, &user());
        assert!(matches!(result, Err(AuthError::Unroutable(path)) if path == "/api/v1/category/2"));
    }

    #[test]
    fn test_unknown_family_with_bypass_is_allowed() {
        let result = locate(&request("/api/v1/category/2", "2"), Operation::Update, &admin());
        assert_eq!(result.unwrap(), Location::Bypass);
    }
}
