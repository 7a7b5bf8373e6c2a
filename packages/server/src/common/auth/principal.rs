use std::collections::BTreeSet;

use super::{AuthError, Role};

/// Authenticated caller of a guarded operation
///
/// Built per request from the author row behind a verified JWT; never
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Holds ADMIN or MODERATOR
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(Role::is_privileged)
    }

    /// Comma separated authorities, for logging
    pub fn authorities(&self) -> String {
        self.roles
            .iter()
            .map(Role::as_authority)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One argument of a guarded call
///
/// Only `Principal` carries identity. Everything else the host passes along
/// (path ids, request bodies) is opaque to the guard.
#[derive(Clone, Debug)]
pub enum CallArgument {
    Principal(Principal),
    PathId(i64),
    Body(serde_json::Value),
}

/// Find the authenticated principal among the call arguments.
///
/// The first `Principal` argument wins. A principal without any role never
/// authenticated successfully, so it is skipped.
pub fn resolve_principal(args: &[CallArgument]) -> Result<&Principal, AuthError> {
    args.iter()
        .find_map(|arg| match arg {
            CallArgument::Principal(principal) if !principal.roles.is_empty() => Some(principal),
            _ => None,
        })
        .ok_or(AuthError::Unauthenticated)
}
