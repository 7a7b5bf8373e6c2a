use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles an author account can hold
///
/// Stored in the database and in JWT claims as `ROLE_ADMIN`, `ROLE_MODERATOR`
/// and `ROLE_USER`; the bare names are also accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN", alias = "ADMIN")]
    Admin,

    #[serde(rename = "ROLE_MODERATOR", alias = "MODERATOR")]
    Moderator,

    #[serde(rename = "ROLE_USER", alias = "USER")]
    User,
}

impl Role {
    /// Roles that take part in the global ownership bypass
    pub fn is_privileged(&self) -> bool {
        match self {
            Role::Admin | Role::Moderator => true,
            Role::User => false,
        }
    }

    pub fn as_authority(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Moderator => "ROLE_MODERATOR",
            Role::User => "ROLE_USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_authority())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("ROLE_").unwrap_or(name);
        match name.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "MODERATOR" => Ok(Role::Moderator),
            "USER" => Ok(Role::User),
            _ => Err(anyhow::anyhow!("Unknown role: {}", s)),
        }
    }
}
