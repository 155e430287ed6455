//! Role-based access control for commands.

mod oracle;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use oracle::{MemberRoleOracle, RoleMatch, RoleOracle};

/// Identifier of a platform role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub String);

impl RoleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RoleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The set of roles a command requires.
pub type RoleSet = BTreeSet<RoleId>;
