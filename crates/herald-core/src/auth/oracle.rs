//! Role-membership oracles.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::RoleSet;
use crate::error::Result;
use crate::interaction::Interaction;

/// Answers whether the invoking principal holds the roles a command requires.
///
/// The matching policy (any vs all) belongs to the implementation. Errors are
/// returned as-is and are never treated as a denial by the caller.
#[async_trait]
pub trait RoleOracle: Send + Sync {
    async fn has_required_roles(
        &self,
        interaction: &dyn Interaction,
        required: &RoleSet,
    ) -> Result<bool>;
}

/// How a [`MemberRoleOracle`] compares held roles with required roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleMatch {
    /// At least one required role is held
    #[default]
    Any,
    /// Every required role is held
    All,
}

/// Oracle that checks the member roles carried by the interaction itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberRoleOracle {
    mode: RoleMatch,
}

impl MemberRoleOracle {
    pub fn new(mode: RoleMatch) -> Self {
        Self { mode }
    }

    pub fn any() -> Self {
        Self::new(RoleMatch::Any)
    }

    pub fn all() -> Self {
        Self::new(RoleMatch::All)
    }

    pub fn mode(&self) -> RoleMatch {
        self.mode
    }
}

#[async_trait]
impl RoleOracle for MemberRoleOracle {
    async fn has_required_roles(
        &self,
        interaction: &dyn Interaction,
        required: &RoleSet,
    ) -> Result<bool> {
        if required.is_empty() {
            return Ok(true);
        }

        let held = interaction.member_roles();
        let allowed = match self.mode {
            RoleMatch::Any => required.iter().any(|role| held.contains(role)),
            RoleMatch::All => required.iter().all(|role| held.contains(role)),
        };

        tracing::debug!(
            "Role check for user {} on /{}: mode={:?} allowed={}",
            interaction.user_id(),
            interaction.command_name(),
            self.mode,
            allowed
        );
        Ok(allowed)
    }
}
