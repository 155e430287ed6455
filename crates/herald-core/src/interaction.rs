//! The inbound invocation event, as seen by commands.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::RoleId;
use crate::error::Result;

/// A response sent back through an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyPayload {
    pub content: String,
    /// Visible only to the invoking user
    #[serde(default)]
    pub ephemeral: bool,
}

impl ReplyPayload {
    /// A reply everyone in the channel can see.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// A reply only the invoking user can see.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// A single command invocation from the chat platform.
///
/// Commands pass the interaction through to their handlers untouched; the
/// only operation they perform on it themselves is [`Interaction::reply`].
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Name of the invoked command.
    fn command_name(&self) -> &str;

    /// Identifier of the invoking user.
    fn user_id(&self) -> &str;

    /// Roles held by the invoking member in the guild the command was sent
    /// from. Empty outside of guilds.
    fn member_roles(&self) -> Vec<RoleId>;

    /// Sends a response to the invocation.
    async fn reply(&self, payload: ReplyPayload) -> Result<()>;
}
