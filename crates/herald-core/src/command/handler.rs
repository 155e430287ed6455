//! Invocation handlers and the authorization gate in front of them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::auth::{RoleOracle, RoleSet};
use crate::error::Result;
use crate::interaction::{Interaction, ReplyPayload};

/// Reply sent by commands that have no handler attached.
pub const DEFAULT_REPLY: &str = "The command has been received, but there is nothing to do...";

/// Reply sent when the invoking user lacks the required roles.
pub const DEFAULT_DENIED_MESSAGE: &str = "You do not have the required roles to use this command.";

/// Result of a button handler. `0` tells the router nothing was handled.
pub type ButtonCode = i64;

/// Business logic run when a command is invoked.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, interaction: &dyn Interaction) -> Result<()>;
}

/// Logic run when a button attached to a command's reply is pressed.
#[async_trait]
pub trait ButtonHandler: Send + Sync {
    async fn handle_button(&self, interaction: &dyn Interaction) -> Result<ButtonCode>;
}

/// Adapts a closure into a [`CommandHandler`].
///
/// ```ignore
/// let handler = handler_fn(|interaction| {
///     Box::pin(async move { interaction.reply(ReplyPayload::public("pong")).await })
/// });
/// ```
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: for<'a> Fn(&'a dyn Interaction) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    HandlerFn(f)
}

/// Adapts a closure into a [`ButtonHandler`].
pub fn button_handler_fn<F>(f: F) -> ButtonHandlerFn<F>
where
    F: for<'a> Fn(&'a dyn Interaction) -> BoxFuture<'a, Result<ButtonCode>> + Send + Sync,
{
    ButtonHandlerFn(f)
}

/// See [`handler_fn`].
pub struct HandlerFn<F>(F);

#[async_trait]
impl<F> CommandHandler for HandlerFn<F>
where
    F: for<'a> Fn(&'a dyn Interaction) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn handle(&self, interaction: &dyn Interaction) -> Result<()> {
        (self.0)(interaction).await
    }
}

/// See [`button_handler_fn`].
pub struct ButtonHandlerFn<F>(F);

#[async_trait]
impl<F> ButtonHandler for ButtonHandlerFn<F>
where
    F: for<'a> Fn(&'a dyn Interaction) -> BoxFuture<'a, Result<ButtonCode>> + Send + Sync,
{
    async fn handle_button(&self, interaction: &dyn Interaction) -> Result<ButtonCode> {
        (self.0)(interaction).await
    }
}

/// Handler used when a command is declared without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHandler;

#[async_trait]
impl CommandHandler for DefaultHandler {
    async fn handle(&self, interaction: &dyn Interaction) -> Result<()> {
        tracing::debug!(
            "No handler attached to /{}, sending default reply",
            interaction.command_name()
        );
        interaction.reply(ReplyPayload::ephemeral(DEFAULT_REPLY)).await
    }
}

/// Button handler used when a command is declared without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultButtonHandler;

#[async_trait]
impl ButtonHandler for DefaultButtonHandler {
    async fn handle_button(&self, _interaction: &dyn Interaction) -> Result<ButtonCode> {
        Ok(0)
    }
}

/// The handler a router actually invokes.
///
/// For interactive commands with required roles, the role oracle is consulted
/// first. A denied user gets `denied_message` and the wrapped handler is not
/// run. Oracle and handler errors propagate unchanged.
pub struct AuthorizedHandler {
    command: String,
    inner: Arc<dyn CommandHandler>,
    required_roles: RoleSet,
    denied_message: String,
    interactive: bool,
    oracle: Arc<dyn RoleOracle>,
}

impl AuthorizedHandler {
    pub fn new(
        command: impl Into<String>,
        inner: Arc<dyn CommandHandler>,
        required_roles: RoleSet,
        denied_message: impl Into<String>,
        interactive: bool,
        oracle: Arc<dyn RoleOracle>,
    ) -> Self {
        Self {
            command: command.into(),
            inner,
            required_roles,
            denied_message: denied_message.into(),
            interactive,
            oracle,
        }
    }

    /// Whether invocations go through the role oracle.
    pub fn requires_role_check(&self) -> bool {
        self.interactive && !self.required_roles.is_empty()
    }

    pub fn required_roles(&self) -> &RoleSet {
        &self.required_roles
    }

    pub fn denied_message(&self) -> &str {
        &self.denied_message
    }
}

impl fmt::Debug for AuthorizedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedHandler")
            .field("command", &self.command)
            .field("required_roles", &self.required_roles)
            .field("denied_message", &self.denied_message)
            .field("interactive", &self.interactive)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandHandler for AuthorizedHandler {
    async fn handle(&self, interaction: &dyn Interaction) -> Result<()> {
        if self.requires_role_check() {
            let allowed = self
                .oracle
                .has_required_roles(interaction, &self.required_roles)
                .await?;

            if !allowed {
                tracing::warn!(
                    "User {} denied /{}: missing required roles",
                    interaction.user_id(),
                    self.command
                );
                interaction
                    .reply(ReplyPayload::public(self.denied_message.as_str()))
                    .await?;
                return Ok(());
            }
        }

        self.inner.handle(interaction).await
    }
}
