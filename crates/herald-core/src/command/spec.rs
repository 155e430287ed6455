//! Command specification: everything needed to build a descriptor.

use std::fmt;
use std::sync::Arc;

use super::handler::{ButtonHandler, CommandHandler};
use crate::auth::{RoleId, RoleOracle, RoleSet};
use crate::option::{ConfigureOption, OptionSpec};

/// Input to [`super::CommandDescriptor::new`].
///
/// Absent handlers, oracle and denial message are filled with defaults when
/// the descriptor is built.
#[derive(Clone)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub handler: Option<Arc<dyn CommandHandler>>,
    pub button_handler: Option<Arc<dyn ButtonHandler>>,
    /// Slash command invoked by users (as opposed to internal-only)
    pub interactive: bool,
    pub options: Vec<OptionSpec>,
    pub required_roles: RoleSet,
    pub denied_message: Option<String>,
    pub role_oracle: Option<Arc<dyn RoleOracle>>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler: None,
            button_handler: None,
            interactive: true,
            options: Vec::new(),
            required_roles: RoleSet::new(),
            denied_message: None,
            role_oracle: None,
        }
    }

    pub fn with_handler(self, handler: impl CommandHandler + 'static) -> Self {
        self.with_shared_handler(Arc::new(handler))
    }

    pub fn with_shared_handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    pub fn with_button_handler(self, handler: impl ButtonHandler + 'static) -> Self {
        self.with_shared_button_handler(Arc::new(handler))
    }

    pub fn with_shared_button_handler(mut self, handler: Arc<dyn ButtonHandler>) -> Self {
        self.button_handler = Some(handler);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Declares an option; `kind` is validated when the descriptor is built.
    pub fn option(
        mut self,
        kind: impl Into<String>,
        configure: impl ConfigureOption + 'static,
    ) -> Self {
        self.options.push(OptionSpec::new(kind, configure));
        self
    }

    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn require_role(mut self, role: impl Into<RoleId>) -> Self {
        self.required_roles.insert(role.into());
        self
    }

    pub fn with_required_roles<I, R>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RoleId>,
    {
        self.required_roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn denied_message(mut self, message: impl Into<String>) -> Self {
        self.denied_message = Some(message.into());
        self
    }

    pub fn with_role_oracle(mut self, oracle: Arc<dyn RoleOracle>) -> Self {
        self.role_oracle = Some(oracle);
        self
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("has_handler", &self.handler.is_some())
            .field("has_button_handler", &self.button_handler.is_some())
            .field("interactive", &self.interactive)
            .field("options", &self.options)
            .field("required_roles", &self.required_roles)
            .field("denied_message", &self.denied_message)
            .finish_non_exhaustive()
    }
}
