//! Declarative catalog configuration.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::RoleId;
use crate::command::{ButtonHandler, CommandHandler, CommandSpec};
use crate::option::OptionConfig;

/// Root of a catalog file: a list of `[[command]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
}

/// One command as declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub name: String,
    pub description: String,
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_roles: Vec<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_message: Option<String>,
    #[serde(default, rename = "option", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionEntry>,
}

/// An option declaration; `type` is checked when the command is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub config: OptionConfig,
}

fn default_interactive() -> bool {
    true
}

impl CommandConfig {
    /// Converts into a spec with default handlers.
    pub fn into_spec(self) -> CommandSpec {
        let mut spec = CommandSpec::new(self.name, self.description)
            .interactive(self.interactive)
            .with_required_roles(self.required_roles);

        if let Some(message) = self.denied_message {
            spec = spec.denied_message(message);
        }
        for entry in self.options {
            spec = spec.option(entry.kind, entry.config);
        }
        spec
    }
}

impl CatalogConfig {
    pub fn into_specs(self) -> Vec<CommandSpec> {
        self.commands.into_iter().map(CommandConfig::into_spec).collect()
    }

    /// Converts into specs, attaching handlers registered under each name.
    pub fn into_specs_with(self, handlers: &HandlerTable) -> Vec<CommandSpec> {
        for name in handlers.names() {
            if !self.commands.iter().any(|c| c.name == name) {
                tracing::warn!("Handler registered for unknown command /{}", name);
            }
        }

        self.commands
            .into_iter()
            .map(|config| {
                let name = config.name.clone();
                let mut spec = config.into_spec();
                if let Some(handler) = handlers.handler(&name) {
                    spec = spec.with_shared_handler(handler);
                }
                if let Some(handler) = handlers.button_handler(&name) {
                    spec = spec.with_shared_button_handler(handler);
                }
                spec
            })
            .collect()
    }
}

/// Handlers keyed by command name, joined with configuration at load time.
#[derive(Clone, Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    button_handlers: HashMap<String, Arc<dyn ButtonHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, command: impl Into<String>, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.insert(command.into(), Arc::new(handler));
        self
    }

    pub fn on_button(
        mut self,
        command: impl Into<String>,
        handler: impl ButtonHandler + 'static,
    ) -> Self {
        self.button_handlers.insert(command.into(), Arc::new(handler));
        self
    }

    pub fn handler(&self, command: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(command).cloned()
    }

    pub fn button_handler(&self, command: &str) -> Option<Arc<dyn ButtonHandler>> {
        self.button_handlers.get(command).cloned()
    }

    /// Command names with at least one handler, each listed once.
    fn names(&self) -> BTreeSet<&str> {
        self.handlers
            .keys()
            .chain(self.button_handlers.keys())
            .map(String::as_str)
            .collect()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("button_handlers", &self.button_handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
