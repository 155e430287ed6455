//! Declarative chat-platform commands.
//!
//! A [`CommandSpec`] names a command, declares its typed options, its
//! required roles and its handlers. [`CommandDescriptor::new`] turns it into
//! a serializable [`CommandDefinition`] for the platform's registration API
//! and an authorization-gated handler for runtime dispatch.

pub mod auth;
pub mod catalog;
pub mod command;
pub mod error;
pub mod interaction;
pub mod option;
pub mod schema;

pub use auth::{MemberRoleOracle, RoleId, RoleMatch, RoleOracle, RoleSet};
pub use catalog::{CatalogConfig, CatalogSource, CommandCatalog, HandlerTable};
pub use command::{
    button_handler_fn, handler_fn, ButtonCode, ButtonHandler, CommandDescriptor, CommandHandler,
    CommandSpec, CommandView,
};
pub use error::{HeraldError, Result};
pub use interaction::{Interaction, ReplyPayload};
pub use option::{ConfigureOption, OptionBuilder, OptionConfig, OptionKind, OptionSpec};
pub use schema::{CommandBuilder, CommandDefinition, CommandOption};
