//! Command catalog: configuration, loading and the registry routers use.

mod config;
mod registry;
mod source;

pub use config::{CatalogConfig, CommandConfig, HandlerTable, OptionEntry};
pub use registry::CommandCatalog;
pub use source::CatalogSource;
