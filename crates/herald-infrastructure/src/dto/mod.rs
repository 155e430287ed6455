//! Data Transfer Objects (DTOs) for the on-disk command catalog.
//!
//! ### Catalog Version History
//! - **1.0.0**: Initial schema (`[[command]]` tables with nested `[[command.option]]`)
//!
//! Files without `schema_version` are read as 1.0.0.

mod catalog;

pub use catalog::{CatalogFileV1, CommandV1, OptionV1, CATALOG_V1_VERSION};
