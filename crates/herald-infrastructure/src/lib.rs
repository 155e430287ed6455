pub mod dto;
pub mod paths;
pub mod toml_catalog_source;

pub use crate::paths::HeraldPaths;
pub use crate::toml_catalog_source::TomlCatalogSource;
