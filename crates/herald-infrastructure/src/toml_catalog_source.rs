//! TOML-based CatalogSource implementation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use herald_core::catalog::{CatalogConfig, CatalogSource};
use herald_core::error::{HeraldError, Result};

use version_migrate::{FromDomain, IntoDomain};

use crate::dto::{CatalogFileV1, CATALOG_V1_VERSION};
use crate::paths::HeraldPaths;

/// Reads the command catalog from a TOML file.
///
/// A missing or blank file is an empty catalog, so a bot can start before
/// any command is configured.
pub struct TomlCatalogSource {
    path: PathBuf,
}

impl TomlCatalogSource {
    /// Creates a source for the default catalog path (~/.config/herald/commands.toml)
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: HeraldPaths::catalog_file()?,
        })
    }

    /// Creates a source for a custom path (for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses catalog file contents.
    pub fn parse(content: &str) -> Result<CatalogConfig> {
        if content.trim().is_empty() {
            return Ok(CatalogConfig::default());
        }

        let dto: CatalogFileV1 = toml::from_str(content)?;
        if !dto.is_supported() {
            return Err(HeraldError::Serialization {
                format: "TOML".to_string(),
                message: format!(
                    "unsupported catalog schema_version '{}' (expected {})",
                    dto.schema_version, CATALOG_V1_VERSION
                ),
            });
        }
        Ok(dto.into_domain())
    }

    /// Writes the catalog, creating the parent directory when needed.
    pub async fn save(&self, config: &CatalogConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let dto = CatalogFileV1::from_domain(config.clone());
        let toml_string = toml::to_string_pretty(&dto).map_err(|e| HeraldError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })?;

        tokio::fs::write(&self.path, toml_string).await?;
        tracing::debug!("Saved command catalog to {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for TomlCatalogSource {
    async fn load(&self) -> Result<CatalogConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No command catalog at {:?}, starting empty", self.path);
                return Ok(CatalogConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = Self::parse(&content)?;
        tracing::info!(
            "Loaded {} command(s) from {:?}",
            config.commands.len(),
            self.path
        );
        Ok(config)
    }
}
