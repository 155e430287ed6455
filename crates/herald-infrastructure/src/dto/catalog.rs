//! Catalog file DTOs.

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use herald_core::auth::RoleId;
use herald_core::catalog::{CatalogConfig, CommandConfig, OptionEntry};
use herald_core::option::OptionConfig;

/// Current schema version of the catalog file.
pub const CATALOG_V1_VERSION: &str = <CatalogFileV1 as Versioned>::VERSION;

fn default_schema_version() -> String {
    CATALOG_V1_VERSION.to_string()
}

fn default_interactive() -> bool {
    true
}

/// Catalog file V1.0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct CatalogFileV1 {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandV1 {
    pub name: String,
    pub description: String,
    #[serde(default = "default_interactive")]
    pub interactive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denied_message: Option<String>,
    #[serde(default, rename = "option", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionV1>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionV1 {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub config: OptionConfig,
}

impl CatalogFileV1 {
    /// Whether this file was written with a schema version this build reads.
    pub fn is_supported(&self) -> bool {
        self.schema_version == Self::VERSION
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

/// Convert CatalogFileV1 DTO to the core catalog config.
impl IntoDomain<CatalogConfig> for CatalogFileV1 {
    fn into_domain(self) -> CatalogConfig {
        CatalogConfig {
            commands: self.commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convert the core catalog config to CatalogFileV1 DTO for persistence.
impl FromDomain<CatalogConfig> for CatalogFileV1 {
    fn from_domain(config: CatalogConfig) -> Self {
        CatalogFileV1 {
            schema_version: Self::VERSION.to_string(),
            commands: config.commands.iter().map(Into::into).collect(),
        }
    }
}

impl From<CommandV1> for CommandConfig {
    fn from(dto: CommandV1) -> Self {
        CommandConfig {
            name: dto.name,
            description: dto.description,
            interactive: dto.interactive,
            required_roles: dto.required_roles.into_iter().map(RoleId::from).collect(),
            denied_message: dto.denied_message,
            options: dto
                .options
                .into_iter()
                .map(|o| OptionEntry {
                    kind: o.kind,
                    config: o.config,
                })
                .collect(),
        }
    }
}

impl From<&CommandConfig> for CommandV1 {
    fn from(config: &CommandConfig) -> Self {
        CommandV1 {
            name: config.name.clone(),
            description: config.description.clone(),
            interactive: config.interactive,
            required_roles: config
                .required_roles
                .iter()
                .map(|r| r.as_str().to_string())
                .collect(),
            denied_message: config.denied_message.clone(),
            options: config
                .options
                .iter()
                .map(|o| OptionV1 {
                    kind: o.kind.clone(),
                    config: o.config.clone(),
                })
                .collect(),
        }
    }
}
