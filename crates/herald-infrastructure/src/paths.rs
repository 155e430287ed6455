//! Path management for herald configuration files.
//!
//! ```text
//! ~/.config/herald/        # Config directory (platform config dir)
//! └── commands.toml        # Command catalog
//! ```

use std::path::PathBuf;

use herald_core::error::{HeraldError, Result};

/// File name of the command catalog inside the config directory.
pub const CATALOG_FILE_NAME: &str = "commands.toml";

pub struct HeraldPaths;

impl HeraldPaths {
    /// Returns the herald configuration directory (e.g. `~/.config/herald/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("herald"))
            .ok_or_else(|| HeraldError::config("Cannot find config directory"))
    }

    /// Returns the default command catalog path.
    pub fn catalog_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CATALOG_FILE_NAME))
    }
}
