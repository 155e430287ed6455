//! Where catalog configuration comes from.

use async_trait::async_trait;

use super::CatalogConfig;
use crate::error::Result;

/// Loads catalog configuration from storage.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<CatalogConfig>;
}
