//! Driving port for curating the known-materials list.

use async_trait::async_trait;

use crate::domain::{Error, KnownMaterial};

/// Use-case port invoked by the add-salvage-type form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialCatalogueCommand: Send + Sync {
    /// Insert or rename the given materials, returning how many were written.
    async fn register_materials(&self, materials: Vec<KnownMaterial>) -> Result<usize, Error>;
}
