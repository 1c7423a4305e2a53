//! Driving port for reading the known-materials list.

use async_trait::async_trait;

use crate::domain::{Error, KnownMaterial};

/// Use-case port backing the material pickers on the add-salvage form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaterialCatalogueQuery: Send + Sync {
    /// Known materials ordered by name.
    async fn list_materials(&self) -> Result<Vec<KnownMaterial>, Error>;
}
