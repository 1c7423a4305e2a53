//! Driving port for reading salvage records and the aggregated view.

use async_trait::async_trait;

use crate::domain::{Error, SalvageOverview, SalvageRecord};

/// Use-case port for the view-salvage page.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalvageQuery: Send + Sync {
    /// Stored records in first-insertion order.
    async fn list_salvage(&self) -> Result<Vec<SalvageRecord>, Error>;

    /// Stored records joined with freshly fetched item data.
    ///
    /// Items the source fails to return are skipped and listed in
    /// [`SalvageOverview::unresolved`] rather than failing the call.
    async fn salvage_overview(&self) -> Result<SalvageOverview, Error>;
}
