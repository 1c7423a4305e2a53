//! Driving port for recording salvage results.

use async_trait::async_trait;

use crate::domain::{Error, SalvageRecord, SalvageSubmission};

/// Use-case port invoked by the add-salvage form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalvageCommand: Send + Sync {
    /// Create the record for a new item or merge the submission into the
    /// existing one, returning the stored result.
    async fn record_salvage(&self, submission: SalvageSubmission) -> Result<SalvageRecord, Error>;
}
