//! Salvage ledger domain service.
//!
//! Implements the salvage driving ports on top of the record store and the
//! aggregation builder. Writes are read-merge-write cycles guarded by the
//! record revision; when another writer gets in between (a concurrent first
//! insert or a newer revision) the cycle is replayed against the fresh record.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    SalvageCommand, SalvageQuery, SalvageRepository, SalvageRepositoryError,
};
use crate::domain::{
    Error, SalvageOverview, SalvageRecord, SalvageSubmission, SalvageValidationError,
    SalvageViewBuilder,
};

/// Attempts made before a contended write is reported as a failure.
const MAX_WRITE_ATTEMPTS: u32 = 3;

enum WriteOutcome {
    Stored(SalvageRecord),
    Contended,
}

/// Salvage service implementing [`SalvageCommand`] and [`SalvageQuery`].
#[derive(Clone)]
pub struct SalvageLedgerService<R> {
    repo: Arc<R>,
    view_builder: SalvageViewBuilder,
}

impl<R> SalvageLedgerService<R> {
    pub fn new(repo: Arc<R>, view_builder: SalvageViewBuilder) -> Self {
        Self { repo, view_builder }
    }
}

impl<R> SalvageLedgerService<R>
where
    R: SalvageRepository,
{
    fn map_repository_error(error: SalvageRepositoryError) -> Error {
        Error::internal(format!("salvage repository error: {error}"))
    }

    fn map_validation_error(error: SalvageValidationError) -> Error {
        let details = match &error {
            SalvageValidationError::ZeroMaterialCount { item_id }
            | SalvageValidationError::CountOverflow { item_id }
            | SalvageValidationError::DuplicateMaterial { item_id } => {
                json!({ "itemId": item_id.get() })
            }
            SalvageValidationError::ZeroSalvageCount => json!({ "field": "SalvageCount" }),
        };
        Error::invalid_request(error.to_string()).with_details(details)
    }

    async fn try_record(&self, submission: &SalvageSubmission) -> Result<WriteOutcome, Error> {
        let existing = self
            .repo
            .find_by_id(submission.item_id())
            .await
            .map_err(Self::map_repository_error)?;

        let Some(existing) = existing else {
            let record = SalvageRecord::from_submission(submission);
            return match self.repo.insert(&record).await {
                Ok(()) => Ok(WriteOutcome::Stored(record)),
                Err(SalvageRepositoryError::DuplicateKey { .. }) => Ok(WriteOutcome::Contended),
                Err(err) => Err(Self::map_repository_error(err)),
            };
        };

        let merged = existing
            .absorb(submission)
            .map_err(Self::map_validation_error)?;
        match self.repo.update(&merged, existing.revision()).await {
            Ok(()) => Ok(WriteOutcome::Stored(merged)),
            Err(SalvageRepositoryError::RevisionMismatch { .. }) => Ok(WriteOutcome::Contended),
            Err(err) => Err(Self::map_repository_error(err)),
        }
    }
}

#[async_trait]
impl<R> SalvageCommand for SalvageLedgerService<R>
where
    R: SalvageRepository,
{
    async fn record_salvage(&self, submission: SalvageSubmission) -> Result<SalvageRecord, Error> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            match self.try_record(&submission).await? {
                WriteOutcome::Stored(record) => {
                    info!(
                        item_id = %record.item_id(),
                        salvage_count = record.salvage_count(),
                        materials = record.materials().len(),
                        revision = record.revision(),
                        "salvage recorded"
                    );
                    return Ok(record);
                }
                WriteOutcome::Contended => {
                    debug!(
                        item_id = %submission.item_id(),
                        attempt,
                        "salvage record changed concurrently; re-reading"
                    );
                }
            }
        }
        Err(Error::internal(format!(
            "salvage record for item {} kept changing after {MAX_WRITE_ATTEMPTS} attempts",
            submission.item_id()
        )))
    }
}

#[async_trait]
impl<R> SalvageQuery for SalvageLedgerService<R>
where
    R: SalvageRepository,
{
    async fn list_salvage(&self) -> Result<Vec<SalvageRecord>, Error> {
        self.repo
            .list_all()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn salvage_overview(&self) -> Result<SalvageOverview, Error> {
        let records = self.list_salvage().await?;
        Ok(self.view_builder.build(&records).await)
    }
}

#[cfg(test)]
#[path = "salvage_service_tests.rs"]
mod tests;
