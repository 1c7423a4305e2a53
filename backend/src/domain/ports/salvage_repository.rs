//! Port for the salvage record store.
//!
//! Records are keyed by the salvaged item's id. Writers follow a
//! read-merge-write cycle: [`SalvageRepository::insert`] for the first
//! submission of an item and [`SalvageRepository::update`] guarded by the
//! revision that was read.

use async_trait::async_trait;

use crate::domain::{ItemId, SalvageRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by salvage repository adapters.
    pub enum SalvageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "salvage repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "salvage repository query failed: {message}",
        /// A record for the item already exists.
        DuplicateKey { item_id: ItemId } =>
            "salvage record for item {item_id} already exists",
        /// The stored revision no longer matches the one the caller read.
        RevisionMismatch { item_id: ItemId, expected: u32 } =>
            "salvage record for item {item_id} is no longer at revision {expected}",
        /// A stored row could not be converted to or from a domain record.
        Serialization { message: String } =>
            "salvage record serialization failed: {message}",
    }
}

/// Storage contract for [`SalvageRecord`]s.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SalvageRepository: Send + Sync {
    /// Fetch the record for `item_id`, if one exists.
    async fn find_by_id(
        &self,
        item_id: ItemId,
    ) -> Result<Option<SalvageRecord>, SalvageRepositoryError>;

    /// Insert a new record.
    ///
    /// Fails with [`SalvageRepositoryError::DuplicateKey`] when a record for
    /// the same item already exists.
    async fn insert(&self, record: &SalvageRecord) -> Result<(), SalvageRepositoryError>;

    /// Replace an existing record if it is still at `expected_revision`.
    ///
    /// The caller sets the new revision on `record`.
    async fn update(
        &self,
        record: &SalvageRecord,
        expected_revision: u32,
    ) -> Result<(), SalvageRepositoryError>;

    /// All records in first-insertion order.
    async fn list_all(&self) -> Result<Vec<SalvageRecord>, SalvageRepositoryError>;
}
