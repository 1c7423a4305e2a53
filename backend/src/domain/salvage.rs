//! Salvage records and the merge rule applied on resubmission.
//!
//! A [`SalvageRecord`] accumulates, per salvaged item, how many times it was
//! salvaged and how many of each material came out. Submitting the same item
//! again adds to the totals: existing material entries are incremented and
//! unseen materials are appended, so material ids stay unique within a
//! record and keep their first-seen order.

use super::ItemId;

/// Validation errors raised while building or merging salvage data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SalvageValidationError {
    #[error("salvage count must be at least 1")]
    ZeroSalvageCount,
    #[error("material {item_id} count must be at least 1")]
    ZeroMaterialCount { item_id: ItemId },
    #[error("count for item {item_id} would overflow")]
    CountOverflow { item_id: ItemId },
    #[error("material {item_id} appears more than once")]
    DuplicateMaterial { item_id: ItemId },
}

/// Quantity of one material obtained from salvaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEntry {
    pub item_id: ItemId,
    pub count: u32,
}

impl MaterialEntry {
    #[must_use]
    pub const fn new(item_id: ItemId, count: u32) -> Self {
        Self { item_id, count }
    }
}

/// Validated input for one salvage submission.
///
/// Repeated material ids are merged by summing their counts, so the list
/// handed to [`SalvageRecord::absorb`] never contains duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalvageSubmission {
    item_id: ItemId,
    salvage_count: u32,
    materials: Vec<MaterialEntry>,
}

impl SalvageSubmission {
    /// Validate a submission.
    ///
    /// # Examples
    /// ```
    /// use salvage_ledger::domain::{ItemId, MaterialEntry, SalvageSubmission};
    ///
    /// let item = ItemId::new(100).expect("id");
    /// let dust = ItemId::new(24_277).expect("id");
    /// let submission = SalvageSubmission::new(
    ///     item,
    ///     2,
    ///     [MaterialEntry::new(dust, 1), MaterialEntry::new(dust, 3)],
    /// )
    /// .expect("valid submission");
    /// assert_eq!(submission.materials(), &[MaterialEntry::new(dust, 4)]);
    /// ```
    pub fn new(
        item_id: ItemId,
        salvage_count: u32,
        materials: impl IntoIterator<Item = MaterialEntry>,
    ) -> Result<Self, SalvageValidationError> {
        if salvage_count == 0 {
            return Err(SalvageValidationError::ZeroSalvageCount);
        }
        let mut merged: Vec<MaterialEntry> = Vec::new();
        for entry in materials {
            if entry.count == 0 {
                return Err(SalvageValidationError::ZeroMaterialCount {
                    item_id: entry.item_id,
                });
            }
            add_material(&mut merged, entry)?;
        }
        Ok(Self {
            item_id,
            salvage_count,
            materials: merged,
        })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn salvage_count(&self) -> u32 {
        self.salvage_count
    }

    pub fn materials(&self) -> &[MaterialEntry] {
        &self.materials
    }
}

/// Accumulated salvage history for one item.
///
/// ## Invariants
/// - material ids are unique within `materials`.
/// - `revision` starts at 1 and grows by one with every merge; stores use it
///   to detect concurrent writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalvageRecord {
    item_id: ItemId,
    salvage_count: u32,
    materials: Vec<MaterialEntry>,
    revision: u32,
}

impl SalvageRecord {
    /// First record for an item, taken verbatim from a submission.
    #[must_use]
    pub fn from_submission(submission: &SalvageSubmission) -> Self {
        Self {
            item_id: submission.item_id,
            salvage_count: submission.salvage_count,
            materials: submission.materials.clone(),
            revision: 1,
        }
    }

    /// Rebuild a record read back from storage.
    pub fn restore(
        item_id: ItemId,
        salvage_count: u32,
        materials: Vec<MaterialEntry>,
        revision: u32,
    ) -> Result<Self, SalvageValidationError> {
        for (index, entry) in materials.iter().enumerate() {
            if materials
                .iter()
                .skip(index + 1)
                .any(|other| other.item_id == entry.item_id)
            {
                return Err(SalvageValidationError::DuplicateMaterial {
                    item_id: entry.item_id,
                });
            }
        }
        Ok(Self {
            item_id,
            salvage_count,
            materials,
            revision,
        })
    }

    /// Apply a resubmission, returning the merged record.
    ///
    /// The receiver is left untouched, so an overflow rejects the whole
    /// submission without a partial update.
    ///
    /// # Examples
    /// ```
    /// use salvage_ledger::domain::{ItemId, MaterialEntry, SalvageRecord, SalvageSubmission};
    ///
    /// let item = ItemId::new(1).expect("id");
    /// let m1 = ItemId::new(11).expect("id");
    /// let first = SalvageSubmission::new(item, 2, [MaterialEntry::new(m1, 3)]).expect("valid");
    /// let record = SalvageRecord::from_submission(&first);
    ///
    /// let again = SalvageSubmission::new(item, 1, [MaterialEntry::new(m1, 2)]).expect("valid");
    /// let merged = record.absorb(&again).expect("merge");
    /// assert_eq!(merged.salvage_count(), 3);
    /// assert_eq!(merged.materials(), &[MaterialEntry::new(m1, 5)]);
    /// ```
    pub fn absorb(&self, submission: &SalvageSubmission) -> Result<Self, SalvageValidationError> {
        let salvage_count = self
            .salvage_count
            .checked_add(submission.salvage_count)
            .ok_or(SalvageValidationError::CountOverflow {
                item_id: self.item_id,
            })?;
        let mut materials = self.materials.clone();
        for entry in &submission.materials {
            add_material(&mut materials, *entry)?;
        }
        Ok(Self {
            item_id: self.item_id,
            salvage_count,
            materials,
            revision: self.revision.saturating_add(1),
        })
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Total number of times the item has been salvaged.
    pub fn salvage_count(&self) -> u32 {
        self.salvage_count
    }

    /// Materials in first-seen order.
    pub fn materials(&self) -> &[MaterialEntry] {
        &self.materials
    }

    pub fn revision(&self) -> u32 {
        self.revision
    }
}

fn add_material(
    materials: &mut Vec<MaterialEntry>,
    entry: MaterialEntry,
) -> Result<(), SalvageValidationError> {
    match materials
        .iter_mut()
        .find(|existing| existing.item_id == entry.item_id)
    {
        Some(existing) => {
            existing.count = existing.count.checked_add(entry.count).ok_or(
                SalvageValidationError::CountOverflow {
                    item_id: entry.item_id,
                },
            )?;
        }
        None => materials.push(entry),
    }
    Ok(())
}

#[cfg(test)]
mod tests;
