//! Aggregated salvage view.
//!
//! [`SalvageViewBuilder`] joins stored salvage records with item data from
//! the external source. Every id (salvaged item or material) is fetched at
//! most once per pass: a shared slot map is checked and claimed under a lock
//! before a fetch is issued, and the lock is never held across an await.
//! Records are processed concurrently up to `max_in_flight`; the view is
//! assembled only after every record has finished, walking records in stored
//! order so the output never depends on fetch timing.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::ports::ItemDataSource;
use super::{Coins, ItemData, ItemId, SalvageRecord};

/// One material line within a salvage entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialYield {
    pub material: ItemData,
    /// Total obtained across all salvages of the parent item.
    pub count: u32,
    /// Salvage count of the parent record.
    pub salvage_count: u32,
}

impl MaterialYield {
    /// Average quantity per salvage in hundredths, rounded down.
    #[must_use]
    pub fn per_salvage_hundredths(&self) -> u64 {
        (u64::from(self.count) * 100)
            .checked_div(u64::from(self.salvage_count))
            .unwrap_or(0)
    }

    /// Sell value of the average yield, priced at the lowest listing.
    #[must_use]
    pub fn value_per_salvage(&self) -> Option<Coins> {
        self.material
            .pricing
            .lowest_listing?
            .scaled(self.count, self.salvage_count)
    }
}

/// A salvage record with its item data resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalvageEntryView {
    pub item: ItemData,
    pub salvage_count: u32,
    /// Resolved materials in the record's order.
    pub yields: Vec<MaterialYield>,
}

impl SalvageEntryView {
    /// Sum of the priced yields' per-salvage value; `None` when no yield has
    /// a sell listing.
    #[must_use]
    pub fn value_per_salvage(&self) -> Option<Coins> {
        self.yields
            .iter()
            .filter_map(MaterialYield::value_per_salvage)
            .map(Coins::total_copper)
            .reduce(u64::saturating_add)
            .map(Coins::from_copper)
    }
}

/// View model for the salvage page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalvageOverview {
    /// Records whose item resolved, in stored order.
    pub entries: Vec<SalvageEntryView>,
    /// Distinct resolved materials in first-encounter order.
    pub materials: Vec<ItemData>,
    /// Ids the source failed to return, in first-encounter order.
    pub unresolved: Vec<ItemId>,
}

enum Slot {
    Pending,
    Resolved(ItemData),
    Failed,
}

#[derive(Default)]
struct ItemSlots {
    slots: Mutex<HashMap<ItemId, Slot>>,
}

impl ItemSlots {
    /// Claim `id` for fetching. Returns `false` when another task already
    /// claimed it.
    fn claim(&self, id: ItemId) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        match slots.entry(id) {
            Entry::Vacant(vacant) => {
                vacant.insert(Slot::Pending);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    fn settle(&self, id: ItemId, slot: Slot) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, slot);
    }

    fn into_resolved(self) -> HashMap<ItemId, ItemData> {
        self.slots
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_iter()
            .filter_map(|(id, slot)| match slot {
                Slot::Resolved(item) => Some((id, item)),
                Slot::Pending | Slot::Failed => None,
            })
            .collect()
    }
}

#[derive(Default)]
struct UnresolvedIds {
    seen: HashSet<ItemId>,
    ids: Vec<ItemId>,
}

impl UnresolvedIds {
    fn note(&mut self, id: ItemId) {
        if self.seen.insert(id) {
            self.ids.push(id);
        }
    }
}

/// Builds [`SalvageOverview`]s from stored records.
#[derive(Clone)]
pub struct SalvageViewBuilder {
    source: Arc<dyn ItemDataSource>,
    max_in_flight: NonZeroUsize,
}

impl SalvageViewBuilder {
    /// `max_in_flight` bounds how many records are resolved at once; one
    /// resolves them sequentially.
    pub fn new(source: Arc<dyn ItemDataSource>, max_in_flight: NonZeroUsize) -> Self {
        Self {
            source,
            max_in_flight,
        }
    }

    /// Resolve every record and assemble the view. Lookup failures are
    /// logged and reported in [`SalvageOverview::unresolved`].
    pub async fn build(&self, records: &[SalvageRecord]) -> SalvageOverview {
        debug!(
            records = records.len(),
            max_in_flight = self.max_in_flight.get(),
            "building salvage overview"
        );
        let slots = ItemSlots::default();
        let shared = &slots;
        let this = self;
        stream::iter(records)
            .for_each_concurrent(self.max_in_flight.get(), move |record| async move {
                this.resolve(shared, record.item_id()).await;
                for material in record.materials() {
                    this.resolve(shared, material.item_id).await;
                }
            })
            .await;

        assemble(records, &slots.into_resolved())
    }

    async fn resolve(&self, slots: &ItemSlots, id: ItemId) {
        if !slots.claim(id) {
            return;
        }
        let slot = match self.source.fetch_item(id).await {
            Ok(item) => Slot::Resolved(item),
            Err(error) => {
                warn!(item_id = %id, %error, "item lookup failed; skipping");
                Slot::Failed
            }
        };
        slots.settle(id, slot);
    }
}

fn assemble(records: &[SalvageRecord], resolved: &HashMap<ItemId, ItemData>) -> SalvageOverview {
    let mut entries = Vec::with_capacity(records.len());
    let mut materials = Vec::new();
    let mut seen_materials = HashSet::new();
    let mut unresolved = UnresolvedIds::default();

    for record in records {
        let item = resolved.get(&record.item_id());
        if item.is_none() {
            unresolved.note(record.item_id());
        }

        let mut yields = Vec::with_capacity(record.materials().len());
        for entry in record.materials() {
            let Some(material) = resolved.get(&entry.item_id) else {
                unresolved.note(entry.item_id);
                continue;
            };
            if seen_materials.insert(entry.item_id) {
                materials.push(material.clone());
            }
            yields.push(MaterialYield {
                material: material.clone(),
                count: entry.count,
                salvage_count: record.salvage_count(),
            });
        }

        if let Some(item) = item {
            entries.push(SalvageEntryView {
                item: item.clone(),
                salvage_count: record.salvage_count(),
                yields,
            });
        }
    }

    SalvageOverview {
        entries,
        materials,
        unresolved: unresolved.ids,
    }
}
