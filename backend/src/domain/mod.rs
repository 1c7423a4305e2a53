//! Domain types, services, and ports.
//!
//! Public surface:
//! - [`ItemId`]: canonical game item identifier, parsed at every boundary.
//! - [`SalvageRecord`] / [`SalvageSubmission`]: stored salvage history and
//!   validated form input, with the merge rule between them.
//! - [`ItemData`], [`KnownMaterial`], [`Coins`]: item metadata and prices.
//! - [`SalvageViewBuilder`] / [`SalvageOverview`]: aggregated view model.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod aggregation;
pub mod coins;
pub mod error;
pub mod item;
pub mod item_catalogue_service;
pub mod item_id;
pub mod material_catalogue_service;
pub mod ports;
pub mod salvage;
pub mod salvage_service;
pub mod trace_id;

pub use self::aggregation::{
    MaterialYield, SalvageEntryView, SalvageOverview, SalvageViewBuilder,
};
pub use self::coins::{Coins, Denomination};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::item::{
    ItemCategory, ItemData, ItemListing, ItemPricing, ItemSubType, ItemType, KnownMaterial,
    KnownMaterialValidationError, Rarity,
};
pub use self::item_catalogue_service::ItemCatalogueService;
pub use self::item_id::{ItemId, ItemIdValidationError};
pub use self::material_catalogue_service::MaterialCatalogueService;
pub use self::salvage::{
    MaterialEntry, SalvageRecord, SalvageSubmission, SalvageValidationError,
};
pub use self::salvage_service::SalvageLedgerService;
pub use self::trace_id::TraceId;
