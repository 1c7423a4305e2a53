//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both internal) and domain records. Connections come from a
//! shared `bb8` pool through `diesel-async`; failures are mapped to the
//! owning port's error type.
//!
//! # Example
//!
//! ```ignore
//! use salvage_ledger::outbound::persistence::{DbPool, DieselSalvageRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/salvage")).await?;
//! let repo = DieselSalvageRepository::new(pool);
//! ```

mod diesel_material_catalogue_repository;
mod diesel_salvage_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_material_catalogue_repository::DieselMaterialCatalogueRepository;
pub use diesel_salvage_repository::DieselSalvageRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
