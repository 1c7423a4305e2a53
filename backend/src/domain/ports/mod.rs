//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`ItemDataSource`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! domain services and consumed by the HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod item_catalogue_query;
mod item_data_source;
mod material_catalogue_command;
mod material_catalogue_query;
mod material_catalogue_repository;
mod salvage_command;
mod salvage_query;
mod salvage_repository;

#[cfg(test)]
pub use item_catalogue_query::MockItemCatalogueQuery;
pub use item_catalogue_query::ItemCatalogueQuery;
#[cfg(test)]
pub use item_data_source::MockItemDataSource;
pub use item_data_source::{FixtureItemDataSource, ItemDataSource, ItemDataSourceError};
#[cfg(test)]
pub use material_catalogue_command::MockMaterialCatalogueCommand;
pub use material_catalogue_command::MaterialCatalogueCommand;
#[cfg(test)]
pub use material_catalogue_query::MockMaterialCatalogueQuery;
pub use material_catalogue_query::MaterialCatalogueQuery;
#[cfg(test)]
pub use material_catalogue_repository::MockMaterialCatalogueRepository;
pub use material_catalogue_repository::{
    MaterialCatalogueRepository, MaterialCatalogueRepositoryError,
};
#[cfg(test)]
pub use salvage_command::MockSalvageCommand;
pub use salvage_command::SalvageCommand;
#[cfg(test)]
pub use salvage_query::MockSalvageQuery;
pub use salvage_query::SalvageQuery;
#[cfg(test)]
pub use salvage_repository::MockSalvageRepository;
pub use salvage_repository::{SalvageRepository, SalvageRepositoryError};
