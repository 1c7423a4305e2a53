//! gw2spidy outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `ItemDataSource`
//! port.

mod dto;
mod http_source;

pub use http_source::ItemApiHttpSource;
