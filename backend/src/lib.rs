//! Salvage ledger library: domain model, ports, and adapters for recording
//! Guild Wars 2 salvage yields and pricing them against the trading post.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
