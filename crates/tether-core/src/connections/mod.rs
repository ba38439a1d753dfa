//! Set of services the backend (or an optimistic local action) considers connected.

pub mod errors;
pub mod tracker;

pub use errors::ConnectionError;
pub use tracker::{ConnectionTracker, OptimisticToken};
