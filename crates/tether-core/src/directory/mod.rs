//! Directory of remote endpoints: companies, their servers, and the services
//! each server exposes.
//!
//! The backend is the only source of topology. The store replaces the whole
//! tree on every snapshot and layers client-side display state (expansion,
//! selection) and in-flight deletion tombstones on top.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::DirectoryError;
pub use store::{DirectoryNode, DirectoryStore};
pub use types::{
    Company, CompanyId, NewService, Protocol, Server, ServerId, Service, ServiceId, ServicePatch,
};
