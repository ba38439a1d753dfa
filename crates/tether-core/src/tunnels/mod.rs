//! Client-side bookkeeping for tunnel processes spawned by the backend.

pub mod errors;
pub mod manager;
pub mod types;

pub use errors::{StopAllError, TunnelError};
pub use manager::TunnelRegistry;
pub use types::{Tunnel, TunnelHandle, TunnelId, TunnelStatus};
