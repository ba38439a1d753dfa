//! The single store holding all synchronized client state.
//!
//! Every synchronous mutation is an [`Action`] dispatched through the
//! [`Store`] trait. Dispatch reports [`Change`]s describing what happened.
//! [`SharedStore`] is the cloneable handle injected into the sync pump and
//! the client.

pub mod dispatch;
pub mod errors;
pub mod events;
pub mod shared;
pub mod store;
pub mod types;

pub use dispatch::SyncState;
pub use errors::DispatchError;
pub use events::Change;
pub use shared::SharedStore;
pub use store::Store;
pub use types::Action;
