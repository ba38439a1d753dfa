//! Wire types for the backend's push-event streams and their normalization
//! into store actions.

pub mod adapter;
pub mod messages;

pub use adapter::{directory_actions, normalize, remote_actions};
pub use messages::{DirectoryEvent, PushEvent, RemoteEvent};
