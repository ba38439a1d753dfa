//! Applies the backend's push-event streams to the store.

pub mod pump;

pub use pump::{EventPump, PumpStats};
