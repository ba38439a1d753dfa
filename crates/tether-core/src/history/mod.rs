//! Recent connection history and favorites.

pub mod favorites;
pub mod recent;

pub use favorites::Favorites;
pub use recent::{RecentConnection, RecentConnections};
