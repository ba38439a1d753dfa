use std::collections::BTreeSet;

use crate::directory::ServiceId;

/// Favorited service ids. Membership only changes by toggling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<ServiceId>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership. Returns `true` if the id is now a favorite.
    pub fn toggle(&mut self, id: ServiceId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: ServiceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
