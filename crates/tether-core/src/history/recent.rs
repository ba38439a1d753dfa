use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::defaults::default_recent_limit;
use crate::directory::{Protocol, ServerId, ServiceId};

/// One successful connection, recorded client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentConnection {
    pub id: Uuid,
    pub name: String,
    pub protocol: Protocol,
    pub timestamp: DateTime<Utc>,
    pub service_id: ServiceId,
    pub server_id: ServerId,
}

impl RecentConnection {
    pub fn new(
        name: impl Into<String>,
        protocol: Protocol,
        service_id: ServiceId,
        server_id: ServerId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            protocol,
            timestamp: Utc::now(),
            service_id,
            server_id,
        }
    }
}

const INITIAL_CAPACITY: usize = 16;

/// Bounded most-recent-first connection history.
#[derive(Debug, Clone)]
pub struct RecentConnections {
    entries: VecDeque<RecentConnection>,
    limit: usize,
}

impl Default for RecentConnections {
    fn default() -> Self {
        Self::with_limit(default_recent_limit())
    }
}

impl RecentConnections {
    /// A limit of zero is raised to one.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit.min(INITIAL_CAPACITY)),
            limit,
        }
    }

    /// Push to the front, evicting the oldest entry past the limit.
    pub fn push(&mut self, entry: RecentConnection) -> Option<RecentConnection> {
        self.entries.push_front(entry);
        if self.entries.len() > self.limit {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentConnection> {
        self.entries.iter()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
