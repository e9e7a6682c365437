//! Chat history ring

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::result::WorkflowResult;

/// Number of entries returned by [`ChatHistory::recent`]
pub const HISTORY_WINDOW: usize = 50;

/// One generation request and its outcome
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub user_request: String,
    pub result: WorkflowResult,
}

struct Ring {
    entries: VecDeque<HistoryEntry>,
    next_id: u64,
}

/// Bounded in-memory history, evicting the oldest entry when full
pub struct ChatHistory {
    ring: RwLock<Ring>,
    capacity: usize,
}

impl ChatHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ring: RwLock::new(Ring {
                entries: VecDeque::with_capacity(capacity.min(1024)),
                next_id: 0,
            }),
            capacity,
        }
    }

    /// Append an entry and return its id
    pub fn record(&self, user_request: &str, result: &WorkflowResult) -> u64 {
        let mut ring = self.ring.write().unwrap_or_else(|e| e.into_inner());

        if ring.entries.len() >= self.capacity {
            ring.entries.pop_front();
        }

        let id = ring.next_id;
        ring.next_id += 1;
        ring.entries.push_back(HistoryEntry {
            id,
            timestamp: Utc::now(),
            user_request: user_request.to_string(),
            result: result.clone(),
        });
        id
    }

    /// The last [`HISTORY_WINDOW`] entries, oldest first
    pub fn recent(&self) -> Vec<HistoryEntry> {
        self.window(HISTORY_WINDOW)
    }

    /// The last `n` entries, oldest first
    pub fn window(&self, n: usize) -> Vec<HistoryEntry> {
        let ring = self.ring.read().unwrap_or_else(|e| e.into_inner());
        let skip = ring.entries.len().saturating_sub(n);
        ring.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        let ring = self.ring.read().unwrap_or_else(|e| e.into_inner());
        ring.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
