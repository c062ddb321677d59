//! In-memory activity log
//!
//! Keeps the most recent operator actions in a bounded buffer shared by
//! every clone. Each entry is echoed to the browser console on wasm and to
//! `tracing` elsewhere.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::models::{ActivityAction, ActivityEntry};

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Default)]
struct Buffer {
    entries: VecDeque<ActivityEntry>,
    next_id: u64,
}

#[derive(Clone, Debug)]
pub struct ActivityLog {
    buffer: Arc<Mutex<Buffer>>,
    max_entries: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Buffer::default())),
            max_entries: max_entries.max(1),
        }
    }

    pub fn log_success(
        &self,
        actor: &str,
        action: ActivityAction,
        target_type: &str,
        target_id: &str,
        detail: Option<String>,
    ) {
        self.record(ActivityEntry::success(actor, action, target_type, target_id, detail));
    }

    pub fn log_failure(&self, actor: &str, action: ActivityAction, target_type: &str, target_id: &str, error: &str) {
        self.record(ActivityEntry::failure(actor, action, target_type, target_id, error));
    }

    /// Stores `entry` under the next sequence number, evicting the oldest
    /// entries beyond capacity.
    pub fn record(&self, mut entry: ActivityEntry) {
        let Ok(mut buffer) = self.buffer.lock() else {
            tracing::error!("activity log lock poisoned, dropping entry");
            return;
        };
        buffer.next_id += 1;
        entry.id = buffer.next_id;
        echo(&entry);
        buffer.entries.push_back(entry);
        while buffer.entries.len() > self.max_entries {
            buffer.entries.pop_front();
        }
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.buffer
            .lock()
            .map(|buffer| buffer.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Up to `count` entries, newest first.
    pub fn latest(&self, count: usize) -> Vec<ActivityEntry> {
        self.buffer
            .lock()
            .map(|buffer| buffer.entries.iter().rev().take(count).cloned().collect())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.buffer.lock().map(|buffer| buffer.entries.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.entries.clear();
        }
    }
}

fn echo(entry: &ActivityEntry) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&format!("Activity: {}", entry.description()).into());
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!(
            id = entry.id,
            action = %entry.action,
            target = %entry.target_type,
            success = entry.success,
            "activity: {}",
            entry.description()
        );
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[test]
    fn test_ids_increase_and_capacity_holds() {
        let log = ActivityLog::new(3);
        for index in 0..5 {
            log.log_success("admin", ActivityAction::Create, "Hotel", &format!("htl-{index}"), None);
        }
        let entries = log.entries();
        assert_eq!(log.count(), 3);
        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 4, 5]);
        assert_eq!(entries[0].target_id, "htl-2");
    }

    #[test]
    fn test_latest_is_newest_first() {
        let log = ActivityLog::default();
        log.log_success("admin", ActivityAction::Create, "Room", "rm-1", None);
        log.log_failure("admin", ActivityAction::Delete, "Room", "rm-2", "not found");
        let latest = log.latest(5);
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].target_id, "rm-2");
        assert!(!latest[0].success);
        assert_eq!(log.latest(1).len(), 1);
    }

    #[test]
    fn test_clones_share_buffer() {
        let log = ActivityLog::default();
        let other = log.clone();
        other.log_success("admin", ActivityAction::ConfigUpdate, "Config", "console", None);
        assert_eq!(log.count(), 1);
        log.clear();
        assert_eq!(other.count(), 0);
    }

    #[test]
    #[traced_test]
    fn test_entries_are_traced() {
        let log = ActivityLog::default();
        log.log_success("admin", ActivityAction::Update, "Coupon", "cpn-001", None);
        assert!(logs_contain("admin 更新 优惠券 cpn-001"));
    }
}
