//! Bounded history of dispatched sensor events.
//!
//! The controller records every event it reacts to. Only the most recent
//! records are retained; per-event totals cover the whole run.

use super::event::SensorEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

/// Default number of records kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// One dispatched event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: SensorEvent,
    /// The raw line the event was classified from
    pub line: String,
    pub timestamp: DateTime<Utc>,
}

/// Ring of recent [`EventRecord`]s plus lifetime counts.
///
/// # Example
///
/// ```rust
/// use pythia::core::{EventHistory, SensorEvent};
///
/// let mut history = EventHistory::with_capacity(2);
/// history.record(SensorEvent::Near, "isNear");
/// history.record(SensorEvent::Talking, "talking");
/// history.record(SensorEvent::Near, "isNear");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.count(SensorEvent::Near), 2);
/// assert_eq!(history.total(), 3);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventHistory {
    records: VecDeque<EventRecord>,
    capacity: usize,
    counts: BTreeMap<SensorEvent, u64>,
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl EventHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history retaining at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            counts: BTreeMap::new(),
        }
    }

    /// Record an event, evicting the oldest record when full.
    pub fn record(&mut self, event: SensorEvent, line: impl Into<String>) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(EventRecord {
            event,
            line: line.into(),
            timestamp: Utc::now(),
        });
        *self.counts.entry(event).or_insert(0) += 1;
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&EventRecord> {
        self.records.back()
    }

    /// Number of times `event` was recorded over the whole run.
    pub fn count(&self, event: SensorEvent) -> u64 {
        self.counts.get(&event).copied().unwrap_or(0)
    }

    /// Total number of events recorded over the whole run.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Time spanned by the retained records.
    ///
    /// Returns `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_history_is_empty() {
        let history = EventHistory::new();

        assert!(history.is_empty());
        assert_eq!(history.total(), 0);
        assert!(history.last().is_none());
        assert!(history.duration().is_none());
    }

    #[test]
    fn records_preserve_order() {
        let mut history = EventHistory::new();
        history.record(SensorEvent::Near, "isNear");
        history.record(SensorEvent::Talking, "talking");
        history.record(SensorEvent::Silence, "silence");

        let events: Vec<_> = history.records().map(|r| r.event).collect();
        assert_eq!(
            events,
            vec![SensorEvent::Near, SensorEvent::Talking, SensorEvent::Silence]
        );
        assert_eq!(history.last().map(|r| r.line.as_str()), Some("silence"));
    }

    #[test]
    fn capacity_evicts_oldest_but_keeps_counts() {
        let mut history = EventHistory::with_capacity(2);
        history.record(SensorEvent::Near, "a");
        history.record(SensorEvent::Near, "b");
        history.record(SensorEvent::Silence, "c");

        assert_eq!(history.len(), 2);
        assert_eq!(history.records().next().map(|r| r.line.as_str()), Some("b"));
        assert_eq!(history.count(SensorEvent::Near), 2);
        assert_eq!(history.count(SensorEvent::Silence), 1);
        assert_eq!(history.count(SensorEvent::Talking), 0);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = EventHistory::with_capacity(0);
        history.record(SensorEvent::Near, "a");
        history.record(SensorEvent::Talking, "b");

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|r| r.event), Some(SensorEvent::Talking));
    }

    #[test]
    fn duration_is_available_after_record() {
        let mut history = EventHistory::new();
        history.record(SensorEvent::Near, "isNear");

        assert!(history.duration().is_some());
    }

    #[test]
    fn history_serializes_to_json() {
        let mut history = EventHistory::new();
        history.record(SensorEvent::Talking, "talking");

        let json = serde_json::to_string(&history).unwrap();
        let restored: EventHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.count(SensorEvent::Talking), 1);
        assert_eq!(restored.len(), 1);
    }
}
