use std::{cmp::Ordering, collections::BinaryHeap};

use serde::{Deserialize, Serialize};

use crate::types::{PatientId, Severity};

/// Patient waiting for emergency service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyEntry {
    /// Waiting patient.
    pub patient_id: PatientId,
    /// Arrival severity; lower is served first.
    pub severity: Severity,
}

#[derive(Debug, PartialEq, Eq)]
struct Queued {
    entry: EmergencyEntry,
    arrival: u64,
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    // BinaryHeap pops the greatest element: lowest severity wins, then the
    // earliest arrival.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .severity
            .cmp(&self.entry.severity)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

/// Unbounded min-severity queue. Equal severities leave in arrival order.
#[derive(Debug, Default)]
pub struct EmergencyQueue {
    heap: BinaryHeap<Queued>,
    next_arrival: u64,
}

impl EmergencyQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a waiting patient in O(log n).
    pub fn insert(&mut self, patient_id: PatientId, severity: Severity) {
        let arrival = self.next_arrival;
        self.next_arrival += 1;
        self.heap.push(Queued {
            entry: EmergencyEntry {
                patient_id,
                severity,
            },
            arrival,
        });
    }

    /// Removes the most critical entry.
    pub fn extract_min(&mut self) -> Option<EmergencyEntry> {
        self.heap.pop().map(|q| q.entry)
    }

    /// Most critical entry, left in place.
    pub fn peek_min(&self) -> Option<&EmergencyEntry> {
        self.heap.peek().map(|q| &q.entry)
    }

    /// Number of waiting entries.
    pub fn size(&self) -> usize {
        self.heap.len()
    }

    /// True when nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
