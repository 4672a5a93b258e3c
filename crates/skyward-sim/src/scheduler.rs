//! Deferred actions processed at tick boundaries.
//!
//! Replaces wall-clock timers: an action fires on the first tick boundary at
//! which simulation time has reached its due time. Nothing is ever cancelled.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Work the engine performs when a timer comes due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Put the aircraft back at the spawn pose.
    ResetAircraft,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    due_secs: f64,
    /// Insertion sequence; keeps equal due times in FIFO order.
    seq: u64,
    action: ScheduledAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_secs
            .total_cmp(&self.due_secs)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Priority queue of actions keyed by simulation time.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_secs: f64, action: ScheduledAction) {
        self.queue.push(Entry {
            due_secs,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Remove and return every action due at or before `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.peek() {
            if entry.due_secs > now {
                break;
            }
            if let Some(entry) = self.queue.pop() {
                due.push(entry.action);
            }
        }
        due
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending action.
    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|entry| entry.due_secs)
    }
}
