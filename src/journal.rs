//! In-memory journal of spy output
//!
//! The spy always emits through `tracing`; a journal additionally captures
//! the emitted lines in a bounded ring buffer so tests and debug overlays
//! can observe exactly what was logged. Older entries are discarded when
//! capacity is reached.
//!
//! Interception runs by shared reference, so the buffer sits behind a
//! `RefCell`. The dispatch model is single-threaded and synchronous.

use std::cell::RefCell;
use std::collections::VecDeque;

/// Configuration for the journal ring buffer.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Maximum number of lines to keep.
    pub capacity: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}

impl JournalConfig {
    /// Create with a custom capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

/// A captured output line.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    /// The emitted line, exactly as logged.
    pub line: String,
    /// Sequence number for ordering across evictions.
    pub sequence: u64,
}

/// Bounded ring buffer of emitted lines.
#[derive(Debug, Default)]
pub struct Journal {
    state: RefCell<JournalState>,
}

#[derive(Debug)]
struct JournalState {
    entries: VecDeque<JournalEntry>,
    next_sequence: u64,
    capacity: usize,
}

impl Default for JournalState {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            next_sequence: 0,
            capacity: JournalConfig::default().capacity,
        }
    }
}

impl Journal {
    /// Create a journal with the given configuration.
    pub fn new(config: JournalConfig) -> Self {
        Self {
            state: RefCell::new(JournalState {
                entries: VecDeque::with_capacity(config.capacity),
                next_sequence: 0,
                capacity: config.capacity,
            }),
        }
    }

    /// Record a line, evicting the oldest entry at capacity.
    pub fn record(&self, line: String) {
        let mut state = self.state.borrow_mut();
        let sequence = state.next_sequence;
        state.next_sequence += 1;

        if state.entries.len() >= state.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(JournalEntry { line, sequence });
    }

    /// All captured entries, oldest first.
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.state.borrow().entries.iter().cloned().collect()
    }

    /// Captured lines only, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.state
            .borrow()
            .entries
            .iter()
            .map(|e| e.line.clone())
            .collect()
    }

    /// The most recent `count` entries, newest first.
    pub fn recent(&self, count: usize) -> Vec<JournalEntry> {
        self.state
            .borrow()
            .entries
            .iter()
            .rev()
            .take(count)
            .cloned()
            .collect()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().entries.is_empty()
    }

    /// Discard all entries. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.state.borrow_mut().entries.clear();
    }
}
