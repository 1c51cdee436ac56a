//! Operation journal
//!
//! Bounded, append-only record of every operation the filesystem served,
//! exposed read-only as a regular file inside the mount.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Journal configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalConfig {
    /// Expose the journal inside the filesystem (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Path of the journal file; must be a top-level path
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum journal size in bytes
    #[serde(default = "default_capacity")]
    pub capacity_bytes: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/log_file".to_string()
}

fn default_capacity() -> usize {
    100_000
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
            capacity_bytes: default_capacity(),
        }
    }
}

/// Append-only text journal with a hard size cap
#[derive(Debug)]
pub struct Journal {
    text: Mutex<String>,
    capacity: usize,
    dropped: AtomicU64,
}

impl Journal {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: Mutex::new(String::new()),
            capacity,
            dropped: AtomicU64::new(0),
        }
    }

    /// Record `op<TAB>path`
    pub fn record(&self, op: &str, path: &str) {
        self.append(format!("{}\t{}\n", op, path));
    }

    /// Record `op<TAB>path<TAB>detail`
    pub fn record_detail(&self, op: &str, path: &str, detail: &str) {
        self.append(format!("{}\t{}\t{}\n", op, path, detail));
    }

    fn append(&self, line: String) {
        let mut text = self.text.lock();
        if text.len() + line.len() > self.capacity {
            // Warn once, on the first dropped line.
            if self.dropped.fetch_add(1, Ordering::Relaxed) == 0 {
                warn!(capacity = self.capacity, "Journal full, dropping further entries");
            }
            return;
        }
        text.push_str(&line);
    }

    pub fn len(&self) -> usize {
        self.text.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.lock().is_empty()
    }

    /// Number of entries that did not fit
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Up to `size` bytes starting at `offset`
    pub fn read_at(&self, offset: usize, size: usize) -> Vec<u8> {
        let text = self.text.lock();
        let bytes = text.as_bytes();
        if offset >= bytes.len() {
            return Vec::new();
        }
        let end = offset.saturating_add(size).min(bytes.len());
        bytes[offset..end].to_vec()
    }

    pub fn contents(&self) -> String {
        self.text.lock().clone()
    }
}
