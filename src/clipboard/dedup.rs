//! Repeat-detection suppression for clipboard images.
//!
//! The gate polls every couple of seconds, and a screenshot stays on the
//! clipboard until something replaces it, so the same image is observed
//! many times. Each distinct image may prompt at most once per retention
//! window. Checking and recording are separate: a detection discarded
//! before prompting (no AI terminal around) is never recorded, so it can
//! still prompt once a terminal shows up.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

/// Default retention: a repeat of the same image within 60 seconds is
/// suppressed.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Hex digest of an image's raw bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        use std::fmt::Write;
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Content-hash → last-seen map with a bounded retention window.
///
/// Entries are purged lazily on each lookup, so a hash read as "recent" is
/// never older than the window.
#[derive(Debug)]
pub struct DedupWindow {
    entries: HashMap<String, Instant>,
    window: Duration,
}

impl DedupWindow {
    pub fn new(window: Duration) -> Self {
        DedupWindow {
            entries: HashMap::new(),
            window,
        }
    }

    /// Was this hash recorded within the window, as of `now`?
    pub fn seen_within_at(&mut self, hash: &str, now: Instant) -> bool {
        self.purge(now);
        self.entries.contains_key(hash)
    }

    pub fn seen_within(&mut self, hash: &str) -> bool {
        self.seen_within_at(hash, Instant::now())
    }

    /// Record a hash at `now` (refreshing any older sighting).
    pub fn record_at(&mut self, hash: &str, now: Instant) {
        self.entries.insert(hash.to_string(), now);
    }

    pub fn record(&mut self, hash: &str) {
        self.record_at(hash, Instant::now());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn purge(&mut self, now: Instant) {
        let window = self.window;
        self.entries
            .retain(|_, seen| now.duration_since(*seen) <= window);
    }
}

impl Default for DedupWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecorded_hash_is_not_seen() {
        let mut window = DedupWindow::default();
        assert!(!window.seen_within("abc123"));
    }

    #[test]
    fn repeat_within_window_is_suppressed() {
        let mut window = DedupWindow::default();
        let t0 = Instant::now();
        window.record_at("abc123", t0);
        assert!(window.seen_within_at("abc123", t0 + Duration::from_secs(30)));
    }

    #[test]
    fn repeat_after_window_prompts_again() {
        let mut window = DedupWindow::default();
        let t0 = Instant::now();
        window.record_at("abc123", t0);
        assert!(!window.seen_within_at("abc123", t0 + Duration::from_secs(61)));
    }

    #[test]
    fn entry_age_never_exceeds_window_when_read_as_recent() {
        let mut window = DedupWindow::new(Duration::from_secs(60));
        let t0 = Instant::now();
        window.record_at("abc123", t0);
        // Exactly at the boundary the entry is still within the window.
        assert!(window.seen_within_at("abc123", t0 + Duration::from_secs(60)));
        assert!(!window.seen_within_at("abc123", t0 + Duration::from_secs(60) + Duration::from_millis(1)));
    }

    #[test]
    fn distinct_hashes_are_independent() {
        let mut window = DedupWindow::default();
        let t0 = Instant::now();
        window.record_at("abc123", t0);
        assert!(!window.seen_within_at("def456", t0 + Duration::from_secs(1)));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut window = DedupWindow::default();
        window.record("abc123");
        window.clear();
        assert!(!window.seen_within("abc123"));
    }

    #[test]
    fn content_hash_is_stable_and_distinguishes() {
        assert_eq!(content_hash(b"png-bytes"), content_hash(b"png-bytes"));
        assert_ne!(content_hash(b"png-bytes"), content_hash(b"other-bytes"));
        assert_eq!(content_hash(b"").len(), 64);
    }
}
