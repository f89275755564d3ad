//! Shared crawl state: the visited set and inbound link counts
//!
//! One exclusive lock guards the whole map; every critical section is a
//! single hash lookup.

use crate::url::NormalizedUrl;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Mapping from normalized URL to inbound link count, safe to share across tasks
///
/// A key's presence is also its visited mark: once a page is recorded, as a
/// visit or as a link target, no task fetches it again. Keys are never
/// removed and counts only grow.
#[derive(Debug, Default)]
pub struct CrawlState {
    pages: Mutex<HashMap<NormalizedUrl, usize>>,
}

impl CrawlState {
    /// Creates an empty crawl state
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NormalizedUrl, usize>> {
        // Every mutation is a single insert or increment; a poisoned map is
        // still consistent.
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims `url` for fetching
    ///
    /// Inserts the key with count 1 and returns true if it was absent.
    /// Returns false if the key is already present, whether it got there
    /// through a visit or through [`record_link`](Self::record_link).
    pub fn record_visit_if_new(&self, url: &NormalizedUrl) -> bool {
        let mut pages = self.lock();
        if pages.contains_key(url) {
            return false;
        }
        pages.insert(url.clone(), 1);
        true
    }

    /// Counts one more internal link pointing at `url`
    ///
    /// Creates the key with count 1 if this is its first sighting.
    pub fn record_link(&self, url: &NormalizedUrl) {
        *self.lock().entry(url.clone()).or_insert(0) += 1;
    }

    /// Number of distinct keys recorded so far
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    /// Copy of the current counts, for reporting
    pub fn snapshot(&self) -> HashMap<NormalizedUrl, usize> {
        self.lock().clone()
    }
}
