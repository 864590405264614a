use std::collections::HashMap;

use crate::domain::search::cursor::{PageCursor, cursor_after};
use crate::domain::search::query_key::SearchQueryKey;

/// Ticket for one page fetch. Hand it back to [`PaginatedSearchCache::merge_page`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub key: SearchQueryKey,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The query changed while the page was in flight.
    Superseded,
    /// The page does not start where the entry currently ends.
    OutOfOrder { expected: Option<usize>, received: usize },
    /// No fetch was issued for this page.
    NotRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged { next: PageCursor },
    Discarded(DiscardReason),
}

#[derive(Debug)]
struct CacheEntry<T> {
    pages: Vec<Vec<T>>,
    /// Stored, not derived from `pages`, so a late or repeated page can never shift it.
    next: PageCursor,
    in_flight: Option<usize>,
}

impl<T> CacheEntry<T> {
    fn new() -> Self {
        CacheEntry { pages: Vec::new(), next: PageCursor::Offset(0), in_flight: None }
    }
}

/// Pages of filtered listings, keyed by [`SearchQueryKey`].
///
/// Only the active key accepts pages. Pages are merged strictly in offset order and each entry
/// remembers where the next page starts.
#[derive(Debug)]
pub struct PaginatedSearchCache<T> {
    entries: HashMap<SearchQueryKey, CacheEntry<T>>,
    active: Option<SearchQueryKey>,
}

impl<T> Default for PaginatedSearchCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PaginatedSearchCache<T> {
    pub fn new() -> Self {
        PaginatedSearchCache { entries: HashMap::new(), active: None }
    }

    /// Makes `key` the current query. Returns `true` when this replaced a different key.
    ///
    /// Fetches still running for the previous key are discarded when they come back; pages it
    /// already merged stay cached.
    pub fn activate(&mut self, key: SearchQueryKey) -> bool {
        if self.active.as_ref() == Some(&key) {
            return false;
        }

        if let Some(previous) = self.active.take() {
            log::debug!("Search query changed from {} to {}.", previous, key);
            if let Some(entry) = self.entries.get_mut(&previous) {
                entry.in_flight = None;
            }
        }

        self.entries.entry(key.clone()).or_insert_with(CacheEntry::new);
        self.active = Some(key);
        true
    }

    pub fn active_key(&self) -> Option<&SearchQueryKey> {
        self.active.as_ref()
    }

    /// Issues the next fetch ticket for the active query.
    ///
    /// `None` when nothing is active, the entry is exhausted, or its next page is already in flight.
    pub fn next_request(&mut self) -> Option<PageRequest> {
        let key = self.active.as_ref()?;
        let entry = self.entries.get_mut(key)?;

        let offset = entry.next.offset()?;
        if entry.in_flight.is_some() {
            return None;
        }

        entry.in_flight = Some(offset);
        Some(PageRequest { key: key.clone(), offset })
    }

    pub fn merge_page(&mut self, request: &PageRequest, page: Vec<T>) -> MergeOutcome {
        if self.active.as_ref() != Some(&request.key) {
            log::debug!("Dropping page at offset {} for superseded query {}.", request.offset, request.key);
            return MergeOutcome::Discarded(DiscardReason::Superseded);
        }

        let Some(entry) = self.entries.get_mut(&request.key) else {
            return MergeOutcome::Discarded(DiscardReason::NotRequested);
        };

        if entry.next.offset() != Some(request.offset) {
            log::debug!("Dropping out-of-order page at offset {} for {} (expected {:?}).", request.offset, request.key, entry.next.offset());
            return MergeOutcome::Discarded(DiscardReason::OutOfOrder { expected: entry.next.offset(), received: request.offset });
        }

        if entry.in_flight != Some(request.offset) {
            return MergeOutcome::Discarded(DiscardReason::NotRequested);
        }

        let next = cursor_after(request.offset, page.as_slice(), request.key.page_size);
        entry.pages.push(page);
        entry.next = next;
        entry.in_flight = None;

        MergeOutcome::Merged { next }
    }

    /// Releases a ticket whose fetch failed so the same page can be requested again.
    pub fn abandon(&mut self, request: &PageRequest) {
        if let Some(entry) = self.entries.get_mut(&request.key) {
            if entry.in_flight == Some(request.offset) {
                entry.in_flight = None;
            }
        }
    }

    /// Merged results of the active query, in fetch order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.active_entry().into_iter().flat_map(|entry| entry.pages.iter().flatten())
    }

    pub fn pages(&self) -> &[Vec<T>] {
        self.active_entry().map(|entry| entry.pages.as_slice()).unwrap_or(&[])
    }

    /// Next cursor of the active query; `Terminal` when nothing is active.
    pub fn cursor(&self) -> PageCursor {
        self.active_entry().map(|entry| entry.next).unwrap_or(PageCursor::Terminal)
    }

    pub fn has_more(&self) -> bool {
        !self.cursor().is_terminal()
    }

    pub fn is_loading(&self) -> bool {
        self.active_entry().is_some_and(|entry| entry.in_flight.is_some())
    }

    /// Drops the cached pages of `key`. An active key restarts from offset 0.
    pub fn invalidate(&mut self, key: &SearchQueryKey) {
        if self.entries.remove(key).is_some() && self.active.as_ref() == Some(key) {
            self.entries.insert(key.clone(), CacheEntry::new());
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        if let Some(key) = &self.active {
            self.entries.insert(key.clone(), CacheEntry::new());
        }
    }

    fn active_entry(&self) -> Option<&CacheEntry<T>> {
        self.active.as_ref().and_then(|key| self.entries.get(key))
    }
}
