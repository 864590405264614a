use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::search::cache::{MergeOutcome, PaginatedSearchCache};
use crate::domain::search::query_key::{SearchQueryKey, compute_key};
use crate::error::Result;

/// Something that can return one page of a filtered listing.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, offset: usize, search_term: &str, page_size: usize, scope_id: Option<&str>) -> Result<Vec<T>>;
}

/// Drives a [`PageSource`] against a [`PaginatedSearchCache`] for one logical listing.
pub struct SearchPager<T> {
    logical_key: String,
    page_size: usize,
    source: Arc<dyn PageSource<T>>,
    cache: PaginatedSearchCache<T>,
}

impl<T: Send> SearchPager<T> {
    pub fn new(logical_key: impl Into<String>, page_size: usize, source: Arc<dyn PageSource<T>>) -> Self {
        SearchPager { logical_key: logical_key.into(), page_size, source, cache: PaginatedSearchCache::new() }
    }

    /// Switches to a new (already debounced) search term and scope.
    pub fn set_query(&mut self, search_term: &str, scope_id: Option<&str>) -> SearchQueryKey {
        let key = compute_key(&self.logical_key, search_term, self.page_size, scope_id);
        self.cache.activate(key.clone());
        key
    }

    /// Fetches the next page of the active query.
    ///
    /// `Ok(None)` when there is nothing to fetch. A failed fetch releases its ticket and the error
    /// is returned as-is.
    pub async fn load_more(&mut self) -> Result<Option<MergeOutcome>> {
        let Some(request) = self.cache.next_request() else {
            return Ok(None);
        };

        let fetched = self
            .source
            .fetch_page(request.offset, &request.key.search_term, request.key.page_size, request.key.scope_id.as_deref())
            .await;

        match fetched {
            Ok(page) => {
                log::debug!("Fetched {} entries at offset {} for {}.", page.len(), request.offset, request.key);
                Ok(Some(self.cache.merge_page(&request, page)))
            }
            Err(e) => {
                self.cache.abandon(&request);
                Err(e)
            }
        }
    }

    /// Keeps fetching until the active query is exhausted or `max_pages` pages were loaded.
    pub async fn load_all(&mut self, max_pages: Option<usize>) -> Result<usize> {
        let mut loaded = 0;
        while max_pages.is_none_or(|max| loaded < max) {
            match self.load_more().await? {
                Some(MergeOutcome::Merged { .. }) => loaded += 1,
                Some(MergeOutcome::Discarded(_)) | None => break,
            }
        }
        Ok(loaded)
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.cache.items()
    }

    pub fn has_more(&self) -> bool {
        self.cache.has_more()
    }

    pub fn cache(&self) -> &PaginatedSearchCache<T> {
        &self.cache
    }
}
