use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::platform::client::PlatformClient;
use crate::domain::platform::endpoint::{ApiEndpoint, SearchResource};
use crate::domain::search::pager::PageSource;
use crate::error::Result;

/// Pages through one listing endpoint: `GET <resource>?search=&limit=&offset=&scope_id=`.
#[derive(Debug)]
pub struct PlatformSearch<T> {
    client: PlatformClient,
    resource: SearchResource,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PlatformSearch<T> {
    pub fn new(client: PlatformClient, resource: SearchResource) -> Self {
        PlatformSearch { client, resource, _marker: PhantomData }
    }
}

#[async_trait]
impl<T: DeserializeOwned + Send + 'static> PageSource<T> for PlatformSearch<T> {
    async fn fetch_page(&self, offset: usize, search_term: &str, page_size: usize, scope_id: Option<&str>) -> Result<Vec<T>> {
        let mut query = vec![("limit".to_string(), page_size.to_string()), ("offset".to_string(), offset.to_string())];
        if !search_term.is_empty() {
            query.push(("search".to_string(), search_term.to_string()));
        }
        if let Some(scope_id) = scope_id {
            query.push(("scope_id".to_string(), scope_id.to_string()));
        }

        let resource = self.resource;
        self.client
            .call_with(&ApiEndpoint::Search(resource), query, None, |body| {
                // Anything but a list ends the listing, same as an empty page.
                let Value::Array(entries) = body else {
                    log::warn!("Listing '{}' at offset {} did not return a list; treating it as the last page.", resource.logical_key(), offset);
                    return Ok(Vec::new());
                };
                entries.into_iter().map(|entry| serde_json::from_value(entry).map_err(Into::into)).collect()
            })
            .await
    }
}
