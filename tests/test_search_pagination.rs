
use std::sync::Arc;

use dash_orchestration::Dashboard;
use dash_orchestration::config::ClientConfig;
use dash_orchestration::api::config_dto::ClientConfigDto;
use dash_orchestration::domain::{
    context::{OperationContext, run_scoped},
    platform::{PlatformSearch, SearchResource},
    search::{DiscardReason, MergeOutcome, PageCursor, PageSource, PaginatedSearchCache, SearchPager, compute_key},
};
use dash_orchestration::error::Error;
use serde::Deserialize;
use serde_json::{Value, json};
use transport_mock::{MockAnswer, MockTransport, query_value};

#[derive(Debug, Deserialize, PartialEq)]
struct WorkflowSummary {
    id: String,
    name: String,
}

fn workflows(range: std::ops::Range<usize>) -> Value {
    Value::Array(range.map(|i| json!({ "id": format!("wf_{i}"), "name": format!("Workflow {i}"), "pinned": false })).collect())
}

fn dashboard(transport: &MockTransport, page_size: usize) -> Dashboard {
    let dto = ClientConfigDto { api_url: Some("http://platform.test".into()), page_size: Some(page_size), ..Default::default() };
    let config = ClientConfig::from_dto(dto, |_| None).unwrap();
    Dashboard::with_client(config, transport.client())
}

#[tokio::test]
async fn test_pages_are_requested_by_offset() {
    let transport = MockTransport::new();
    transport.answer("workflows", MockAnswer::Json(workflows(0..20)));
    transport.answer("workflows", MockAnswer::Json(workflows(20..40)));
    transport.answer("workflows", MockAnswer::Json(workflows(40..47)));

    let mut pager: SearchPager<WorkflowSummary> = dashboard(&transport, 20).search(SearchResource::Workflows);
    pager.set_query("flux", Some("org_1"));

    assert_eq!(pager.load_all(None).await.unwrap(), 3);
    assert!(!pager.has_more());

    let names: Vec<_> = pager.items().map(|w| w.name.as_str()).collect();
    assert_eq!(names.len(), 47);
    assert_eq!(names[0], "Workflow 0");
    assert_eq!(names[46], "Workflow 46");

    let requests = transport.requests();
    let offsets: Vec<_> = requests.iter().map(|r| query_value(r, "offset").unwrap()).collect();
    assert_eq!(offsets, ["0", "20", "40"]);
    for request in &requests {
        assert_eq!(query_value(request, "limit"), Some("20"));
        assert_eq!(query_value(request, "search"), Some("flux"));
        assert_eq!(query_value(request, "scope_id"), Some("org_1"));
    }
}

#[tokio::test]
async fn test_empty_first_page_ends_listing() {
    let transport = MockTransport::new();
    transport.answer("machines", MockAnswer::Json(json!([])));

    let mut pager: SearchPager<Value> = dashboard(&transport, 20).search(SearchResource::Machines);
    pager.set_query("", None);

    assert_eq!(pager.load_all(None).await.unwrap(), 1);
    assert_eq!(pager.items().count(), 0);
    assert!(!pager.has_more());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(query_value(&requests[0], "search"), None);
}

#[tokio::test]
async fn test_non_list_answer_is_last_page() {
    let transport = MockTransport::new();
    transport.answer("runs", MockAnswer::Json(json!({ "error": "rate limited" })));

    let mut pager: SearchPager<Value> = dashboard(&transport, 10).search(SearchResource::Runs);
    pager.set_query("", Some("wf_1"));

    assert_eq!(pager.load_more().await.unwrap(), Some(MergeOutcome::Merged { next: PageCursor::Terminal }));
    assert_eq!(pager.items().count(), 0);
}

#[tokio::test]
async fn test_remote_failure_propagates_and_allows_retry() {
    let transport = MockTransport::new();
    transport.answer("models", MockAnswer::Status(502, "bad gateway".into()));
    transport.answer("models", MockAnswer::Json(workflows(0..3)));

    let mut pager: SearchPager<WorkflowSummary> = dashboard(&transport, 10).search(SearchResource::Models);
    pager.set_query("", None);

    assert!(pager.load_all(None).await.is_err());
    assert_eq!(pager.items().count(), 0);

    assert_eq!(pager.load_all(None).await.unwrap(), 1);
    assert_eq!(pager.items().count(), 3);
}

/// A slow response for an old search term arrives after the term changed.
#[tokio::test]
async fn test_late_page_for_old_term_is_discarded() {
    let transport = MockTransport::new();
    transport.answer("workflows", MockAnswer::Json(workflows(100..102)));
    transport.answer("workflows", MockAnswer::Json(workflows(0..20)));

    let source = PlatformSearch::<WorkflowSummary>::new(transport.client(), SearchResource::Workflows);
    let mut cache = PaginatedSearchCache::new();

    cache.activate(compute_key("workflows", "fl", 20, None));
    let slow = cache.next_request().unwrap();

    cache.activate(compute_key("workflows", "flux", 20, None));
    let fast = cache.next_request().unwrap();

    let fast_page = source.fetch_page(fast.offset, &fast.key.search_term, fast.key.page_size, None).await.unwrap();
    let slow_page = source.fetch_page(slow.offset, &slow.key.search_term, slow.key.page_size, None).await.unwrap();

    assert_eq!(cache.merge_page(&fast, fast_page), MergeOutcome::Merged { next: PageCursor::Terminal });
    assert_eq!(cache.merge_page(&slow, slow_page), MergeOutcome::Discarded(DiscardReason::Superseded));
    let ids: Vec<_> = cache.items().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["wf_100", "wf_101"]);
}

#[tokio::test]
async fn test_pager_accepts_any_page_source() {
    let transport = MockTransport::new();
    transport.answer("deployments", MockAnswer::Json(json!([{ "id": "dep_1" }])));

    let source: Arc<dyn PageSource<Value>> = Arc::new(PlatformSearch::<Value>::new(transport.client(), SearchResource::Deployments));
    let mut pager = SearchPager::new(SearchResource::Deployments.logical_key(), 5, source);
    pager.set_query("", None);

    pager.load_all(None).await.unwrap();
    assert_eq!(pager.items().next(), Some(&json!({ "id": "dep_1" })));
}

#[tokio::test]
async fn test_undecodable_entry_is_attributed() {
    let transport = MockTransport::new();
    transport.answer("workflows", MockAnswer::Json(json!([{ "id": 5, "name": "Broken" }])));
    transport.answer("workflows", MockAnswer::Json(workflows(0..1)));

    let mut pager: SearchPager<WorkflowSummary> = dashboard(&transport, 20).search(SearchResource::Workflows);
    pager.set_query("", None);

    let err = run_scoped(OperationContext::new("search-workflows"), pager.load_more()).await.unwrap_err();
    assert_eq!(err.action(), Some("search-workflows"));
    assert!(matches!(err.root(), Error::DeserializationError(_)));

    assert!(!pager.cache().is_loading());
    assert_eq!(pager.load_all(None).await.unwrap(), 1);
    assert_eq!(pager.items().count(), 1);
}
