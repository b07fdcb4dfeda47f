use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use inspection_portal::controller::{
    FetchError, HttpPageFetcher, ListOptions, PageFetcher, PagedListController, Phase, dispatch,
};
use inspection_portal::paging::{PageResult, PagingSpec, Sort};
use serde::Deserialize;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers unsearched requests slowly and searched ones at once.
#[derive(Default)]
struct ScriptedFetcher {
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl PageFetcher<String> for ScriptedFetcher {
    async fn fetch(&self, spec: &PagingSpec) -> Result<PageResult<String>, FetchError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let rows = match spec.search_text.as_deref() {
            None => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                vec!["slow".to_string()]
            }
            Some(text) => vec![format!("fast:{text}")],
        };
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(PageResult::from_rows(rows, 1, spec.page_size))
    }
}

#[tokio::test]
async fn test_superseded_fetch_is_aborted_and_never_applied() {
    let fetcher = Arc::new(ScriptedFetcher::default());
    let mut controller = PagedListController::<String>::new(ListOptions::default());

    let slow = controller.mount();
    let slow_task = {
        let fetcher = Arc::clone(&fetcher);
        tokio::spawn(async move { dispatch(&*fetcher, slow).await })
    };
    while fetcher.started.load(Ordering::SeqCst) == 0 {
        tokio::task::yield_now().await;
    }

    let started = Instant::now();
    let fast = controller.set_search_text("abc").unwrap();
    let fast_done = dispatch(&*fetcher, fast).await;
    assert!(controller.complete(fast_done));

    let slow_done = slow_task.await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(slow_done.outcome, Err(FetchError::Cancelled));
    assert!(!controller.complete(slow_done));

    assert_eq!(fetcher.finished.load(Ordering::SeqCst), 1);
    assert_eq!(controller.items(), &["fast:abc".to_string()]);
    assert_eq!(controller.phase(), Phase::Settled);
}

#[tokio::test]
async fn test_unmount_aborts_the_in_flight_fetch() {
    let fetcher = ScriptedFetcher::default();
    let mut controller = PagedListController::<String>::new(ListOptions::default());

    let request = controller.mount();
    let (done, ()) = tokio::join!(dispatch(&fetcher, request), async {
        tokio::task::yield_now().await;
        controller.unmount();
    });

    assert_eq!(done.outcome, Err(FetchError::Cancelled));
    assert_eq!(fetcher.started.load(Ordering::SeqCst), 1);
    assert_eq!(fetcher.finished.load(Ordering::SeqCst), 0);
    assert!(!controller.is_loading());
    assert!(!controller.complete(done));
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct CustomerRow {
    id: i32,
    name: String,
}

fn customers_page(ids: std::ops::Range<i32>, total: usize, pages: usize) -> serde_json::Value {
    let rows: Vec<_> = ids
        .map(|id| serde_json::json!({ "Id": id, "Name": format!("Item-{id:02}") }))
        .collect();
    serde_json::json!({
        "result": { "ResultList": rows, "TotalCount": total, "TotalPages": pages }
    })
}

#[tokio::test]
async fn test_controller_pages_through_http_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .and(query_param("pageIndex", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_page(0..10, 25, 3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/customers"))
        .and(query_param("pageIndex", "2"))
        .and(query_param("sortField", "Name"))
        .and(query_param("sortAsc", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_page(20..25, 25, 3)))
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::<CustomerRow>::new(&server.uri(), "/api/v1/customers").unwrap();
    let mut controller = PagedListController::new(ListOptions {
        default_sort: Some(Sort::desc("CreatedAt")),
        ..ListOptions::default()
    });

    let request = controller.mount();
    assert!(controller.complete(dispatch(&fetcher, request).await));
    assert_eq!(controller.items().len(), 10);
    assert_eq!(controller.total_pages(), 3);

    let _superseded = controller.toggle_sort("Name").unwrap();
    let request = controller.set_page(2).unwrap();
    assert!(controller.complete(dispatch(&fetcher, request).await));

    assert_eq!(controller.items().len(), 5);
    assert_eq!(controller.items()[0].name, "Item-20");
    assert_eq!(controller.placeholder_rows(), 5);
    assert_eq!(
        controller.page_buttons(),
        vec![Some(1), Some(2), Some(3)]
    );
}

#[tokio::test]
async fn test_server_failure_settles_into_empty_error_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "error": "Internal server error" })),
        )
        .mount(&server)
        .await;

    let fetcher = HttpPageFetcher::<CustomerRow>::new(&server.uri(), "/api/v1/customers").unwrap();
    let mut controller = PagedListController::new(ListOptions::default());

    let request = controller.mount();
    assert!(controller.complete(dispatch(&fetcher, request).await));
    assert_eq!(controller.phase(), Phase::Error);
    assert!(!controller.is_loading());
    assert!(controller.items().is_empty());
    assert_eq!(controller.total_count(), 0);
    assert_eq!(controller.total_pages(), 0);
}
