mod common;

use common::{user, MemoryGateway};
use roster::store::RecordStore;

#[tokio::test]
async fn test_refresh_replaces_contents_wholesale() {
    let gw = MemoryGateway::with_records(vec![user(2, "B", "b"), user(1, "A", "a")]);
    let mut store = RecordStore::new();
    store.refresh(&gw).await.unwrap();
    assert_eq!(store.records(), gw.records().as_slice());

    gw.server_side_rename(1, "Renamed");
    store.refresh(&gw).await.unwrap();
    assert_eq!(store.find(1).unwrap().full_name, "Renamed");
    assert_eq!(store.records()[0].id, 2);
}

#[tokio::test]
async fn test_refresh_failure_keeps_previous_contents() {
    let gw = MemoryGateway::with_records(vec![user(1, "A", "a")]);
    let mut store = RecordStore::new();
    store.refresh(&gw).await.unwrap();
    gw.set_fail_list(true);
    assert!(store.refresh(&gw).await.is_err());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_refresh_to_empty_list() {
    let gw = MemoryGateway::with_records(vec![]);
    let mut store = RecordStore::new();
    store.refresh(&gw).await.unwrap();
    assert!(store.is_empty());
}

async fn store_of(n: i64) -> RecordStore {
    let gw = MemoryGateway::with_records((1..=n).map(|i| user(i, "U", &format!("u{}", i))).collect());
    let mut store = RecordStore::new();
    store.refresh(&gw).await.unwrap();
    store
}

#[tokio::test]
async fn test_page_zero_shows_everything() {
    let store = store_of(12).await;
    let page = store.page(0, 5);
    assert_eq!(page.items.len(), 12);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 0);
}

#[tokio::test]
async fn test_pages_split_by_size() {
    let store = store_of(12).await;
    let page = store.page(3, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.iter().map(|r| r.id).collect::<Vec<_>>(), vec![11, 12]);
}

#[tokio::test]
async fn test_page_past_end_clamps_to_last() {
    let store = store_of(12).await;
    let page = store.page(9, 10);
    assert_eq!(page.current_page, 2);
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn test_empty_store_has_one_empty_page() {
    let store = RecordStore::new();
    let page = store.page(1, 10);
    assert_eq!(page.total_pages, 1);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_huge_page_size_fits_everything_on_one_page() {
    let store = store_of(3).await;
    let page = store.page(1, usize::MAX);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 3);

    let page = store.page(usize::MAX, usize::MAX);
    assert_eq!(page.current_page, 1);
    assert_eq!(page.items.len(), 3);
}
