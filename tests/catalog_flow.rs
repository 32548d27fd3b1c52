//! End-to-end catalog scenarios: seeding, toggling, filtering, routing to the
//! detail view and persistence failures.
//!
//! Each test creates its own in-memory SQLite database for isolation and
//! drives `App` the way the event loop does, feeding background results back
//! through `handle_app_event`.

use albumshelf::app::{App, AppEvent, LoadState};
use albumshelf::catalog::{seed, Filter, Topic};
use albumshelf::storage::Database;
use albumshelf::ui::{handle_app_event, request_load, request_remove, request_toggle};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

const THREE_ALBUMS: &str = r#"[
    {"volume": 1, "title": "Asterix the Gaul", "year": "1961"},
    {"volume": 2, "title": "Asterix and the Golden Sickle", "year": "1962"},
    {"volume": 3, "title": "Asterix and the Goths", "year": "1963"}
]"#;

async fn next_event(rx: &mut mpsc::Receiver<AppEvent>) -> AppEvent {
    rx.recv().await.expect("event channel closed")
}

/// Load the catalog through the real background task.
async fn started_app(
    db: Database,
    json: &str,
    route: &str,
) -> (App, mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
    let fields = seed::parse(json).unwrap();
    let mut app = App::new(db, "test", fields);
    app.initial_route = route.to_string();
    let (tx, mut rx) = mpsc::channel(32);

    request_load(&mut app, &tx);
    assert_eq!(app.load_state, LoadState::Loading);
    let event = next_event(&mut rx).await;
    handle_app_event(&mut app, event);
    assert_eq!(app.load_state, LoadState::Ready);
    (app, tx, rx)
}

fn hidden_ids(app: &App) -> Vec<i64> {
    app.views
        .iter()
        .filter(|v| v.is_hidden())
        .map(|v| v.item_id())
        .collect()
}

fn id_of(app: &App, volume: &str) -> i64 {
    app.store.find_by_volume(volume).unwrap().id
}

#[tokio::test]
async fn test_toggle_filter_detail_close_scenario() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    assert_eq!(app.views.len(), 3);
    assert!(!app.nav.visible);

    // Collect volume 2 and let the save land
    let two = id_of(&app, "2");
    request_toggle(&mut app, two, &tx);
    let event = next_event(&mut rx).await;
    assert!(matches!(event, AppEvent::ItemSaved { collected: true, .. }));
    handle_app_event(&mut app, event);
    assert!(app.nav.visible);
    assert_eq!(app.nav.collected, 1);
    assert_eq!(app.nav.remaining, 2);

    // Filter to remaining: volume 2 is hidden
    app.navigate("remaining", true);
    assert_eq!(app.filter, Filter::Remaining);
    assert_eq!(hidden_ids(&app), vec![two]);

    // Open the detail view for volume 2 via its location
    app.navigate("albums/2", true);
    assert_eq!(app.detail.as_ref().map(|d| d.item_id()), Some(two));
    assert!(app.mask_visible);

    app.scroll_offset = 1;
    app.request_close();
    assert!(app.detail.is_none());
    assert!(!app.mask_visible);
    assert_eq!(app.scroll_offset, 1);
    assert_eq!(app.router.fragment(), "");

    // Filter State is untouched by closing the detail
    assert_eq!(app.filter, Filter::Remaining);

    // The flag survived in storage
    let stored = db.fetch_items("test").await.unwrap();
    assert!(stored.iter().find(|i| i.id == two).unwrap().collected);
}

#[tokio::test]
async fn test_toggling_twice_restores_flag_with_two_writes() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let one = id_of(&app, "1");
    let original = app.store.get(one).unwrap().collected;

    let mut saves = Vec::new();
    for _ in 0..2 {
        request_toggle(&mut app, one, &tx);
        let event = next_event(&mut rx).await;
        if let AppEvent::ItemSaved { item_id, collected } = &event {
            saves.push((*item_id, *collected));
        }
        handle_app_event(&mut app, event);
    }

    assert_eq!(saves, vec![(one, !original), (one, original)]);
    assert!(rx.try_recv().is_err());
    assert_eq!(app.store.get(one).unwrap().collected, original);
    assert!(app.pending.is_empty());

    let stored = db.fetch_items("test").await.unwrap();
    assert_eq!(stored.iter().find(|i| i.id == one).unwrap().collected, original);
}

#[tokio::test]
async fn test_seeding_happens_once_per_collection() {
    let db = Database::open(":memory:").await.unwrap();
    let (app, _tx, _rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let first: Vec<_> = app.store.iter().cloned().collect();
    drop(app);

    // A second start finds the persisted albums and does not seed again
    let (again, _tx, _rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let second: Vec<_> = again.store.iter().cloned().collect();
    assert_eq!(first, second);
    assert_eq!(db.count_items("test").await.unwrap(), 3);
}

#[tokio::test]
async fn test_initial_route_opens_detail() {
    let db = Database::open(":memory:").await.unwrap();
    let (app, _tx, _rx) = started_app(db, THREE_ALBUMS, "#/albums/3").await;
    let three = id_of(&app, "3");
    assert_eq!(app.detail.as_ref().map(|d| d.item_id()), Some(three));
    assert_eq!(app.location(), "#/albums/3");
}

#[tokio::test]
async fn test_unknown_volume_changes_nothing() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, _tx, _rx) = started_app(db, THREE_ALBUMS, "").await;
    app.navigate("albums/99", true);
    assert!(app.detail.is_none());
    assert!(!app.mask_visible);
    assert_eq!(app.filter, Filter::All);
}

#[tokio::test]
async fn test_filter_is_ignored_until_something_is_collected() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db, THREE_ALBUMS, "collected").await;

    // Nothing collected: every album shows and the fragment is cleared
    assert!(hidden_ids(&app).is_empty());
    assert_eq!(app.router.fragment(), "");
    assert_eq!(app.filter, Filter::Collected);

    let one = id_of(&app, "1");
    request_toggle(&mut app, one, &tx);
    let event = next_event(&mut rx).await;
    handle_app_event(&mut app, event);

    // The remembered filter applies as soon as the nav reappears
    let mut hidden = hidden_ids(&app);
    hidden.sort();
    let mut expected = vec![id_of(&app, "2"), id_of(&app, "3")];
    expected.sort();
    assert_eq!(hidden, expected);
}

#[tokio::test]
async fn test_failed_save_rolls_back() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let one = id_of(&app, "1");

    db.close().await;
    request_toggle(&mut app, one, &tx);
    assert!(app.store.get(one).unwrap().collected);

    let event = next_event(&mut rx).await;
    assert!(matches!(event, AppEvent::ItemSaveFailed { attempted: true, .. }));
    handle_app_event(&mut app, event);

    assert!(!app.store.get(one).unwrap().collected);
    assert!(!app.nav.visible);
    assert!(app.pending.is_empty());
    assert!(app.status_message.is_some());
}

#[tokio::test]
async fn test_remove_detaches_view_and_persists() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let two = id_of(&app, "2");

    request_remove(&mut app, two, &tx);
    assert_eq!(app.views.len(), 2);
    assert_eq!(app.bus.subscribers(Topic::Item(two)), 0);

    let event = next_event(&mut rx).await;
    assert!(matches!(event, AppEvent::ItemRemoved { .. }));
    handle_app_event(&mut app, event);

    assert_eq!(db.count_items("test").await.unwrap(), 2);
    assert!(app.pending.is_empty());
}

#[tokio::test]
async fn test_failed_remove_restores_position() {
    let db = Database::open(":memory:").await.unwrap();
    let (mut app, tx, mut rx) = started_app(db.clone(), THREE_ALBUMS, "").await;
    let two = id_of(&app, "2");

    db.close().await;
    request_remove(&mut app, two, &tx);
    let event = next_event(&mut rx).await;
    assert!(matches!(event, AppEvent::ItemRemoveFailed { .. }));
    handle_app_event(&mut app, event);

    let order: Vec<_> = app.views.iter().map(|v| v.card().volume.clone()).collect();
    assert_eq!(order, vec!["1", "2", "3"]);
    assert_eq!(app.store.position(two), Some(1));
}

#[tokio::test]
async fn test_load_failure_leaves_router_stopped() {
    let db = Database::open(":memory:").await.unwrap();
    db.close().await;

    let fields = seed::parse(THREE_ALBUMS).unwrap();
    let mut app = App::new(db, "test", fields);
    let (tx, mut rx) = mpsc::channel(8);

    request_load(&mut app, &tx);
    let event = next_event(&mut rx).await;
    handle_app_event(&mut app, event);
    assert!(matches!(app.load_state, LoadState::Failed(_)));
    assert!(app.views.is_empty());
    assert!(!app.router.is_started());
}
