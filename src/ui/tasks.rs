//! Background persistence tasks.
//!
//! Every write is spawned off the event loop and reports back through an
//! `AppEvent`. The optimistic local change has already been applied by the
//! time a task is spawned; failure events carry what is needed to undo it.

use crate::app::{App, AppEvent, LoadedCatalog};
use crate::catalog::{seed, ItemFields, ItemId};
use crate::storage::Database;
use anyhow::Result;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// Instead of the task silently disappearing (caught by Tokio's runtime but not
/// handled), panics are converted to `Err(String)` containing the panic message.
pub(crate) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Send an event, logging if the loop has gone away.
async fn send(tx: &mpsc::Sender<AppEvent>, event: AppEvent, name: &'static str) {
    if let Err(e) = tx.send(event).await {
        tracing::warn!(error = %e, event = name, "Channel send failed (receiver dropped)");
    }
}

async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, error: String) {
    tracing::error!(task, error = %error, "Background task panicked");
    let _ = tx.send(AppEvent::TaskPanicked { task, error }).await;
}

/// Fetch the collection, seeding it first if it is empty.
pub(crate) async fn load_catalog(
    db: &Database,
    collection: &str,
    seed_fields: &[ItemFields],
) -> Result<LoadedCatalog> {
    let items = db.fetch_items(collection).await?;
    if !items.is_empty() {
        return Ok(LoadedCatalog { items, seeded: 0 });
    }

    let prepared = seed::prepare(seed_fields);
    let duplicates = seed::duplicate_volumes(&prepared);
    if !duplicates.is_empty() {
        // Details routes resolve to the first album with a volume
        tracing::warn!(volumes = ?duplicates, "Seed data repeats volume numbers");
    }
    let items = db.create_items(collection, prepared).await?;
    tracing::info!(count = items.len(), collection, "Seeded empty collection");
    let seeded = items.len();
    Ok(LoadedCatalog { items, seeded })
}

/// Spawn the initial (or retried) catalog fetch.
pub fn request_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    app.begin_load();

    let db = app.db.clone();
    let collection = app.collection.clone();
    let seed_fields = app.seed.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        match catch_task_panic(load_catalog(&db, &collection, &seed_fields)).await {
            Ok(result) => {
                let event = AppEvent::CatalogLoaded(result.map_err(|e| e.to_string()));
                send(&tx, event, "CatalogLoaded").await;
            }
            Err(panic_msg) => report_panic(&tx, "load_catalog", panic_msg).await,
        }
    });
}

/// Toggle an item locally and persist the new flag in the background.
pub fn request_toggle(app: &mut App, item_id: ItemId, event_tx: &mpsc::Sender<AppEvent>) {
    let Some(collected) = app.toggle_item(item_id) else {
        return;
    };

    let db = app.db.clone();
    let collection = app.collection.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let tx_panic = tx.clone();
        let outcome = catch_task_panic(async {
            match db.update_item(&collection, item_id, collected).await {
                Ok(()) => {
                    send(&tx, AppEvent::ItemSaved { item_id, collected }, "ItemSaved").await;
                }
                Err(e) => {
                    let event = AppEvent::ItemSaveFailed {
                        item_id,
                        attempted: collected,
                        error: e.to_string(),
                    };
                    send(&tx, event, "ItemSaveFailed").await;
                }
            }
        })
        .await;
        if let Err(panic_msg) = outcome {
            // The write may or may not have landed; undo locally so state stays unambiguous
            let event = AppEvent::ItemSaveFailed {
                item_id,
                attempted: collected,
                error: "save task panicked".to_string(),
            };
            send(&tx_panic, event, "ItemSaveFailed").await;
            report_panic(&tx_panic, "save_item", panic_msg).await;
        }
    });
}

/// Remove an item locally and delete it in the background.
pub fn request_remove(app: &mut App, item_id: ItemId, event_tx: &mpsc::Sender<AppEvent>) {
    let Some((index, item)) = app.remove_item(item_id) else {
        return;
    };
    app.set_status(format!("Removed {}", item.title));

    let db = app.db.clone();
    let collection = app.collection.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let tx_panic = tx.clone();
        let restore = item.clone();
        let outcome = catch_task_panic(async {
            match db.delete_item(&collection, item_id).await {
                Ok(()) => send(&tx, AppEvent::ItemRemoved { item_id }, "ItemRemoved").await,
                Err(e) => {
                    let event = AppEvent::ItemRemoveFailed {
                        index,
                        item,
                        error: e.to_string(),
                    };
                    send(&tx, event, "ItemRemoveFailed").await;
                }
            }
        })
        .await;
        if let Err(panic_msg) = outcome {
            let event = AppEvent::ItemRemoveFailed {
                index,
                item: restore,
                error: "remove task panicked".to_string(),
            };
            send(&tx_panic, event, "ItemRemoveFailed").await;
            report_panic(&tx_panic, "remove_item", panic_msg).await;
        }
    });
}
