//! Background task event processing.
//!
//! Applies the results of spawned load and persistence tasks to `App`.

use crate::app::{App, AppEvent};

/// Handle one event from a background task.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::CatalogLoaded(result) => {
            let failed = result.is_err();
            app.finish_load(result);
            if failed {
                let hint = app
                    .keybindings
                    .key_for(crate::keybindings::Action::Retry)
                    .unwrap_or_else(|| "r".to_string());
                app.set_status(format!("Could not load albums (press {} to retry)", hint));
            }
        }
        AppEvent::ItemSaved { item_id, collected } => {
            app.confirm_saved(item_id, collected);
        }
        AppEvent::ItemSaveFailed {
            item_id,
            attempted,
            error,
        } => {
            app.rollback_toggle(item_id, attempted, &error);
        }
        AppEvent::ItemRemoved { item_id } => {
            app.confirm_removed(item_id);
        }
        AppEvent::ItemRemoveFailed { index, item, error } => {
            app.restore_removed(index, item, &error);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {}", task));
        }
    }
    app.needs_redraw = true;
}
