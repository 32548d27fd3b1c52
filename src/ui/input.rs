//! Input handling for the TUI.
//!
//! Keyboard input is dispatched by the topmost active layer: help, confirm
//! dialog, location prompt, detail overlay, then the album list. Mouse clicks
//! only matter while the mask is shown.

use crate::app::{App, AppEvent, ConfirmAction, LoadState};
use crate::catalog::{Filter, DEFAULT_IMAGE};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::{looks_like_url, validate_url_for_open};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tokio::sync::mpsc;

use super::tasks::{request_load, request_remove, request_toggle};
use super::Action;

/// Longest location the prompt accepts.
const MAX_ROUTE_INPUT: usize = 256;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Terminals report uppercase letters with SHIFT; bindings store the bare char
    let modifiers = match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    };

    // Handle help overlay input first (captures all keys when visible)
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    // Handle confirmation dialog input (captures all keys when visible)
    if app.pending_confirm.is_some() {
        return Ok(handle_confirm_input(app, code, event_tx));
    }

    if app.route_input.is_some() {
        return Ok(handle_route_input(app, code, modifiers));
    }

    let context = if app.detail.is_some() {
        KbContext::Detail
    } else {
        KbContext::Catalog
    };
    let action = app.keybindings.action_for_key(code, modifiers, context);

    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::ShowAll) => app.navigate(Filter::All.token(), true),
        Some(KbAction::ShowCollected) => app.navigate(Filter::Collected.token(), true),
        Some(KbAction::ShowRemaining) => app.navigate(Filter::Remaining.token(), true),
        Some(KbAction::EnterRoute) => {
            app.route_input = Some(app.router.fragment().to_string());
        }
        Some(KbAction::Retry) => {
            if matches!(app.load_state, LoadState::Failed(_)) {
                app.set_status("Loading albums...");
                request_load(app, event_tx);
            }
        }
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        Some(action) if context == KbContext::Detail => handle_detail_action(app, action, event_tx),
        Some(action) => handle_catalog_action(app, action, event_tx),
        None => {}
    }
    Ok(Action::Continue)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// y/Y confirms, n/N/Esc cancels, everything else is swallowed.
fn handle_confirm_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) -> Action {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(ConfirmAction::RemoveItem { item_id, .. }) = app.pending_confirm.take() {
                request_remove(app, item_id, event_tx);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_confirm = None;
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Action::Continue
}

/// Typing into the `:` location prompt.
fn handle_route_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::RouteInput)
    {
        Some(KbAction::CommitRoute) => {
            if let Some(location) = app.route_input.take() {
                app.navigate(location.trim(), true);
            }
        }
        Some(KbAction::CancelRoute) => app.route_input = None,
        _ => {
            let Some(input) = app.route_input.as_mut() else {
                return Action::Continue;
            };
            match code {
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if !c.is_control() && input.len() < MAX_ROUTE_INPUT => {
                    input.push(c);
                }
                _ => {}
            }
        }
    }
    app.needs_redraw = true;
    Action::Continue
}

fn handle_catalog_action(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) {
    match action {
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::PageDown => app.page_down(),
        KbAction::PageUp => app.page_up(),
        KbAction::ToggleCollected => {
            if let Some(id) = app.selected_item().map(|item| item.id) {
                request_toggle(app, id, event_tx);
            }
        }
        KbAction::RemoveItem => {
            let Some((item_id, title)) = app.selected_item().map(|i| (i.id, i.title.clone()))
            else {
                return;
            };
            if app.confirm_remove {
                app.pending_confirm = Some(ConfirmAction::RemoveItem { item_id, title });
            } else {
                request_remove(app, item_id, event_tx);
            }
        }
        KbAction::OpenDetail => app.open_selected_details(),
        KbAction::OpenImage => {
            if let Some(image) = app.selected_item().map(|item| item.image.clone()) {
                open_image(app, &image);
            }
        }
        _ => {}
    }
}

fn handle_detail_action(app: &mut App, action: KbAction, event_tx: &mpsc::Sender<AppEvent>) {
    match action {
        KbAction::CloseDetail => app.request_close(),
        KbAction::ScrollDown => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll_by(1);
            }
        }
        KbAction::ScrollUp => {
            if let Some(detail) = app.detail.as_mut() {
                detail.scroll_by(-1);
            }
        }
        KbAction::ToggleCollected => {
            if let Some(id) = app.detail.as_ref().map(|d| d.item_id()) {
                request_toggle(app, id, event_tx);
            }
        }
        KbAction::OpenImage => {
            if let Some(image) = app.detail.as_ref().map(|d| d.content().image.clone()) {
                open_image(app, &image);
            }
        }
        _ => {}
    }
    app.needs_redraw = true;
}

/// Hand the cover image to the system opener.
///
/// URLs must pass [`validate_url_for_open`]; anything else must be an existing
/// file. The image field is catalog text, not something to execute.
fn open_image(app: &mut App, image: &str) {
    if image.is_empty() || image == DEFAULT_IMAGE {
        app.set_status("No cover image for this album");
        return;
    }
    if image.chars().any(char::is_control) {
        app.set_status("Cover location contains control characters");
        return;
    }
    let target = if looks_like_url(image) {
        match validate_url_for_open(image) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(image = %image, error = %e, "Rejected cover URL");
                app.set_status(e.to_string());
                return;
            }
        }
    } else if std::path::Path::new(image).is_file() {
        image.to_string()
    } else {
        app.set_status(format!("Cover not found: {}", image));
        return;
    };
    match open::that(&target) {
        Ok(()) => app.set_status("Opening cover..."),
        Err(e) => app.set_status(format!("Failed to open cover: {}", e)),
    }
}

/// Handle a mouse event. A left click on the mask (outside the overlay)
/// closes the detail view.
pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    if !app.mask_visible || app.show_help || app.pending_confirm.is_some() {
        return;
    }
    let inside = app
        .detail_area
        .is_some_and(|area| area.contains(Position::new(mouse.column, mouse.row)));
    if !inside {
        app.request_close();
    }
}
