//! Render functions for the TUI.
//!
//! Lays out the location bar, filter navigation, album list and status bar,
//! then draws overlays (detail with mask, help, confirm) on top.

use crate::app::{App, ConfirmAction};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{albums, detail, filters, help, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 8;

/// Main render dispatch function.
///
/// Handles terminal size validation before rendering. Records the list height
/// and the detail overlay area back into `app` for scrolling and hit-testing.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // At truly minimal dimensions, we can't render anything meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        // For very small terminals (less than 3 lines), just show minimal message
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        app.detail_area = None;
        return;
    }

    let nav_height = if app.nav.visible { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(nav_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    // Keep the selection on screen before drawing the list
    app.list_height = chunks[2].height.saturating_sub(2) as usize;
    app.ensure_selected_visible();

    status::render_location(f, app, chunks[0]);
    if app.nav.visible {
        filters::render(f, app, chunks[1]);
    }
    albums::render(f, app, chunks[2]);
    status::render(f, app, chunks[3]);

    if app.mask_visible {
        detail::render_mask(f, app, area);
    }
    app.detail_area = detail::render(f, app, area);

    // Render help overlay on top of any view when active
    if app.show_help {
        help::render(f, app);
    }

    // Render confirmation dialog on top of any view when active
    if let Some(ref confirm) = app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }
}

/// Render a confirmation dialog overlay centered on screen.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let area = f.area();

    let text = match confirm {
        ConfirmAction::RemoveItem { title, .. } => {
            format!(
                "Remove \"{}\" from the catalog?\n\n(y) Confirm  (n/Esc) Cancel",
                crate::util::single_line(title)
            )
        }
    };

    // Size: at most 50 chars wide, 7 lines tall, centered
    let width = 50u16.min(area.width.saturating_sub(4));
    let height = 7u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let overlay = Rect::new(x, y, width, height);

    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Confirm "),
        )
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true })
        .style(app.style("detail_body"));

    f.render_widget(paragraph, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LoadedCatalog;
    use crate::catalog::{ItemFields, NewItem};
    use crate::storage::Database;
    use ratatui::{backend::TestBackend, Terminal};

    async fn loaded_app(collected: bool) -> App {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, "test", Vec::new());
        let items = (1..=3)
            .map(|id| {
                NewItem::create(ItemFields {
                    volume: Some(id.to_string()),
                    title: Some(format!("Album {}", id)),
                    collected: Some(collected && id == 2),
                    ..Default::default()
                })
                .persisted(id)
            })
            .collect();
        app.finish_load(Ok(LoadedCatalog { items, seeded: 0 }));
        app
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn test_list_and_location_render() {
        let mut app = loaded_app(true).await;
        let screen = draw(&mut app, 100, 20);
        assert!(screen.contains("#/"));
        assert!(screen.contains("Album 3"));
        assert!(screen.contains("Collected 1"));
        assert_eq!(app.list_height, 20 - 1 - 1 - 1 - 2);
    }

    #[tokio::test]
    async fn test_nav_hidden_when_nothing_collected() {
        let mut app = loaded_app(false).await;
        let screen = draw(&mut app, 100, 20);
        assert!(!screen.contains("Remaining"));
    }

    #[tokio::test]
    async fn test_detail_records_overlay_area() {
        let mut app = loaded_app(true).await;
        app.navigate("albums/2", true);

        draw(&mut app, 120, 30);
        let wide = app.detail_area.unwrap();
        assert!(wide.width < 120);

        draw(&mut app, 60, 30);
        assert_eq!(app.detail_area, Some(Rect::new(0, 0, 60, 30)));
    }

    #[tokio::test]
    async fn test_too_small_terminal() {
        let mut app = loaded_app(true).await;
        let screen = draw(&mut app, 30, 5);
        assert!(screen.contains("Terminal too small"));
    }
}
