use crate::app::{App, LoadState};
use crate::util::{pad_to_width, single_line, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Columns taken by the marker, volume and year around the title.
const ROW_CHROME: usize = 4 + 5 + 7;

/// Render the album list panel
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let title = match &app.load_state {
        LoadState::Ready => {
            let shown = app.visible_rows().len();
            format!(" Albums ({}/{}) ", shown, app.store.len())
        }
        _ => " Albums ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.detail.is_some() {
            app.style("panel_border")
        } else {
            app.style("panel_border_focused")
        })
        .title(title);

    match &app.load_state {
        LoadState::Loading => {
            let msg = Paragraph::new("Loading albums...")
                .style(app.style("item_hint"))
                .block(block);
            f.render_widget(msg, area);
            return;
        }
        LoadState::Failed(error) => {
            let text = vec![
                Line::from(Span::styled(" Could not load albums ", app.style("error_banner"))),
                Line::from(""),
                Line::from(single_line(error).into_owned()),
            ];
            let msg = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
            f.render_widget(msg, area);
            return;
        }
        LoadState::Ready => {}
    }

    let rows = app.visible_rows();
    if rows.is_empty() {
        let msg = Paragraph::new("No albums")
            .style(app.style("item_hint"))
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let title_width = inner_width.saturating_sub(ROW_CHROME);
    let height = area.height.saturating_sub(2) as usize;

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(row, &index)| {
            let view = &app.views[index];
            let card = view.card();

            let marker = if card.collected { "[x] " } else { "[ ] " };
            let marker_style = if app.pending.contains(&view.item_id()) {
                app.style("item_pending")
            } else if card.collected {
                app.style("item_collected")
            } else {
                app.style("item_hint")
            };

            let title_style = if row == app.selected {
                app.style("item_selected")
            } else if card.collected {
                app.style("item_collected")
            } else {
                app.style("item_normal")
            };

            let volume = format!("{:>3}. ", truncate_to_width(&single_line(&card.volume), 3));
            let title = pad_to_width(&single_line(&card.title), title_width);
            let year = format!(" ({})", truncate_to_width(&single_line(&card.year), 4));

            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(volume, app.style("item_volume")),
                Span::styled(title, title_style),
                Span::styled(year, app.style("item_hint")),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
