//! Help overlay: where you can go and which keys get you there.
//!
//! The first section lists the locations the prompt understands, using a
//! volume from the loaded catalog as the example. Key sections come from the
//! live registry, so config overrides show up here.

use crate::app::App;
use crate::catalog::Filter;
use crate::keybindings::{Action, Context};
use crate::router::Route;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const KEY_COLUMN: usize = 14;

const KEY_SECTIONS: [(Context, &str); 4] = [
    (Context::Global, "Anywhere"),
    (Context::Catalog, "Album list"),
    (Context::Detail, "Album details"),
    (Context::RouteInput, "Location prompt"),
];

/// One row of the help text before styling.
#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Heading(String),
    Pair(String, String),
    Note(String),
    Blank,
}

fn location_entries(app: &App) -> Vec<Entry> {
    let prompt = app
        .keybindings
        .key_for(Action::EnterRoute)
        .unwrap_or_else(|| ":".to_string());
    let mut entries = vec![Entry::Heading(format!("Locations (type after {})", prompt))];

    for filter in [Filter::All, Filter::Collected, Filter::Remaining] {
        let token = if filter.token().is_empty() {
            "(empty)".to_string()
        } else {
            filter.token().to_string()
        };
        entries.push(Entry::Pair(token, format!("show {} albums", filter).to_lowercase()));
    }

    let example = app.store.iter().next().map(|item| item.volume.clone());
    let volume = example.as_deref().unwrap_or("<volume>");
    entries.push(Entry::Pair(
        Route::details_fragment(volume),
        "open that album's details".to_string(),
    ));
    entries.push(Entry::Note(
        "A leading #/ is optional. Other words show every album.".to_string(),
    ));
    entries
}

fn key_entries(app: &App) -> Vec<Entry> {
    let bindings = app.keybindings.all_bindings();
    let mut entries = Vec::new();
    for (ctx, label) in KEY_SECTIONS {
        let mut section: Vec<Entry> = bindings
            .iter()
            .filter(|(c, _, _, _)| *c == ctx)
            .map(|(_, key, _, describe)| Entry::Pair(key.clone(), describe.to_string()))
            .collect();
        if section.is_empty() {
            continue;
        }
        entries.push(Entry::Blank);
        entries.push(Entry::Heading(label.to_string()));
        entries.append(&mut section);
    }
    entries
}

fn help_entries(app: &App) -> Vec<Entry> {
    let mut entries = location_entries(app);
    entries.push(Entry::Blank);
    entries.push(Entry::Heading("Mouse".to_string()));
    entries.push(Entry::Pair(
        "click".to_string(),
        "outside the details overlay closes it".to_string(),
    ));
    entries.extend(key_entries(app));
    entries
}

fn to_line(entry: Entry, app: &App) -> Line<'static> {
    match entry {
        Entry::Heading(text) => Line::from(Span::styled(text, app.style("detail_title"))),
        Entry::Pair(left, right) => Line::from(vec![
            Span::styled(
                format!("  {:<width$}", left, width = KEY_COLUMN),
                app.style("item_volume"),
            ),
            Span::raw(right),
        ]),
        Entry::Note(text) => Line::from(Span::styled(
            format!("  {}", text),
            app.style("detail_metadata"),
        )),
        Entry::Blank => Line::default(),
    }
}

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let overlay = Rect::new(
        area.x + area.width / 10,
        area.y + area.height / 10,
        area.width - area.width / 5,
        area.height - area.height / 5,
    );
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let lines: Vec<Line> = help_entries(app)
        .into_iter()
        .map(|entry| to_line(entry, app))
        .collect();

    let visible = overlay.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let title = if max_scroll > 0 {
        format!(" Help {}/{} (j/k scroll, ? close) ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .style(app.style("detail_body"))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, overlay);
}
