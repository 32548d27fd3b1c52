use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::borrow::Cow;

/// Render the location bar, or the location prompt while typing.
pub fn render_location(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let line = match &app.route_input {
        Some(input) => Line::from(vec![
            Span::styled(": #/", app.style("location_bar")),
            Span::raw(input.as_str()),
            Span::styled("_", app.style("item_hint")),
        ]),
        None => Line::from(vec![
            Span::styled(app.location(), app.style("location_bar")),
            Span::styled(format!("  [{}]", app.collection), app.style("item_hint")),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Status bar needs at least 1 char width to be meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static strings and borrowed status messages
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.route_input.is_some() {
        Cow::Borrowed("Type a location | ENTER go | ESC cancel")
    } else if app.detail.is_some() {
        Cow::Borrowed("[Esc]close [j/k]scroll [Space]toggle [o]cover [q]uit")
    } else {
        Cow::Borrowed("[j/k]move [Space]toggle [Enter]details [d]remove [1/2/3]filter [:]go [?]help [q]uit")
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
