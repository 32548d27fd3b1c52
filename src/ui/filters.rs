use crate::app::App;
use crate::catalog::Filter;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the filter navigation line.
///
/// The caller only gives this a row while something is collected.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let active = app.effective_filter();
    let total = app.nav.collected + app.nav.remaining;
    let entries = [
        (Filter::All, "1 All", total),
        (Filter::Collected, "2 Collected", app.nav.collected),
        (Filter::Remaining, "3 Remaining", app.nav.remaining),
    ];

    let mut spans = Vec::with_capacity(entries.len() * 3);
    for (filter, label, count) in entries {
        let style = if filter == active {
            app.style("nav_active")
        } else {
            app.style("nav_inactive")
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::styled(format!("{} ", count), app.style("nav_count")));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
