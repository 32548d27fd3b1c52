use crate::app::App;
use crate::util::{single_line, strip_control_chars};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Below this width the overlay fills the screen and no mask is drawn.
pub(super) const NARROW_WIDTH: u16 = 80;

/// Area the detail overlay occupies inside `area`.
pub(super) fn overlay_area(area: Rect) -> Rect {
    if area.width < NARROW_WIDTH {
        return area;
    }
    let width = scale(area.width, 3, 5).max(NARROW_WIDTH / 2);
    let height = scale(area.height, 4, 5).max(8).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// `len * num / den` without overflowing `u16` on very large terminals.
fn scale(len: u16, num: u32, den: u32) -> u16 {
    u16::try_from(u32::from(len) * num / den).unwrap_or(len)
}

/// Dim everything behind the overlay.
pub(super) fn render_mask(f: &mut Frame, app: &App, area: Rect) {
    if area.width < NARROW_WIDTH {
        return;
    }
    f.buffer_mut().set_style(area, app.style("mask"));
}

/// Render the detail overlay and return the area it covers.
pub fn render(f: &mut Frame, app: &App, area: Rect) -> Option<Rect> {
    let detail = app.detail.as_ref()?;
    let overlay = overlay_area(area);
    if overlay.width < 10 || overlay.height < 5 {
        return None;
    }

    let content = detail.content();
    let status = if content.collected {
        Span::styled("In collection", app.style("item_collected"))
    } else {
        Span::styled("Not collected", app.style("item_hint"))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            single_line(&content.title).into_owned(),
            app.style("detail_title"),
        )),
        Line::from(Span::styled(
            format!(
                "Volume {} • {}",
                single_line(&content.volume),
                single_line(&content.year)
            ),
            app.style("detail_metadata"),
        )),
        Line::from(status),
        Line::from(""),
    ];
    for paragraph in strip_control_chars(&content.description).lines() {
        lines.push(Line::from(Span::styled(
            paragraph.to_string(),
            app.style("detail_body"),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Cover: {}", single_line(&content.image)),
        app.style("detail_metadata"),
    )));

    let hint = " Esc close • Space toggle • o cover ";
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("detail_border"))
        .title(" Album ")
        .title_bottom(hint);

    f.render_widget(Clear, overlay);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll(), 0));
    f.render_widget(paragraph, overlay);

    Some(overlay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_overlay_fills_area() {
        let area = Rect::new(0, 0, 60, 20);
        assert_eq!(overlay_area(area), area);
    }

    #[test]
    fn test_wide_overlay_is_centered_inside() {
        let area = Rect::new(0, 0, 120, 40);
        let overlay = overlay_area(area);
        assert_eq!(overlay.width, 72);
        assert_eq!(overlay.height, 32);
        assert_eq!(overlay.x, 24);
        assert_eq!(overlay.y, 4);
        assert_eq!(area.intersection(overlay), overlay);
    }

    #[test]
    fn test_overlay_on_very_wide_area_does_not_overflow() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40_000,
            height: 1,
        };
        assert_eq!(scale(area.width, 3, 5), 24_000);
        assert_eq!(scale(u16::MAX, 4, 5), 52_428);
        let overlay = overlay_area(area);
        assert!(overlay.width <= area.width);
    }
}
