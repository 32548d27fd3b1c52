//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Album list --
    pub item_normal: Style,
    pub item_selected: Style,
    pub item_collected: Style,
    pub item_volume: Style,
    pub item_pending: Style,
    pub item_hint: Style,

    // -- Filter navigation --
    pub nav_active: Style,
    pub nav_inactive: Style,
    pub nav_count: Style,

    // -- Detail overlay --
    pub detail_title: Style,
    pub detail_body: Style,
    pub detail_metadata: Style,
    pub detail_border: Style,
    pub mask: Style,

    // -- Chrome --
    pub location_bar: Style,
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub error_banner: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            // Album list
            item_normal: Style::default(),
            item_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            item_collected: Style::default().fg(Color::Green),
            item_volume: Style::default().fg(Color::Cyan),
            item_pending: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
            item_hint: Style::default().fg(Color::Gray),

            // Filter navigation
            nav_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            nav_inactive: Style::default().fg(Color::Gray),
            nav_count: Style::default().fg(Color::Yellow),

            // Detail overlay
            detail_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_border: Style::default().fg(Color::Cyan),
            mask: Style::default().fg(Color::DarkGray).bg(Color::Black),

            // Chrome
            location_bar: Style::default().fg(Color::Cyan),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            error_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light palette, for light terminal backgrounds.
    fn light() -> Self {
        Self {
            // Album list
            item_normal: Style::default().fg(Color::Black),
            item_selected: Style::default().bg(Color::Blue).fg(Color::White),
            item_collected: Style::default().fg(Color::Green),
            item_volume: Style::default().fg(Color::Blue),
            item_pending: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::DIM),
            item_hint: Style::default().fg(Color::DarkGray),

            // Filter navigation
            nav_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            nav_inactive: Style::default().fg(Color::DarkGray),
            nav_count: Style::default().fg(Color::Magenta),

            // Detail overlay
            detail_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_metadata: Style::default().fg(Color::DarkGray),
            detail_border: Style::default().fg(Color::Blue),
            mask: Style::default().fg(Color::Gray).bg(Color::White),

            // Chrome
            location_bar: Style::default().fg(Color::Blue),
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            error_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup for config-driven overrides
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"detail_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 19] = [
    "item_normal",
    "item_selected",
    "item_collected",
    "item_volume",
    "item_pending",
    "item_hint",
    "nav_active",
    "nav_inactive",
    "nav_count",
    "detail_title",
    "detail_body",
    "detail_metadata",
    "detail_border",
    "mask",
    "location_bar",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "error_banner",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 19] = [
            p.item_normal,
            p.item_selected,
            p.item_collected,
            p.item_volume,
            p.item_pending,
            p.item_hint,
            p.nav_active,
            p.nav_inactive,
            p.nav_count,
            p.detail_title,
            p.detail_body,
            p.detail_metadata,
            p.detail_border,
            p.mask,
            p.location_bar,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.error_banner,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
