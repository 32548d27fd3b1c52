//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data, not match arms, so users can remap any action from
//! `config.toml`.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    PageDown,
    PageUp,
    ToggleCollected,
    RemoveItem,
    OpenDetail,
    CloseDetail,
    ScrollDown,
    ScrollUp,
    ShowAll,
    ShowCollected,
    ShowRemaining,
    EnterRoute,
    CommitRoute,
    CancelRoute,
    OpenImage,
    Retry,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::ToggleCollected => "Toggle collected",
            Self::RemoveItem => "Remove album from catalog",
            Self::OpenDetail => "Open album details",
            Self::CloseDetail => "Close details",
            Self::ScrollDown => "Scroll down one line",
            Self::ScrollUp => "Scroll up one line",
            Self::ShowAll => "Show all albums",
            Self::ShowCollected => "Show collected albums",
            Self::ShowRemaining => "Show remaining albums",
            Self::EnterRoute => "Go to location",
            Self::CommitRoute => "Navigate to typed location",
            Self::CancelRoute => "Cancel location input",
            Self::OpenImage => "Open cover image",
            Self::Retry => "Retry loading the catalog",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Catalog,
    Detail,
    RouteInput,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.chars().count() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "pageup" => return Some(KeySpec::plain(KeyCode::PageUp)),
        "pagedown" => return Some(KeySpec::plain(KeyCode::PageDown)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    if let Some(n) = s.strip_prefix(['F', 'f']) {
        if let Ok(n) = n.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::plain(KeyCode::Char(c))),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// fall back to `Global`.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use KeyCode::Char;

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(Char('1')), Action::ShowAll);
        self.bind(Context::Global, KeySpec::plain(Char('2')), Action::ShowCollected);
        self.bind(Context::Global, KeySpec::plain(Char('3')), Action::ShowRemaining);
        self.bind(Context::Global, KeySpec::plain(Char(':')), Action::EnterRoute);
        self.bind(Context::Global, KeySpec::plain(Char('r')), Action::Retry);
        self.bind(Context::Global, KeySpec::plain(Char('T')), Action::CycleTheme);
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);

        // === Album list ===
        self.bind(Context::Catalog, KeySpec::plain(Char('j')), Action::NavDown);
        self.bind(Context::Catalog, KeySpec::plain(KeyCode::Down), Action::NavDown);
        self.bind(Context::Catalog, KeySpec::plain(Char('k')), Action::NavUp);
        self.bind(Context::Catalog, KeySpec::plain(KeyCode::Up), Action::NavUp);
        self.bind(Context::Catalog, KeySpec::ctrl('d'), Action::PageDown);
        self.bind(Context::Catalog, KeySpec::plain(KeyCode::PageDown), Action::PageDown);
        self.bind(Context::Catalog, KeySpec::ctrl('u'), Action::PageUp);
        self.bind(Context::Catalog, KeySpec::plain(KeyCode::PageUp), Action::PageUp);
        self.bind(
            Context::Catalog,
            KeySpec::plain(Char(' ')),
            Action::ToggleCollected,
        );
        self.bind(Context::Catalog, KeySpec::plain(Char('d')), Action::RemoveItem);
        self.bind(Context::Catalog, KeySpec::plain(KeyCode::Enter), Action::OpenDetail);
        self.bind(Context::Catalog, KeySpec::plain(Char('o')), Action::OpenImage);

        // === Detail overlay ===
        self.bind(Context::Detail, KeySpec::plain(KeyCode::Esc), Action::CloseDetail);
        self.bind(Context::Detail, KeySpec::plain(Char('x')), Action::CloseDetail);
        self.bind(Context::Detail, KeySpec::plain(Char('j')), Action::ScrollDown);
        self.bind(Context::Detail, KeySpec::plain(KeyCode::Down), Action::ScrollDown);
        self.bind(Context::Detail, KeySpec::plain(Char('k')), Action::ScrollUp);
        self.bind(Context::Detail, KeySpec::plain(KeyCode::Up), Action::ScrollUp);
        self.bind(
            Context::Detail,
            KeySpec::plain(Char(' ')),
            Action::ToggleCollected,
        );
        self.bind(Context::Detail, KeySpec::plain(Char('o')), Action::OpenImage);

        // === Location input ===
        self.bind(Context::RouteInput, KeySpec::plain(KeyCode::Enter), Action::CommitRoute);
        self.bind(Context::RouteInput, KeySpec::plain(KeyCode::Esc), Action::CancelRoute);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "toggle_collected").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            // Rebind in every context the action was bound in
            let mut contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();
            contexts_for_action.dedup();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        // Location input is a text field; global keys would swallow typed characters
        if context != Context::Global && context != Context::RouteInput {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// First key bound to `action`, formatted for display (e.g. status hints).
    pub fn key_for(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, _, a)| *a == action)
            .map(|(_, key, _)| format_key(key))
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "toggle_collected" | "togglecollected" | "toggle" => Some(Action::ToggleCollected),
        "remove_item" | "removeitem" | "remove" => Some(Action::RemoveItem),
        "open_detail" | "opendetail" | "details" => Some(Action::OpenDetail),
        "close_detail" | "closedetail" | "close" => Some(Action::CloseDetail),
        "scroll_down" | "scrolldown" => Some(Action::ScrollDown),
        "scroll_up" | "scrollup" => Some(Action::ScrollUp),
        "show_all" | "showall" | "all" => Some(Action::ShowAll),
        "show_collected" | "showcollected" | "collected" => Some(Action::ShowCollected),
        "show_remaining" | "showremaining" | "remaining" => Some(Action::ShowRemaining),
        "enter_route" | "enterroute" | "goto" => Some(Action::EnterRoute),
        "commit_route" | "commitroute" => Some(Action::CommitRoute),
        "cancel_route" | "cancelroute" => Some(Action::CancelRoute),
        "open_image" | "openimage" | "open" => Some(Action::OpenImage),
        "retry" => Some(Action::Retry),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
