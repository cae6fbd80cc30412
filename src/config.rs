//! User configuration — keybindings, animation settings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/carousel-tui/config.toml` (default
//! `~/.config/carousel-tui/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const DEFAULT_ANIMATION_SPEED: f64 = 0.35;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
    ToggleHelp,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used by the help modal).
    pub const ALL: &[Action] = &[
        Action::Next,
        Action::Previous,
        Action::First,
        Action::Last,
        Action::ToggleHelp,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Next => "Next Panel",
            Action::Previous => "Previous Panel",
            Action::First => "First Panel",
            Action::Last => "Last Panel",
            Action::ToggleHelp => "Toggle Help",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Previous => "previous",
            Action::First => "first",
            Action::Last => "last",
            Action::ToggleHelp => "toggle_help",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.  A character binding without SHIFT ignores the event's
    /// SHIFT (`G`, `?` arrive shifted); one that names SHIFT requires it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        if matches!(self.code, KeyCode::Char(_)) && !self.modifiers.contains(KeyModifiers::SHIFT) {
            mask.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"→"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Right"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            other => key_name(other),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Right"`, `"l"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the original case so `Shift`-less capitals still bind.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and display settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Slide animation damping per tick (0.05–0.95).
    pub animation_speed: f64,
    /// Draw the indicator dots under the strip.
    pub show_indicators: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            animation_speed: DEFAULT_ANIMATION_SPEED,
            show_indicators: true,
        }
    }
}

impl AppConfig {
    /// Built-in bindings: arrows plus vim-style letters.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Previous, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(First, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Last, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(ToggleHelp, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When several bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"→/l"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: slide | 1-9: jump | {}: help | {}: quit",
            self.short_binding(Action::Previous),
            self.short_binding(Action::Next),
            self.short_binding(Action::ToggleHelp),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(e) => {
                tracing::warn!("ignoring unreadable config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk, returning the path written.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(path)
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "animation_speed" => {
                    match value.parse::<f64>() {
                        Ok(v) => config.animation_speed = v.clamp(0.05, 0.95),
                        Err(_) => tracing::warn!("bad animation_speed `{value}`"),
                    }
                    continue;
                }
                "show_indicators" => {
                    config.show_indicators = value == "true";
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("unknown config key `{key}`");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# carousel-tui configuration".to_string(),
            String::new(),
            "# Display".to_string(),
            format!("animation_speed = {}", self.animation_speed),
            format!("show_indicators = {}", self.show_indicators),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/carousel-tui/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_modifiers_and_named_keys() {
        let b = KeyBind::parse("Ctrl+Alt+Right").unwrap();
        assert_eq!(b.code, KeyCode::Right);
        assert_eq!(b.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);

        assert_eq!(KeyBind::parse("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(KeyBind::parse("G").unwrap().code, KeyCode::Char('G'));
        assert!(KeyBind::parse("Hyper+x").is_none());
        assert!(KeyBind::parse("nonsense").is_none());
    }

    #[test]
    fn default_bindings_cover_arrows() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.match_key(key(KeyCode::Right, KeyModifiers::NONE)), Some(Action::Next));
        assert_eq!(cfg.match_key(key(KeyCode::Left, KeyModifiers::NONE)), Some(Action::Previous));
        assert_eq!(cfg.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn config_file_overrides_bindings_and_settings() {
        let cfg = AppConfig::parse_config(
            "# comment\nnext = n, Space\nanimation_speed = 3.0\nshow_indicators = false\nbogus = 1\n",
        );
        assert_eq!(cfg.match_key(key(KeyCode::Char('n'), KeyModifiers::NONE)), Some(Action::Next));
        assert_eq!(cfg.match_key(key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::Next));
        assert_eq!(cfg.match_key(key(KeyCode::Right, KeyModifiers::NONE)), None);
        assert_eq!(cfg.animation_speed, 0.95);
        assert!(!cfg.show_indicators);
        // Untouched actions keep their defaults.
        assert_eq!(cfg.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Quit));
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut cfg = AppConfig::default();
        cfg.bindings.insert(
            Action::Quit,
            vec![KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL)],
        );
        cfg.show_indicators = false;
        let back = AppConfig::parse_config(&cfg.serialise());
        assert_eq!(back.bindings, cfg.bindings);
        assert!(!back.show_indicators);
    }

    #[test]
    fn shift_is_implied_for_plain_chars_only() {
        let plain = KeyBind::new(KeyCode::Char('G'), KeyModifiers::NONE);
        assert!(plain.matches(key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(plain.matches(key(KeyCode::Char('G'), KeyModifiers::NONE)));

        let shifted = KeyBind::parse("Shift+x").unwrap();
        assert!(shifted.matches(key(KeyCode::Char('x'), KeyModifiers::SHIFT)));
        assert!(!shifted.matches(key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn most_specific_binding_wins() {
        let mut cfg = AppConfig::default();
        cfg.bindings.insert(
            Action::Last,
            vec![KeyBind::new(KeyCode::Right, KeyModifiers::CONTROL)],
        );
        let ev = key(KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(cfg.match_key(ev), Some(Action::Last));
    }
}
