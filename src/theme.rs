//! Terminal output styling.
//!
//! Centralizes the ANSI colors used by command output. Color is dropped when
//! `NO_COLOR` is set or stdout is not a terminal.

/// Raw ANSI sequences.
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GRAY: &str = "\x1b[37m";
    pub const DARK_GRAY: &str = "\x1b[90m";
}

/// Colors for CLI output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary text color (used for most content)
    pub text_primary: &'static str,
    /// Secondary/dimmed text color
    pub text_secondary: &'static str,
    /// Accent color for titles and ids
    pub accent: &'static str,
    pub error: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
    enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: ansi::GRAY,
            text_secondary: ansi::DARK_GRAY,
            accent: ansi::GREEN,
            error: ansi::RED,
            warning: ansi::YELLOW,
            success: ansi::GREEN,
            enabled: true,
        }
    }
}

impl Theme {
    /// Theme that emits no escape sequences.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", color, text, ansi::RESET)
        } else {
            text.to_string()
        }
    }

    pub fn accent_text(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn primary_text(&self, text: &str) -> String {
        self.paint(self.text_primary, text)
    }

    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(self.text_secondary, text)
    }

    pub fn error_text(&self, text: &str) -> String {
        self.paint(self.error, text)
    }

    pub fn warning_text(&self, text: &str) -> String {
        self.paint(self.warning, text)
    }

    pub fn success_text(&self, text: &str) -> String {
        self.paint(self.success, text)
    }

    /// Bold accent, used for headings.
    pub fn heading_text(&self, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}{}", ansi::BOLD, self.accent, text, ansi::RESET)
        } else {
            text.to_string()
        }
    }
}

/// Theme for the current process output.
pub fn current_theme() -> Theme {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        Theme::plain()
    } else {
        Theme::default()
    }
}
