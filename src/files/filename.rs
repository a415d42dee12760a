//! Filesystem-safe names for written print views.

use deunicode::deunicode;

use crate::session::ChatSession;

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Used when a title sanitizes to nothing.
const FALLBACK_NAME: &str = "chat";

/// Longest title stem kept in a generated name.
pub const MAX_STEM_LENGTH: usize = 80;

/// Sanitize a chat title for use as a filename stem.
///
/// Transliterates to ASCII, turns whitespace runs into single hyphens, keeps
/// only alphanumerics, `_`, `.` and `-`, trims edge dots and hyphens, and
/// truncates to [`MAX_STEM_LENGTH`].
pub fn sanitize(input: &str) -> String {
    let ascii = deunicode(input);
    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;

    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            result.push(c);
            last_was_hyphen = false;
        }
    }

    let mut stem: String = trim_edges(&result).chars().take(MAX_STEM_LENGTH).collect();
    stem = trim_edges(&stem).to_string();

    if stem.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if is_reserved(&stem) {
        stem.insert(0, '_');
    }
    stem
}

/// Default output name for a session's print view: `<title>_<id>.html`.
pub fn print_file_name(session: &ChatSession) -> String {
    format!("{}_{}.html", sanitize(&session.title), session.id)
}

fn trim_edges(s: &str) -> &str {
    s.trim_matches(|c| c == '.' || c == '-')
}

fn is_reserved(stem: &str) -> bool {
    let base = stem.split('.').next().unwrap_or(stem);
    WINDOWS_RESERVED
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
}
