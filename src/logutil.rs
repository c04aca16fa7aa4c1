//! Quoting for player-supplied text (home names, command arguments) in log lines.

/// Longest stretch of player text kept in a log line. Home names are single words, so
/// anything longer is almost always junk or an attempt to flood the log.
pub const MAX_LOGGED_CHARS: usize = 48;

/// Quote `s` for a log line: wrapped in double quotes, escaped with Rust's debug escapes
/// (newlines, quotes, control and invisible characters), and cut to [`MAX_LOGGED_CHARS`]
/// with a count of what was dropped.
///
/// ```
/// use homekeep::logutil::quote_user_text;
/// assert_eq!(quote_user_text("base\n[INFO] x"), r#""base\n[INFO] x""#);
/// ```
pub fn quote_user_text(s: &str) -> String {
    let total = s.chars().count();
    let mut out = String::with_capacity(s.len().min(MAX_LOGGED_CHARS) + 12);
    out.push('"');
    for ch in s.chars().take(MAX_LOGGED_CHARS) {
        out.extend(ch.escape_debug());
    }
    out.push('"');
    if total > MAX_LOGGED_CHARS {
        out.push_str(&format!("…(+{})", total - MAX_LOGGED_CHARS));
    }
    out
}

/// Quote each argument of a command and join them with spaces.
pub fn quote_args(args: &[&str]) -> String {
    args.iter()
        .map(|arg| quote_user_text(arg))
        .collect::<Vec<_>>()
        .join(" ")
}
