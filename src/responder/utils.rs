const MAX_LENGTH: usize = 72;

/// Truncates user content so that log lines stay readable.
pub(crate) fn shorten_content(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or_default();
    if first_line.chars().count() <= MAX_LENGTH && first_line.len() == content.len() {
        content.to_owned()
    } else {
        first_line.chars().take(MAX_LENGTH).collect::<String>() + "…"
    }
}
