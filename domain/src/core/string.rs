//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters, replacing the tail
/// with `...` when it does not fit.
///
/// Counts characters rather than bytes so multi-byte text is never split.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
