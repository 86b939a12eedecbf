pub const DEFAULT_TOKEN_ESTIMATE_DIVISOR: usize = 4;

/// Approximate token count: characters divided by `divisor`.
pub fn estimate_tokens(text: &str, divisor: usize) -> usize {
    estimate_tokens_for_chars(text.chars().count(), divisor)
}

pub fn estimate_tokens_for_chars(char_count: usize, divisor: usize) -> usize {
    char_count / divisor.max(1)
}
