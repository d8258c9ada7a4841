// Quote-aware input splitting.
//
// Whitespace outside quotes separates tokens and collapses. Quote characters
// toggle quoting and are dropped from the output. Any configured quote
// character closes a quote opened by any other.

/// Quote characters used when none are configured.
pub const DEFAULT_QUOTES: &[char] = &['"'];

/// Split a raw input line into tokens.
///
/// - The input is trimmed before scanning
/// - Whitespace inside quotes is preserved verbatim
/// - An unbalanced quote stays open until the end of the input
/// - A token is emitted at unquoted whitespace only when it has content;
///   the last character always emits, so a trailing `""` is an empty token
///
/// Empty or whitespace-only input yields no tokens. Never fails.
pub fn tokenize(input: &str, quotes: &[char]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut in_quote = false;

    let mut chars = input.trim().chars().peekable();
    while let Some(ch) = chars.next() {
        let is_last = chars.peek().is_none();

        if quotes.contains(&ch) {
            in_quote = !in_quote;
        } else if in_quote || !ch.is_whitespace() {
            buffer.push(ch);
        }

        let has_token = !buffer.is_empty();
        let at_separator = ch.is_whitespace() && !in_quote;
        if (has_token && at_separator) || is_last {
            tokens.push(std::mem::take(&mut buffer));
        }
    }

    tokens
}
