//! Token normalization.
//!
//! Three steps applied in a fixed order: ASCII case folding, punctuation
//! stripping, non-ASCII stripping. Characters are deleted rather than
//! replaced, so `"don't"` becomes `"dont"` and `"e-mail"` becomes `"email"`.
//!
//! Only ASCII `A-Z` is folded. Text in other scripts passes through the
//! case step untouched and is then removed by the later steps.

/// Default upper bound on a token's length in bytes.
pub const MAX_TOKEN_LEN: usize = 49;

/// Normalize a token: fold case, strip punctuation, strip non-ASCII.
///
/// Total over any input and idempotent.
pub fn normalize(token: &str) -> String {
    strip_non_ascii(&strip_punctuation(&fold_case(token)))
}

/// Map ASCII uppercase letters to lowercase; leave everything else alone.
pub fn fold_case(text: &str) -> String {
    text.chars().map(|c| c.to_ascii_lowercase()).collect()
}

/// Keep ASCII alphanumerics and the space character, delete everything else.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Delete every character outside the ASCII range.
pub fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Join tokens with single spaces and normalize the joined string.
///
/// Used for n-gram comparison so that phrases and token windows go
/// through the same pipeline.
pub fn normalize_phrase<S: AsRef<str>>(tokens: &[S]) -> String {
    let joined = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

/// Truncate an already normalized token to `max_len` bytes.
///
/// Normalized tokens are pure ASCII, so any byte offset is a char boundary.
pub fn truncate_token(mut token: String, max_len: usize) -> String {
    if token.len() > max_len {
        token.truncate(max_len);
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ascii_only() {
        assert_eq!(fold_case("HeLLo ÄÖ"), "hello ÄÖ");
    }

    #[test]
    fn punctuation_is_deleted_not_replaced() {
        assert_eq!(normalize("don't"), "dont");
        assert_eq!(normalize("e-mail!"), "email");
        assert_eq!(normalize("(_test]"), "test");
    }

    #[test]
    fn spaces_survive() {
        assert_eq!(normalize("Go To HELL"), "go to hell");
    }

    #[test]
    fn non_ascii_is_removed() {
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize("日本"), "");
        assert_eq!(strip_non_ascii("naïve"), "nave");
    }

    #[test]
    fn idempotent_on_mixed_input() {
        for input in [
            "",
            "Hello, World!",
            "  spaced  out ",
            "MiXeD-CaSe_123",
            "ümlaut Ünïcode",
            "tab\tnew\nline",
            "\"quoted\" 'text'",
            "ÀÉÎ and ÿ",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn phrase_join_renormalizes() {
        assert_eq!(normalize_phrase(&["Go", "to", "Hell!"]), "go to hell");
        assert_eq!(normalize_phrase::<&str>(&[]), "");
    }

    #[test]
    fn truncation_respects_bound() {
        let long = "a".repeat(60);
        assert_eq!(truncate_token(long, MAX_TOKEN_LEN).len(), MAX_TOKEN_LEN);
        assert_eq!(truncate_token("short".to_string(), MAX_TOKEN_LEN), "short");
    }
}
