use super::types::Message;

/// Trims and case-folds a raw query.
///
/// Returns `None` for empty or whitespace-only input, which callers treat as
/// "no matches" rather than an error.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(caseless::default_case_fold_str(trimmed))
}

/// Substring test against `"{message} {user_name}"`, case-folded.
///
/// Both sides use full Unicode case folding, so `ß` matches `ss` and every
/// sigma form folds to `σ`.
///
/// `folded_query` must already be normalized with [`normalize_query`].
pub fn matches_query(msg: &Message, folded_query: &str) -> bool {
    let haystack = caseless::default_case_fold_str(&format!("{} {}", msg.message, msg.user_name));
    haystack.contains(folded_query)
}

/// Filters `messages` in their original order.
pub fn filter_messages<'a>(messages: &'a [Message], query: &str) -> Vec<&'a Message> {
    match normalize_query(query) {
        Some(q) => messages.iter().filter(|m| matches_query(m, &q)).collect(),
        None => Vec::new(),
    }
}
