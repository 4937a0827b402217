use super::feed::{AutocompleteFeed, FeedEntry};
use crate::config::AutocompleteConfig;

/// Text after `/` on the line being typed, if that line starts a command.
///
/// `cursor` is a byte offset into `text`; offsets past the end are clamped
/// and offsets inside a multi-byte character are moved back to its start.
pub fn slash_filter(text: &str, cursor: usize) -> Option<&str> {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }

    let before = &text[..cursor];
    let line = match before.rfind('\n') {
        Some(idx) => &before[idx + 1..],
        None => before,
    };

    line.strip_prefix('/')
}

/// Feed entries whose command contains `filter`, in feed order
pub fn suggest<'a>(
    feed: &'a AutocompleteFeed,
    filter: &str,
    config: &AutocompleteConfig,
) -> Vec<&'a FeedEntry> {
    let needle = if config.case_sensitive {
        filter.to_string()
    } else {
        filter.to_lowercase()
    };

    feed.iter()
        .filter(|entry| {
            if config.case_sensitive {
                entry.command.contains(&needle)
            } else {
                entry.command.to_lowercase().contains(&needle)
            }
        })
        .take(config.max_suggestions)
        .collect()
}
