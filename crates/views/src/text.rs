use chrono::{DateTime, Utc};

/// Returns the first `max` characters of `text`, or `None` if it is not longer than that
pub fn truncate(text: &str, max: usize) -> Option<&str> {
    text.char_indices().nth(max).map(|(idx, _)| &text[..idx])
}

/// Uppercases the first character of `text`
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Appends a period unless `text` already ends with one
pub fn punctuate(text: &str) -> String {
    if text.is_empty() || text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Human readable distance between `then` and `now`, e.g. `3 days ago`
pub fn time_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(&str, i64); 6] = [
        ("year", 365 * 24 * 60 * 60),
        ("month", 30 * 24 * 60 * 60),
        ("day", 24 * 60 * 60),
        ("hour", 60 * 60),
        ("minute", 60),
        ("second", 1),
    ];

    let seconds = (now - then).num_seconds().max(0);

    UNITS
        .iter()
        .find(|(_, size)| seconds >= *size)
        .map(|(unit, size)| {
            let count = seconds / size;
            let plural = if count == 1 { "" } else { "s" };
            format!("{count} {unit}{plural} ago")
        })
        .unwrap_or_else(|| "just now".to_string())
}
