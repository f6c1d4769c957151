//! Pure formatting helpers used by the list view.
//!
//! Nothing here performs I/O. Parse failures of the text-held lists are
//! reported as [`DisplayError`] so callers can branch on them; the `render_*`
//! helpers collapse them into placeholder text.

use crate::models::metadata::{AuthorEntry, FeedEntry};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

pub const NO_FEEDS: &str = "No feeds";
pub const INVALID_FEEDS: &str = "Invalid feeds format";
pub const NO_AUTHORS: &str = "No authors";
pub const INVALID_AUTHORS: &str = "Invalid authors format";

pub const ELLIPSIS: &str = "...";
pub const FEED_LINK_MAX_LEN: usize = 30;
pub const AUTHORS_MAX_LEN: usize = 22;
pub const TITLE_MAX_LEN: usize = 40;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("feeds are not a valid list: {0}")]
    MalformedFeeds(#[source] serde_json::Error),
    #[error("authors are not a valid list: {0}")]
    MalformedAuthors(#[source] serde_json::Error),
}

/// Cut `text` to `max_len` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
    }
}

pub fn render_title(title: &str) -> String {
    truncate(title, TITLE_MAX_LEN)
}

pub fn parse_feeds(text: &str) -> Result<Vec<FeedEntry>, DisplayError> {
    serde_json::from_str(text).map_err(DisplayError::MalformedFeeds)
}

pub fn parse_authors(text: &str) -> Result<Vec<AuthorEntry>, DisplayError> {
    serde_json::from_str(text).map_err(DisplayError::MalformedAuthors)
}

/// One display line per feed link.
pub fn render_feeds(feeds: &str) -> Vec<String> {
    if is_empty_list(feeds) {
        return vec![NO_FEEDS.to_string()];
    }
    match parse_feeds(feeds) {
        Ok(entries) => entries
            .iter()
            .map(|feed| truncate(&feed.link, FEED_LINK_MAX_LEN))
            .collect(),
        Err(err) => {
            debug!("rendering feeds failed: {}", err);
            vec![INVALID_FEEDS.to_string()]
        }
    }
}

/// Author names joined with `", "`.
pub fn render_authors(authors: &str) -> String {
    if is_empty_list(authors) {
        return NO_AUTHORS.to_string();
    }
    match parse_authors(authors) {
        Ok(entries) => {
            let names = entries
                .iter()
                .map(|author| author.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            truncate(&names, AUTHORS_MAX_LEN)
        }
        Err(err) => {
            debug!("rendering authors failed: {}", err);
            INVALID_AUTHORS.to_string()
        }
    }
}

/// Split a combined publication datetime into `YYYY-MM-DD` and `HH:MM`.
///
/// Values chrono cannot read fall back to a plain split on `T`, keeping the
/// first five characters of the time part.
pub fn split_publication(value: &str) -> (String, String) {
    let trimmed = value.trim();
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return (
                parsed.format("%Y-%m-%d").to_string(),
                parsed.format("%H:%M").to_string(),
            );
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return (date.format("%Y-%m-%d").to_string(), String::new());
    }

    match trimmed.split_once('T') {
        Some((date, time)) => (date.to_string(), time.chars().take(5).collect()),
        None => (trimmed.to_string(), String::new()),
    }
}

pub fn join_publication(date: &str, time: &str) -> String {
    format!("{}T{}", date, time)
}

/// Reduce a publication datetime to the minute precision the edit form holds.
pub fn normalize_publication(value: &str) -> String {
    let (date, time) = split_publication(value);
    join_publication(&date, &time)
}

fn is_empty_list(text: &str) -> bool {
    text.is_empty() || text == "[]"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("", 5), "");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hi", 30), "hi");
    }

    #[test]
    fn truncate_cuts_long_text() {
        let cut = truncate("hello world", 5);
        assert_eq!(cut, "hello...");
        assert_eq!(cut.chars().count(), 5 + 3);
        assert_eq!(truncate("abc", 0), "...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("añoñoño", 3), "año...");
        assert_eq!(truncate("año", 3), "año");
    }

    #[test]
    fn feeds_placeholders() {
        assert_eq!(render_feeds(""), vec![NO_FEEDS]);
        assert_eq!(render_feeds("[]"), vec![NO_FEEDS]);
        assert_eq!(render_feeds("not json"), vec![INVALID_FEEDS]);
        assert_eq!(render_feeds(r#"[{"title":"no link"}]"#), vec![INVALID_FEEDS]);
    }

    #[test]
    fn feeds_render_one_line_per_link() {
        assert_eq!(
            render_feeds(r#"[{"link":"http://a.com"}]"#),
            vec!["http://a.com"]
        );
        let long = r#"[{"link":"http://example.com/a/very/long/feed/path.xml"},{"link":"http://b.io"}]"#;
        assert_eq!(
            render_feeds(long),
            vec!["http://example.com/a/very/long...", "http://b.io"]
        );
    }

    #[test]
    fn authors_render_joined_names() {
        assert_eq!(render_authors(""), NO_AUTHORS);
        assert_eq!(render_authors("[]"), NO_AUTHORS);
        assert_eq!(render_authors("{bad"), INVALID_AUTHORS);
        assert_eq!(
            render_authors(r#"[{"name":"Ann"},{"name":"Bo"}]"#),
            "Ann, Bo"
        );
        assert_eq!(
            render_authors(r#"[{"name":"Annabelle Smith"},{"name":"Bob Jones"}]"#),
            "Annabelle Smith, Bob J..."
        );
    }

    #[test]
    fn publication_split_handles_backend_shapes() {
        assert_eq!(
            split_publication("2024-05-01T10:30:15"),
            ("2024-05-01".to_string(), "10:30".to_string())
        );
        assert_eq!(
            split_publication("2024-05-01T10:30"),
            ("2024-05-01".to_string(), "10:30".to_string())
        );
        assert_eq!(
            split_publication("2024-05-01T10:30:15.250"),
            ("2024-05-01".to_string(), "10:30".to_string())
        );
        assert_eq!(
            split_publication("2024-05-01"),
            ("2024-05-01".to_string(), String::new())
        );
        assert_eq!(
            split_publication("sometimeT12:345"),
            ("sometime".to_string(), "12:34".to_string())
        );
    }

    #[test]
    fn publication_join_restores_minute_precision() {
        assert_eq!(join_publication("2024-05-01", "10:30"), "2024-05-01T10:30");
        assert_eq!(
            normalize_publication("2024-05-01T10:30:59"),
            "2024-05-01T10:30"
        );
    }
}
