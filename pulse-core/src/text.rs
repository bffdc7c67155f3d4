//! Text and time helpers shared by the pipeline stages

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Anything but letters, numbers, underscore and whitespace
static NON_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a title for duplicate detection.
///
/// Lowercases, strips everything that is neither alphanumeric, underscore
/// nor whitespace, collapses whitespace runs and trims. Short generic titles
/// can collide; callers rely on exactly this behaviour.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_WORD_REGEX.replace_all(&lowered, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Whole days elapsed between `published` and `now`, floored.
///
/// Future dates yield negative ages.
pub fn age_days(published: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - published).num_seconds().div_euclid(86_400)
}

/// Current wall-clock time as a naive local timestamp
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// First `max` characters of `text`, for log lines
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
