//! Ordering of free-text period strings.
//!
//! Work periods ("Jan 2022 – Present") and project roles
//! ("creator (jul 2024)") carry a month and year in prose. They are turned
//! into an integer ordinal so lists can be shown most recent first, with
//! ongoing entries always on top.

use std::cmp::Reverse;
use std::sync::OnceLock;

use regex::Regex;

/// Offset added to any period that mentions "present".
pub const PRESENT_OFFSET: i64 = 100_000;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[^a-z0-9]{0,3}(\d{4})")
            .expect("month/year pattern is valid")
    })
}

/// Convert a period string into a sortable ordinal.
///
/// The first month name followed by a four digit year gives
/// `year * 12 + month` (jan = 0). Text mentioning "present" gets
/// [`PRESENT_OFFSET`] on top. Text without a month and year is 0.
pub fn parse_ordinal(text: &str) -> i64 {
    let lowered = text.to_lowercase();

    let Some(captures) = month_year_pattern().captures(&lowered) else {
        return 0;
    };

    let month = MONTHS
        .iter()
        .position(|m| *m == &captures[1])
        .unwrap_or(0) as i64;
    let year: i64 = captures[2].parse().unwrap_or(0);
    let ordinal = year * 12 + month;

    if lowered.contains("present") {
        ordinal + PRESENT_OFFSET
    } else {
        ordinal
    }
}

/// Stable sort, highest ordinal first. Equal ordinals keep their order.
pub fn sort_descending<T, F>(items: &mut [T], ordinal_of: F)
where
    F: Fn(&T) -> i64,
{
    items.sort_by_key(|item| Reverse(ordinal_of(item)));
}
