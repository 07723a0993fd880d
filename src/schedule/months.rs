use chrono::{Datelike, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Canonical month names, index = ordinal (January = 0)
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

lazy_static! {
    static ref THROUGH_RANGE: Regex =
        Regex::new(r"(\w+)\s+through\s+(\w+)").expect("month range pattern compiles");
    static ref DASH_RANGE: Regex = Regex::new(r"(\w+)-(\w+)").expect("month range pattern compiles");
}

/// Ordinal of a canonical month name, if the token is one
pub fn month_ordinal(token: &str) -> Option<usize> {
    MONTH_NAMES.iter().position(|&name| name == token)
}

/// Decide whether a site is within its active season at the given instant.
///
/// The open-months field is uncurated free text ("April through November",
/// "april-november", or blank). Blank means open year-round; a recognized
/// season phrase is honored exactly; anything else counts as out of season.
pub fn is_open_this_month(open_months: &str, at: NaiveDateTime) -> bool {
    let text = open_months.trim().to_lowercase();

    if text.is_empty() {
        // Assume open year-round if no months specified
        return true;
    }

    let current = at.month0() as usize;

    // Loose substring check: the current month's name anywhere in the text
    // counts, even inside another word ("may" also hits "maybe")
    if text.contains(MONTH_NAMES[current]) {
        return true;
    }

    // Ranges like "april through november"
    if let Some(open) = range_verdict(&THROUGH_RANGE, &text, current) {
        return open;
    }

    // Ranges with dashes like "april-november"
    if let Some(open) = range_verdict(&DASH_RANGE, &text, current) {
        return open;
    }

    false
}

/// Evaluate the first range the pattern finds in the text.
///
/// Returns None when the pattern does not match or either captured token is
/// not a month name, so the caller can fall through to the next rule.
fn range_verdict(pattern: &Regex, text: &str, current: usize) -> Option<bool> {
    let caps = pattern.captures(text)?;
    let start = month_ordinal(caps.get(1)?.as_str())?;
    let end = month_ordinal(caps.get(2)?.as_str())?;

    if start <= end {
        Some(current >= start && current <= end)
    } else {
        // Wraps around the year (e.g. "november through march")
        Some(current >= start || current <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_month_ordinal() {
        assert_eq!(month_ordinal("january"), Some(0));
        assert_eq!(month_ordinal("december"), Some(11));
        assert_eq!(month_ordinal("may"), Some(4));

        // Only exact lowercase names resolve
        assert_eq!(month_ordinal("May"), None);
        assert_eq!(month_ordinal("sept"), None);
        assert_eq!(month_ordinal("year"), None);
    }

    #[test]
    fn test_empty_text_is_open() {
        assert!(is_open_this_month("", dt(2023, 1, 1)));
        assert!(is_open_this_month("   ", dt(2023, 7, 15)));
    }

    #[test]
    fn test_current_month_mentioned() {
        assert!(is_open_this_month("Open in May only", dt(2023, 5, 15)));
        assert!(!is_open_this_month("Open in May only", dt(2023, 6, 15)));

        // The substring check is loose: "may" inside another word still counts
        assert!(is_open_this_month("Maybe closed", dt(2023, 5, 15)));
    }

    #[test]
    fn test_through_range() {
        let text = "April through November";
        assert!(is_open_this_month(text, dt(2023, 5, 15)));
        assert!(is_open_this_month(text, dt(2023, 4, 1)));
        assert!(is_open_this_month(text, dt(2023, 11, 30)));
        assert!(!is_open_this_month(text, dt(2023, 1, 1)));
        assert!(!is_open_this_month(text, dt(2023, 12, 25)));
    }

    #[test]
    fn test_through_range_wraps_year() {
        let text = "November through March";
        assert!(is_open_this_month(text, dt(2023, 12, 25)));
        assert!(is_open_this_month(text, dt(2023, 2, 1)));
        assert!(is_open_this_month(text, dt(2023, 11, 1)));
        assert!(!is_open_this_month(text, dt(2023, 7, 4)));
    }

    #[test]
    fn test_dash_range() {
        assert!(is_open_this_month("april-november", dt(2023, 5, 15)));
        assert!(!is_open_this_month("april-november", dt(2023, 1, 1)));

        // Wrapping works the same as the "through" form
        assert!(is_open_this_month("november-march", dt(2023, 12, 25)));
        assert!(!is_open_this_month("november-march", dt(2023, 7, 4)));
    }

    #[test]
    fn test_unresolvable_range_falls_through() {
        // "mid" is not a month, so the dash pattern produces no verdict and
        // evaluation ends at the fail-closed default
        assert!(!is_open_this_month("mid-may to october", dt(2023, 3, 1)));

        // The current-month substring check still runs first
        assert!(is_open_this_month("mid-may to october", dt(2023, 10, 1)));
        assert!(is_open_this_month("mid-may to october", dt(2023, 5, 1)));
    }

    #[test]
    fn test_unrecognized_text_is_closed() {
        // Non-empty text that matches nothing is treated as out of season,
        // including phrasings a human would read as always-open
        assert!(!is_open_this_month("Year Round", dt(2023, 5, 15)));
        assert!(!is_open_this_month("seasonal", dt(2023, 5, 15)));
    }

    #[test]
    fn test_idempotent() {
        let at = dt(2023, 5, 15);
        let first = is_open_this_month("April through November", at);
        let second = is_open_this_month("April through November", at);
        assert_eq!(first, second);
    }
}
