use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

/// Canonical weekday names, index = days from Monday
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

lazy_static! {
    // Clock windows like "8:00am-6:00pm", "8am-6pm" or "8-18:00", with the
    // meridiem marker optional on each side independently
    static ref TIME_RANGE: Regex =
        Regex::new(r"(\d{1,2}):?(\d{0,2})\s*(am|pm)?\s*-\s*(\d{1,2}):?(\d{0,2})\s*(am|pm)?")
            .expect("time range pattern compiles");
}

/// Decide whether a site is open on the given weekday at the given clock time.
///
/// The operation-hours field is uncurated free text. Blank means always open;
/// "24/7" and "24 hours" short-circuit everything; otherwise the weekday must
/// match (by name or by one of the recognized day-range phrases) and, when any
/// clock windows are present, the current time must fall inside one of them.
pub fn is_open_today_and_now(operation_day_hours: &str, at: NaiveDateTime) -> bool {
    let text = operation_day_hours.trim().to_lowercase();

    if text.is_empty() {
        // Assume open if no hours specified
        return true;
    }

    // Around-the-clock sites skip the day and time gates entirely
    if text.contains("24/7") || text.contains("24 hours") {
        return true;
    }

    if !matches_day(&text, at.weekday()) {
        return false;
    }

    let windows = parse_time_windows(&text);
    if windows.is_empty() {
        // No specific times found, assume open all day
        return true;
    }

    // HHMM comparison, inclusive on both ends
    let current = at.hour() * 100 + at.minute();
    windows
        .iter()
        .any(|&(start, end)| current >= start && current <= end)
}

/// Day-of-week gate: the weekday's own name anywhere in the text wins,
/// otherwise the first recognized day-range phrase decides
fn matches_day(text: &str, weekday: Weekday) -> bool {
    let today = WEEKDAY_NAMES[weekday.num_days_from_monday() as usize];
    if text.contains(today) {
        return true;
    }

    if text.contains("monday through friday") || text.contains("monday-friday") {
        weekday.num_days_from_monday() <= 4
    } else if text.contains("weekends") || text.contains("saturday and sunday") {
        weekday.num_days_from_monday() >= 5
    } else {
        text.contains("daily") || text.contains("every day")
    }
}

/// Collect every clock window in the text as (start, end) HHMM pairs.
///
/// Meridiem resolution is per side: "pm" adds 12 except for 12pm, "am" zeroes
/// a 12, and an unmarked hour is used as written. A marker on one side is
/// never inferred onto the other.
pub fn parse_time_windows(text: &str) -> Vec<(u32, u32)> {
    TIME_RANGE
        .captures_iter(text)
        .map(|caps| {
            let start = window_edge(
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map(|m| m.as_str()),
            );
            let end = window_edge(
                caps.get(4).map_or("", |m| m.as_str()),
                caps.get(5).map_or("", |m| m.as_str()),
                caps.get(6).map(|m| m.as_str()),
            );
            (start, end)
        })
        .collect()
}

/// Convert one side of a window to an HHMM integer
fn window_edge(hour: &str, minutes: &str, meridiem: Option<&str>) -> u32 {
    let mut hour: u32 = hour.parse().unwrap_or(0);
    let minutes: u32 = if minutes.is_empty() {
        0
    } else {
        minutes.parse().unwrap_or(0)
    };

    match meridiem {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    hour * 100 + minutes
}
