pub mod hours;
pub mod months;

pub use hours::is_open_today_and_now;
pub use months::is_open_this_month;

use chrono::NaiveDateTime;

/// The free-text schedule fields of one drop-off site
///
/// Both fields come straight from the public dataset and may be absent; a
/// missing field never counts against a site being open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSchedule {
    /// Months the site operates, e.g. "April through November"
    pub open_months: Option<String>,
    /// Weekdays and clock windows, e.g. "Monday through Friday, 8:00am-6:00pm"
    pub operation_day_hours: Option<String>,
}

impl SiteSchedule {
    /// Build a schedule from the two raw dataset fields
    pub fn new(open_months: Option<String>, operation_day_hours: Option<String>) -> Self {
        Self {
            open_months,
            operation_day_hours,
        }
    }
}

/// Decide whether a site is open at the given local instant.
///
/// The instant must already be localized to the site's timezone; the
/// evaluators never consult the system clock.
pub fn is_open_now(schedule: &SiteSchedule, at: NaiveDateTime) -> bool {
    // Check the season first; out-of-season sites skip the day/time check
    if !is_open_this_month(schedule.open_months.as_deref().unwrap_or(""), at) {
        return false;
    }

    is_open_today_and_now(schedule.operation_day_hours.as_deref().unwrap_or(""), at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_no_schedule_fields_is_always_open() {
        let schedule = SiteSchedule::default();
        assert!(is_open_now(&schedule, dt(2023, 1, 1, 0, 0)));
        assert!(is_open_now(&schedule, dt(2023, 7, 4, 23, 59)));
    }

    #[test]
    fn test_both_gates_must_pass() {
        let schedule = SiteSchedule::new(
            Some("April through November".to_string()),
            Some("Monday through Friday, 8:00am-6:00pm".to_string()),
        );

        // Wednesday May 17 2023, mid-afternoon: in season, in hours
        assert!(is_open_now(&schedule, dt(2023, 5, 17, 14, 30)));

        // Same instant in January: out of season
        assert!(!is_open_now(&schedule, dt(2023, 1, 18, 14, 30)));

        // Saturday in season: day gate fails
        assert!(!is_open_now(&schedule, dt(2023, 5, 20, 14, 30)));

        // Wednesday evening in season: time gate fails
        assert!(!is_open_now(&schedule, dt(2023, 5, 17, 19, 0)));
    }

    #[test]
    fn test_out_of_season_closes_even_always_open_hours() {
        let schedule = SiteSchedule::new(
            Some("April through November".to_string()),
            Some("24/7".to_string()),
        );
        assert!(!is_open_now(&schedule, dt(2023, 1, 18, 14, 30)));
        assert!(is_open_now(&schedule, dt(2023, 5, 17, 3, 0)));
    }

    #[test]
    fn test_missing_months_field_defers_to_hours() {
        let schedule = SiteSchedule::new(None, Some("Weekends 9am-5pm".to_string()));

        // Sunday Jan 1 2023 at 10:00
        assert!(is_open_now(&schedule, dt(2023, 1, 1, 10, 0)));
        // Tuesday Jan 3 2023 at 10:00
        assert!(!is_open_now(&schedule, dt(2023, 1, 3, 10, 0)));
    }
}
