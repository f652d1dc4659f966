//! Study-day handling for the daily reset hour.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Timelike};

/// Calendar day a moment belongs to from a study perspective.
///
/// Before the reset hour the previous day is still in progress, so late-night
/// reviews count towards it.
pub fn study_day<Tz: TimeZone>(now: &DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    if now.hour() < daily_reset_hour {
        (now.clone() - Duration::days(1)).date_naive()
    } else {
        now.date_naive()
    }
}

/// Today's study day in local time.
pub fn today(daily_reset_hour: u32) -> NaiveDate {
    study_day(&Local::now(), daily_reset_hour)
}
