//! Date/time arithmetic shared by the date and time widgets

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Calendar day of `date` at the time-of-day of `time`
///
/// `None` when either part is missing.
pub fn combine_date_and_time(date: Option<NaiveDate>, time: Option<NaiveTime>) -> Option<NaiveDateTime> {
    let (date, time) = (date?, time?);
    // sub-second precision is not part of an encounter time
    let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), time.second())?;
    Some(date.and_time(time))
}

/// Keep the day of `timestamp`, replace its time-of-day
pub fn with_time_of_day(timestamp: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    combine_date_and_time(Some(timestamp.date()), Some(time)).unwrap_or(timestamp)
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
