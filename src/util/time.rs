use std::time::{SystemTime, UNIX_EPOCH};

const SECONDS_PER_DAY: u64 = 86_400;

/// Formats a Unix timestamp as `UTC dd-mm-yyyy hh:mm:ss`.
///
/// ## Parameters
/// - `seconds`: Seconds since 1970-01-01 00:00:00 UTC.
///
/// ## Returns
/// The date and time in UTC, day first.
///
/// ## Example
/// ```
/// use reckon::util::time::utc_timestamp;
///
/// assert_eq!(utc_timestamp(0), "UTC 01-01-1970 00:00:00");
/// assert_eq!(utc_timestamp(951_782_400), "UTC 29-02-2000 00:00:00");
/// assert_eq!(utc_timestamp(1_234_567_890), "UTC 13-02-2009 23:31:30");
/// ```
#[must_use]
pub fn utc_timestamp(seconds: u64) -> String {
    let (year, month, day) = civil_from_days(seconds / SECONDS_PER_DAY);
    let time = seconds % SECONDS_PER_DAY;

    format!("UTC {day:02}-{month:02}-{year:04} {:02}:{:02}:{:02}",
            time / 3600,
            time % 3600 / 60,
            time % 60)
}

/// The current time, formatted by [`utc_timestamp`]. A clock set before 1970
/// reads as the epoch.
#[must_use]
pub fn now_utc() -> String {
    let seconds = SystemTime::now().duration_since(UNIX_EPOCH)
                                   .map_or(0, |elapsed| elapsed.as_secs());
    utc_timestamp(seconds)
}

/// Converts days since 1970-01-01 to a proleptic Gregorian `(year, month,
/// day)`, counting in 400-year eras that start on March 1st.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let shifted = days + 719_468;
    let era = shifted / 146_097;
    let day_of_era = shifted - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;

    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + u64::from(month <= 2);

    (year, month, day)
}
