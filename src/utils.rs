use chrono::{DateTime, Duration, Utc};

use crate::types::StravaActivity;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Activity type Strava reports for runs.
pub const RUN_ACTIVITY: &str = "Run";

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Formats a distance in meters as miles with one decimal place.
pub fn format_miles(meters: f64) -> String {
    format!("{:.1}", meters_to_miles(meters))
}

/// Formats a pace as `minutes:seconds` per mile.
///
/// The pace is taken to hundredths of a second before it is floored, so the
/// meters-to-miles noise in 359.9991 s/mi reads `6:00` while 359.6 s/mi still
/// reads `5:59`. Minutes are the floor division by 60 and seconds the
/// remainder, zero-padded to two digits. A non-positive distance has no
/// meaningful pace and yields `--:--`.
pub fn calculate_pace(distance_meters: f64, moving_time_seconds: u64) -> String {
    let miles = meters_to_miles(distance_meters);
    if miles.is_nan() || miles <= 0.0 {
        return "--:--".to_string();
    }

    let pace_hundredths = (moving_time_seconds as f64 / miles * 100.0).round() as u64;
    let pace_seconds_per_mile = pace_hundredths / 100;
    let minutes = pace_seconds_per_mile / 60;
    let seconds = pace_seconds_per_mile % 60;
    format!("{minutes}:{seconds:02}")
}

/// Formats a moving time as `HH:MM:SS`, dropping the hour component when it
/// is zero (`MM:SS`). Hours wrap at 24 like a clock time.
pub fn format_duration(moving_time_seconds: u64) -> String {
    let hours = (moving_time_seconds / 3600) % 24;
    let minutes = (moving_time_seconds / 60) % 60;
    let seconds = moving_time_seconds % 60;

    if hours == 0 {
        format!("{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Sums the miles of runs that started strictly after `now - 7 days`.
pub fn weekly_mileage(activities: &[StravaActivity], now: DateTime<Utc>) -> f64 {
    let one_week_ago = now - Duration::days(7);

    activities
        .iter()
        .filter(|a| a.kind == RUN_ACTIVITY && a.start_date > one_week_ago)
        .map(|a| meters_to_miles(a.distance))
        .sum()
}

/// Labels a date relative to `now`.
///
/// The day difference is the floor of the elapsed time in whole days:
/// 0 is "Today", 1 "Yesterday", 2 to 6 "`n` days ago", anything older an
/// absolute `M/D/YYYY` date. Dates in the future count as today.
pub fn relative_date_label(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_days = (now - date).num_milliseconds().div_euclid(86_400_000);

    match diff_days {
        d if d <= 0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{d} days ago"),
        _ => date.format("%-m/%-d/%Y").to_string(),
    }
}
