use chrono::{DateTime, Duration, TimeZone, Utc};
use lifedash::types::StravaActivity;
use lifedash::utils::*;

// Helper function to create a test activity
fn create_test_activity(kind: &str, distance: f64, start_date: DateTime<Utc>) -> StravaActivity {
    StravaActivity {
        name: format!("{kind} activity"),
        kind: kind.to_string(),
        distance,
        moving_time: 1800,
        start_date,
    }
}

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 30, 0).unwrap()
}

#[test]
fn test_calculate_pace_five_miles_in_thirty_minutes() {
    // 8046.72 m is a hair over 5 miles; 1800 s over it is 6:00/mi
    assert!((meters_to_miles(8046.72) - 5.0).abs() < 1e-3);
    assert_eq!(calculate_pace(8046.72, 1800), "6:00");
}

#[test]
fn test_calculate_pace_pads_seconds() {
    // one mile in 7 minutes 5 seconds
    assert_eq!(calculate_pace(1609.34, 425), "7:05");
    // one mile in 59 seconds
    assert_eq!(calculate_pace(1609.34, 59), "0:59");
}

#[test]
fn test_calculate_pace_floors_seconds() {
    // 2 miles in 1001 s is 500.5 s/mi
    assert_eq!(calculate_pace(3218.68, 1001), "8:20");
    // 3 miles in 1000 s is 333.33 s/mi
    assert_eq!(calculate_pace(4828.02, 1000), "5:33");
    // 5 miles in 1798 s is 359.6 s/mi
    assert_eq!(calculate_pace(1609.34 * 5.0, 1798), "5:59");
}

#[test]
fn test_calculate_pace_seconds_always_in_range() {
    for distance in [400.0, 1609.34, 5000.0, 10000.0, 21097.5, 42195.0] {
        for moving_time in [1, 59, 60, 61, 599, 3599, 3600, 7321, 14400] {
            let pace = calculate_pace(distance, moving_time);
            let (minutes, seconds) = pace.split_once(':').unwrap();

            assert!(minutes.parse::<u64>().is_ok(), "bad minutes in {pace}");
            assert_eq!(seconds.len(), 2, "seconds not padded in {pace}");
            let seconds: u64 = seconds.parse().unwrap();
            assert!(seconds <= 59, "seconds out of range in {pace}");
        }
    }
}

#[test]
fn test_calculate_pace_without_distance() {
    assert_eq!(calculate_pace(0.0, 1800), "--:--");
}

#[test]
fn test_format_miles_one_decimal() {
    assert_eq!(format_miles(8046.72), "5.0");
    assert_eq!(format_miles(10000.0), "6.2");
    assert_eq!(format_miles(0.0), "0.0");
}

#[test]
fn test_format_duration_drops_zero_hours() {
    assert_eq!(format_duration(1800), "30:00");
    assert_eq!(format_duration(65), "01:05");
    assert_eq!(format_duration(0), "00:00");
}

#[test]
fn test_format_duration_keeps_hours() {
    assert_eq!(format_duration(3600), "01:00:00");
    assert_eq!(format_duration(5025), "01:23:45");
}

#[test]
fn test_weekly_mileage_only_counts_runs() {
    let now = test_now();
    let activities = vec![
        create_test_activity("Run", 1609.34, now - Duration::days(1)),
        create_test_activity("Ride", 16093.4, now - Duration::days(1)),
        create_test_activity("Walk", 1609.34, now - Duration::hours(3)),
        create_test_activity("Run", 3218.68, now - Duration::days(3)),
    ];

    let miles = weekly_mileage(&activities, now);
    assert!((miles - 3.0).abs() < 1e-9);
}

#[test]
fn test_weekly_mileage_window_boundary() {
    let now = test_now();
    let just_inside = now - Duration::days(6) - Duration::hours(23) - Duration::minutes(59);
    let just_outside = now - Duration::days(7) - Duration::minutes(1);

    let inside = vec![create_test_activity("Run", 1609.34, just_inside)];
    assert!((weekly_mileage(&inside, now) - 1.0).abs() < 1e-9);

    let outside = vec![create_test_activity("Run", 1609.34, just_outside)];
    assert_eq!(weekly_mileage(&outside, now), 0.0);
}

#[test]
fn test_weekly_mileage_excludes_exactly_seven_days() {
    let now = test_now();
    let activities = vec![create_test_activity("Run", 1609.34, now - Duration::days(7))];
    assert_eq!(weekly_mileage(&activities, now), 0.0);
}

#[test]
fn test_relative_date_label_today_and_yesterday() {
    let now = test_now();
    assert_eq!(relative_date_label(now, now), "Today");
    assert_eq!(relative_date_label(now - Duration::hours(23), now), "Today");
    assert_eq!(relative_date_label(now - Duration::hours(24), now), "Yesterday");
    assert_eq!(relative_date_label(now - Duration::hours(47), now), "Yesterday");
}

#[test]
fn test_relative_date_label_days_ago() {
    let now = test_now();
    for days in 2..=6 {
        assert_eq!(
            relative_date_label(now - Duration::days(days), now),
            format!("{days} days ago")
        );
    }
}

#[test]
fn test_relative_date_label_absolute_after_a_week() {
    let now = test_now();
    assert_eq!(relative_date_label(now - Duration::days(7), now), "3/8/2024");
    assert_eq!(relative_date_label(now - Duration::days(70), now), "1/5/2024");
}

#[test]
fn test_relative_date_label_future_is_today() {
    let now = test_now();
    assert_eq!(relative_date_label(now + Duration::hours(2), now), "Today");
}
