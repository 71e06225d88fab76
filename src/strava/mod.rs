//! Strava activity summary.
//!
//! Fetches the athlete's latest activities and projects them into the
//! recent-runs list and the trailing seven day mileage.

use chrono::{DateTime, Utc};
use reqwest::Method;

use crate::{
    error::Result,
    management::TokenSession,
    types::{ActivitySummaryView, RunView, StravaActivity},
    utils,
};

/// Activities requested per call. Weekly mileage only sees these.
pub const ACTIVITIES_PER_PAGE: &str = "5";

/// Number of runs listed on the dashboard.
pub const RECENT_RUNS_LEN: usize = 3;

pub async fn recent_activities(
    session: &TokenSession,
    now: DateTime<Utc>,
) -> Result<ActivitySummaryView> {
    let url = format!(
        "{uri}/athlete/activities",
        uri = session.settings().api_url
    );

    let response = session
        .authorized_request(Method::GET, &url, &[("per_page", ACTIVITIES_PER_PAGE)])
        .await?;
    let activities = response.json::<Vec<StravaActivity>>().await?;
    Ok(activity_summary(&activities, now))
}

/// Projects raw activities into the dashboard summary.
///
/// Only activities of type `Run` are listed, newest first as Strava returns
/// them, capped at [`RECENT_RUNS_LEN`]. Weekly mileage covers every fetched run
/// that started strictly after `now - 7 days`.
pub fn activity_summary(activities: &[StravaActivity], now: DateTime<Utc>) -> ActivitySummaryView {
    let recent_runs = activities
        .iter()
        .filter(|a| a.kind == utils::RUN_ACTIVITY)
        .take(RECENT_RUNS_LEN)
        .map(|run| RunView {
            name: run.name.clone(),
            distance: utils::format_miles(run.distance),
            duration: utils::format_duration(run.moving_time),
            pace: utils::calculate_pace(run.distance, run.moving_time),
            date: utils::relative_date_label(run.start_date, now),
        })
        .collect();

    ActivitySummaryView {
        recent_runs,
        weekly_mileage: format!("{:.1}", utils::weekly_mileage(activities, now)),
    }
}
