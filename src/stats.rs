use crate::models::{DailyRecord, DashboardResponse, HistoryStore};
use crate::window::{chart_series, forward_status, trailing_window, window_days};
use chrono::{Duration, Local, NaiveDate};

/// Streak walks stop this many days before today.
pub const STREAK_LOOKBACK_DAYS: i64 = 730;

pub struct DashboardParams<'a> {
    pub goal: u64,
    pub days: u32,
    pub default_list_url: &'a str,
}

pub fn solved_on(history: &HistoryStore, date: NaiveDate) -> u64 {
    history.get(date).map(DailyRecord::total).unwrap_or(0)
}

pub fn goal_percentage(solved_today: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    100.0 * solved_today as f64 / goal as f64
}

pub fn total_all_time(history: &HistoryStore) -> u64 {
    history
        .days
        .values()
        .fold(0u64, |sum, record| sum.saturating_add(record.total()))
}

/// Consecutive days meeting `goal`, walking back from `today`. A today with
/// no entry at all is skipped rather than breaking the run; an entry of zero
/// still breaks it.
pub fn current_streak(history: &HistoryStore, goal: u64, today: NaiveDate) -> u32 {
    let limit = today - Duration::days(STREAK_LOOKBACK_DAYS);
    let mut streak = 0u32;
    let mut date = today;

    while date >= limit {
        match history.get(date) {
            None if date == today => {}
            None => break,
            Some(record) if record.total() >= goal => streak += 1,
            Some(_) => break,
        }

        let Some(previous) = date.pred_opt() else {
            break;
        };
        date = previous;
    }

    streak
}

pub fn rolling_average(window: &[(NaiveDate, DailyRecord)]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum: u64 = window.iter().map(|(_, record)| record.total()).sum();
    sum as f64 / window.len() as f64
}

pub fn build_dashboard(history: &HistoryStore, params: &DashboardParams<'_>) -> DashboardResponse {
    build_dashboard_at(Local::now().date_naive(), history, params)
}

pub fn build_dashboard_at(
    today: NaiveDate,
    history: &HistoryStore,
    params: &DashboardParams<'_>,
) -> DashboardResponse {
    let solved_today = solved_on(history, today);
    let window = trailing_window(history, params.days, today);

    DashboardResponse {
        date: today,
        goal: params.goal,
        days: params.days,
        solved_today,
        goal_percentage: goal_percentage(solved_today, params.goal),
        current_streak: current_streak(history, params.goal, today),
        total_all_time: total_all_time(history),
        rolling_average: rolling_average(&window),
        window: window_days(&window, params.goal),
        chart: chart_series(&window, params.goal, today),
        status_cards: forward_status(history, params.days, today, params.goal),
        list_url: history.list_url_or(params.default_list_url).to_string(),
        warnings: Vec::new(),
        reminder: None,
    }
}
