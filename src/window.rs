use crate::models::{
    CardStatus, ChartPoint, ChartSeries, DailyRecord, Difficulty, HistoryStore, StatusCard,
    TierSeries, WindowDay,
};
use crate::stats::solved_on;
use chrono::{Duration, NaiveDate};

/// `window_length` days ending at `today`, ascending, gaps filled with zero
/// records.
pub fn trailing_window(
    history: &HistoryStore,
    window_length: u32,
    today: NaiveDate,
) -> Vec<(NaiveDate, DailyRecord)> {
    (0..window_length)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(i64::from(offset));
            let record = history.get(date).copied().unwrap_or_default();
            (date, record)
        })
        .collect()
}

/// Status cards for `today` and the following `window_length - 1` days.
pub fn forward_status(
    history: &HistoryStore,
    window_length: u32,
    today: NaiveDate,
    goal: u64,
) -> Vec<StatusCard> {
    (0..window_length)
        .map(|offset| {
            let date = today + Duration::days(i64::from(offset));
            let solved = solved_on(history, date);
            let status = classify(date, solved, today, goal);
            let percentage = match status {
                CardStatus::Upcoming => 0.0,
                _ => card_percentage(solved, goal),
            };
            StatusCard {
                date,
                solved,
                status,
                percentage,
            }
        })
        .collect()
}

fn classify(date: NaiveDate, solved: u64, today: NaiveDate, goal: u64) -> CardStatus {
    if date > today {
        CardStatus::Upcoming
    } else if solved >= goal {
        CardStatus::GoalMet
    } else {
        CardStatus::BelowGoal
    }
}

fn card_percentage(solved: u64, goal: u64) -> f64 {
    if goal == 0 {
        return 0.0;
    }
    (100.0 * solved as f64 / goal as f64).min(100.0)
}

/// Splits a trailing window into per-tier series for a stacked chart.
pub fn chart_series(
    window: &[(NaiveDate, DailyRecord)],
    goal: u64,
    today: NaiveDate,
) -> ChartSeries {
    let tiers = Difficulty::STACK_ORDER
        .iter()
        .map(|&difficulty| TierSeries {
            difficulty,
            points: window
                .iter()
                .map(|(date, record)| ChartPoint {
                    date: *date,
                    count: difficulty.count(record),
                })
                .collect(),
        })
        .collect();

    let goal_line = window
        .iter()
        .map(|(date, _)| ChartPoint {
            date: *date,
            count: goal,
        })
        .collect();

    ChartSeries {
        tiers,
        goal_line,
        today,
    }
}

pub fn window_days(window: &[(NaiveDate, DailyRecord)], goal: u64) -> Vec<WindowDay> {
    window
        .iter()
        .map(|(date, record)| WindowDay {
            date: *date,
            easy: record.easy,
            medium: record.medium,
            hard: record.hard,
            total: record.total(),
            met_goal: record.total() >= goal,
        })
        .collect()
}
