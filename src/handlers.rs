use crate::config::validate_display_days;
use crate::errors::AppError;
use crate::history::parse_date_key;
use crate::models::{
    DailyRecord, DashboardQuery, DashboardResponse, DayResponse, ListUrlPayload, LogDayRequest,
    ReminderStatus, TodayResponse,
};
use crate::state::AppState;
use crate::stats::{build_dashboard, goal_percentage, DashboardParams};
use crate::storage::persist_history;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let days = validate_display_days(query.days.unwrap_or(state.config.display_days))
        .map_err(AppError::bad_request)?;
    let params = DashboardParams {
        goal: state.config.daily_goal,
        days,
        default_list_url: &state.config.default_list_url,
    };

    let mut response = {
        let history = state.history.lock().await;
        build_dashboard(&history, &params)
    };
    response.warnings = state
        .warnings
        .lock()
        .await
        .iter()
        .map(ToString::to_string)
        .collect();
    response.reminder = Some(state.reminder.lock().await.check(Utc::now()));

    Ok(Json(response))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let date = today();
    let history = state.history.lock().await;
    let record = history.get(date).copied().unwrap_or_default();

    Ok(Json(TodayResponse {
        date,
        easy: record.easy,
        medium: record.medium,
        hard: record.hard,
        total: record.total(),
        goal_percentage: goal_percentage(record.total(), state.config.daily_goal),
    }))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(raw_date): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date_key(&raw_date).ok_or_else(|| {
        AppError::bad_request(format!("invalid date '{raw_date}', expected YYYY-MM-DD"))
    })?;
    let history = state.history.lock().await;
    let record = history.get(date).copied();

    Ok(Json(to_day_response(date, record)))
}

pub async fn log_day(
    State(state): State<AppState>,
    Json(payload): Json<LogDayRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let today = today();
    let date = payload.date.unwrap_or(today);
    if date > today {
        return Err(AppError::future_date(date, today));
    }
    let record = DailyRecord::new(payload.easy, payload.medium, payload.hard);

    let mut history = state.history.lock().await;
    let mut updated = history.clone();
    updated.log_day(date, record);
    persist_history(&state.config.data_path, &updated).await?;
    *history = updated;
    state.clear_load_warnings().await;

    info!(%date, total = record.total(), "logged day");
    Ok(Json(to_day_response(date, Some(record))))
}

pub async fn get_list_url(State(state): State<AppState>) -> Json<ListUrlPayload> {
    let history = state.history.lock().await;
    Json(ListUrlPayload {
        url: history.list_url_or(&state.config.default_list_url).to_string(),
    })
}

pub async fn put_list_url(
    State(state): State<AppState>,
    Json(payload): Json<ListUrlPayload>,
) -> Result<Json<ListUrlPayload>, AppError> {
    let url = payload.url.trim();
    if url.is_empty() {
        return Err(AppError::bad_request("url must not be empty"));
    }

    let mut history = state.history.lock().await;
    if history.list_url_or(&state.config.default_list_url) != url {
        let mut updated = history.clone();
        updated.list_url = Some(url.to_string());
        persist_history(&state.config.data_path, &updated).await?;
        *history = updated;
        state.clear_load_warnings().await;
        info!(url, "updated list url");
    }

    Ok(Json(ListUrlPayload {
        url: url.to_string(),
    }))
}

pub async fn reset_reminder(State(state): State<AppState>) -> Json<ReminderStatus> {
    let now = Utc::now();
    let mut reminder = state.reminder.lock().await;
    reminder.reset(now);
    Json(reminder.check(now))
}

fn to_day_response(date: NaiveDate, record: Option<DailyRecord>) -> DayResponse {
    let counts = record.unwrap_or_default();
    DayResponse {
        date,
        logged: record.is_some(),
        easy: counts.easy,
        medium: counts.medium,
        hard: counts.hard,
        total: counts.total(),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
