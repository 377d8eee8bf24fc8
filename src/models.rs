use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reserved non-date key holding the bookmarked problem list URL.
pub const LIST_URL_KEY: &str = "leetcode_list_url";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyRecord {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

impl DailyRecord {
    pub fn new(easy: u64, medium: u64, hard: u64) -> Self {
        Self { easy, medium, hard }
    }

    /// Legacy stores kept a single count per day; it is read as all easy.
    pub fn from_legacy(count: u64) -> Self {
        Self::new(count, 0, 0)
    }

    pub fn total(&self) -> u64 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }
}

/// In-memory history: daily records keyed by calendar date plus the single
/// configuration string stored alongside them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStore {
    pub days: BTreeMap<NaiveDate, DailyRecord>,
    pub list_url: Option<String>,
}

impl HistoryStore {
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    pub fn log_day(&mut self, date: NaiveDate, record: DailyRecord) {
        self.days.insert(date, record);
    }

    pub fn list_url_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.list_url.as_deref().unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Upcoming,
    GoalMet,
    BelowGoal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    pub date: NaiveDate,
    pub solved: u64,
    pub status: CardStatus,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Stacking order for charts, lowest severity first.
    pub const STACK_ORDER: [Difficulty; 3] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn count(self, record: &DailyRecord) -> u64 {
        match self {
            Difficulty::Easy => record.easy,
            Difficulty::Medium => record.medium,
            Difficulty::Hard => record.hard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierSeries {
    pub difficulty: Difficulty,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Always easy, medium, hard in that order.
    pub tiers: Vec<TierSeries>,
    pub goal_line: Vec<ChartPoint>,
    pub today: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowDay {
    pub date: NaiveDate,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub total: u64,
    pub met_goal: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderStatus {
    pub elapsed_secs: i64,
    pub due: bool,
    pub fire: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub goal: u64,
    pub days: u32,
    pub solved_today: u64,
    pub goal_percentage: f64,
    pub current_streak: u32,
    pub total_all_time: u64,
    pub rolling_average: f64,
    pub window: Vec<WindowDay>,
    pub chart: ChartSeries,
    pub status_cards: Vec<StatusCard>,
    pub list_url: String,
    pub warnings: Vec<String>,
    pub reminder: Option<ReminderStatus>,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub total: u64,
    pub goal_percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: NaiveDate,
    pub logged: bool,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LogDayRequest {
    pub date: Option<NaiveDate>,
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUrlPayload {
    pub url: String,
}
