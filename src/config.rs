use crate::reminder::MAX_INTERVAL_MINUTES;
use std::{env, path::PathBuf, str::FromStr};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/leetcode_tracker_data.json";
pub const DEFAULT_DAILY_GOAL: u64 = 25;
pub const DEFAULT_DISPLAY_DAYS: u32 = 7;
pub const DEFAULT_REMINDER_MINUTES: i64 = 30;
pub const DEFAULT_LIST_URL: &str = "https://leetcode.com/problem-list/n7bysmt7/";

pub const MIN_DISPLAY_DAYS: u32 = 1;
pub const MAX_DISPLAY_DAYS: u32 = 365;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub daily_goal: u64,
    pub display_days: u32,
    pub reminder_minutes: i64,
    pub default_list_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            daily_goal: DEFAULT_DAILY_GOAL,
            display_days: DEFAULT_DISPLAY_DAYS,
            reminder_minutes: DEFAULT_REMINDER_MINUTES,
            default_list_url: DEFAULT_LIST_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let display_days = parse_or(&lookup, "DEFAULT_DISPLAY_DAYS", defaults.display_days)
            .clamp(MIN_DISPLAY_DAYS, MAX_DISPLAY_DAYS);

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            daily_goal: parse_or(&lookup, "DAILY_GOAL", defaults.daily_goal),
            display_days,
            reminder_minutes: reminder_minutes(&lookup, defaults.reminder_minutes),
            default_list_url: lookup("DEFAULT_LIST_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.default_list_url),
        }
    }
}

/// Checks a requested display window against the allowed range.
pub fn validate_display_days(days: u32) -> Result<u32, String> {
    if (MIN_DISPLAY_DAYS..=MAX_DISPLAY_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "days must be between {MIN_DISPLAY_DAYS} and {MAX_DISPLAY_DAYS}, got {days}"
        ))
    }
}

fn reminder_minutes(lookup: &impl Fn(&str) -> Option<String>, default: i64) -> i64 {
    let minutes = parse_or(lookup, "REMINDER_INTERVAL_MINUTES", default);
    if (0..=MAX_INTERVAL_MINUTES).contains(&minutes) {
        minutes
    } else {
        warn!(
            minutes,
            max = MAX_INTERVAL_MINUTES,
            "reminder interval out of range, using default"
        );
        default
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, value = %raw, "ignoring unparseable setting, using default");
                default
            }
        },
        None => default,
    }
}
