use crate::models::{DailyRecord, HistoryStore, LIST_URL_KEY};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIERS: [&str; 3] = ["easy", "medium", "hard"];

/// A stored entry that could not be read and was left out of the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub key: String,
    pub reason: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipping entry {}: {}", self.key, self.reason)
    }
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub history: HistoryStore,
    pub warnings: Vec<LoadWarning>,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_FORMAT).ok()
}

/// Reads the flat persisted mapping. Legacy integer counts are upgraded,
/// anything unreadable is skipped and reported.
pub fn decode_history(value: &Value) -> Decoded {
    let mut decoded = Decoded::default();

    let Some(entries) = value.as_object() else {
        decoded.warnings.push(LoadWarning {
            key: "<root>".to_string(),
            reason: format!("expected an object, found {}", kind(value)),
        });
        return decoded;
    };

    for (key, entry) in entries {
        if key == LIST_URL_KEY {
            match entry.as_str() {
                Some(url) => decoded.history.list_url = Some(url.to_string()),
                None => decoded.warnings.push(LoadWarning {
                    key: key.clone(),
                    reason: format!("expected a string, found {}", kind(entry)),
                }),
            }
            continue;
        }

        let Some(date) = parse_date_key(key) else {
            decoded.warnings.push(LoadWarning {
                key: key.clone(),
                reason: "key is not a YYYY-MM-DD date".to_string(),
            });
            continue;
        };

        if decoded.history.days.contains_key(&date) {
            decoded.warnings.push(LoadWarning {
                key: key.clone(),
                reason: format!("duplicate entry for {date}"),
            });
            continue;
        }

        match decode_entry(entry) {
            Ok(record) => {
                decoded.history.days.insert(date, record);
            }
            Err(reason) => decoded.warnings.push(LoadWarning {
                key: key.clone(),
                reason,
            }),
        }
    }

    decoded
}

fn decode_entry(entry: &Value) -> Result<DailyRecord, String> {
    match entry {
        Value::Number(number) => number
            .as_u64()
            .map(DailyRecord::from_legacy)
            .ok_or_else(|| format!("legacy count {number} is not a non-negative integer")),
        Value::Object(fields) => {
            if TIERS.iter().all(|tier| !fields.contains_key(*tier)) {
                return Err("record has no easy, medium or hard count".to_string());
            }
            Ok(DailyRecord::new(
                tier_count(fields, "easy")?,
                tier_count(fields, "medium")?,
                tier_count(fields, "hard")?,
            ))
        }
        other => Err(format!("unexpected {}", kind(other))),
    }
}

/// Missing tiers read as 0 and negative ones are clamped to 0; the full `u64`
/// range is accepted so anything written back loads again.
fn tier_count(fields: &Map<String, Value>, tier: &str) -> Result<u64, String> {
    let Some(value) = fields.get(tier) else {
        return Ok(0);
    };
    if let Some(count) = value.as_u64() {
        return Ok(count);
    }
    match value.as_i64() {
        Some(count) => {
            debug!(tier, count, "normalising negative tier count to 0");
            Ok(0)
        }
        None => Err(format!("{tier} count {value} is not an integer")),
    }
}

/// Writes the history back to the flat mapping, date keys ascending.
pub fn encode_history(history: &HistoryStore) -> Value {
    let mut map = Map::new();
    for (date, record) in &history.days {
        map.insert(
            date_key(*date),
            serde_json::json!({
                "easy": record.easy,
                "medium": record.medium,
                "hard": record.hard,
            }),
        );
    }
    if let Some(url) = &history.list_url {
        map.insert(LIST_URL_KEY.to_string(), Value::String(url.clone()));
    }
    Value::Object(map)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
