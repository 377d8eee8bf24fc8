use crate::models::ReminderStatus;
use chrono::{DateTime, Duration, Utc};

/// Longest accepted reminder interval, one year.
pub const MAX_INTERVAL_MINUTES: i64 = 60 * 24 * 365;

/// Session clock behind the practice reminder. Becomes due once the interval
/// has elapsed and fires a single time until reset.
#[derive(Debug, Clone)]
pub struct ReminderClock {
    interval: Duration,
    started_at: DateTime<Utc>,
    triggered: bool,
}

impl ReminderClock {
    pub fn new(interval_minutes: i64, now: DateTime<Utc>) -> Self {
        Self {
            interval: Duration::minutes(interval_minutes.clamp(0, MAX_INTERVAL_MINUTES)),
            started_at: now,
            triggered: false,
        }
    }

    pub fn check(&mut self, now: DateTime<Utc>) -> ReminderStatus {
        let elapsed = now - self.started_at;
        let due = elapsed >= self.interval;
        let fire = due && !self.triggered;
        if fire {
            self.triggered = true;
        }
        ReminderStatus {
            elapsed_secs: elapsed.num_seconds(),
            due,
            fire,
        }
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.started_at = now;
        self.triggered = false;
    }
}
