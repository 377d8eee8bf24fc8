use crate::config::Config;
use crate::history::LoadWarning;
use crate::models::HistoryStore;
use crate::reminder::ReminderClock;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub history: Arc<Mutex<HistoryStore>>,
    pub warnings: Arc<Mutex<Vec<LoadWarning>>>,
    pub reminder: Arc<Mutex<ReminderClock>>,
}

impl AppState {
    pub fn new(config: Config, history: HistoryStore, warnings: Vec<LoadWarning>) -> Self {
        let reminder = ReminderClock::new(config.reminder_minutes, Utc::now());
        Self {
            config: Arc::new(config),
            history: Arc::new(Mutex::new(history)),
            warnings: Arc::new(Mutex::new(warnings)),
            reminder: Arc::new(Mutex::new(reminder)),
        }
    }

    /// Skipped entries are gone from disk once the history has been saved.
    pub async fn clear_load_warnings(&self) {
        self.warnings.lock().await.clear();
    }
}
