pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod reminder;
pub mod state;
pub mod stats;
pub mod storage;
pub mod window;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use stats::{current_streak, goal_percentage, rolling_average, solved_on, total_all_time};
pub use storage::{load_history, persist_history};
pub use window::{forward_status, trailing_window};
