use crate::errors::AppError;
use crate::history::{decode_history, encode_history, LoadWarning};
use crate::models::HistoryStore;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
pub struct Loaded {
    pub history: HistoryStore,
    pub warnings: Vec<LoadWarning>,
}

/// Never fails: a missing file is created empty, an unreadable one is
/// treated as an empty history.
pub async fn load_history(path: &Path) -> Loaded {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!("no data file at {}, starting empty", path.display());
            if let Err(err) = fs::write(path, b"{}").await {
                warn!("failed to create data file: {err}");
            }
            return Loaded::default();
        }
        Err(err) => {
            error!("failed to read data file: {err}");
            return Loaded::default();
        }
    };

    let value: serde_json::Value = match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(err) => {
            error!("failed to parse data file, starting with empty data: {err}");
            return Loaded::default();
        }
    };

    let decoded = decode_history(&value);
    for warning in &decoded.warnings {
        warn!("{warning}");
    }
    info!(
        days = decoded.history.days.len(),
        skipped = decoded.warnings.len(),
        "loaded history"
    );

    Loaded {
        history: decoded.history,
        warnings: decoded.warnings,
    }
}

pub async fn persist_history(path: &Path, history: &HistoryStore) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(&encode_history(history))?;
    fs::write(path, payload).await?;
    debug!(days = history.days.len(), "saved history to {}", path.display());
    Ok(())
}
