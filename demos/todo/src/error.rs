use std::io;

use tui_store::HistoryError;

/// Errors that end the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    History(#[from] HistoryError),
}
