//! Offline error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OfflineError {
    #[error("Content surface error: {0}")]
    Surface(String),
}
