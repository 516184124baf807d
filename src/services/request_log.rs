//! Append-only request log
//!
//! One CSV line per completed booking: conversant id, service, vehicle,
//! time slot.

use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use crate::models::BookingRecord;
use crate::utils::errors::{AutoServiceError, Result};

#[derive(Debug, Clone)]
pub struct RequestLog {
    path: PathBuf,
}

impl RequestLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the record, creating the file if needed
    pub async fn append(&self, record: &BookingRecord) -> Result<()> {
        let line = format!("{}\n", record.to_log_line());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|source| self.error(source))?;
        file.write_all(line.as_bytes()).await.map_err(|source| self.error(source))?;
        file.flush().await.map_err(|source| self.error(source))?;

        debug!(conversant_id = record.conversant_id, path = %self.path.display(), "Request logged");
        Ok(())
    }

    fn error(&self, source: std::io::Error) -> AutoServiceError {
        AutoServiceError::RequestLog {
            path: self.path.display().to_string(),
            source,
        }
    }
}
