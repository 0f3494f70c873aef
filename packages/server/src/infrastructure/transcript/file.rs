//! Append-only transcript file.
//!
//! One chat line per record, preceded by a single header line written when
//! the file is created. The file is never rewritten in place; replay and
//! search read it front to back and skip the header.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use irori_shared::protocol::server_line::TRANSCRIPT_HEADER;

use crate::domain::{TranscriptError, TranscriptStore};

pub struct FileTranscriptStore {
    path: PathBuf,
    /// Serializes creation and appends
    write_lock: Mutex<()>,
}

impl FileTranscriptStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TranscriptError {
        TranscriptError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Create the file with its header unless it already exists.
    ///
    /// Returns `true` when the file was created by this call. Callers must hold `write_lock`.
    async fn create_if_absent(&self) -> Result<bool, TranscriptError> {
        let created = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;
        match created {
            Ok(mut file) => {
                file.write_all(format!("{TRANSCRIPT_HEADER}\n").as_bytes())
                    .await
                    .map_err(|e| self.io_error(e))?;
                file.flush().await.map_err(|e| self.io_error(e))?;
                tracing::info!("Created transcript at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn read_records(&self) -> Result<Vec<String>, TranscriptError> {
        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        Ok(records(&contents).map(str::to_string).collect())
    }
}

/// Chat lines of a transcript, without the header
fn records(contents: &str) -> impl Iterator<Item = &str> {
    let mut lines = contents.lines().peekable();
    if lines.peek() == Some(&TRANSCRIPT_HEADER) {
        lines.next();
    }
    lines
}

#[async_trait]
impl TranscriptStore for FileTranscriptStore {
    async fn open_history(&self) -> Result<Vec<String>, TranscriptError> {
        {
            let _guard = self.write_lock.lock().await;
            if self.create_if_absent().await? {
                return Ok(Vec::new());
            }
        }
        self.read_records().await
    }

    async fn append(&self, line: &str) -> Result<(), TranscriptError> {
        let _guard = self.write_lock.lock().await;
        self.create_if_absent().await?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(format!("{line}\n").as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))
    }

    async fn search(&self, pattern: &str) -> Result<Vec<String>, TranscriptError> {
        let records = match self.read_records().await {
            Ok(records) => records,
            // nothing recorded yet
            Err(TranscriptError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        Ok(records
            .into_iter()
            .filter(|line| line.contains(pattern))
            .collect())
    }
}
