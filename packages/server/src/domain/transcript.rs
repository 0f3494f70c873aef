//! Transcript Store trait 定義

use async_trait::async_trait;

use super::TranscriptError;

/// Append-only record of chat lines
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Recorded chat lines in file order.
    ///
    /// Creates the transcript with its header line when it does not exist yet,
    /// in which case there is nothing to replay.
    async fn open_history(&self) -> Result<Vec<String>, TranscriptError>;

    /// Append one chat line verbatim
    async fn append(&self, line: &str) -> Result<(), TranscriptError>;

    /// Recorded chat lines containing `pattern` (case-sensitive), in file order
    async fn search(&self, pattern: &str) -> Result<Vec<String>, TranscriptError>;
}
