//! Transcript Store の実装
//!
//! - `file`: 追記専用のテキストファイル実装

pub mod file;

pub use file::FileTranscriptStore;
