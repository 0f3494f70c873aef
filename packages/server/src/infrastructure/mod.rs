//! Infrastructure 層
//!
//! - `registry`: Session Registry の実装
//! - `transcript`: Transcript Store の実装
//! - `dto`: HTTP API 用の DTO

pub mod dto;
pub mod registry;
pub mod transcript;
