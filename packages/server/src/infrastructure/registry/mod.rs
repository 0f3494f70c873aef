//! Session Registry の実装
//!
//! - `inmemory`: Mutex で保護されたインメモリ実装

pub mod inmemory;

pub use inmemory::InMemoryParticipantRegistry;
