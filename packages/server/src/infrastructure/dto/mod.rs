//! Data Transfer Objects (DTOs) for the status HTTP API.
//!
//! The chat protocol itself is plain text and needs no DTOs; see
//! `irori_shared::protocol`.

pub mod http;
