//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `chrono`).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//! It compiles for `wasm32` so the web client can share the wire types with the server.

pub mod config;
pub mod constants;
pub mod environment;
pub mod registry;
pub mod volunteer;
