//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types (validated, render-ready)
//! - `wire.rs` — Raw serde structs matching provider responses
//! - `convert.rs` — `TryFrom`/`From` conversions with validation
//! - `client.rs` — Sub-client with HTTP methods
//!
//! `price_history` additionally carries the series cache (`state.rs`) and the
//! alignment engine (`align.rs`).

pub mod asset;
pub mod price_history;
