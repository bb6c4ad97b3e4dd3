//! Pure domain logic for The Sephirots community platform.
//!
//! This crate has no internal dependencies and no I/O. Everything here is a
//! deterministic function over in-memory data so it can be used by the API
//! layer, the repository layer, and any future CLI tooling, and unit-tested
//! without a database.

pub mod badges;
pub mod donations;
pub mod error;
pub mod governance;
pub mod quests;
pub mod reactions;
pub mod resonance;
pub mod rewards;
pub mod types;
