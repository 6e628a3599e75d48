//! pwmeter-core: Password strength scoring, generation, and session history.
//!
//! The evaluator and generator are pure functions with no shared state.
//! Saved passwords live in a caller-owned [`session::Session`] and are
//! summarized by the [`statistics`] aggregator.

pub mod config;
pub mod error;
pub mod generator;
pub mod hashing;
pub mod history;
pub mod record;
pub mod session;
pub mod statistics;
pub mod strength;

