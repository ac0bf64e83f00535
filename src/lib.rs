//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under `blockfall::{core,input,leaderboard,term,types}`
//! and holds the runner configuration shared by the binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_leaderboard as leaderboard;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::AppConfig;
