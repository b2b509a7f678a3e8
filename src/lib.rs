//! # Handicap Stats
//!
//! Kill-score handicap analysis for professional Dota 2 matches.
//!
//! For a team (or pair of teams) over a match population, every historical
//! result is recomputed under a swept range of kill handicaps, reporting per
//! handicap how many matches would still have gone the team's way.
//!
//! ## Architecture
//!
//! - **models**: Match records, catalog records and result structures
//! - **calculate**: The handicap engine (pure functions)
//! - **storage**: JSONL data access and name lookup
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
