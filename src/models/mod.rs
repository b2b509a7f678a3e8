//! Core data models for handicap analysis.

mod catalog;
mod handicap;
mod ids;
mod match_record;

pub use catalog::*;
pub use handicap::*;
pub use ids::*;
pub use match_record::*;
