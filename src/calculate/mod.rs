//! Handicap analysis engine.
//!
//! Recomputes known match outcomes under a swept range of kill handicaps:
//! - Handicap range generation
//! - Per-match classification for a team
//! - Per-handicap bucket accumulation
//! - Team, grouped and head-to-head aggregation
//!
//! Every function here is pure: it reads a match slice and returns a freshly
//! built result.

mod accumulate;
mod classify;
mod grouped;
mod range;
mod team;

pub use accumulate::*;
pub use classify::*;
pub use grouped::*;
pub use range::*;
pub use team::*;

/// `count / total` as a percentage rounded to two decimals. 0 when `total` is 0.
pub fn percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(count as f64 / total as f64 * 100.0)
    }
}

/// Arithmetic mean, 0 when `count` is 0.
pub fn average(sum: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 2), 50.0);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(0, 5), 0.0);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(10.0, 4), 2.5);
        assert_eq!(average(-6.0, 3), -2.0);
        assert_eq!(average(0.0, 0), 0.0);
        assert_eq!(average(12.0, 0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(-1.004), -1.0);
    }
}
