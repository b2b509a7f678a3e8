//! Per-handicap "covered" counters.

use crate::models::{CategoryBuckets, HandicapRange};

use super::percentage;

/// Increment `counts[i]` for every handicap where `kill_differential + h > 0`.
///
/// `counts` is indexed by position in `handicaps`.
pub fn accumulate_covered(kill_differential: i64, handicaps: &[f64], counts: &mut [u32]) {
    let differential = kill_differential as f64;
    for (count, &h) in counts.iter_mut().zip(handicaps) {
        if differential + h > 0.0 {
            *count += 1;
        }
    }
}

/// Running victory/loss/general counters for one aggregation.
#[derive(Debug, Clone)]
pub struct BucketAccumulator<'a> {
    range: &'a HandicapRange,
    victory_total: u32,
    loss_total: u32,
    victory: Vec<u32>,
    loss: Vec<u32>,
    general: Vec<u32>,
}

impl<'a> BucketAccumulator<'a> {
    pub fn new(range: &'a HandicapRange) -> Self {
        Self {
            range,
            victory_total: 0,
            loss_total: 0,
            victory: vec![0; range.len()],
            loss: vec![0; range.len()],
            general: vec![0; range.len()],
        }
    }

    /// Count one participant match: always into general, then into victory or loss.
    pub fn record(&mut self, is_winner: bool, kill_differential: i64) {
        let handicaps = self.range.values();
        accumulate_covered(kill_differential, handicaps, &mut self.general);
        if is_winner {
            self.victory_total += 1;
            accumulate_covered(kill_differential, handicaps, &mut self.victory);
        } else {
            self.loss_total += 1;
            accumulate_covered(kill_differential, handicaps, &mut self.loss);
        }
    }

    /// Convert counters into (victory, loss, general) buckets with percentages.
    pub fn finish(self) -> (CategoryBuckets, CategoryBuckets, CategoryBuckets) {
        let general_total = self.victory_total + self.loss_total;
        (
            into_buckets(self.victory, self.victory_total),
            into_buckets(self.loss, self.loss_total),
            into_buckets(self.general, general_total),
        )
    }
}

fn into_buckets(counts: Vec<u32>, total: u32) -> CategoryBuckets {
    let percentages = counts.iter().map(|&c| percentage(c, total)).collect();
    CategoryBuckets {
        total,
        counts,
        percentages,
    }
}
