// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Score frequency tallies and their summary statistics.
use serde::{Serialize, Serializer};
use std::fmt;

use crate::score::{MAX_CRIB_SCORE, MAX_HAND_SCORE};

/// The lowest tallied score, a zero points hand against the best crib.
pub const MIN_SCORE: i32 = -(MAX_HAND_SCORE as i32);

/// The highest tallied score, the best hand with the best crib.
pub const MAX_SCORE: i32 = (MAX_HAND_SCORE + MAX_CRIB_SCORE) as i32;

const NUM_SCORES: usize = (MAX_SCORE - MIN_SCORE + 1) as usize;

/// Counts of how many outcomes produced each score in `MIN_SCORE..=MAX_SCORE`.
#[derive(Clone, PartialEq, Eq)]
pub struct Tally {
    counts: [u64; NUM_SCORES],
}

impl Default for Tally {
    fn default() -> Self {
        Self::new()
    }
}

impl Tally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self {
            counts: [0; NUM_SCORES],
        }
    }

    /// Creates a tally with consecutive counts starting at `min_score`.
    ///
    /// Panics if the counts don't fit in the tally range.
    pub fn from_counts(min_score: i32, counts: &[u64]) -> Self {
        let last_score = min_score + counts.len() as i32 - 1;
        assert!(
            min_score >= MIN_SCORE && last_score <= MAX_SCORE,
            "Counts {min_score}..={last_score} out of range {MIN_SCORE}..={MAX_SCORE}"
        );

        let mut tally = Self::new();
        let start = Self::index(min_score);
        tally.counts[start..start + counts.len()].copy_from_slice(counts);
        tally
    }

    /// Records one occurrence of a score.
    ///
    /// Panics if the score is outside `MIN_SCORE..=MAX_SCORE`.
    #[inline]
    pub fn increment(&mut self, score: i32) {
        assert!(
            (MIN_SCORE..=MAX_SCORE).contains(&score),
            "Score {score} out of range {MIN_SCORE}..={MAX_SCORE}"
        );

        self.counts[Self::index(score)] += 1;
    }

    /// Returns the count for a score, zero for scores outside the range.
    pub fn count(&self, score: i32) -> u64 {
        if (MIN_SCORE..=MAX_SCORE).contains(&score) {
            self.counts[Self::index(score)]
        } else {
            0
        }
    }

    /// The number of recorded scores.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Checks if no score has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Adds the counts of another tally to this tally.
    pub fn merge(&mut self, other: &Tally) {
        for (c, o) in self.counts.iter_mut().zip(other.counts) {
            *c += o;
        }
    }

    /// Iterates the recorded scores and their counts in ascending score order,
    /// scores with a zero count are skipped.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (i32, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(idx, &c)| (idx as i32 + MIN_SCORE, c))
    }

    #[inline]
    fn index(score: i32) -> usize {
        (score - MIN_SCORE) as usize
    }
}

impl fmt::Debug for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Summary statistics of a tally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Mean score.
    pub mean: f64,
    /// Population standard deviation, each outcome weighted by its count.
    /// It differs from a deviation taken over the distinct scores, 4.5 rather
    /// than 0.8 for the `statistics` test tally.
    pub stdev: f64,
    /// Lowest score with a non zero count.
    pub min: i32,
    /// Highest score with a non zero count.
    pub max: i32,
}

impl Statistics {
    /// Computes the statistics of a tally over `num_hands` outcomes.
    ///
    /// Panics if `num_hands` is zero or the tally is empty.
    pub fn new(tally: &Tally, num_hands: u64) -> Self {
        assert!(num_hands > 0, "Statistics of zero hands");

        let (min, max) = match (tally.iter().next(), tally.iter().next_back()) {
            (Some((min, _)), Some((max, _))) => (min, max),
            _ => panic!("Statistics of an empty tally"),
        };

        let n = num_hands as f64;
        let mean = tally
            .iter()
            .map(|(score, count)| score as f64 * count as f64)
            .sum::<f64>()
            / n;

        let variance = tally
            .iter()
            .map(|(score, count)| {
                let d = score as f64 - mean;
                d * d * count as f64
            })
            .sum::<f64>()
            / n;

        Self {
            mean,
            stdev: variance.sqrt(),
            min,
            max,
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1} {:.1} {}..{}",
            self.mean, self.stdev, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A triples draw tally ending at the highest score.
    const COUNTS: [u64; 38] = [
        907, 411, 1419, 650, 1855, 663, 1908, 931, 1671, 650, 1699, 530, 607, 137, 291, 160, 228,
        111, 66, 106, 5, 61, 7, 26, 0, 30, 0, 41, 0, 4, 3, 0, 0, 0, 2, 0, 0, 1,
    ];

    #[test]
    fn tally_range() {
        assert_eq!(MIN_SCORE, -29);
        assert_eq!(MAX_SCORE, 53);
        assert_eq!(NUM_SCORES, 83);

        let mut tally = Tally::new();
        assert!(tally.is_empty());

        tally.increment(MIN_SCORE);
        tally.increment(MAX_SCORE);
        tally.increment(0);
        tally.increment(0);

        assert_eq!(tally.count(MIN_SCORE), 1);
        assert_eq!(tally.count(MAX_SCORE), 1);
        assert_eq!(tally.count(0), 2);
        assert_eq!(tally.count(1), 0);
        assert_eq!(tally.count(100), 0);
        assert_eq!(tally.total(), 4);
        assert!(!tally.is_empty());

        let scores = tally.iter().collect::<Vec<_>>();
        assert_eq!(scores, vec![(-29, 1), (0, 2), (53, 1)]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn tally_increment_above_range() {
        Tally::new().increment(MAX_SCORE + 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn tally_increment_below_range() {
        Tally::new().increment(MIN_SCORE - 1);
    }

    #[test]
    fn tally_merge() {
        let mut a = Tally::new();
        a.increment(3);
        a.increment(-2);

        let mut b = Tally::new();
        b.increment(3);
        b.increment(10);

        a.merge(&b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![(-2, 1), (3, 2), (10, 1)]);
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn tally_from_counts() {
        let tally = Tally::from_counts(16, &COUNTS);
        assert_eq!(tally.total(), 15180);
        assert_eq!(tally.count(15), 0);
        assert_eq!(tally.count(16), 907);
        assert_eq!(tally.count(53), 1);
    }

    #[test]
    fn tally_serialize() {
        let mut tally = Tally::new();
        tally.increment(-1);
        tally.increment(4);
        tally.increment(4);

        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"-1":1,"4":2}"#);
    }

    #[test]
    fn statistics() {
        let tally = Tally::from_counts(16, &COUNTS);
        let stats = Statistics::new(&tally, 15180);

        assert_eq!(stats.min, 16);
        assert_eq!(stats.max, 53);
        assert!((stats.mean - 22.885).abs() < 0.001);
        assert!((stats.stdev - 4.480).abs() < 0.001);
        assert_eq!(stats.to_string(), "22.9 4.5 16..53");
    }

    #[test]
    fn statistics_single_score() {
        let mut tally = Tally::new();
        for _ in 0..10 {
            tally.increment(-4);
        }

        let stats = Statistics::new(&tally, 10);
        assert_eq!(stats.mean, -4.0);
        assert_eq!(stats.stdev, 0.0);
        assert_eq!(stats.to_string(), "-4.0 0.0 -4..-4");
    }

    #[test]
    #[should_panic(expected = "empty tally")]
    fn statistics_empty_tally() {
        Statistics::new(&Tally::new(), 10);
    }

    #[test]
    #[should_panic(expected = "zero hands")]
    fn statistics_zero_hands() {
        let mut tally = Tally::new();
        tally.increment(1);
        Statistics::new(&tally, 0);
    }
}
