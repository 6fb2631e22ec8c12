// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Distribution of hand scores over every four cards hand and cut.
use cribbage_cards::Hand;

use crate::score::{MAX_HAND_SCORE, Show, score_hand};

/// Number of scores in a distribution, from 0 to the maximum hand score.
pub const NUM_HAND_SCORES: usize = MAX_HAND_SCORE as usize + 1;

/// The number of four cards hands and cut from a full deck.
pub const NUM_HANDS: u64 = 270_725 * 48;

/// Counts how many four cards hands with a cut produce each score.
pub fn hand_score_counts() -> [u64; NUM_HAND_SCORES] {
    let deck = Hand::full();
    let mut counts = [0; NUM_HAND_SCORES];

    deck.for_each_choice(4, |held| {
        count_cuts(deck, held, &mut counts);
    });

    counts
}

/// Parallel version of [hand_score_counts].
#[cfg(feature = "parallel")]
pub fn par_hand_score_counts(num_tasks: usize) -> [u64; NUM_HAND_SCORES] {
    use parking_lot::Mutex;

    let deck = Hand::full();
    let tasks_counts = (0..num_tasks)
        .map(|_| Mutex::new([0; NUM_HAND_SCORES]))
        .collect::<Vec<_>>();

    deck.par_for_each_choice(num_tasks, 4, |task_id, held| {
        count_cuts(deck, held, &mut tasks_counts[task_id].lock());
    });

    let mut counts = [0; NUM_HAND_SCORES];
    for task_counts in tasks_counts {
        for (c, t) in counts.iter_mut().zip(task_counts.into_inner()) {
            *c += t;
        }
    }

    counts
}

#[inline]
fn count_cuts(deck: Hand, held: Hand, counts: &mut [u64; NUM_HAND_SCORES]) {
    for cut in deck.difference(held) {
        counts[score_hand(held, cut, Show::Hand) as usize] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_counts(counts: &[u64; NUM_HAND_SCORES]) {
        assert_eq!(counts.iter().sum::<u64>(), NUM_HANDS);
        assert_eq!(counts[0], 1_009_008);
        assert_eq!(counts[28], 76);
        assert_eq!(counts[29], 4);

        // Scores no hand can make.
        for score in [19, 25, 26, 27] {
            assert_eq!(counts[score], 0, "score {score}");
        }
    }

    #[test]
    #[ignore]
    fn test_hand_score_counts() {
        // Takes a few seconds in release mode.
        check_counts(&hand_score_counts());
    }

    #[cfg(feature = "parallel")]
    #[test]
    #[ignore]
    fn test_par_hand_score_counts() {
        check_counts(&par_hand_score_counts(4));
    }
}
