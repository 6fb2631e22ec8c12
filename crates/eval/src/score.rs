// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cribbage hand scoring.
//!
//! A scored hand is always five cards, the four cards held in a hand or in
//! the crib followed by the cut card. The score is the sum of five
//! independent counts: fifteens, pairs, runs, flush and nobs. The counting
//! functions take the five cards as a slice with the cut last, as the flush
//! and nobs counts depend on which card is the cut.
use serde::Serialize;
use std::fmt;

use cribbage_cards::{Card, Hand, Rank};

/// Which hand is being counted, flushes in the crib need all five cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Show {
    /// A player hand.
    Hand,
    /// The dealer crib.
    Crib,
}

/// The maximum score of a five cards hand.
pub const MAX_HAND_SCORE: u32 = 29;

/// The maximum score of a five cards crib.
pub const MAX_CRIB_SCORE: u32 = 24;

/// The score of a hand broken down by count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HandScore {
    /// Two points for each combination of cards that adds to fifteen.
    pub fifteens: u32,
    /// Two points for each pair of cards with the same rank.
    pub pairs: u32,
    /// One point for each card in a run, for each run.
    pub runs: u32,
    /// Four or five points for cards of the same suit.
    pub flush: u32,
    /// One point for the jack of the cut suit.
    pub nobs: u32,
}

impl HandScore {
    /// Counts a five cards hand, the cut card is the last card.
    ///
    /// Panics if the hand doesn't have five cards.
    pub fn eval(cards: &[Card], show: Show) -> HandScore {
        HandScore {
            fifteens: score_fifteens(cards),
            pairs: score_pairs(cards),
            runs: score_runs(cards),
            flush: score_flush(cards, show),
            nobs: score_nobs(cards),
        }
    }

    /// Counts four held cards with the cut card.
    ///
    /// Panics if the hand doesn't have four cards or it has the cut card.
    pub fn eval_with_cut(held: Hand, cut: Card, show: Show) -> HandScore {
        Self::eval(&with_cut(held, cut), show)
    }

    /// The total score.
    pub fn total(&self) -> u32 {
        self.fifteens + self.pairs + self.runs + self.flush + self.nobs
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (fifteens {} pairs {} runs {} flush {} nobs {})",
            self.total(),
            self.fifteens,
            self.pairs,
            self.runs,
            self.flush,
            self.nobs
        )
    }
}

/// Returns the total score of four held cards with the cut card.
///
/// Panics if the hand doesn't have four cards or it has the cut card.
#[inline]
pub fn score_hand(held: Hand, cut: Card, show: Show) -> u32 {
    let cards = with_cut(held, cut);
    score_fifteens(&cards)
        + score_pairs(&cards)
        + score_runs(&cards)
        + score_flush(&cards, show)
        + score_nobs(&cards)
}

/// Lays out the held cards in index order followed by the cut.
#[inline]
fn with_cut(held: Hand, cut: Card) -> [Card; 5] {
    assert_eq!(held.size(), 4, "Scored hand [{held}] must have 4 cards");
    assert!(!held.contains(cut), "Cut {cut} is in the hand [{held}]");

    let mut cards = [cut; 5];
    for (slot, card) in cards.iter_mut().zip(held) {
        *slot = card;
    }

    cards
}

#[inline]
fn check_size(cards: &[Card]) {
    assert_eq!(cards.len(), 5, "Scored hand must have 5 cards {cards:?}");
}

/// Two points for each subset of cards whose values add up to 15.
pub fn score_fifteens(cards: &[Card]) -> u32 {
    check_size(cards);

    let values = [
        cards[0].value(),
        cards[1].value(),
        cards[2].value(),
        cards[3].value(),
        cards[4].value(),
    ];

    // Single cards are at most 10, check the 26 subsets of 2 or more cards.
    let num_fifteens = (0u32..32)
        .filter(|subset| subset.count_ones() >= 2)
        .filter(|&subset| {
            values
                .iter()
                .enumerate()
                .filter(|&(idx, _)| subset & (1u32 << idx) != 0)
                .map(|(_, &v)| v as u32)
                .sum::<u32>()
                == 15
        })
        .count() as u32;

    2 * num_fifteens
}

/// Two points for each pair of cards with the same rank.
pub fn score_pairs(cards: &[Card]) -> u32 {
    check_size(cards);

    let mut num_pairs = 0;
    for (idx, a) in cards.iter().enumerate() {
        for b in &cards[idx + 1..] {
            if a.rank() == b.rank() {
                num_pairs += 1;
            }
        }
    }

    2 * num_pairs
}

/// A required gap between two adjacent sorted orders, `None` matches any gap.
type Gap = Option<u8>;

const X: Gap = None;
const SAME: Gap = Some(0);
const NEXT: Gap = Some(1);

/// Runs shapes as gaps between the five sorted orders, with their scores.
///
/// The shapes are ordered from the highest score down, the first matching
/// shape is the runs score, so that a double run is never counted as the
/// single run it contains.
const RUN_SHAPES: [(u32, [Gap; 4]); 20] = [
    // Double double run of three.
    (12, [SAME, NEXT, NEXT, SAME]),
    // Triple runs of three.
    (9, [NEXT, NEXT, SAME, SAME]),
    (9, [NEXT, SAME, SAME, NEXT]),
    (9, [SAME, SAME, NEXT, NEXT]),
    // Double runs of four.
    (8, [NEXT, NEXT, NEXT, SAME]),
    (8, [NEXT, NEXT, SAME, NEXT]),
    (8, [NEXT, SAME, NEXT, NEXT]),
    (8, [SAME, NEXT, NEXT, NEXT]),
    // Double runs of three.
    (6, [X, NEXT, NEXT, SAME]),
    (6, [X, NEXT, SAME, NEXT]),
    (6, [X, SAME, NEXT, NEXT]),
    (6, [NEXT, NEXT, SAME, X]),
    (6, [NEXT, SAME, NEXT, X]),
    (6, [SAME, NEXT, NEXT, X]),
    // Run of five.
    (5, [NEXT, NEXT, NEXT, NEXT]),
    // Runs of four.
    (4, [X, NEXT, NEXT, NEXT]),
    (4, [NEXT, NEXT, NEXT, X]),
    // Runs of three.
    (3, [X, X, NEXT, NEXT]),
    (3, [X, NEXT, NEXT, X]),
    (3, [NEXT, NEXT, X, X]),
];

/// One point for each card in a run of three or more cards, for each run.
pub fn score_runs(cards: &[Card]) -> u32 {
    check_size(cards);

    let mut orders = [
        cards[0].order(),
        cards[1].order(),
        cards[2].order(),
        cards[3].order(),
        cards[4].order(),
    ];
    orders.sort_unstable();

    let gaps = [
        orders[1] - orders[0],
        orders[2] - orders[1],
        orders[3] - orders[2],
        orders[4] - orders[3],
    ];

    RUN_SHAPES
        .iter()
        .find(|(_, shape)| {
            shape
                .iter()
                .zip(gaps)
                .all(|(required, gap)| required.is_none_or(|r| r == gap))
        })
        .map_or(0, |(score, _)| *score)
}

/// Four points if the held cards have the same suit, five if the cut has the
/// same suit too. A crib flush needs all five cards.
pub fn score_flush(cards: &[Card], show: Show) -> u32 {
    check_size(cards);

    let suit = cards[0].suit();
    if cards[1..4].iter().any(|c| c.suit() != suit) {
        return 0;
    }

    if cards[4].suit() == suit {
        5
    } else if show == Show::Crib {
        0
    } else {
        4
    }
}

/// One point for holding the jack of the same suit as the cut card.
pub fn score_nobs(cards: &[Card]) -> u32 {
    check_size(cards);

    let cut_suit = cards[4].suit();
    let has_nobs = cards[..4]
        .iter()
        .any(|c| c.rank() == Rank::Jack && c.suit() == cut_suit);

    has_nobs as u32
}
