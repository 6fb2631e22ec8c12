// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Discard analysis.
//!
//! For each of the 15 ways to discard two cards from a six cards hand the
//! analyzer enumerates the cards the opponent may throw in the crib together
//! with the cut, scores the held hand and the crib for each outcome, and
//! tallies the net score twice: once for a crib that belongs to the player
//! and once for a crib that belongs to the opponent.
use log::{debug, info, trace, warn};
use serde::Serialize;

use cribbage_cards::{Card, Hand, Suit, make_deck, nck};

use crate::{
    score::{Show, score_hand},
    tally::{Statistics, Tally},
};

/// How the unknown opponent discards and cut are drawn from the deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Draw {
    /// Every opponent discard pair, then every remaining card as the cut.
    #[default]
    PairThenCut,
    /// Every three cards draw, the cut is the card that comes last in a deck
    /// ordered by hearts, clubs, diamonds and spades, ace to king.
    Triples,
}

impl Draw {
    /// The number of cards drawn from the deck for each enumerated subset.
    fn subset_size(&self) -> usize {
        match self {
            Draw::PairThenCut => 2,
            Draw::Triples => 3,
        }
    }

    /// The number of outcomes enumerated from a deck with `deck_size` cards.
    pub fn num_outcomes(&self, deck_size: usize) -> u64 {
        let outcomes = match self {
            Draw::PairThenCut => nck(deck_size, 2) * deck_size.saturating_sub(2),
            Draw::Triples => nck(deck_size, 3),
        };

        outcomes as u64
    }

    /// Splits a drawn subset into the opponent discards and the cut and calls
    /// `f` for each outcome.
    #[inline]
    fn for_each_outcome<F>(&self, deck: Hand, drawn: Hand, mut f: F)
    where
        F: FnMut(Hand, Card),
    {
        match self {
            Draw::PairThenCut => {
                for cut in deck.difference(drawn) {
                    f(drawn, cut);
                }
            }
            Draw::Triples => {
                if let Some(cut) = drawn.iter().max_by_key(|&c| triples_order(c)) {
                    let mut pair = drawn;
                    pair.remove(cut);
                    f(pair, cut);
                }
            }
        }
    }
}

/// The position of a card in the deck the triples draws are taken from.
fn triples_order(card: Card) -> (u8, u8) {
    let suit = match card.suit() {
        Suit::Hearts => 0,
        Suit::Clubs => 1,
        Suit::Diamonds => 2,
        Suit::Spades => 3,
    };

    (suit, card.order())
}

/// Analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// The draw enumeration model.
    pub draw: Draw,
    /// Number of threads used to enumerate the draws of each discard.
    pub tasks: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            draw: Draw::default(),
            tasks: 1,
        }
    }
}

/// The result of analyzing one discard choice.
#[derive(Debug, Clone, Serialize)]
pub struct DiscardAnalysis {
    /// The two cards thrown in the crib.
    pub discard: Hand,
    /// The four cards held.
    pub keep: Hand,
    /// The number of enumerated outcomes.
    pub hands: u64,
    /// Net score statistics when the crib is mine.
    pub mine: Statistics,
    /// Net score statistics when the crib is the opponent's.
    pub theirs: Statistics,
    /// Net score tally when the crib is mine.
    pub mine_tally: Tally,
    /// Net score tally when the crib is the opponent's.
    pub theirs_tally: Tally,
}

/// The result of analyzing a six cards hand.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The analyzed hand.
    pub hand: Hand,
    /// The draw model used for the analysis.
    pub draw: Draw,
    /// One entry per discard in the hand 2-subsets enumeration order.
    pub discards: Vec<DiscardAnalysis>,
}

/// The discard analyzer.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with the given configuration.
    pub fn new(mut config: AnalyzerConfig) -> Self {
        if config.tasks == 0 {
            config.tasks = 1;
        }

        if config.tasks > 1 && !cfg!(feature = "parallel") {
            warn!(
                "Parallel feature disabled, ignoring {} tasks",
                config.tasks
            );
        }

        Self { config }
    }

    /// The analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes every discard choice of a six cards hand.
    ///
    /// Panics if the hand doesn't have six cards.
    pub fn analyze(&self, hand: Hand) -> Analysis {
        assert_eq!(hand.size(), 6, "Analyzed hand [{hand}] must have 6 cards");

        info!("Analyzing [{hand}] with {:?} draws", self.config.draw);

        let mut discards = Vec::with_capacity(15);
        hand.for_each_choice(2, |discard| {
            discards.push(self.analyze_discard(hand, discard));
        });

        Analysis {
            hand,
            draw: self.config.draw,
            discards,
        }
    }

    /// Analyzes one discard choice of a six cards hand.
    ///
    /// Panics if the hand doesn't have six cards or the discard is not two
    /// cards of the hand.
    pub fn analyze_discard(&self, hand: Hand, discard: Hand) -> DiscardAnalysis {
        assert_eq!(hand.size(), 6, "Analyzed hand [{hand}] must have 6 cards");
        assert_eq!(discard.size(), 2, "Discard [{discard}] must have 2 cards");

        let mut keep = hand;
        keep.remove_all(discard);

        let deck = make_deck(&hand);
        let expected = self.config.draw.num_outcomes(deck.size());
        debug!(
            "Discard [{discard}] keep [{keep}] {} cards deck {expected} outcomes",
            deck.size()
        );

        let tallies = self.tally_draws(keep, discard, deck);
        assert_eq!(
            tallies.hands, expected,
            "Discard [{discard}] enumerated {} outcomes",
            tallies.hands
        );

        DiscardAnalysis {
            discard,
            keep,
            hands: tallies.hands,
            mine: Statistics::new(&tallies.mine, tallies.hands),
            theirs: Statistics::new(&tallies.theirs, tallies.hands),
            mine_tally: tallies.mine,
            theirs_tally: tallies.theirs,
        }
    }

    #[cfg(feature = "parallel")]
    fn tally_draws(&self, keep: Hand, discard: Hand, deck: Hand) -> Tallies {
        if self.config.tasks > 1 {
            self.par_tally_draws(keep, discard, deck)
        } else {
            self.seq_tally_draws(keep, discard, deck)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn tally_draws(&self, keep: Hand, discard: Hand, deck: Hand) -> Tallies {
        self.seq_tally_draws(keep, discard, deck)
    }

    fn seq_tally_draws(&self, keep: Hand, discard: Hand, deck: Hand) -> Tallies {
        let draw = self.config.draw;
        let mut tallies = Tallies::default();

        deck.for_each_choice(draw.subset_size(), |drawn| {
            draw.for_each_outcome(deck, drawn, |pair, cut| {
                let (hold, crib) = tallies.record(keep, discard, pair, cut);
                trace!("Keep [{keep}] cut {cut} hold {hold} crib [{discard} {pair}] {crib}");
            });
        });

        tallies
    }

    #[cfg(feature = "parallel")]
    fn par_tally_draws(&self, keep: Hand, discard: Hand, deck: Hand) -> Tallies {
        use parking_lot::Mutex;

        let draw = self.config.draw;
        let num_tasks = self.config.tasks;
        let tasks_tallies = (0..num_tasks)
            .map(|_| Mutex::new(Tallies::default()))
            .collect::<Vec<_>>();

        deck.par_for_each_choice(num_tasks, draw.subset_size(), |task_id, drawn| {
            let mut tallies = tasks_tallies[task_id].lock();
            draw.for_each_outcome(deck, drawn, |pair, cut| {
                tallies.record(keep, discard, pair, cut);
            });
        });

        tasks_tallies
            .into_iter()
            .fold(Tallies::default(), |mut acc, tallies| {
                acc.merge(&tallies.into_inner());
                acc
            })
    }
}

/// The two net score tallies of a discard choice.
#[derive(Default)]
struct Tallies {
    mine: Tally,
    theirs: Tally,
    hands: u64,
}

impl Tallies {
    /// Scores one outcome and returns the hold and crib scores.
    #[inline]
    fn record(&mut self, keep: Hand, discard: Hand, pair: Hand, cut: Card) -> (i32, i32) {
        let hold = score_hand(keep, cut, Show::Hand) as i32;
        let crib = score_hand(discard.union(pair), cut, Show::Crib) as i32;

        self.mine.increment(hold + crib);
        self.theirs.increment(hold - crib);
        self.hands += 1;

        (hold, crib)
    }

    #[cfg(feature = "parallel")]
    fn merge(&mut self, other: &Tallies) {
        self.mine.merge(&other.mine);
        self.theirs.merge(&other.theirs);
        self.hands += other.hands;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::HandScore;

    fn parse(s: &str) -> Hand {
        s.parse().unwrap()
    }

    fn analyzer(draw: Draw) -> Analyzer {
        Analyzer::new(AnalyzerConfig { draw, tasks: 1 })
    }

    #[test]
    fn draw_outcomes() {
        assert_eq!(Draw::PairThenCut.num_outcomes(46), 45540);
        assert_eq!(Draw::Triples.num_outcomes(46), 15180);
        assert_eq!(Draw::default(), Draw::PairThenCut);
    }

    #[test]
    fn analyze_all_discards() {
        let hand = parse("5H 5C 5S JD 5D 4C");
        let analysis = analyzer(Draw::Triples).analyze(hand);

        assert_eq!(analysis.hand, hand);
        assert_eq!(analysis.discards.len(), 15);

        let discards = hand.choices(2).collect::<Vec<_>>();
        for (result, discard) in analysis.discards.iter().zip(discards) {
            assert_eq!(result.discard, discard);
            assert_eq!(result.keep.union(result.discard), hand);
            assert_eq!(result.hands, 15180);
            assert_eq!(result.mine_tally.total(), 15180);
            assert_eq!(result.theirs_tally.total(), 15180);
            assert!(result.mine.mean >= result.theirs.mean);
            assert!(result.mine.min <= result.mine.max);
        }
    }

    #[test]
    fn analyze_pair_then_cut_counts() {
        let hand = parse("AS 2D 3C 7H 9S KD");
        let discard = hand.choices(2).next().unwrap();
        let result = analyzer(Draw::PairThenCut).analyze_discard(hand, discard);

        assert_eq!(result.hands, 45540);
        assert_eq!(result.mine_tally.total(), 45540);
        assert_eq!(result.theirs_tally.total(), 45540);
    }

    #[test]
    fn analyze_hold_mean() {
        // The mean of mine and theirs is the mean hold score.
        let hand = parse("6C 4D 6D 4S 5D QH");
        let discard = parse("5D QH");
        let result = analyzer(Draw::PairThenCut).analyze_discard(hand, discard);

        let keep = result.keep;
        let deck = make_deck(&hand);
        let mut total = 0u64;
        deck.for_each_choice(2, |pair| {
            for cut in deck.difference(pair) {
                total += HandScore::eval_with_cut(keep, cut, Show::Hand).total() as u64;
            }
        });

        let hold_mean = total as f64 / 45540.0;
        let mean = (result.mine.mean + result.theirs.mean) / 2.0;
        assert!((mean - hold_mean).abs() < 1e-9);

        // Two pairs are always held.
        assert!(result.mine.min >= 4);
        assert!(result.theirs.max <= 29);
    }

    #[test]
    fn triples_cut_order() {
        let deck = make_deck(&Hand::new());
        let cut_of = |s: &str| {
            let mut cut = None;
            Draw::Triples.for_each_outcome(deck, parse(s), |pair, c| {
                assert_eq!(pair.size(), 2);
                cut = Some(c.to_string());
            });
            cut.unwrap()
        };

        assert_eq!(cut_of("AH 3H KH"), "KH");
        assert_eq!(cut_of("KH AC 2C"), "2C");
        assert_eq!(cut_of("AH 2S KD"), "2S");
        assert_eq!(cut_of("KC QC AD"), "AD");
    }

    #[test]
    fn triples_statistics() {
        let hand = parse("AH 2S 3C 5D JH KD");
        let analyzer = analyzer(Draw::Triples);

        let result = analyzer.analyze_discard(hand, parse("2S 5D"));
        assert_eq!(result.mine.to_string(), "7.6 3.1 2..24");
        assert_eq!(result.theirs.to_string(), "-3.9 3.0 -16..5");

        let result = analyzer.analyze_discard(hand, parse("AH 2S"));
        assert_eq!(result.mine.to_string(), "10.7 3.3 4..24");
        assert_eq!(result.theirs.to_string(), "2.2 3.5 -12..10");
    }

    #[test]
    fn analyze_is_deterministic() {
        let hand = parse("AH 3H 7H TH JH 2C");
        let discard = parse("2C JH");
        let analyzer = analyzer(Draw::Triples);

        let a = analyzer.analyze_discard(hand, discard);
        let b = analyzer.analyze_discard(hand, discard);
        assert_eq!(a.mine_tally, b.mine_tally);
        assert_eq!(a.theirs_tally, b.theirs_tally);
        assert_eq!(a.mine, b.mine);
        assert_eq!(a.theirs, b.theirs);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let hand = parse("7H 7S 7C 8D 8H 2S");
        let discard = parse("2S 8H");

        for draw in [Draw::Triples, Draw::PairThenCut] {
            let seq = analyzer(draw).analyze_discard(hand, discard);
            for tasks in [2, 3, 8] {
                let par = Analyzer::new(AnalyzerConfig { draw, tasks });
                let par = par.analyze_discard(hand, discard);
                assert_eq!(par.hands, seq.hands);
                assert_eq!(par.mine_tally, seq.mine_tally);
                assert_eq!(par.theirs_tally, seq.theirs_tally);
            }
        }
    }

    #[test]
    fn analysis_serialize() {
        let hand = parse("5H 5C 5S JD 5D 4C");
        let result = analyzer(Draw::Triples).analyze_discard(hand, parse("5H 4C"));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["discard"], "4C 5H");
        assert_eq!(json["keep"], "5S 5D JD 5C");
        assert_eq!(json["hands"], 15180);
        assert!(json["mine"]["mean"].is_number());
        assert!(json["theirs_tally"].is_object());
    }

    #[test]
    #[should_panic(expected = "must have 6 cards")]
    fn analyze_wrong_size() {
        analyzer(Draw::Triples).analyze(parse("5H 5C 5S JD 5D"));
    }
}
