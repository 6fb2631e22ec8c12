// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cribbage hand scoring and discard analysis.
//!
//! Use [HandScore] to count a four cards hand with its cut, the cut is the
//! last card:
//!
//! ```
//! # use cribbage_eval::*;
//! let cards = ["5H", "5C", "5S", "JD", "5D"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let score = HandScore::eval(&cards, Show::Hand);
//! assert_eq!(score.total(), 29);
//! ```
//!
//! and an [Analyzer] to compute the net score statistics of each discard of a
//! six cards hand:
//!
//! ```
//! # use cribbage_eval::*;
//! let hand = "5H 5C 5S JD 5D 4C".parse::<Hand>().unwrap();
//! let analyzer = Analyzer::new(AnalyzerConfig {
//!     draw: Draw::Triples,
//!     tasks: 1,
//! });
//!
//! let analysis = analyzer.analyze(hand);
//! assert_eq!(analysis.discards.len(), 15);
//! for d in &analysis.discards {
//!     assert_eq!(d.hands, 15_180);
//!     assert!(d.mine.mean >= d.theirs.mean);
//! }
//! ```
//!
//! With the **`parallel`** feature the analyzer enumerates each discard draws
//! with `tasks` threads.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod analyze;
pub use analyze::{Analysis, Analyzer, AnalyzerConfig, DiscardAnalysis, Draw};

pub mod distribution;

pub mod score;
pub use score::{HandScore, Show, score_hand};

pub mod tally;
pub use tally::{Statistics, Tally};

// Reexport cards types.
pub use cribbage_cards::{Card, Deck, Hand, Rank, Suit, make_deck};
