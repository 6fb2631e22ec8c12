// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cribbage cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use cribbage_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let jd = Card::new(Rank::Jack, Suit::Diamonds);
//! assert_eq!(jd.value(), 10);
//! assert_eq!(jd.order(), 11);
//! ```
//!
//! a [Hand] set type that can be parsed from text, and a [make_deck] function
//! that returns the remaining cards once a hand is known.
//!
//! For example to iterate through all the 3 cards draws from the 46 cards
//! left after a cribbage hand is dealt:
//!
//! ```
//! # use cribbage_cards::{Hand, make_deck};
//! let hand = "5H 5C 5S JD 5D 4C".parse::<Hand>().unwrap();
//! let deck = make_deck(&hand);
//!
//! let mut counter = 0;
//! deck.for_each_choice(3, |draw| {
//!     assert_eq!(draw.size(), 3);
//!     counter += 1;
//! });
//! assert_eq!(counter, 15_180);
//! ```
//!
//! The **`parallel`** feature enables parallel iteration with a given number
//! of tasks, the closure `task_id` can be used to store per task data to
//! reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each_choice() {
//! # use std::sync::atomic;
//! # use cribbage_cards::Hand;
//! let counter = atomic::AtomicU64::new(0);
//! Hand::full().par_for_each_choice(4, 4, |_task_id, hand| {
//!     assert_eq!(hand.size(), 4);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! });
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 270_725);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit, make_deck};

mod error;
pub use error::ParseError;

mod hand;
pub use hand::{Cards, Choices, Hand, nck};
