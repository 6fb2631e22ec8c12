// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Sets of cards.
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use crate::{Card, ParseError, Rank, Suit};

#[cfg(feature = "parallel")]
mod parallel;

/// Bits of all the 52 cards.
const ALL_CARDS: u64 = (1 << 52) - 1;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u32; 8]; 53] {
    let mut t = [[0u32; 8]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= 7 && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u32; 8]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> usize {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= 7, "k={k} must be 0 <= k <= 7");
    NCKS[n][k] as usize
}

/// An unordered set of distinct cards.
///
/// The set is a 52 bits mask where each card sets the bit at its
/// [index](Card::id), so that a hand is a single word that is cheap to copy
/// and compare. Cards are always enumerated in ascending index order.
///
/// ```
/// # use cribbage_cards::{Card, Hand, Rank, Suit};
/// let mut hand = "5H 5C JD".parse::<Hand>().unwrap();
/// hand.insert(Card::new(Rank::Five, Suit::Spades));
/// assert_eq!(hand.size(), 4);
/// assert_eq!(hand.to_string(), "5S JD 5C 5H");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hand(u64);

impl Hand {
    /// Creates an empty hand.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Creates a hand with all the 52 cards.
    pub const fn full() -> Self {
        Self(ALL_CARDS)
    }

    /// Creates a hand from the cards bits.
    ///
    /// Panics if any bit above the 52 cards bits is set.
    pub fn from_bits(bits: u64) -> Self {
        assert!(bits & !ALL_CARDS == 0, "Invalid hand bits 0x{bits:x}");
        Self(bits)
    }

    /// The cards bits.
    pub fn bits(&self) -> u64 {
        self.0
    }

    /// Checks if the hand has the given card.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & card.mask() != 0
    }

    /// Adds a card to this hand.
    ///
    /// Panics if the card is already in the hand.
    #[inline]
    pub fn insert(&mut self, card: Card) {
        assert!(!self.contains(card), "Card {card} already in hand [{self}]");
        self.0 |= card.mask();
    }

    /// Removes a card from this hand.
    ///
    /// Panics if the card is not in the hand.
    #[inline]
    pub fn remove(&mut self, card: Card) {
        assert!(self.contains(card), "Card {card} not in hand [{self}]");
        self.0 &= !card.mask();
    }

    /// Removes all the cards in `other` from this hand.
    ///
    /// Panics if `other` is not a subset of this hand.
    pub fn remove_all(&mut self, other: Hand) {
        assert!(
            other.is_subset(self),
            "Hand [{other}] is not a subset of [{self}]"
        );
        self.0 &= !other.0;
    }

    /// Returns a copy of this hand with the given card added.
    ///
    /// Panics if the card is already in the hand.
    #[inline]
    pub fn with(mut self, card: Card) -> Hand {
        self.insert(card);
        self
    }

    /// Removes and returns the card with the lowest index.
    #[inline]
    pub fn take(&mut self) -> Option<Card> {
        let card = self.first()?;
        self.0 &= self.0 - 1;
        Some(card)
    }

    /// The card with the lowest index.
    #[inline]
    pub fn first(&self) -> Option<Card> {
        (self.0 != 0).then(|| Card::from_id(self.0.trailing_zeros() as u8))
    }

    /// The card with the highest index.
    #[inline]
    pub fn last(&self) -> Option<Card> {
        (self.0 != 0).then(|| Card::from_id(63 - self.0.leading_zeros() as u8))
    }

    /// The number of cards in this hand.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if this hand has no cards.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if all cards in this hand are also in `other`.
    pub fn is_subset(&self, other: &Hand) -> bool {
        self.0 & !other.0 == 0
    }

    /// The cards in either hand.
    pub fn union(self, other: Hand) -> Hand {
        Self(self.0 | other.0)
    }

    /// The cards in this hand that are not in `other`.
    pub fn difference(self, other: Hand) -> Hand {
        Self(self.0 & !other.0)
    }

    /// Iterates the cards in ascending index order.
    pub fn iter(&self) -> Cards {
        Cards(*self)
    }

    /// Copies the cards in ascending index order into a vector.
    pub fn cards(&self) -> Vec<Card> {
        self.iter().collect()
    }

    /// Calls the `f` closure for each k-cards subset of this hand.
    ///
    /// The closure is called nck(size, k) times, subsets are visited in
    /// lexicographic order of the cards indexes. There are no calls if k is
    /// larger than the hand size.
    pub fn for_each_choice<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(Hand),
    {
        fn choose<F>(mut rest: Hand, chosen: Hand, k: usize, f: &mut F)
        where
            F: FnMut(Hand),
        {
            if chosen.size() == k {
                f(chosen);
                return;
            }

            while rest.size() + chosen.size() >= k {
                let Some(card) = rest.take() else {
                    break;
                };

                choose(rest, chosen.with(card), k, f);
            }
        }

        if k <= self.size() {
            choose(*self, Hand::new(), k, &mut f);
        }
    }

    /// Returns an iterator over all k-cards subsets of this hand.
    ///
    /// Visits the same subsets in the same order as [Hand::for_each_choice].
    pub fn choices(&self, k: usize) -> Choices {
        Choices::new(*self, k)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, card) in self.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }

            write!(f, "{card}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({self})")
    }
}

/// Parses a hand from a sequence of two characters cards.
///
/// Each card is a rank in `A23456789TJQK` followed by a suit in `SDCH`, in
/// any case, cards may be separated by whitespaces or hyphens:
///
/// ```
/// # use cribbage_cards::Hand;
/// let h1 = "5H 5C 5S JD 5D".parse::<Hand>().unwrap();
/// let h2 = "5h5c-5s-jd5d".parse::<Hand>().unwrap();
/// assert_eq!(h1, h2);
/// ```
impl FromStr for Hand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut hand = Hand::new();
        let mut rank = None;

        for (pos, ch) in s.char_indices() {
            let is_separator = ch.is_whitespace() || ch == '-';

            match rank.take() {
                None if is_separator => {}
                None => {
                    let r = Rank::from_char(ch).ok_or_else(|| ParseError::invalid(s, pos, ch))?;
                    rank = Some((pos, r));
                }
                Some((start, _)) if is_separator => {
                    return Err(ParseError::Incomplete {
                        text: s.to_string(),
                        pos: start,
                    });
                }
                Some((_, r)) => {
                    let suit = Suit::from_char(ch).ok_or_else(|| ParseError::invalid(s, pos, ch))?;
                    let card = Card::new(r, suit);
                    if hand.contains(card) {
                        return Err(ParseError::DuplicateCard {
                            text: s.to_string(),
                            card,
                        });
                    }

                    hand.insert(card);
                }
            }
        }

        if let Some((start, _)) = rank {
            return Err(ParseError::Incomplete {
                text: s.to_string(),
                pos: start,
            });
        }

        Ok(hand)
    }
}

impl Serialize for Hand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Collects cards into a hand.
///
/// Panics if a card appears more than once.
impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Hand::new();
        for card in iter {
            hand.insert(card);
        }

        hand
    }
}

impl IntoIterator for Hand {
    type Item = Card;
    type IntoIter = Cards;

    fn into_iter(self) -> Self::IntoIter {
        Cards(self)
    }
}

/// An iterator over the cards of a hand, in ascending index order.
#[derive(Debug, Clone)]
pub struct Cards(Hand);

impl Iterator for Cards {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.size();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cards {}

impl DoubleEndedIterator for Cards {
    fn next_back(&mut self) -> Option<Self::Item> {
        let card = self.0.last()?;
        self.0.remove(card);
        Some(card)
    }
}

/// A lazy iterator over the k-cards subsets of a hand.
#[derive(Debug, Clone)]
pub struct Choices {
    cards: Vec<Card>,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Choices {
    fn new(hand: Hand, k: usize) -> Self {
        let cards = hand.cards();
        let done = k > cards.len();
        Self {
            cards,
            indices: (0..k).collect(),
            started: false,
            done,
        }
    }

    fn current(&self) -> Hand {
        self.indices.iter().map(|&idx| self.cards[idx]).collect()
    }

    /// Moves the indices to the next combination in lexicographic order.
    fn advance(&mut self) -> bool {
        let n = self.cards.len();
        let k = self.indices.len();

        // Find the rightmost index that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
            return false;
        };

        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }

        true
    }
}

impl Iterator for Choices {
    type Item = Hand;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.done = true;
            return None;
        }

        Some(self.current())
    }
}
