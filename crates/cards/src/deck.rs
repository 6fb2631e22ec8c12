// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cribbage cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

use crate::{Hand, ParseError};

/// A playing card.
///
/// A card is represented by its packed index in the canonical deck order,
/// the 13 ranks of spades followed by diamonds, clubs and hearts:
///
/// ```text
///   index = suit * 13 + (rank - 1)
///   AS=0, 2S=1, .., KS=12, AD=13, .., KH=51
/// ```
///
/// The index is also the bit position of the card in a [Hand].
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Create a card given a rank and a suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(suit as u8 * 13 + (rank as u8 - 1))
    }

    /// Create a card from its packed index.
    ///
    /// Panics if the index is not in the 0..52 range.
    pub fn from_id(id: u8) -> Card {
        assert!((id as usize) < Deck::SIZE, "Invalid card index {id}");
        Self(id)
    }

    /// This card unique index in the deck.
    pub fn id(&self) -> u8 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 / 13 {
            0 => Suit::Spades,
            1 => Suit::Diamonds,
            2 => Suit::Clubs,
            3 => Suit::Hearts,
            _ => panic!("Invalid suit for card index {}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_order(self.0 % 13 + 1)
    }

    /// The counting value of this card, face cards count 10.
    #[inline]
    pub fn value(&self) -> u8 {
        self.rank().value()
    }

    /// The rank order of this card, ace is 1 and king is 13.
    #[inline]
    pub fn order(&self) -> u8 {
        self.0 % 13 + 1
    }

    /// The bit of this card in a hand bit set.
    #[inline]
    pub(crate) fn mask(&self) -> u64 {
        1 << self.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.char_indices();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some((_, r)), Some((pos, c)), None) => {
                let rank = Rank::from_char(r).ok_or_else(|| ParseError::invalid(s, 0, r))?;
                let suit = Suit::from_char(c).ok_or_else(|| ParseError::invalid(s, pos, c))?;
                (rank, suit)
            }
            (Some((_, r)), None, None) if Rank::from_char(r).is_some() => {
                return Err(ParseError::Incomplete {
                    text: s.to_string(),
                    pos: 0,
                });
            }
            (Some((_, r)), None, None) => return Err(ParseError::invalid(s, 0, r)),
            (None, ..) => {
                return Err(ParseError::Incomplete {
                    text: s.to_string(),
                    pos: 0,
                });
            }
            (Some(_), _, Some((pos, c))) => return Err(ParseError::invalid(s, pos, c)),
        };

        Ok(Card::new(rank, suit))
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Ace
    Ace = 1,
    /// Deuce
    Deuce,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
}

impl Rank {
    /// Returns all ranks, from ace to king.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Ace, Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King,
        ]
        .into_iter()
    }

    /// The counting value used for fifteens.
    pub fn value(&self) -> u8 {
        (*self as u8).min(10)
    }

    /// Parses a rank character, ignoring case.
    pub fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            'A' => Rank::Ace,
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            _ => return None,
        };

        Some(rank)
    }

    fn from_order(order: u8) -> Rank {
        match order {
            1 => Rank::Ace,
            2 => Rank::Deuce,
            3 => Rank::Trey,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            _ => panic!("Invalid rank order {order}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Ace => 'A',
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Clubs suit.
    Clubs = 2,
    /// Hearts suit.
    Hearts = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits in deck order.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Spades, Suit::Diamonds, Suit::Clubs, Suit::Hearts].into_iter()
    }

    /// Parses a suit character, ignoring case.
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'S' => Some(Suit::Spades),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            'H' => Some(Suit::Hearts),
            _ => None,
        }
    }
}

/// Returns all the 52 cards minus the cards in `exclude`.
pub fn make_deck(exclude: &Hand) -> Hand {
    Hand::full().difference(*exclude)
}

/// A cards deck for dealing.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals a hand of `n` cards, returns `None` if there are not enough cards.
    pub fn deal_hand(&mut self, n: usize) -> Option<Hand> {
        if n > self.cards.len() {
            return None;
        }

        let at = self.cards.len() - n;
        Some(self.cards.drain(at..).collect())
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
