// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards parsing errors.
use thiserror::Error;

use crate::Card;

/// Errors returned when parsing cards and hands from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character that is not a rank, a suit or a separator.
    #[error("malformed hand '{text}': unexpected '{ch}' at position {pos}")]
    InvalidChar {
        /// The parsed text.
        text: String,
        /// The byte position of the character.
        pos: usize,
        /// The unexpected character.
        ch: char,
    },
    /// A rank that is not followed by a suit.
    #[error("malformed hand '{text}': incomplete card at position {pos}")]
    Incomplete {
        /// The parsed text.
        text: String,
        /// The byte position of the incomplete card.
        pos: usize,
    },
    /// The same card appears more than once.
    #[error("malformed hand '{text}': duplicate card {card}")]
    DuplicateCard {
        /// The parsed text.
        text: String,
        /// The repeated card.
        card: Card,
    },
}

impl ParseError {
    pub(crate) fn invalid(text: &str, pos: usize, ch: char) -> Self {
        ParseError::InvalidChar {
            text: text.to_string(),
            pos,
            ch,
        }
    }
}
