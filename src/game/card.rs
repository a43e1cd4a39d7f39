//! Card and deck primitives.
//!
//! A `Card` is an immutable rank + suit value packed into a single byte.
//! Ranks are ordered only through the `RANK_CHARS` lookup table; suits never
//! participate in ordering. The `Deck` owns the 52 distinct cards for the
//! lifetime of one hand and is mutated only by shuffling and dealing.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Rank characters in ascending strength order.
pub const RANK_CHARS: [char; 13] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
];

/// Suit characters in canonical order (spades, clubs, diamonds, hearts).
pub const SUIT_CHARS: [char; 4] = ['s', 'c', 'd', 'h'];

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit.
    id: u8,
}

impl Card {
    /// Create a card from rank (0-12: deuce to ace) and suit (0-3).
    #[inline]
    pub fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < 13, "rank must be 0-12");
        debug_assert!(suit < 4, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Create a card from its packed id (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Parse a card from its 2-character index string like "As" or "2c".
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let rank_char = chars.next()?;
        let suit_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let rank = RANK_CHARS.iter().position(|&c| c == rank_char)?;
        let suit = SUIT_CHARS.iter().position(|&c| c == suit_char)?;
        Some(Self::new(rank as u8, suit as u8))
    }

    /// Get the packed id (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the rank index (0-12: deuce to ace).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the suit index (0-3: s, c, d, h).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Rank character for display.
    pub fn rank_char(&self) -> char {
        RANK_CHARS[self.rank() as usize]
    }

    /// Suit character for display.
    pub fn suit_char(&self) -> char {
        SUIT_CHARS[self.suit() as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_char(), self.suit_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// A deck of the 52 distinct cards.
///
/// Owned by exactly one [`GameEngine`](crate::game::engine::GameEngine) per
/// hand. Cards are dealt from the tail; the engine may push a card back onto
/// the tail when reversing a step.
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a fresh, unshuffled deck of 52 cards.
    pub fn new() -> Self {
        let cards = (0..52).map(Card::from_id).collect();
        Self { cards }
    }

    /// Uniformly permute the deck in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the card at the deck's tail.
    ///
    /// # Panics
    /// Panics if the deck is empty. A hand deals at most `2n + 5` cards, so
    /// an empty deck here is a programming error, not a recoverable state.
    pub fn deal(&mut self) -> Card {
        self.cards
            .pop()
            .expect("deck exhausted: more than 52 cards dealt in one hand")
    }

    /// Number of undealt cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Return a previously dealt card to the tail.
    ///
    /// Used only by the engine's step-back restore; pushing cards back in
    /// reverse deal order reproduces the exact pre-deal deck.
    pub(crate) fn put_back(&mut self, card: Card) {
        debug_assert!(self.cards.len() < 52);
        self.cards.push(card);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
