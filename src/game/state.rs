//! Observable state at a decision point, and the suit-isomorphic
//! information-state key derived from it.

use super::action::Action;
use super::card::Card;
use std::fmt;

/// Everything the acting player can observe at a decision point.
///
/// Built fresh by the engine at every decision point; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicState {
    /// Seat index of the acting player.
    pub player_id: usize,
    /// Total chips committed to the hand by each seat.
    pub pot: Vec<u32>,
    /// The acting player's two hole cards.
    pub hand_cards: Vec<Card>,
    /// Community cards dealt so far.
    pub public_cards: Vec<Card>,
    /// Legal actions for the acting player.
    pub legal_actions: Vec<Action>,
}

impl PublicState {
    /// Betting street index: 0 pre-flop, 1 flop, 2 turn, 3 river.
    pub fn bet_round(&self) -> usize {
        self.public_cards.len().saturating_sub(2)
    }

    /// Whether the raw raise ladder is replaced by the abstract action set.
    /// Abstraction starts on the flop; pre-flop keeps the full ladder.
    pub fn needs_action_abstraction(&self) -> bool {
        self.bet_round() >= 1
    }

    /// Total chips in the pot.
    pub fn total_pot(&self) -> u32 {
        self.pot.iter().sum()
    }

    /// Canonical suit-isomorphic key for the acting player's cards.
    ///
    /// Hole cards and public cards are each sorted rank-descending. When the
    /// hole cards are a pair, the pair is reordered so that the hole card
    /// whose suit occurs more often across all visible cards comes first; on
    /// a frequency tie with at least one suited companion, the hole card
    /// whose suit holds the higher-ranked public card comes first. Suits are
    /// then relabeled by first occurrence onto the canonical s, c, d, h
    /// order. Any consistent relabeling of the four suits applied to both
    /// hole and public cards therefore yields an equal key.
    pub fn info_key(&self) -> InfoKey {
        let mut hole = self.hand_cards.clone();
        let mut publics = self.public_cards.clone();
        hole.sort_by_key(|c| std::cmp::Reverse(c.rank()));
        publics.sort_by_key(|c| std::cmp::Reverse(c.rank()));

        if hole.len() == 2 && hole[0].rank() == hole[1].rank() && !publics.is_empty() {
            let frequency = |suit: u8| {
                1 + publics.iter().filter(|c| c.suit() == suit).count()
            };
            let n0 = frequency(hole[0].suit());
            let n1 = frequency(hole[1].suit());
            if n0 < n1 {
                hole.swap(0, 1);
            } else if n0 == n1 && n0 > 1 {
                let highest = |suit: u8| {
                    publics
                        .iter()
                        .find(|c| c.suit() == suit)
                        .map(|c| c.rank())
                        .expect("frequency above one implies a public card of this suit")
                };
                if highest(hole[0].suit()) < highest(hole[1].suit()) {
                    hole.swap(0, 1);
                }
            }
        }

        // Relabel suits in first-occurrence order.
        let mut relabel: [Option<u8>; 4] = [None; 4];
        let mut next_suit = 0u8;
        let mut key = InfoKey::default();
        for card in hole.iter().chain(publics.iter()) {
            let slot = &mut relabel[card.suit() as usize];
            let suit = match *slot {
                Some(s) => s,
                None => {
                    let s = next_suit;
                    *slot = Some(s);
                    next_suit += 1;
                    s
                }
            };
            key.push(Card::new(card.rank(), suit));
        }
        key
    }
}

impl fmt::Display for PublicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {} | hand ", self.player_id)?;
        for card in &self.hand_cards {
            write!(f, "{}", card)?;
        }
        write!(f, " | board ")?;
        if self.public_cards.is_empty() {
            write!(f, "-")?;
        }
        for card in &self.public_cards {
            write!(f, "{}", card)?;
        }
        write!(f, " | pot {}", self.total_pot())
    }
}

/// Fixed-width canonical information-state key: up to 7 packed cards
/// (2 hole + 5 public) after suit-isomorphism normalization.
///
/// Compared and hashed by value; renders as the concatenated 2-character
/// card tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InfoKey {
    cards: [u8; 7],
    len: u8,
}

impl InfoKey {
    fn push(&mut self, card: Card) {
        debug_assert!(self.len < 7);
        self.cards[self.len as usize] = card.id();
        self.len += 1;
    }

    /// The canonicalized cards, hole cards first.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards[..self.len as usize].iter().map(|&id| Card::from_id(id))
    }

    /// Number of cards in the key (2 pre-flop, up to 7 on the river).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True for a freshly constructed, empty key.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parse a key back from its token string form.
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() % 2 != 0 || chars.len() > 14 {
            return None;
        }
        let mut key = InfoKey::default();
        for pair in chars.chunks(2) {
            let token: String = pair.iter().collect();
            key.push(Card::parse(&token)?);
        }
        Some(key)
    }
}

impl fmt::Display for InfoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in self.cards() {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}
