//! Seat state for one player over the lifetime of a hand.

use super::card::Card;
use std::fmt;

/// Whether a seat can still act in the hand.
///
/// Status only moves forward (alive → folded, alive → all-in); the engine's
/// step-back restore is the sole exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Still able to act.
    Alive,
    /// Folded; contributes no hand at showdown.
    Folded,
    /// Committed the whole stack; stays in for showdown but never acts again.
    AllIn,
}

/// A player seat: identity, stack, chips committed this hand, and hole cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Seat index.
    pub id: usize,
    /// Stack at the start of the hand.
    pub init_chips: u32,
    /// Chips committed over the whole hand so far.
    pub in_chips: u32,
    /// Forward-only acting status.
    pub status: PlayerStatus,
    /// Hole cards (empty until dealt, then exactly two).
    pub hole_cards: Vec<Card>,
}

impl Player {
    /// Create a seat with its starting stack.
    pub fn new(id: usize, init_chips: u32) -> Self {
        Self {
            id,
            init_chips,
            in_chips: 0,
            status: PlayerStatus::Alive,
            hole_cards: Vec::with_capacity(2),
        }
    }

    /// Chips the player can still put into the pot.
    #[inline]
    pub fn remaining_chips(&self) -> u32 {
        self.init_chips - self.in_chips
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seat {} ({}/{} committed, {:?})",
            self.id, self.in_chips, self.init_chips, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_chips_tracks_commitment() {
        let mut player = Player::new(0, 100);
        assert_eq!(player.remaining_chips(), 100);
        player.in_chips += 35;
        assert_eq!(player.remaining_chips(), 65);
        assert_eq!(player.status, PlayerStatus::Alive);
    }
}
