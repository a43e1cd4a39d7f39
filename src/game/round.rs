//! Per-street betting state machine.
//!
//! One `BettingRound` instance lives for the whole hand; the engine calls
//! [`BettingRound::start_new_round`] at each street to reset the per-street
//! counters and contribution vector while the alive/all-in counts carry
//! across streets.

use super::action::Action;
use super::player::{Player, PlayerStatus};

/// Betting state for the current street.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRound {
    game_pointer: usize,
    num_players: usize,
    /// Minimum raise increment restored at the start of every street
    /// (the big blind).
    init_raise_amount: u32,
    /// Current minimum raise increment: the last raise-over-call size.
    current_raise_amount: u32,
    /// Consecutive non-raising actions since the last raise. The round is
    /// over once every player who can still act has checked or called.
    not_raise_num: usize,
    all_in_num: usize,
    alive_num: usize,
    /// Chips committed by each seat on this street only. Differs from the
    /// hand-lifetime `in_chips` from the flop onward.
    raised: Vec<u32>,
}

impl BettingRound {
    /// Create the betting state for a hand.
    pub fn new(num_players: usize, init_raise_amount: u32) -> Self {
        Self {
            game_pointer: 0,
            num_players,
            init_raise_amount,
            current_raise_amount: init_raise_amount,
            not_raise_num: 0,
            all_in_num: 0,
            alive_num: num_players,
            raised: vec![0; num_players],
        }
    }

    /// Start a new betting street.
    ///
    /// `contributions` seeds the per-street vector (the posted blinds on the
    /// pre-flop street); `None` resets it to zero.
    pub fn start_new_round(&mut self, game_pointer: usize, contributions: Option<Vec<u32>>) {
        self.game_pointer = game_pointer;
        self.not_raise_num = 0;
        self.current_raise_amount = self.init_raise_amount;
        self.raised = contributions.unwrap_or_else(|| vec![0; self.num_players]);
    }

    /// Apply one legal action for the current actor.
    ///
    /// Returns the next actor, or `None` when every alive player is all-in
    /// and nobody can act again this hand.
    ///
    /// Callers must only submit actions from [`BettingRound::get_legal_actions`];
    /// the engine enforces this before delegating here.
    pub fn proceed_round(&mut self, players: &mut [Player], action: Action) -> Option<usize> {
        let actor = self.game_pointer;
        let call_amount = self.call_amount(actor);

        match action {
            Action::Raise(amount) => {
                self.raised[actor] += amount;
                players[actor].in_chips += amount;
                // The raiser has not been matched by anyone yet.
                self.not_raise_num = 1;
                self.current_raise_amount = amount - call_amount;
            }
            Action::Call => {
                self.raised[actor] += call_amount;
                players[actor].in_chips += call_amount;
                self.not_raise_num += 1;
            }
            Action::Fold => {
                players[actor].status = PlayerStatus::Folded;
                self.alive_num -= 1;
            }
            Action::Check => {
                self.not_raise_num += 1;
            }
            Action::AllIn => {
                let all_in_amount = players[actor].remaining_chips();
                self.raised[actor] += all_in_amount;
                players[actor].in_chips += all_in_amount;
                players[actor].status = PlayerStatus::AllIn;
                self.all_in_num += 1;
                // A shove past the call gap re-opens the action like a raise;
                // a short shove leaves the counter untouched.
                if all_in_amount > call_amount {
                    self.not_raise_num = 0;
                }
                self.current_raise_amount = self
                    .current_raise_amount
                    .max(all_in_amount.saturating_sub(call_amount));
            }
        }

        if self.all_in_num == self.alive_num {
            return None;
        }

        // Advance to the next seat still able to act.
        self.game_pointer = (self.game_pointer + 1) % self.num_players;
        while players[self.game_pointer].status != PlayerStatus::Alive {
            self.game_pointer = (self.game_pointer + 1) % self.num_players;
        }
        Some(self.game_pointer)
    }

    /// Enumerate the legal actions for the current actor.
    pub fn get_legal_actions(&self, players: &[Player]) -> Vec<Action> {
        let actor = self.game_pointer;
        let call_amount = self.call_amount(actor);
        let remaining = players[actor].remaining_chips();

        let mut actions = vec![Action::Fold];

        if call_amount == 0 {
            actions.push(Action::Check);
        } else if call_amount >= remaining {
            // Cannot cover the gap: shove or give up.
            return vec![Action::Fold, Action::AllIn];
        } else {
            actions.push(Action::Call);
        }

        let min_raise = call_amount + self.current_raise_amount;
        if min_raise >= remaining {
            actions.push(Action::AllIn);
        } else {
            for amount in min_raise..remaining {
                actions.push(Action::Raise(amount));
            }
            actions.push(Action::AllIn);
        }

        actions
    }

    /// True once every player who can still act has checked or called since
    /// the last raise.
    pub fn is_over(&self) -> bool {
        self.not_raise_num == self.alive_num - self.all_in_num
    }

    /// Seat index of the current actor.
    pub fn game_pointer(&self) -> usize {
        self.game_pointer
    }

    /// Per-street contribution vector.
    pub fn raised(&self) -> &[u32] {
        &self.raised
    }

    /// Number of non-folded seats.
    pub fn alive_num(&self) -> usize {
        self.alive_num
    }

    /// Number of all-in seats.
    pub fn all_in_num(&self) -> usize {
        self.all_in_num
    }

    /// Chips the actor must add to match the street's highest contribution.
    fn call_amount(&self, actor: usize) -> u32 {
        let highest = self.raised.iter().copied().max().unwrap_or(0);
        highest - self.raised[actor]
    }
}
