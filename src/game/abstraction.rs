//! Abstract action set bounding the raw raise ladder.
//!
//! From the flop onward the raw action space (one raise per affordable chip
//! amount) is folded into seven symbols; pre-flop keeps the raw ladder, a
//! deliberate asymmetry of the trainer. Encoding picks the pot-fraction
//! buckets the actor can strictly out-raise; translation turns a bucket back
//! into a concrete raw action, falling back to all-in when the exact raise
//! is not legal.

use super::action::Action;
use super::state::PublicState;

/// The seven abstract actions, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractAction {
    /// Maps 1:1 to `fold`.
    Fold = 0,
    /// Maps 1:1 to `check`.
    Check = 1,
    /// Maps 1:1 to `call`.
    Call = 2,
    /// Raise half of the current total pot.
    RaiseHalfPot = 3,
    /// Raise the current total pot.
    RaisePot = 4,
    /// Raise twice the current total pot.
    Raise2Pot = 5,
    /// Maps 1:1 to `all-in`.
    AllIn = 6,
}

/// All abstract actions, indexable by their discriminant.
pub const ABSTRACT_ACTIONS: [AbstractAction; 7] = [
    AbstractAction::Fold,
    AbstractAction::Check,
    AbstractAction::Call,
    AbstractAction::RaiseHalfPot,
    AbstractAction::RaisePot,
    AbstractAction::Raise2Pot,
    AbstractAction::AllIn,
];

impl AbstractAction {
    /// Index of this action in the abstract action space.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up an abstract action by index.
    pub fn from_index(index: usize) -> Option<Self> {
        ABSTRACT_ACTIONS.get(index).copied()
    }

    /// Translate this abstract action into a raw action legal in `state`.
    ///
    /// Pot-fraction raises floor to whole chips. When the computed raw
    /// action is not in the legal set (the actor cannot afford it), the
    /// translation falls back to `all-in`.
    pub fn translate(self, state: &PublicState) -> Action {
        let total_pot = state.total_pot();
        let raw = match self {
            AbstractAction::Fold => Action::Fold,
            AbstractAction::Check => Action::Check,
            AbstractAction::Call => Action::Call,
            AbstractAction::RaiseHalfPot => Action::Raise(total_pot / 2),
            AbstractAction::RaisePot => Action::Raise(total_pot),
            AbstractAction::Raise2Pot => Action::Raise(2 * total_pot),
            AbstractAction::AllIn => Action::AllIn,
        };
        if state.legal_actions.contains(&raw) {
            raw
        } else {
            Action::AllIn
        }
    }
}

/// Encode the state's raw legal actions into the abstract set.
///
/// Fold, check, call, and all-in carry over 1:1 when present. Among the raw
/// raises, a pot-fraction bucket is offered whenever the maximum affordable
/// raise strictly exceeds that fraction of the total pot, so an actor who
/// can out-raise double the pot is offered all three buckets.
pub fn abstract_legal_actions(state: &PublicState) -> Vec<AbstractAction> {
    let total_pot = state.total_pot();
    let mut encoded = Vec::with_capacity(7);
    let mut max_raise = 0u32;

    for action in &state.legal_actions {
        match action {
            Action::Fold => encoded.push(AbstractAction::Fold),
            Action::Check => encoded.push(AbstractAction::Check),
            Action::Call => encoded.push(AbstractAction::Call),
            Action::AllIn => encoded.push(AbstractAction::AllIn),
            Action::Raise(amount) => max_raise = max_raise.max(*amount),
        }
    }

    if max_raise as u64 * 2 > total_pot as u64 {
        encoded.push(AbstractAction::RaiseHalfPot);
    }
    if max_raise > total_pot {
        encoded.push(AbstractAction::RaisePot);
    }
    if max_raise as u64 > 2 * total_pot as u64 {
        encoded.push(AbstractAction::Raise2Pot);
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::Card;

    fn state(pot: Vec<u32>, legal: Vec<Action>) -> PublicState {
        PublicState {
            player_id: 0,
            pot,
            hand_cards: vec![Card::parse("As").unwrap(), Card::parse("Kd").unwrap()],
            public_cards: vec![],
            legal_actions: legal,
        }
    }

    fn ladder(upto: u32) -> Vec<Action> {
        let mut legal = vec![Action::Fold, Action::Call];
        legal.extend((4..upto).map(Action::Raise));
        legal.push(Action::AllIn);
        legal
    }

    #[test]
    fn direct_symbols_carry_over() {
        let s = state(vec![2, 2], vec![Action::Fold, Action::Check, Action::AllIn]);
        assert_eq!(
            abstract_legal_actions(&s),
            vec![
                AbstractAction::Fold,
                AbstractAction::Check,
                AbstractAction::AllIn
            ]
        );
    }

    #[test]
    fn raise_buckets_require_strictly_exceeding_the_fraction() {
        // Pot 10: max raise 5 does not strictly exceed half the pot.
        let s = state(vec![5, 5], ladder(6));
        assert!(!abstract_legal_actions(&s).contains(&AbstractAction::RaiseHalfPot));

        // Max raise 6 exceeds half the pot but not the pot.
        let s = state(vec![5, 5], ladder(7));
        let encoded = abstract_legal_actions(&s);
        assert!(encoded.contains(&AbstractAction::RaiseHalfPot));
        assert!(!encoded.contains(&AbstractAction::RaisePot));

        // Max raise 21 exceeds twice the pot: all three buckets offered.
        let s = state(vec![5, 5], ladder(22));
        let encoded = abstract_legal_actions(&s);
        assert!(encoded.contains(&AbstractAction::RaiseHalfPot));
        assert!(encoded.contains(&AbstractAction::RaisePot));
        assert!(encoded.contains(&AbstractAction::Raise2Pot));
    }

    #[test]
    fn translate_computes_pot_fractions() {
        let s = state(vec![10, 11], ladder(60));
        assert_eq!(
            AbstractAction::RaiseHalfPot.translate(&s),
            Action::Raise(10)
        );
        assert_eq!(AbstractAction::RaisePot.translate(&s), Action::Raise(21));
        assert_eq!(AbstractAction::Raise2Pot.translate(&s), Action::Raise(42));
        assert_eq!(AbstractAction::Call.translate(&s), Action::Call);
    }

    #[test]
    fn translate_falls_back_to_all_in() {
        // The 2-pot raise (40) is beyond the actor's ladder.
        let s = state(vec![10, 10], ladder(30));
        assert_eq!(AbstractAction::Raise2Pot.translate(&s), Action::AllIn);
        // Check is not legal facing a bet.
        assert_eq!(AbstractAction::Check.translate(&s), Action::AllIn);
    }

    #[test]
    fn index_roundtrip() {
        for (i, action) in ABSTRACT_ACTIONS.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(AbstractAction::from_index(i), Some(*action));
        }
        assert_eq!(AbstractAction::from_index(7), None);
    }
}
