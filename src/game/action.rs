//! Raw betting actions.
//!
//! The literal string vocabulary is fixed: `"fold"`, `"check"`, `"call"`,
//! `"all-in"`, and `"raise<integer>"`. `Display` and [`Action::parse`]
//! round-trip through exactly these forms.

use std::fmt;

/// A raw betting action. Raise amounts are the chips added by the actor on
/// top of their current street contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Forfeit the hand and any chips already committed.
    Fold,
    /// Pass without adding chips; legal only when the call gap is zero.
    Check,
    /// Match the current highest street contribution.
    Call,
    /// Add the given number of chips, exceeding the call gap.
    Raise(u32),
    /// Commit the entire remaining stack.
    AllIn,
}

impl Action {
    /// Parse from the literal action vocabulary.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fold" => Some(Action::Fold),
            "check" => Some(Action::Check),
            "call" => Some(Action::Call),
            "all-in" => Some(Action::AllIn),
            _ => {
                let amount = s.strip_prefix("raise")?;
                amount.parse().ok().map(Action::Raise)
            }
        }
    }

    /// True for raise and all-in.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Raise(_) | Action::AllIn)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Raise(amount) => write!(f, "raise{}", amount),
            Action::AllIn => write!(f, "all-in"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_vocabulary_roundtrip() {
        let actions = [
            Action::Fold,
            Action::Check,
            Action::Call,
            Action::Raise(42),
            Action::AllIn,
        ];
        for action in actions {
            assert_eq!(Action::parse(&action.to_string()), Some(action));
        }
        assert_eq!(Action::parse("raise12").unwrap(), Action::Raise(12));
        assert!(Action::parse("raise").is_none());
        assert!(Action::parse("bet10").is_none());
        assert!(Action::parse("allin").is_none());
    }
}
