//! Seven-card hand evaluation and showdown comparison.
//!
//! [`Hand::evaluate`] ranks exactly 7 cards into one of 9 categories and
//! extracts the ordered best-five vector used for tie-breaking. Category
//! detection runs in strict descending-strength order over a rank-grouped
//! view of the cards; a small signature product over the group sizes
//! (pair → 2, trips → 3, quads → 5, multiplied across groups) identifies the
//! duplicate structure without re-scanning:
//!
//! | signature | structure  |
//! |-----------|------------|
//! | 5, 10, 15 | quads      |
//! | 6, 9, 12  | full house |
//! | 3         | trips      |
//! | 4, 8      | two pair   |
//! | 2         | one pair   |
//! | 1         | no duplicates |
//!
//! Straights are detected by scanning descending 5-card windows of the
//! rank-deduplicated list for consecutive rank indices. There is no low-ace
//! wraparound: the wheel A-2-3-4-5 does not count as a straight. This is an
//! inherited, deliberate behavior of the ruleset and is pinned by tests.

use super::card::Card;
use std::cmp::Ordering;
use std::fmt;

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    /// No pair, flush, or straight.
    HighCard = 1,
    /// Exactly one pair.
    OnePair = 2,
    /// Two distinct pairs.
    TwoPair = 3,
    /// Three of a kind without a pair.
    ThreeOfAKind = 4,
    /// Five consecutive ranks (no wheel).
    Straight = 5,
    /// Five cards of one suit.
    Flush = 6,
    /// Trips plus a pair.
    FullHouse = 7,
    /// Four of a kind.
    FourOfAKind = 8,
    /// Straight in a single suit.
    StraightFlush = 9,
}

impl HandCategory {
    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }

    /// Best-five index positions compared, in order, to break a tie within
    /// this category. The first position whose ranks differ decides.
    fn tiebreak_positions(&self) -> &'static [usize] {
        match self {
            HandCategory::StraightFlush | HandCategory::Straight => &[0],
            HandCategory::FourOfAKind | HandCategory::FullHouse => &[4, 0],
            HandCategory::ThreeOfAKind => &[2, 1, 0],
            HandCategory::TwoPair => &[4, 2, 0],
            HandCategory::OnePair => &[4, 2, 1, 0],
            HandCategory::HighCard | HandCategory::Flush => &[4, 3, 2, 1, 0],
        }
    }
}

/// Run of equal-rank cards within the sorted 7-card view.
struct RankGroup {
    count: usize,
    cards: Vec<Card>,
}

/// An evaluated 7-card hand: category plus the ordered best-five vector.
///
/// Purely derived data; recomputed per showdown, never stored by the engine.
#[derive(Debug, Clone)]
pub struct Hand {
    category: HandCategory,
    best_five: [Card; 5],
}

impl Hand {
    /// Evaluate exactly 7 cards.
    ///
    /// # Panics
    /// Panics if `cards` does not contain exactly 7 cards; the engine always
    /// evaluates 2 hole cards plus a complete board.
    pub fn evaluate(cards: &[Card]) -> Self {
        assert!(cards.len() == 7, "hand evaluation requires exactly 7 cards");

        let mut sorted: Vec<Card> = cards.to_vec();
        sorted.sort_by_key(|c| c.rank());

        let (groups, signature) = group_by_rank(&sorted);
        let flush_cards = flush_suited_cards(&sorted);

        if let Some(best_five) = straight_window(&flush_cards) {
            return Self { category: HandCategory::StraightFlush, best_five };
        }
        if matches!(signature, 5 | 10 | 15) {
            return Self {
                category: HandCategory::FourOfAKind,
                best_five: four_of_a_kind(groups),
            };
        }
        if matches!(signature, 6 | 9 | 12) {
            return Self {
                category: HandCategory::FullHouse,
                best_five: full_house(groups),
            };
        }
        if flush_cards.len() >= 5 {
            let top: Vec<Card> = flush_cards[flush_cards.len() - 5..].to_vec();
            return Self {
                category: HandCategory::Flush,
                best_five: to_five(&top),
            };
        }
        if let Some(best_five) = straight_window(&dedup_by_rank(&sorted)) {
            return Self { category: HandCategory::Straight, best_five };
        }
        if signature == 3 {
            return Self {
                category: HandCategory::ThreeOfAKind,
                best_five: three_of_a_kind(groups),
            };
        }
        if matches!(signature, 4 | 8) {
            return Self {
                category: HandCategory::TwoPair,
                best_five: two_pair(groups),
            };
        }
        if signature == 2 {
            return Self {
                category: HandCategory::OnePair,
                best_five: one_pair(groups),
            };
        }
        Self {
            category: HandCategory::HighCard,
            best_five: to_five(&sorted[2..7]),
        }
    }

    /// The hand's category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The best five cards, in the category's canonical comparison order.
    pub fn best_five(&self) -> &[Card; 5] {
        &self.best_five
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category.name())?;
        for card in &self.best_five {
            write!(f, "{}", card)?;
        }
        write!(f, "]")
    }
}

/// Group the rank-sorted cards into equal-rank runs and compute the
/// duplicate-structure signature product.
fn group_by_rank(sorted: &[Card]) -> (Vec<RankGroup>, u32) {
    const SIGNATURE: [u32; 5] = [1, 1, 2, 3, 5];

    let mut groups: Vec<RankGroup> = Vec::with_capacity(7);
    for &card in sorted {
        match groups.last_mut() {
            Some(group) if group.cards[0].rank() == card.rank() => {
                group.count += 1;
                group.cards.push(card);
            }
            _ => groups.push(RankGroup { count: 1, cards: vec![card] }),
        }
    }
    let signature = groups.iter().map(|g| SIGNATURE[g.count]).product();
    (groups, signature)
}

/// All cards of the flush suit (ascending by rank), or empty when no suit
/// reaches five cards.
fn flush_suited_cards(sorted: &[Card]) -> Vec<Card> {
    for suit in 0..4u8 {
        if sorted.iter().filter(|c| c.suit() == suit).count() >= 5 {
            return sorted.iter().copied().filter(|c| c.suit() == suit).collect();
        }
    }
    Vec::new()
}

/// Keep the first card of each rank from an ascending-sorted list.
fn dedup_by_rank(sorted: &[Card]) -> Vec<Card> {
    let mut out: Vec<Card> = Vec::with_capacity(sorted.len());
    for &card in sorted {
        if out.last().map(|c| c.rank()) != Some(card.rank()) {
            out.push(card);
        }
    }
    out
}

/// Scan descending 5-card windows of a rank-deduplicated ascending list and
/// return the highest window of consecutive ranks.
fn straight_window(cards: &[Card]) -> Option<[Card; 5]> {
    let mut hi = cards.len();
    while hi >= 5 {
        let window = &cards[hi - 5..hi];
        if window.windows(2).all(|w| w[0].rank() + 1 == w[1].rank()) {
            return Some(to_five(window));
        }
        hi -= 1;
    }
    None
}

/// Best five for quads: `[kicker, q, q, q, q]`.
fn four_of_a_kind(mut groups: Vec<RankGroup>) -> [Card; 5] {
    let pos = groups
        .iter()
        .rposition(|g| g.count == 4)
        .expect("signature guaranteed a quad group");
    let quad = groups.remove(pos);
    // Highest remaining group supplies the kicker.
    let kicker = groups.last().expect("seven cards leave a kicker").cards[0];
    to_five(&[kicker, quad.cards[0], quad.cards[1], quad.cards[2], quad.cards[3]])
}

/// Best five for a full house: `[p, p, t, t, t]` with the highest trip and
/// the highest remaining pair source (a second trip also qualifies).
fn full_house(mut groups: Vec<RankGroup>) -> [Card; 5] {
    let trip_pos = groups
        .iter()
        .rposition(|g| g.count == 3)
        .expect("signature guaranteed a trip group");
    let trips = groups.remove(trip_pos);
    let pair_pos = groups
        .iter()
        .rposition(|g| g.count >= 2)
        .expect("signature guaranteed a pair source");
    let pair = &groups[pair_pos];
    to_five(&[
        pair.cards[0],
        pair.cards[1],
        trips.cards[0],
        trips.cards[1],
        trips.cards[2],
    ])
}

/// Best five for trips: `[k_low, k_high, t, t, t]`.
fn three_of_a_kind(mut groups: Vec<RankGroup>) -> [Card; 5] {
    let pos = groups
        .iter()
        .rposition(|g| g.count == 3)
        .expect("signature guaranteed a trip group");
    let trips = groups.remove(pos);
    let k_high = groups.pop().expect("kicker group").cards[0];
    let k_low = groups.pop().expect("kicker group").cards[0];
    to_five(&[k_low, k_high, trips.cards[0], trips.cards[1], trips.cards[2]])
}

/// Best five for two pair: `[kicker, lp, lp, hp, hp]`. With three pairs the
/// lowest pair is demoted to kicker material.
fn two_pair(mut groups: Vec<RankGroup>) -> [Card; 5] {
    let mut pairs: Vec<Card> = Vec::with_capacity(4);
    let mut pos = groups.len();
    while pos > 0 {
        pos -= 1;
        if groups[pos].count == 2 && pairs.len() < 3 {
            let group = groups.remove(pos);
            pairs.extend_from_slice(&group.cards);
        }
    }
    let kicker = groups.last().expect("seven cards leave a kicker").cards[0];
    to_five(&[kicker, pairs[2], pairs[3], pairs[0], pairs[1]])
}

/// Best five for one pair: `[k3, k2, k1, p, p]` with kickers descending
/// toward the middle.
fn one_pair(mut groups: Vec<RankGroup>) -> [Card; 5] {
    let pos = groups
        .iter()
        .rposition(|g| g.count == 2)
        .expect("signature guaranteed a pair group");
    let pair = groups.remove(pos);
    let k1 = groups.pop().expect("kicker group").cards[0];
    let k2 = groups.pop().expect("kicker group").cards[0];
    let k3 = groups.pop().expect("kicker group").cards[0];
    to_five(&[k3, k2, k1, pair.cards[0], pair.cards[1]])
}

fn to_five(cards: &[Card]) -> [Card; 5] {
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

/// Compare two 7-card hands at showdown.
///
/// A folded (absent) hand always loses; two absent hands resolve in favor of
/// the second so that folding the comparator over a list always yields a
/// non-empty winner set. Returns `Greater` when `hand0` wins, `Less` when
/// `hand1` wins, `Equal` on a draw.
pub fn compare_2_hands(hand0: Option<&[Card]>, hand1: Option<&[Card]>) -> Ordering {
    let (cards0, cards1) = match (hand0, hand1) {
        (None, _) => return Ordering::Less,
        (_, None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    let eval0 = Hand::evaluate(cards0);
    let eval1 = Hand::evaluate(cards1);

    match eval0.category().cmp(&eval1.category()) {
        Ordering::Equal => {}
        decided => return decided,
    }

    for &pos in eval0.category().tiebreak_positions() {
        let r0 = eval0.best_five()[pos].rank();
        let r1 = eval1.best_five()[pos].rank();
        match r0.cmp(&r1) {
            Ordering::Equal => continue,
            decided => return decided,
        }
    }
    Ordering::Equal
}

/// Fold the pairwise comparator over every player's hand, producing a 0/1
/// winner-membership vector. Ties mark several winners.
pub fn compare_all_hands(hands: &[Option<&[Card]>]) -> Vec<u8> {
    let mut winners: Vec<usize> = Vec::new();
    let mut winner_hand: Option<&[Card]> = None;

    for (i, hand) in hands.iter().enumerate() {
        match compare_2_hands(winner_hand, *hand) {
            Ordering::Less => {
                winners.clear();
                winners.push(i);
                winner_hand = *hand;
            }
            Ordering::Equal => winners.push(i),
            Ordering::Greater => {}
        }
    }

    (0..hands.len())
        .map(|i| u8::from(winners.contains(&i)))
        .collect()
}
