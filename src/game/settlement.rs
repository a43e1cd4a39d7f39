//! Multi-way pot settlement with side pots.
//!
//! Every player's raw payoff starts at the negative of their total
//! commitment. With no all-in, the single pot goes to the winner set in
//! equal floating-point shares. With all-ins, pots are peeled off layer by
//! layer at each distinct all-in contribution level: a layer collects
//! `min(remaining, increment)` from every seat, seats contributing nothing
//! are excluded from that layer's showdown, and the leftover forms a final
//! uncapped layer. Each layer settles independently and additively.
//!
//! Shares are exact only when a pot divides evenly among its winners;
//! fractional payoffs are expected, not an error.

use super::card::Card;
use super::hand::compare_all_hands;
use super::player::{Player, PlayerStatus};

/// Settle the hand and return one payoff per seat.
///
/// `hands` holds, for each seat, the player's 2 hole cards plus the public
/// cards, or `None` for a folded seat. Payoffs always sum to zero.
pub fn settle(players: &[Player], hands: &[Option<Vec<Card>>]) -> Vec<f64> {
    debug_assert_eq!(players.len(), hands.len());

    let mut payoffs: Vec<f64> = players.iter().map(|p| -(p.in_chips as f64)).collect();
    let mut remaining: Vec<u32> = players.iter().map(|p| p.in_chips).collect();
    let mut contenders: Vec<Option<&[Card]>> =
        hands.iter().map(|h| h.as_deref()).collect();

    let mut all_in_levels: Vec<u32> = Vec::new();
    for player in players {
        if player.status == PlayerStatus::AllIn && !all_in_levels.contains(&player.in_chips) {
            all_in_levels.push(player.in_chips);
        }
    }

    if all_in_levels.is_empty() {
        award(&mut payoffs, &remaining, &contenders);
        return payoffs;
    }

    all_in_levels.sort_unstable();

    let mut layers: Vec<Vec<u32>> = Vec::with_capacity(all_in_levels.len() + 1);
    let mut previous = 0;
    for level in all_in_levels {
        let increment = level - previous;
        previous = level;
        layers.push(remaining.iter().map(|&c| c.min(increment)).collect());
        for chips in remaining.iter_mut() {
            *chips = chips.saturating_sub(increment);
        }
    }
    // Whatever the largest all-in could not cap forms the last layer.
    layers.push(remaining);

    for layer in layers {
        for (hand, &chips) in contenders.iter_mut().zip(layer.iter()) {
            if chips == 0 {
                *hand = None;
            }
        }
        award(&mut payoffs, &layer, &contenders);
    }

    payoffs
}

/// Split one pot equally among its winner set and add the shares.
fn award(payoffs: &mut [f64], pot: &[u32], contenders: &[Option<&[Card]>]) {
    let winners = compare_all_hands(contenders);
    let winner_count: u32 = winners.iter().map(|&w| w as u32).sum();
    let total: u32 = pot.iter().sum();
    let share = total as f64 / winner_count as f64;
    for (payoff, &won) in payoffs.iter_mut().zip(winners.iter()) {
        if won == 1 {
            *payoff += share;
        }
    }
}
