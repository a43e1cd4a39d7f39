//! Regret, policy, and average-policy tables for CFR.
//!
//! Three maps keyed by the canonical [`InfoKey`], each holding one `f64` per
//! action of the space in effect at that key (the raw ladder pre-flop, the
//! 7-symbol abstract set post-flop). The current policy is refreshed from
//! the regrets once per iteration by regret matching; probability reads
//! always mask to the legal subset and renormalize.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::game::state::InfoKey;

/// The trainer's three tables. Grow monotonically; never pruned.
#[derive(Debug, Clone, Default)]
pub struct StrategyStore {
    /// Cumulative counterfactual regret per action.
    regrets: FxHashMap<InfoKey, Vec<f64>>,
    /// Current strategy, refreshed by [`StrategyStore::update_policy`].
    policy: FxHashMap<InfoKey, Vec<f64>>,
    /// Iteration-weighted cumulative strategy.
    average_policy: FxHashMap<InfoKey, Vec<f64>>,
}

/// Which table a probability read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// The current (regret-matched) strategy, used while training.
    Current,
    /// The iteration-weighted average strategy, used for evaluation.
    Average,
}

impl StrategyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Action probabilities at `key`, masked to `legal` indices and
    /// renormalized.
    ///
    /// An unseen key is seeded with the uniform distribution first; when the
    /// legal subset carries no mass the read falls back to uniform over the
    /// legal actions.
    pub fn action_probs(
        &mut self,
        kind: PolicyKind,
        key: InfoKey,
        legal: &[usize],
        num_actions: usize,
    ) -> Vec<f64> {
        let table = match kind {
            PolicyKind::Current => &mut self.policy,
            PolicyKind::Average => &mut self.average_policy,
        };
        let stored = table
            .entry(key)
            .or_insert_with(|| vec![1.0 / num_actions as f64; num_actions]);

        let mut masked = vec![0.0; stored.len()];
        for &i in legal {
            masked[i] = stored[i];
        }
        let mass: f64 = masked.iter().sum();
        if mass == 0.0 {
            let uniform = 1.0 / legal.len() as f64;
            for &i in legal {
                masked[i] = uniform;
            }
        } else {
            for p in masked.iter_mut() {
                *p /= mass;
            }
        }
        masked
    }

    /// Accumulate counterfactual regret for one action.
    pub fn add_regret(&mut self, key: InfoKey, num_actions: usize, action: usize, delta: f64) {
        let entry = self
            .regrets
            .entry(key)
            .or_insert_with(|| vec![0.0; num_actions]);
        entry[action] += delta;
    }

    /// Accumulate iteration-weighted average-policy mass for one action.
    pub fn add_average(&mut self, key: InfoKey, num_actions: usize, action: usize, delta: f64) {
        let entry = self
            .average_policy
            .entry(key)
            .or_insert_with(|| vec![0.0; num_actions]);
        entry[action] += delta;
    }

    /// Regret-matching pass: refresh the current policy for every visited
    /// key from its accumulated regrets. Positive regrets share their sum;
    /// with no positive regret the policy reverts to uniform.
    pub fn update_policy(&mut self) {
        for (key, regret) in &self.regrets {
            let positive_sum: f64 = regret.iter().map(|r| r.max(0.0)).sum();
            let probs = if positive_sum > 0.0 {
                regret.iter().map(|r| r.max(0.0) / positive_sum).collect()
            } else {
                vec![1.0 / regret.len() as f64; regret.len()]
            };
            self.policy.insert(*key, probs);
        }
    }

    /// Number of information states with accumulated regret.
    pub fn num_info_states(&self) -> usize {
        self.regrets.len()
    }

    /// Read access to the regrets of one key.
    pub fn regrets(&self, key: &InfoKey) -> Option<&[f64]> {
        self.regrets.get(key).map(Vec::as_slice)
    }

    /// Drop all accumulated state.
    pub fn clear(&mut self) {
        self.regrets.clear();
        self.policy.clear();
        self.average_policy.clear();
    }

    /// Export the tables into a serializable snapshot (keys in their token
    /// string form).
    pub fn export(&self) -> StoreSnapshot {
        let stringify = |table: &FxHashMap<InfoKey, Vec<f64>>| {
            table
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect()
        };
        StoreSnapshot {
            regrets: stringify(&self.regrets),
            policy: stringify(&self.policy),
            average_policy: stringify(&self.average_policy),
        }
    }

    /// Replace the tables from a snapshot. Keys that fail to parse are
    /// silently dropped; snapshots produced by [`StrategyStore::export`]
    /// always parse.
    pub fn import(&mut self, snapshot: StoreSnapshot) {
        let keyed = |table: FxHashMap<String, Vec<f64>>| {
            table
                .into_iter()
                .filter_map(|(k, v)| InfoKey::parse(&k).map(|key| (key, v)))
                .collect()
        };
        self.regrets = keyed(snapshot.regrets);
        self.policy = keyed(snapshot.policy);
        self.average_policy = keyed(snapshot.average_policy);
    }
}

/// Serializable form of the three tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Cumulative regrets.
    pub regrets: FxHashMap<String, Vec<f64>>,
    /// Current strategy.
    pub policy: FxHashMap<String, Vec<f64>>,
    /// Iteration-weighted cumulative strategy.
    pub average_policy: FxHashMap<String, Vec<f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> InfoKey {
        InfoKey::parse(s).unwrap()
    }

    #[test]
    fn unseen_key_reads_uniform_over_legal() {
        let mut store = StrategyStore::new();
        let probs = store.action_probs(PolicyKind::Current, key("AsKc"), &[0, 2, 6], 7);
        assert_eq!(probs.len(), 7);
        assert!((probs[0] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(probs[1], 0.0);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn masked_probs_renormalize() {
        let mut store = StrategyStore::new();
        store.add_regret(key("AsKc"), 4, 0, 3.0);
        store.add_regret(key("AsKc"), 4, 1, 1.0);
        store.update_policy();

        // Action 1 is masked out: the remaining mass rescales.
        let probs = store.action_probs(PolicyKind::Current, key("AsKc"), &[0, 2], 4);
        assert!((probs[0] - 1.0).abs() < 1e-12);
        assert_eq!(probs[1], 0.0);
        assert_eq!(probs[2], 0.0);
    }

    #[test]
    fn regret_matching_shares_positive_regret() {
        let mut store = StrategyStore::new();
        store.add_regret(key("AsKc"), 3, 0, 6.0);
        store.add_regret(key("AsKc"), 3, 1, -5.0);
        store.add_regret(key("AsKc"), 3, 2, 2.0);
        store.update_policy();

        let probs = store.action_probs(PolicyKind::Current, key("AsKc"), &[0, 1, 2], 3);
        assert!((probs[0] - 0.75).abs() < 1e-12);
        assert_eq!(probs[1], 0.0);
        assert!((probs[2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn all_negative_regret_reverts_to_uniform() {
        let mut store = StrategyStore::new();
        store.add_regret(key("AsKc"), 2, 0, -1.0);
        store.add_regret(key("AsKc"), 2, 1, -2.0);
        store.update_policy();

        let probs = store.action_probs(PolicyKind::Current, key("AsKc"), &[0, 1], 2);
        assert_eq!(probs, vec![0.5, 0.5]);
    }

    #[test]
    fn average_policy_reads_are_independent_of_regrets() {
        let mut store = StrategyStore::new();
        store.add_regret(key("AsKc"), 2, 0, 10.0);
        store.add_average(key("AsKc"), 2, 1, 4.0);
        store.update_policy();

        let probs = store.action_probs(PolicyKind::Average, key("AsKc"), &[0, 1], 2);
        assert_eq!(probs, vec![0.0, 1.0]);
    }

    #[test]
    fn snapshot_roundtrip_preserves_tables() {
        let mut store = StrategyStore::new();
        store.add_regret(key("AsKc"), 3, 0, 2.5);
        store.add_regret(key("As2cJc7d2d"), 7, 4, -1.0);
        store.add_average(key("AsKc"), 3, 1, 0.5);
        store.update_policy();

        let json = serde_json::to_string(&store.export()).unwrap();
        let snapshot: StoreSnapshot = serde_json::from_str(&json).unwrap();

        let mut restored = StrategyStore::new();
        restored.import(snapshot);
        assert_eq!(restored.num_info_states(), 2);
        assert_eq!(restored.regrets(&key("AsKc")), Some(&[2.5, 0.0, 0.0][..]));
        let probs = restored.action_probs(PolicyKind::Current, key("AsKc"), &[0, 1, 2], 3);
        assert_eq!(probs, vec![1.0, 0.0, 0.0]);
    }
}
