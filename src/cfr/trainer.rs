//! Full-width CFR self-play trainer.
//!
//! Every iteration traverses the complete (abstracted) game tree once per
//! player, treating that player as the regret-updating traverser, then runs
//! one global regret-matching pass. The traversal is plain recursion over
//! the engine's reversible stepping: advance, recurse, step back. Nothing is
//! sampled; runtime is exponential in the per-street branching factor, which
//! is why the post-flop action abstraction is load-bearing.
//!
//! The identical update rule is applied unchanged for more than two players.
//! CFR's convergence guarantee covers only the two-player zero-sum case;
//! multi-way training is an inherited limitation of this design, not a bug.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::cfr::storage::{PolicyKind, StoreSnapshot, StrategyStore};
use crate::game::abstraction::{abstract_legal_actions, AbstractAction, ABSTRACT_ACTIONS};
use crate::game::action::Action;
use crate::game::engine::{GameEngine, GameError};
use crate::game::state::PublicState;

/// The CFR self-play trainer. Owns the game it trains on.
pub struct CfrTrainer {
    game: GameEngine,
    store: StrategyStore,
    /// Fixed raw action space, indexing pre-flop regret vectors.
    action_space: Vec<Action>,
    /// Completed iterations; also the linear averaging weight.
    iterations: u64,
    stats: TrainerStats,
    /// RNG for sampling actions in [`CfrTrainer::step`].
    rng: StdRng,
}

/// Bookkeeping for a training run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainerStats {
    /// Completed iterations.
    pub iterations: u64,
    /// Information states discovered so far.
    pub info_states: usize,
    /// Wall-clock seconds spent in [`CfrTrainer::train`].
    pub elapsed_seconds: f64,
}

/// Serializable trainer state: the three tables plus the iteration counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerSnapshot {
    /// Completed iterations at snapshot time.
    pub iterations: u64,
    /// The exported tables.
    pub store: StoreSnapshot,
}

/// Indices into whichever action space is in effect at a node.
struct EncodedActions {
    legal: Vec<usize>,
    num_actions: usize,
    abstracted: bool,
}

impl CfrTrainer {
    /// Create a trainer around an engine. The engine must have been built
    /// with step-back enabled; training needs reversible traversal.
    pub fn new(game: GameEngine) -> Self {
        assert!(
            game.config().allow_step_back,
            "CFR training requires an engine with step back enabled"
        );
        let rng = match game.config().seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ 0x5eed),
            None => StdRng::from_entropy(),
        };
        let action_space = game.action_space();
        Self {
            game,
            store: StrategyStore::new(),
            action_space,
            iterations: 0,
            stats: TrainerStats::default(),
            rng,
        }
    }

    /// Run one complete CFR iteration: a full-width traversal per player,
    /// then the deferred regret-matching policy refresh.
    pub fn train_iteration(&mut self) -> Result<(), GameError> {
        self.iterations += 1;
        for player in 0..self.game.num_players() {
            self.game.init_game(None)?;
            let reach = vec![1.0; self.game.num_players()];
            self.traverse(&reach, player)?;
        }
        self.store.update_policy();
        debug!(
            "iteration {} complete, {} info states",
            self.iterations,
            self.store.num_info_states()
        );
        Ok(())
    }

    /// Train for a number of iterations.
    pub fn train(&mut self, iterations: u64) -> Result<&TrainerStats, GameError> {
        info!("training {} CFR iterations", iterations);
        let start = Instant::now();
        for _ in 0..iterations {
            self.train_iteration()?;
        }
        self.stats.iterations = self.iterations;
        self.stats.info_states = self.store.num_info_states();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        info!(
            "trained {} iterations over {} info states in {:.2}s",
            self.stats.iterations, self.stats.info_states, self.stats.elapsed_seconds
        );
        Ok(&self.stats)
    }

    /// Train with a progress bar on stderr.
    pub fn train_with_progress(&mut self, iterations: u64) -> Result<&TrainerStats, GameError> {
        let bar = ProgressBar::new(iterations);
        bar.set_style(
            ProgressStyle::with_template(
                "{bar:40} {pos}/{len} iterations ({per_sec}, eta {eta})",
            )
            .expect("progress template is static"),
        );
        let start = Instant::now();
        for _ in 0..iterations {
            self.train_iteration()?;
            bar.inc(1);
        }
        bar.finish();
        self.stats.iterations = self.iterations;
        self.stats.info_states = self.store.num_info_states();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        Ok(&self.stats)
    }

    /// Recursive full-width traversal. Returns the expected utility vector
    /// of the current node under the current strategy profile.
    fn traverse(&mut self, reach: &[f64], traverser: usize) -> Result<Vec<f64>, GameError> {
        if self.game.is_over() {
            return Ok(self.game.get_payoffs());
        }

        let current = self.game.get_player_id();
        let state = self.game.get_state();
        let key = state.info_key();
        let encoded = self.encode_actions(&state);
        let probs = self.store.action_probs(
            PolicyKind::Current,
            key,
            &encoded.legal,
            encoded.num_actions,
        );

        let num_players = self.game.num_players();
        let mut node_utility = vec![0.0; num_players];
        let mut child_utilities: Vec<(usize, Vec<f64>)> =
            Vec::with_capacity(encoded.legal.len());

        for &index in &encoded.legal {
            let action_prob = probs[index];
            let raw = Self::decode_action(&self.action_space, &encoded, index, &state);

            let mut child_reach = reach.to_vec();
            child_reach[current] *= action_prob;

            self.game.step(raw)?;
            let child_utility = self.traverse(&child_reach, traverser)?;
            self.game.step_back()?;

            for (total, value) in node_utility.iter_mut().zip(child_utility.iter()) {
                *total += action_prob * value;
            }
            child_utilities.push((index, child_utility));
        }

        if current != traverser {
            return Ok(node_utility);
        }

        // Counterfactual weight: the product of everyone else's reach.
        let own_reach = reach[current];
        let counterfactual: f64 = reach
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != current)
            .map(|(_, p)| p)
            .product();

        for (index, child_utility) in child_utilities {
            let regret = counterfactual * (child_utility[current] - node_utility[current]);
            self.store
                .add_regret(key, encoded.num_actions, index, regret);
            self.store.add_average(
                key,
                encoded.num_actions,
                index,
                self.iterations as f64 * own_reach * probs[index],
            );
        }
        Ok(node_utility)
    }

    /// Index the state's legal actions into the space in effect: the 7
    /// abstract symbols post-flop, the raw ladder pre-flop.
    fn encode_actions(&self, state: &PublicState) -> EncodedActions {
        if state.needs_action_abstraction() {
            EncodedActions {
                legal: abstract_legal_actions(state)
                    .iter()
                    .map(|a| a.index())
                    .collect(),
                num_actions: ABSTRACT_ACTIONS.len(),
                abstracted: true,
            }
        } else {
            EncodedActions {
                legal: state
                    .legal_actions
                    .iter()
                    .map(|action| {
                        self.action_space
                            .iter()
                            .position(|a| a == action)
                            .expect("legal action missing from the raw action space")
                    })
                    .collect(),
                num_actions: self.action_space.len(),
                abstracted: false,
            }
        }
    }

    /// Map an encoded action index back to a raw action for the engine.
    fn decode_action(
        action_space: &[Action],
        encoded: &EncodedActions,
        index: usize,
        state: &PublicState,
    ) -> Action {
        if encoded.abstracted {
            AbstractAction::from_index(index)
                .expect("encoded index is within the abstract space")
                .translate(state)
        } else {
            action_space[index]
        }
    }

    /// Agent contract: sample an action from the current policy.
    pub fn step(&mut self, state: &PublicState) -> Action {
        let key = state.info_key();
        let encoded = self.encode_actions(state);
        let probs = self.store.action_probs(
            PolicyKind::Current,
            key,
            &encoded.legal,
            encoded.num_actions,
        );

        let mut draw: f64 = self.rng.gen();
        let mut choice = *encoded.legal.last().expect("legal set is never empty");
        for &index in &encoded.legal {
            draw -= probs[index];
            if draw < 0.0 {
                choice = index;
                break;
            }
        }
        Self::decode_action(&self.action_space, &encoded, choice, state)
    }

    /// Agent contract: pick the argmax action of the average policy.
    pub fn eval_step(&mut self, state: &PublicState) -> Action {
        let key = state.info_key();
        let encoded = self.encode_actions(state);
        let probs = self.store.action_probs(
            PolicyKind::Average,
            key,
            &encoded.legal,
            encoded.num_actions,
        );

        // Argmax over the masked vector; renormalization guarantees the
        // first maximum sits on a legal index.
        let mut choice = 0;
        for (index, &p) in probs.iter().enumerate() {
            if p > probs[choice] {
                choice = index;
            }
        }
        Self::decode_action(&self.action_space, &encoded, choice, state)
    }

    /// Estimate the exploitability of the average policy: the mean
    /// best-response value across fresh deals and exploiter seats. Converges
    /// toward zero as the average policy approaches equilibrium (two-player
    /// zero-sum).
    pub fn exploitability(&mut self, num_deals: usize) -> Result<f64, GameError> {
        let num_players = self.game.num_players();
        let mut total = 0.0;
        for _ in 0..num_deals {
            for exploiter in 0..num_players {
                self.game.init_game(None)?;
                total += self.best_response_value(exploiter)?;
            }
        }
        Ok(total / (num_deals * num_players) as f64)
    }

    /// Value the exploiter extracts by playing best response while everyone
    /// else follows the average policy.
    fn best_response_value(&mut self, exploiter: usize) -> Result<f64, GameError> {
        if self.game.is_over() {
            return Ok(self.game.get_payoffs()[exploiter]);
        }

        let current = self.game.get_player_id();
        let state = self.game.get_state();
        let encoded = self.encode_actions(&state);

        if current == exploiter {
            let mut best = f64::NEG_INFINITY;
            for &index in &encoded.legal {
                let raw = Self::decode_action(&self.action_space, &encoded, index, &state);
                self.game.step(raw)?;
                let value = self.best_response_value(exploiter)?;
                self.game.step_back()?;
                best = best.max(value);
            }
            Ok(best)
        } else {
            let key = state.info_key();
            let probs = self.store.action_probs(
                PolicyKind::Average,
                key,
                &encoded.legal,
                encoded.num_actions,
            );
            let mut expected = 0.0;
            for &index in &encoded.legal {
                let raw = Self::decode_action(&self.action_space, &encoded, index, &state);
                self.game.step(raw)?;
                expected += probs[index] * self.best_response_value(exploiter)?;
                self.game.step_back()?;
            }
            Ok(expected)
        }
    }

    /// Export the tables and iteration counter.
    pub fn snapshot(&self) -> TrainerSnapshot {
        TrainerSnapshot {
            iterations: self.iterations,
            store: self.store.export(),
        }
    }

    /// Restore the tables and iteration counter from a snapshot.
    pub fn restore(&mut self, snapshot: TrainerSnapshot) {
        self.iterations = snapshot.iterations;
        self.store.import(snapshot.store);
    }

    /// Completed iterations.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Stats from the last [`CfrTrainer::train`] call.
    pub fn stats(&self) -> &TrainerStats {
        &self.stats
    }

    /// Read access to the tables.
    pub fn store(&self) -> &StrategyStore {
        &self.store
    }

    /// The raw action space the trainer indexes pre-flop vectors by.
    pub fn action_space(&self) -> &[Action] {
        &self.action_space
    }

    /// Read access to the owned game.
    pub fn game(&self) -> &GameEngine {
        &self.game
    }

    /// Mutable access to the owned game (reseeding for reproducible
    /// evaluation, inspecting a hand, ...).
    pub fn game_mut(&mut self) -> &mut GameEngine {
        &mut self.game
    }

    /// Current-policy probabilities for a state, masked to its legal set.
    pub fn action_probs(&mut self, state: &PublicState) -> Vec<f64> {
        let key = state.info_key();
        let encoded = self.encode_actions(state);
        self.store.action_probs(
            PolicyKind::Current,
            key,
            &encoded.legal,
            encoded.num_actions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::engine::GameConfig;

    fn tiny_trainer(seed: u64) -> CfrTrainer {
        // Reduced stacks keep the raw pre-flop ladder small enough for
        // full-width traversal in tests.
        let game = GameEngine::new(
            GameConfig::default()
                .with_players(2)
                .with_stacks(6)
                .with_seed(seed)
                .with_step_back(),
        );
        CfrTrainer::new(game)
    }

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    #[should_panic(expected = "step back enabled")]
    fn trainer_rejects_irreversible_engine() {
        let game = GameEngine::new(GameConfig::default());
        CfrTrainer::new(game);
    }

    #[test]
    fn one_iteration_populates_tables() {
        init_logger();
        let mut trainer = tiny_trainer(42);
        trainer.train_iteration().unwrap();
        assert_eq!(trainer.iterations(), 1);
        assert!(trainer.store().num_info_states() > 0);
    }

    #[test]
    fn training_is_deterministic_for_a_fixed_seed() {
        let mut a = tiny_trainer(7);
        let mut b = tiny_trainer(7);
        a.train(3).unwrap();
        b.train(3).unwrap();

        let snap_a = serde_json::to_value(a.snapshot()).unwrap();
        let snap_b = serde_json::to_value(b.snapshot()).unwrap();
        assert_eq!(snap_a, snap_b);
    }

    #[test]
    fn policies_are_distributions_over_legal_actions() {
        let mut trainer = tiny_trainer(13);
        trainer.train(2).unwrap();

        trainer.game_mut().init_game(None).unwrap();
        let state = trainer.game().get_state();
        let probs = trainer.action_probs(&state);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "probs {:?} sum to {}", probs, sum);
        assert!(probs.iter().all(|p| (0.0..=1.0 + 1e-12).contains(p)));
    }

    #[test]
    fn agent_contract_returns_legal_actions() {
        let mut trainer = tiny_trainer(21);
        trainer.train(2).unwrap();

        trainer.game_mut().init_game(None).unwrap();
        let mut state = trainer.game().get_state();
        // Walk a few decisions with both entry points.
        for ply in 0..6 {
            if trainer.game().is_over() {
                break;
            }
            let action = if ply % 2 == 0 {
                trainer.step(&state)
            } else {
                trainer.eval_step(&state)
            };
            assert!(
                state.legal_actions.contains(&action),
                "{} not legal in {:?}",
                action,
                state.legal_actions
            );
            let (next, _) = trainer.game_mut().step(action).unwrap();
            match next {
                Some(s) => state = s,
                None => break,
            }
        }
    }

    #[test]
    fn exploitability_is_non_increasing_across_checkpoints() {
        init_logger();
        let mut trainer = tiny_trainer(5);
        let deals = 8;

        trainer.train(1).unwrap();
        trainer.game_mut().reseed(1000);
        let early = trainer.exploitability(deals).unwrap();

        trainer.train(20).unwrap();
        trainer.game_mut().reseed(1000);
        let late = trainer.exploitability(deals).unwrap();

        assert!(
            late <= early + 1e-9,
            "exploitability rose from {} to {}",
            early,
            late
        );
    }

    #[test]
    fn snapshot_restore_resumes_training() {
        let mut trainer = tiny_trainer(31);
        trainer.train(2).unwrap();
        let snapshot = trainer.snapshot();

        let mut resumed = tiny_trainer(31);
        resumed.restore(snapshot);
        assert_eq!(resumed.iterations(), 2);
        assert_eq!(
            resumed.store().num_info_states(),
            trainer.store().num_info_states()
        );
        resumed.train_iteration().unwrap();
        assert_eq!(resumed.iterations(), 3);
    }
}
