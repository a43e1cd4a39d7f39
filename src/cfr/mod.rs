//! Counterfactual Regret Minimization over the hold'em engine.
//!
//! Full-width (non-sampled) CFR: every iteration expands every legal or
//! abstracted action at every node once per traversing player, accumulates
//! counterfactual regrets, and derives the current strategy from them with
//! one deferred regret-matching pass. The iteration-weighted average
//! strategy is the trained artifact.
//!
//! - [`storage`]: the regret / policy / average-policy tables
//! - [`trainer`]: the recursive self-play trainer and agent entry points

pub mod storage;
pub mod trainer;

pub use storage::{PolicyKind, StoreSnapshot, StrategyStore};
pub use trainer::{CfrTrainer, TrainerSnapshot, TrainerStats};
