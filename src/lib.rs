//! # holdem-cfr
//!
//! An exact No-Limit Texas Hold'em rules engine paired with a full-width
//! Counterfactual Regret Minimization (CFR) self-play trainer.
//!
//! ## What's inside
//!
//! - **Rules engine**: the betting state machine with exact legal-action
//!   enumeration, a 7-card hand evaluator with bit-exact tie-breaking,
//!   multi-way side-pot settlement, and reversible stepping for tree search.
//! - **Trainer**: recursive self-play CFR with deferred regret matching, a
//!   suit-isomorphic information-state key, and a 7-symbol action
//!   abstraction bounding the post-flop raise ladder.
//!
//! ## Quick start
//!
//! ```ignore
//! use holdem_cfr::{CfrTrainer, GameConfig, GameEngine};
//!
//! let game = GameEngine::new(
//!     GameConfig::default().with_stacks(50).with_seed(42).with_step_back(),
//! );
//! let mut trainer = CfrTrainer::new(game);
//! trainer.train(1_000)?;
//!
//! // Play the trained average policy.
//! let (state, _) = trainer.game_mut().init_game(None)?;
//! let action = trainer.eval_step(&state);
//! ```
//!
//! ## Modules
//!
//! - [`game`]: cards, evaluation, betting, settlement, and the engine
//! - [`cfr`]: regret tables and the self-play trainer

#![warn(missing_docs)]

pub mod cfr;
pub mod game;

pub use cfr::{CfrTrainer, StrategyStore, TrainerSnapshot, TrainerStats};
pub use game::abstraction::AbstractAction;
pub use game::action::Action;
pub use game::card::{Card, Deck};
pub use game::engine::{GameConfig, GameEngine, GameError, LogEntry, StackConfig};
pub use game::hand::{Hand, HandCategory};
pub use game::state::{InfoKey, PublicState};
