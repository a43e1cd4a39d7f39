//! Hand orchestration: blinds, dealing, street progression, reversible
//! stepping, and terminal settlement.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::Action;
use super::card::{Card, Deck};
use super::player::{Player, PlayerStatus};
use super::round::BettingRound;
use super::settlement::settle;
use super::state::PublicState;

/// Starting stacks: one size for every seat, or one per seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackConfig {
    /// Every seat starts with the same stack.
    Uniform(u32),
    /// Individual stack per seat; length must equal the player count.
    PerPlayer(Vec<u32>),
}

impl StackConfig {
    /// Largest starting stack across seats.
    pub fn max_stack(&self) -> u32 {
        match self {
            StackConfig::Uniform(chips) => *chips,
            StackConfig::PerPlayer(chips) => chips.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Table configuration for a hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Record undo deltas so [`GameEngine::step_back`] works.
    pub allow_step_back: bool,
    /// Number of seats (at least 2).
    pub num_players: usize,
    /// Forced bet posted by the seat after the button.
    pub small_blind: u32,
    /// Forced bet posted two seats after the button; also the initial
    /// minimum raise increment.
    pub big_blind: u32,
    /// Starting stacks.
    pub init_chips: StackConfig,
    /// RNG seed for shuffling and button placement; `None` for entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            allow_step_back: false,
            num_players: 2,
            small_blind: 1,
            big_blind: 2,
            init_chips: StackConfig::Uniform(100),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Builder method: enable reversible stepping.
    pub fn with_step_back(mut self) -> Self {
        self.allow_step_back = true;
        self
    }

    /// Builder method: set the number of seats.
    pub fn with_players(mut self, num_players: usize) -> Self {
        self.num_players = num_players;
        self
    }

    /// Builder method: set a uniform starting stack.
    pub fn with_stacks(mut self, chips: u32) -> Self {
        self.init_chips = StackConfig::Uniform(chips);
        self
    }

    /// Builder method: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Fewer than two seats configured.
    NotEnoughPlayers(usize),
    /// Per-seat chip list does not match the player count.
    ChipListMismatch {
        /// Configured number of seats.
        players: usize,
        /// Length of the chip list.
        chips: usize,
    },
    /// A starting stack cannot cover the big blind.
    ShortStack {
        /// Offending seat.
        seat: usize,
        /// Its starting stack.
        chips: u32,
    },
    /// Requested button seat does not exist.
    ButtonOutOfRange {
        /// Requested button.
        button: usize,
        /// Configured number of seats.
        players: usize,
    },
    /// The submitted action is not in the current legal set.
    IllegalAction(Action),
    /// `step_back` called on an engine built without reversibility.
    StepBackDisabled,
    /// `step_back` called with no recorded history.
    NoHistory,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotEnoughPlayers(n) => {
                write!(f, "a hand needs at least 2 players, got {}", n)
            }
            GameError::ChipListMismatch { players, chips } => {
                write!(f, "chip list has {} entries for {} players", chips, players)
            }
            GameError::ShortStack { seat, chips } => {
                write!(f, "seat {} stack {} cannot cover the big blind", seat, chips)
            }
            GameError::ButtonOutOfRange { button, players } => {
                write!(f, "button {} out of range for {} players", button, players)
            }
            GameError::IllegalAction(action) => {
                write!(f, "action '{}' is not legal here", action)
            }
            GameError::StepBackDisabled => {
                write!(f, "step back requested but reversibility is disabled")
            }
            GameError::NoHistory => write!(f, "no history to step back to"),
        }
    }
}

impl std::error::Error for GameError {}

/// One entry of the append-only audit log: a chance deal or a player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Hole cards dealt to a seat.
    DealHole {
        /// Receiving seat.
        seat: usize,
        /// The two hole cards.
        cards: [Card; 2],
    },
    /// Public cards dealt at a street boundary.
    DealPublic {
        /// The cards added to the board.
        cards: Vec<Card>,
    },
    /// A player's betting action.
    Action {
        /// Acting seat.
        seat: usize,
        /// The action taken.
        action: Action,
    },
}

/// Delta recorded before each step; popping one restores the engine
/// byte-for-byte. Only the betting round struct, the acting seat's chips and
/// status, and the counts of appended cards/log entries ever change in a
/// step, so that is all that is stored.
#[derive(Debug, Clone)]
struct UndoRecord {
    round: BettingRound,
    game_pointer: usize,
    round_counter: u8,
    seat: usize,
    in_chips: u32,
    status: PlayerStatus,
    public_dealt: u8,
    log_len: usize,
}

/// The No-Limit Texas Hold'em engine.
///
/// Drives four betting streets over a shuffled deck, produces the observable
/// state and legal actions at every decision point, and settles terminal
/// hands through [`settle`]. With `allow_step_back` enabled every `step`
/// records an [`UndoRecord`] so a traversal can backtrack.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    players: Vec<Player>,
    deck: Deck,
    round: BettingRound,
    /// Street counter: 0 pre-flop through 3 river; 4 means showdown.
    round_counter: u8,
    game_pointer: usize,
    button: usize,
    public_cards: Vec<Card>,
    game_tree: Vec<LogEntry>,
    history: Vec<UndoRecord>,
}

impl GameEngine {
    /// Create an engine; [`GameEngine::init_game`] must run before stepping.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let round = BettingRound::new(config.num_players.max(2), config.big_blind);
        Self {
            config,
            rng,
            players: Vec::new(),
            deck: Deck::new(),
            round,
            round_counter: 0,
            game_pointer: 0,
            button: 0,
            public_cards: Vec::new(),
            game_tree: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Start a fresh hand: validate the table, post blinds, deal hole cards,
    /// and open the pre-flop street.
    ///
    /// `button` places the dealer button, or a uniformly random seat when
    /// `None`. Returns the first decision state and the first actor.
    pub fn init_game(
        &mut self,
        button: Option<usize>,
    ) -> Result<(PublicState, usize), GameError> {
        let n = self.config.num_players;
        if n < 2 {
            return Err(GameError::NotEnoughPlayers(n));
        }
        self.players = match &self.config.init_chips {
            StackConfig::Uniform(chips) => {
                (0..n).map(|i| Player::new(i, *chips)).collect()
            }
            StackConfig::PerPlayer(chips) => {
                if chips.len() != n {
                    return Err(GameError::ChipListMismatch {
                        players: n,
                        chips: chips.len(),
                    });
                }
                chips
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| Player::new(i, c))
                    .collect()
            }
        };
        for player in &self.players {
            if player.init_chips < self.config.big_blind {
                return Err(GameError::ShortStack {
                    seat: player.id,
                    chips: player.init_chips,
                });
            }
        }
        if let Some(button) = button {
            if button >= n {
                return Err(GameError::ButtonOutOfRange { button, players: n });
            }
        }

        self.deck = Deck::new();
        self.deck.shuffle(&mut self.rng);
        self.round = BettingRound::new(n, self.config.big_blind);
        self.round_counter = 0;
        self.public_cards.clear();
        self.game_tree.clear();
        self.history.clear();

        self.button = button.unwrap_or_else(|| self.rng.gen_range(0..n));
        let sb = (self.button + 1) % n;
        let bb = (sb + 1) % n;
        self.players[sb].in_chips = self.config.small_blind;
        self.players[bb].in_chips = self.config.big_blind;

        // Deal two hole cards round-robin, starting left of the button.
        for i in 0..2 * n {
            let seat = (self.button + 1 + i) % n;
            let card = self.deck.deal();
            self.players[seat].hole_cards.push(card);
        }
        for i in 1..=n {
            let seat = (self.button + i) % n;
            self.game_tree.push(LogEntry::DealHole {
                seat,
                cards: [
                    self.players[seat].hole_cards[0],
                    self.players[seat].hole_cards[1],
                ],
            });
        }

        // First to act pre-flop is the seat after the big blind.
        self.game_pointer = (bb + 1) % n;
        let posted = self.players.iter().map(|p| p.in_chips).collect();
        self.round.start_new_round(self.game_pointer, Some(posted));

        debug!(
            "new hand: button {}, blinds {}/{}",
            self.button, self.config.small_blind, self.config.big_blind
        );
        Ok((self.get_state(), self.game_pointer))
    }

    /// Apply one action for the current actor.
    ///
    /// Actions outside the current legal set are rejected. When the street
    /// completes, the next public cards are dealt and a new round starts at
    /// the first alive seat after the button. When nobody can act anymore
    /// (every remaining seat all-in) the board is dealt out and `None` is
    /// returned in place of a decision state.
    pub fn step(
        &mut self,
        action: Action,
    ) -> Result<(Option<PublicState>, usize), GameError> {
        if !self.round.get_legal_actions(&self.players).contains(&action) {
            return Err(GameError::IllegalAction(action));
        }

        let seat = self.round.game_pointer();
        if self.config.allow_step_back {
            self.history.push(UndoRecord {
                round: self.round.clone(),
                game_pointer: self.game_pointer,
                round_counter: self.round_counter,
                seat,
                in_chips: self.players[seat].in_chips,
                status: self.players[seat].status,
                public_dealt: 0,
                log_len: self.game_tree.len(),
            });
        }

        self.game_tree.push(LogEntry::Action { seat, action });
        if let Some(next) = self.round.proceed_round(&mut self.players, action) {
            self.game_pointer = next;
        }

        let mut dealt = 0u8;
        let result = if self.round.is_over() {
            let outcome = self.advance_street(&mut dealt);
            match outcome {
                StreetOutcome::Decision => (Some(self.get_state()), self.game_pointer),
                StreetOutcome::NoActor => (None, self.game_pointer),
            }
        } else {
            (Some(self.get_state()), self.game_pointer)
        };

        if self.config.allow_step_back {
            self.history
                .last_mut()
                .expect("record pushed above")
                .public_dealt = dealt;
        }
        Ok(result)
    }

    /// Deal the next street's cards and find its first actor.
    fn advance_street(&mut self, dealt: &mut u8) -> StreetOutcome {
        let n = self.config.num_players;

        if self.round_counter == 0 {
            let flop: Vec<Card> = (0..3).map(|_| self.deck.deal()).collect();
            self.public_cards.extend_from_slice(&flop);
            self.game_tree.push(LogEntry::DealPublic { cards: flop });
            *dealt = 3;
        } else if self.round_counter <= 2 {
            let card = self.deck.deal();
            self.public_cards.push(card);
            self.game_tree.push(LogEntry::DealPublic { cards: vec![card] });
            *dealt = 1;
        }
        self.round_counter += 1;
        debug!(
            "street {} begins, board {:?}",
            self.round_counter, self.public_cards
        );

        // The first seat after the button that can still act opens the
        // street.
        self.game_pointer = (self.button + 1) % n;
        let mut probed = 1;
        while self.players[self.game_pointer].status != PlayerStatus::Alive {
            probed += 1;
            self.game_pointer = (self.game_pointer + 1) % n;
            if probed == n {
                // Nobody can act: run the board out to showdown unless the
                // hand already ended.
                if !self.is_over() {
                    self.round_counter = 4;
                    let mut run_out = Vec::new();
                    while self.public_cards.len() < 5 {
                        let card = self.deck.deal();
                        self.public_cards.push(card);
                        run_out.push(card);
                    }
                    *dealt += run_out.len() as u8;
                    self.game_tree.push(LogEntry::DealPublic { cards: run_out });
                }
                return StreetOutcome::NoActor;
            }
        }
        self.round.start_new_round(self.game_pointer, None);
        StreetOutcome::Decision
    }

    /// Undo the most recent step, restoring the exact prior state.
    ///
    /// Fails recoverably when reversibility is disabled or no step has been
    /// recorded; both are caller errors the caller may treat as a no-op.
    pub fn step_back(&mut self) -> Result<(PublicState, usize), GameError> {
        if !self.config.allow_step_back {
            return Err(GameError::StepBackDisabled);
        }
        let record = self.history.pop().ok_or(GameError::NoHistory)?;

        for _ in 0..record.public_dealt {
            let card = self
                .public_cards
                .pop()
                .expect("undo record counted dealt cards");
            self.deck.put_back(card);
        }
        let player = &mut self.players[record.seat];
        player.in_chips = record.in_chips;
        player.status = record.status;
        self.round = record.round;
        self.game_pointer = record.game_pointer;
        self.round_counter = record.round_counter;
        self.game_tree.truncate(record.log_len);

        Ok((self.get_state(), self.game_pointer))
    }

    /// True once only one seat remains unfolded or all four streets are
    /// complete.
    pub fn is_over(&self) -> bool {
        let unfolded = self
            .players
            .iter()
            .filter(|p| p.status != PlayerStatus::Folded)
            .count();
        unfolded == 1 || self.round_counter >= 4
    }

    /// Observable state for the current actor.
    pub fn get_state(&self) -> PublicState {
        let seat = self.round.game_pointer();
        PublicState {
            player_id: seat,
            pot: self.players.iter().map(|p| p.in_chips).collect(),
            hand_cards: self.players[seat].hole_cards.clone(),
            public_cards: self.public_cards.clone(),
            legal_actions: self.round.get_legal_actions(&self.players),
        }
    }

    /// Terminal payoffs, one per seat; folded seats contribute no hand.
    pub fn get_payoffs(&self) -> Vec<f64> {
        let hands: Vec<Option<Vec<Card>>> = self
            .players
            .iter()
            .map(|p| {
                if p.status == PlayerStatus::Folded {
                    None
                } else {
                    let mut cards = p.hole_cards.clone();
                    cards.extend_from_slice(&self.public_cards);
                    Some(cards)
                }
            })
            .collect();
        settle(&self.players, &hands)
    }

    /// Every raw action string the game can ever offer, for building
    /// fixed-size regret vectors: fold, check, call, the full raise ladder
    /// from the big blind up to (excluding) the largest stack, then all-in.
    pub fn action_space(&self) -> Vec<Action> {
        let mut space = vec![Action::Fold, Action::Check, Action::Call];
        let max_stack = self.config.init_chips.max_stack();
        space.extend((self.config.big_blind..max_stack).map(Action::Raise));
        space.push(Action::AllIn);
        space
    }

    /// Seat index of the current actor.
    pub fn get_player_id(&self) -> usize {
        self.game_pointer
    }

    /// Legal actions for the current actor.
    pub fn get_legal_actions(&self) -> Vec<Action> {
        self.round.get_legal_actions(&self.players)
    }

    /// Number of seats.
    pub fn num_players(&self) -> usize {
        self.config.num_players
    }

    /// The dealer button seat for the current hand.
    pub fn button(&self) -> usize {
        self.button
    }

    /// Current street counter (0 pre-flop through 4 showdown).
    pub fn round_counter(&self) -> u8 {
        self.round_counter
    }

    /// Seats as dealt this hand (read-only).
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Community cards dealt so far.
    pub fn public_cards(&self) -> &[Card] {
        &self.public_cards
    }

    /// The append-only audit log of deals and actions.
    pub fn game_tree(&self) -> &[LogEntry] {
        &self.game_tree
    }

    /// The table configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reseed the engine's RNG, for reproducible evaluation runs.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

enum StreetOutcome {
    /// A new round started and someone must act.
    Decision,
    /// Nobody can act again this hand.
    NoActor,
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameEngine {{ street: {}, button: {}, actor: {}, board: {:?} }}",
            self.round_counter, self.button, self.game_pointer, self.public_cards
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;

    fn engine(seed: u64) -> GameEngine {
        GameEngine::new(
            GameConfig::default()
                .with_players(3)
                .with_stacks(100)
                .with_seed(seed)
                .with_step_back(),
        )
    }

    /// Everything observable about the engine, for byte-exact undo checks.
    fn probe(engine: &GameEngine) -> (Vec<Player>, Vec<Card>, usize, u8, Vec<Action>, usize) {
        (
            engine.players().to_vec(),
            engine.public_cards().to_vec(),
            engine.get_player_id(),
            engine.round_counter(),
            engine.get_legal_actions(),
            engine.game_tree().len(),
        )
    }

    #[test]
    fn init_posts_blinds_and_deals() {
        let mut game = engine(1);
        let (state, actor) = game.init_game(Some(0)).unwrap();

        assert_eq!(game.button(), 0);
        assert_eq!(game.players()[1].in_chips, 1); // small blind
        assert_eq!(game.players()[2].in_chips, 2); // big blind
        assert_eq!(actor, 0); // seat after the big blind opens
        assert_eq!(state.player_id, 0);
        assert_eq!(state.hand_cards.len(), 2);
        assert!(state.public_cards.is_empty());
        for player in game.players() {
            assert_eq!(player.hole_cards.len(), 2);
        }
        // Audit log holds one hole-card deal per seat.
        let deals = game
            .game_tree()
            .iter()
            .filter(|e| matches!(e, LogEntry::DealHole { .. }))
            .count();
        assert_eq!(deals, 3);
    }

    #[test]
    fn config_validation() {
        let mut game = GameEngine::new(GameConfig::default().with_players(1));
        assert_eq!(game.init_game(None), Err(GameError::NotEnoughPlayers(1)));

        let mut game = GameEngine::new(GameConfig {
            num_players: 3,
            init_chips: StackConfig::PerPlayer(vec![100, 100]),
            ..GameConfig::default()
        });
        assert_eq!(
            game.init_game(None),
            Err(GameError::ChipListMismatch { players: 3, chips: 2 })
        );

        let mut game = GameEngine::new(GameConfig {
            init_chips: StackConfig::PerPlayer(vec![100, 1]),
            ..GameConfig::default()
        });
        assert_eq!(
            game.init_game(None),
            Err(GameError::ShortStack { seat: 1, chips: 1 })
        );

        let mut game = GameEngine::new(GameConfig::default());
        assert_eq!(
            game.init_game(Some(5)),
            Err(GameError::ButtonOutOfRange { button: 5, players: 2 })
        );
    }

    #[test]
    fn illegal_actions_are_rejected() {
        let mut game = engine(2);
        game.init_game(Some(0)).unwrap();

        // Facing the big blind, check is not available.
        assert_eq!(
            game.step(Action::Check),
            Err(GameError::IllegalAction(Action::Check))
        );
        // A raise below the minimum is never offered.
        assert_eq!(
            game.step(Action::Raise(1)),
            Err(GameError::IllegalAction(Action::Raise(1)))
        );
        // Rejection leaves no residue in history or the audit log.
        assert!(game.step_back().is_err());
    }

    #[test]
    fn streets_deal_three_one_one() {
        let mut game = engine(3);
        game.init_game(Some(0)).unwrap();

        // Everyone calls / checks through all four streets.
        let mut streets_seen = vec![game.public_cards().len()];
        while !game.is_over() {
            let legal = game.get_legal_actions();
            let action = if legal.contains(&Action::Check) {
                Action::Check
            } else {
                Action::Call
            };
            game.step(action).unwrap();
            let board = game.public_cards().len();
            if streets_seen.last() != Some(&board) {
                streets_seen.push(board);
            }
        }
        assert_eq!(streets_seen, vec![0, 3, 4, 5]);
        assert_eq!(game.round_counter(), 4);
    }

    #[test]
    fn postflop_first_actor_is_left_of_button() {
        let mut game = engine(4);
        game.init_game(Some(0)).unwrap();

        // Pre-flop: everyone calls, big blind checks.
        game.step(Action::Call).unwrap();
        game.step(Action::Call).unwrap();
        let (_, actor) = game.step(Action::Check).unwrap();
        // Flop open falls on the small blind (seat 1, left of button 0).
        assert_eq!(actor, 1);
        assert_eq!(game.public_cards().len(), 3);
    }

    #[test]
    fn fold_out_ends_the_hand_immediately() {
        let mut game = engine(5);
        game.init_game(Some(0)).unwrap();

        game.step(Action::Fold).unwrap();
        game.step(Action::Fold).unwrap();
        assert!(game.is_over());

        let payoffs = game.get_payoffs();
        // The big blind wins the small blind's chip without a showdown.
        assert_eq!(payoffs, vec![0.0, -1.0, 1.0]);
    }

    #[test]
    fn all_in_fast_forwards_to_showdown() {
        let mut game = engine(6);
        game.init_game(Some(0)).unwrap();

        game.step(Action::AllIn).unwrap();
        game.step(Action::Fold).unwrap();
        let (state, _) = game.step(Action::AllIn).unwrap();

        // No decision state: the board is run out and the hand is scored.
        assert!(state.is_none());
        assert!(game.is_over());
        assert_eq!(game.public_cards().len(), 5);
        assert_eq!(game.round_counter(), 4);
        let payoffs = game.get_payoffs();
        assert!((payoffs.iter().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn step_back_restores_state_exactly() {
        let mut game = engine(7);
        game.init_game(Some(0)).unwrap();

        let before = probe(&game);
        game.step(Action::Call).unwrap();
        game.step(Action::Raise(10)).unwrap();
        game.step_back().unwrap();
        game.step_back().unwrap();
        assert_eq!(probe(&game), before);
    }

    #[test]
    fn step_back_across_a_street_boundary_restores_the_deck() {
        let mut game = engine(8);
        game.init_game(Some(0)).unwrap();

        game.step(Action::Call).unwrap();
        game.step(Action::Call).unwrap();
        let before = probe(&game);

        // The big blind's check closes pre-flop and deals the flop.
        game.step(Action::Check).unwrap();
        assert_eq!(game.public_cards().len(), 3);

        game.step_back().unwrap();
        assert_eq!(probe(&game), before);

        // Replaying deals the identical flop.
        game.step(Action::Check).unwrap();
        let flop_a = game.public_cards().to_vec();
        game.step_back().unwrap();
        game.step(Action::Check).unwrap();
        assert_eq!(game.public_cards(), flop_a.as_slice());
    }

    #[test]
    fn step_back_failures_are_recoverable() {
        let mut game = GameEngine::new(GameConfig::default().with_seed(9));
        game.init_game(Some(0)).unwrap();
        assert_eq!(game.step_back().unwrap_err(), GameError::StepBackDisabled);

        let mut game = engine(9);
        game.init_game(Some(0)).unwrap();
        assert_eq!(game.step_back().unwrap_err(), GameError::NoHistory);

        // The engine still plays on after a failed step back.
        assert!(game.step(Action::Call).is_ok());
    }

    #[test]
    fn random_playouts_conserve_chips() {
        let mut game = engine(10);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..60 {
            game.init_game(None).unwrap();
            while !game.is_over() {
                let legal = game.get_legal_actions();
                let action = *legal.choose(&mut rng).unwrap();
                game.step(action).unwrap();
            }
            let payoffs = game.get_payoffs();
            let total: f64 = payoffs.iter().sum();
            assert!(total.abs() < 1e-9, "payoffs {:?} do not balance", payoffs);

            // Nobody ever pays more than their stack.
            for (payoff, player) in payoffs.iter().zip(game.players()) {
                assert!(*payoff >= -(player.init_chips as f64) - 1e-9);
            }
        }
    }

    #[test]
    fn action_space_covers_the_raise_ladder() {
        let game = GameEngine::new(GameConfig::default().with_stacks(10).with_seed(1));
        let space = game.action_space();
        assert_eq!(space[0], Action::Fold);
        assert_eq!(space[1], Action::Check);
        assert_eq!(space[2], Action::Call);
        assert_eq!(space[3], Action::Raise(2));
        assert_eq!(space[space.len() - 2], Action::Raise(9));
        assert_eq!(*space.last().unwrap(), Action::AllIn);
        assert_eq!(space.len(), 3 + 8 + 1);
    }

    #[test]
    fn audit_log_replays_the_hand() {
        let mut game = engine(11);
        game.init_game(Some(0)).unwrap();
        game.step(Action::Call).unwrap();
        game.step(Action::Fold).unwrap();
        game.step(Action::Check).unwrap();

        let actions: Vec<(usize, Action)> = game
            .game_tree()
            .iter()
            .filter_map(|e| match e {
                LogEntry::Action { seat, action } => Some((*seat, *action)),
                _ => None,
            })
            .collect();
        assert_eq!(
            actions,
            vec![(0, Action::Call), (1, Action::Fold), (2, Action::Check)]
        );
        // The flop deal follows the closing check.
        assert!(matches!(
            game.game_tree().last(),
            Some(LogEntry::DealPublic { cards }) if cards.len() == 3
        ));
    }
}
