//! Game state, lifecycle commands and the public snapshot.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use firedeck_shared::{
    Card, Direction, GamePhase, PendingAction, PlayerId, PlayerPublic, Rank, RoomStatePublic,
    DECK_SIZE,
};

/// Aces that end the game once all of them are out.
pub(crate) const ACES_TO_END: u8 = 4;

/// Draws of one rank that trigger the fire rule.
pub(crate) const FIRE_RULE_COUNT: u8 = 4;

/// Validation and invariant failures surfaced by engine commands.
///
/// Validation failures leave the state untouched and are safe to retry once
/// the stated condition is corrected. `InvariantViolation` means the internal
/// state is corrupt and must be logged loudly, never shown to end users.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is not active")]
    GameNotActive,
    #[error("not your turn")]
    NotYourTurn,
    #[error("resolve the pending action first")]
    PendingActionUnresolved,
    #[error("at least two players are needed to start")]
    NotEnoughPlayers,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result of a successful draw: the card plus the fire-rule penalty line, if
/// this draw was the fourth of its rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub card: Card,
    pub penalty: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) avatar: String,
    pub(crate) is_host: bool,
    pub(crate) connected: bool,
    pub(crate) shields: u32,
    pub(crate) sips: u32,
}

/// One room's authoritative game state.
///
/// Owned exclusively by its room; all commands must be serialized by the
/// caller (the registry wraps each engine in a mutex). Operations are
/// synchronous and never block.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) code: String,
    pub(crate) phase: GamePhase,
    /// Join order, which is also the fixed turn order.
    pub(crate) players: Vec<Player>,
    pub(crate) current_turn: PlayerId,
    pub(crate) direction: Direction,
    /// Top of each pile is the last element.
    pub(crate) draw_pile: Vec<Card>,
    pub(crate) discard_pile: Vec<Card>,
    pub(crate) aces_drawn: u8,
    /// Draws per rank since that rank's counter was last reset.
    pub(crate) rank_counts: [u8; 5],
    pub(crate) pending: PendingAction,
    pub(crate) target: Option<PlayerId>,
    pub(crate) last_action: String,
    pub(crate) next_player_id: u64,
    pub(crate) rng: ChaCha8Rng,
}

impl Game {
    pub fn new(code: impl Into<String>) -> Self {
        Self::with_rng(code, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Deterministic engine for reproducible games and tests.
    pub fn with_seed(code: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(code, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(code: impl Into<String>, rng: ChaCha8Rng) -> Self {
        Game {
            code: code.into(),
            phase: GamePhase::Lobby,
            players: Vec::new(),
            current_turn: PlayerId(0),
            direction: Direction::Clockwise,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            aces_drawn: 0,
            rank_counts: [0; 5],
            pending: PendingAction::None,
            target: None,
            last_action: "Waiting for players...".to_owned(),
            next_player_id: 0,
            rng,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Add a player to the lobby. The first player becomes host and turn
    /// holder. Phase checks belong to the registry, which refuses joins once
    /// the game has started.
    pub fn add_player(&mut self, name: impl Into<String>, avatar: impl Into<String>) -> PlayerId {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        let is_host = self.players.is_empty();
        let name = name.into();
        if is_host {
            self.current_turn = id;
        } else {
            self.last_action = format!("{} joined the room.", name);
        }
        self.players.push(Player {
            id,
            name,
            avatar: avatar.into(),
            is_host,
            connected: true,
            shields: 0,
            sips: 0,
        });
        id
    }

    /// Remove a player from the lobby, reassigning host (and, in the lobby,
    /// the turn marker) to the first remaining player by join order.
    ///
    /// Membership changes are lobby-only; during play the caller marks the
    /// player disconnected instead so the turn order stays intact.
    pub fn remove_player(&mut self, id: PlayerId) {
        let before = self.players.len();
        self.players.retain(|p| p.id != id);
        if self.players.len() == before {
            return;
        }
        if !self.players.is_empty() && !self.players.iter().any(|p| p.is_host) {
            self.players[0].is_host = true;
            self.last_action = format!("{} is now the host.", self.players[0].name);
        }
        if self.phase == GamePhase::Lobby {
            if let Some(first) = self.players.first() {
                self.current_turn = first.id;
            }
        }
    }

    pub fn mark_disconnected(&mut self, id: PlayerId) {
        if let Some(p) = self.players.iter_mut().find(|p| p.id == id) {
            p.connected = false;
            tracing::info!(room = %self.code, player = %id, "player disconnected");
        }
    }

    /// Start the game: build and shuffle the 20-card deck, reset counters
    /// and hand the first turn to the first joined player.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        if self.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }
        let mut deck: Vec<Card> = (0..DECK_SIZE).map(Card).collect();
        deck.shuffle(&mut self.rng);
        self.begin_with_deck(deck);
        Ok(())
    }

    /// Enter the playing phase with the given draw pile (top last). Split
    /// out of `start_game` so tests can dictate the exact draw order.
    pub(crate) fn begin_with_deck(&mut self, deck: Vec<Card>) {
        self.draw_pile = deck;
        self.discard_pile.clear();
        self.aces_drawn = 0;
        self.rank_counts = [0; 5];
        self.direction = Direction::Clockwise;
        self.pending = PendingAction::None;
        self.target = None;
        self.current_turn = self.players[0].id;
        self.phase = GamePhase::Playing;
        self.last_action = format!("Game started! {}'s turn.", self.players[0].name);
        tracing::info!(room = %self.code, players = self.players.len(), "game started");
    }

    /// Public snapshot for broadcast. The draw pile is reduced to its count;
    /// everything else is owned copies, never views into engine state.
    pub fn public(&self) -> RoomStatePublic {
        RoomStatePublic {
            code: self.code.clone(),
            phase: self.phase,
            players: self
                .players
                .iter()
                .map(|p| PlayerPublic {
                    id: p.id,
                    name: p.name.clone(),
                    avatar: p.avatar.clone(),
                    is_host: p.is_host,
                    is_connected: p.connected,
                    shields: p.shields,
                    sips: p.sips,
                })
                .collect(),
            current_turn: self.current_turn,
            direction: self.direction,
            draw_count: self.draw_pile.len(),
            discard: self.discard_pile.clone(),
            aces_drawn: self.aces_drawn,
            pending: self.pending,
            target: self.target,
            last_action: self.last_action.clone(),
        }
    }

    pub(crate) fn player_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub(crate) fn player_name(&self, id: PlayerId) -> String {
        self.players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "unknown".to_owned())
    }

    pub(crate) fn rank_count(&self, rank: Rank) -> u8 {
        self.rank_counts[rank as usize]
    }
}
