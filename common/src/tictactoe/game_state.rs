use crate::tictactoe::board::{Board, BoardPosition, Symbol};
use crate::tictactoe::player::{PlayerNum, Seat, SessionId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

const MAX_SEATS: usize = 2;

#[derive(Error, Debug, PartialEq)]
pub enum GameError {
    #[error("Game is full")]
    GameFull,
    #[error("Session {0} already holds a seat")]
    AlreadySeated(SessionId),
    #[error("Move attempted out of turn")]
    NotYourTurn,
    #[error("Position {0} is taken or off the board")]
    CellTaken(i32),
}

#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Active,
}

// Who gets the first move once both seats are taken.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FirstMover {
    #[default]
    LastJoined,
    FirstJoined,
    Random,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SeatSnapshot {
    pub id: SessionId,
    pub player_num: PlayerNum,
    pub symbol: Symbol,
    pub score: u32,
}

/// Copy of the shared state taken while the lock is held, so it can be
/// rendered and broadcast after the lock is released.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub board: Board,
    /// Join order.
    pub seats: Vec<SeatSnapshot>,
    pub turn: Option<SessionId>,
}

impl Snapshot {
    pub fn is_turn(&self, id: SessionId) -> bool {
        self.phase == Phase::Active && self.turn == Some(id)
    }

    /// Seats ordered by player number rather than join order.
    pub fn seats_by_player_num(&self) -> Vec<&SeatSnapshot> {
        let mut seats: Vec<&SeatSnapshot> = self.seats.iter().collect();
        seats.sort_by_key(|s| s.player_num.index());
        seats
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RoundOutcome {
    Win { winner: SessionId, loser: SessionId },
    Draw,
}

#[derive(Clone, Debug)]
pub struct JoinOutcome {
    pub seat: Seat,
    /// True when this join filled the second seat. The caller broadcasts the
    /// board and turn notices to both seats.
    pub game_started: bool,
    pub snapshot: Snapshot,
}

#[derive(Clone, Debug)]
pub struct Departure {
    pub seat: Seat,
    pub remaining: Option<SessionId>,
}

#[derive(Clone, Debug)]
pub struct MoveResult {
    pub position: BoardPosition,
    pub outcome: Option<RoundOutcome>,
    pub snapshot: Snapshot,
}

/// Authoritative state of the single table. Every method takes `&mut self`,
/// so sharing it across connections requires an exclusive lock around it.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    seats: Vec<Seat>,
    turn: Option<SessionId>,
    first_mover: FirstMover,
    rng: StdRng,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(FirstMover::default())
    }
}

impl GameState {
    pub fn new(first_mover: FirstMover) -> Self {
        Self::with_rng(first_mover, StdRng::from_entropy())
    }

    pub fn with_seed(first_mover: FirstMover, seed: u64) -> Self {
        Self::with_rng(first_mover, StdRng::seed_from_u64(seed))
    }

    fn with_rng(first_mover: FirstMover, rng: StdRng) -> Self {
        GameState {
            board: Board::default(),
            seats: Vec::with_capacity(MAX_SEATS),
            turn: None,
            first_mover,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, id: SessionId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id() == id)
    }

    pub fn turn(&self) -> Option<SessionId> {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        if self.is_full_places() {
            Phase::Active
        } else {
            Phase::Waiting
        }
    }

    pub fn is_full_places(&self) -> bool {
        self.seats.len() == MAX_SEATS
    }

    pub fn can_play_turn(&self, id: SessionId) -> bool {
        self.is_full_places() && self.turn == Some(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase(),
            board: self.board.clone(),
            seats: self
                .seats
                .iter()
                .map(|s| SeatSnapshot {
                    id: s.id(),
                    player_num: s.player_num(),
                    symbol: s.symbol(),
                    score: s.score,
                })
                .collect(),
            turn: self.turn,
        }
    }

    pub fn join(&mut self, id: SessionId) -> Result<JoinOutcome, GameError> {
        if self.seat(id).is_some() {
            return Err(GameError::AlreadySeated(id));
        }
        if self.is_full_places() {
            return Err(GameError::GameFull);
        }

        // The newcomer takes whichever seat is free, so both symbols stay distinct
        // after a departure.
        let player_num = match self.seats.first() {
            Some(seated) => seated.player_num().other(),
            None => PlayerNum::P1,
        };
        let seat = Seat::new(id, player_num);
        self.seats.push(seat.clone());

        let game_started = self.is_full_places();
        self.turn = match self.first_mover {
            FirstMover::LastJoined => Some(id),
            FirstMover::FirstJoined => self.seats.first().map(Seat::id),
            FirstMover::Random if game_started => {
                let idx = self.rng.gen_range(0..MAX_SEATS);
                self.seats.get(idx).map(Seat::id)
            }
            FirstMover::Random => Some(id),
        };

        Ok(JoinOutcome {
            seat,
            game_started,
            snapshot: self.snapshot(),
        })
    }

    // Unknown ids are ignored, which makes a second call for the same session harmless.
    pub fn leave(&mut self, id: SessionId) -> Option<Departure> {
        let idx = self.seats.iter().position(|s| s.id() == id)?;
        let seat = self.seats.remove(idx);
        self.board.reset();
        for remaining in self.seats.iter_mut() {
            remaining.score = 0;
        }
        self.turn = self.seats.first().map(Seat::id);

        Some(Departure {
            seat,
            remaining: self.turn,
        })
    }

    // Validation happens before any mutation: a rejected move leaves the state untouched.
    pub fn apply_move(&mut self, id: SessionId, pos: i32) -> Result<MoveResult, GameError> {
        if !self.can_play_turn(id) {
            return Err(GameError::NotYourTurn);
        }
        let position = self
            .board
            .free_position(pos)
            .ok_or(GameError::CellTaken(pos))?;
        let symbol = self.seat(id).ok_or(GameError::NotYourTurn)?.symbol();

        self.board.place(position, symbol);
        self.switch_turn();

        let outcome = match self.board.winner() {
            Some(winner) => self.award_win(winner),
            None if self.board.is_full() => Some(RoundOutcome::Draw),
            None => None,
        };
        // Scores survive the reset; only a departure clears them.
        if outcome.is_some() {
            self.board.reset();
        }

        Ok(MoveResult {
            position,
            outcome,
            snapshot: self.snapshot(),
        })
    }

    fn switch_turn(&mut self) {
        let current = self.turn;
        self.turn = self
            .seats
            .iter()
            .map(Seat::id)
            .find(|id| Some(*id) != current);
    }

    fn award_win(&mut self, symbol: Symbol) -> Option<RoundOutcome> {
        let winner = self.seats.iter_mut().find(|s| s.symbol() == symbol)?;
        winner.increment_score();
        let winner = winner.id();
        let loser = self.seats.iter().map(Seat::id).find(|id| *id != winner)?;
        Some(RoundOutcome::Win { winner, loser })
    }
}
