mod board;
mod game_state;
mod input;
mod player;

pub use board::{Board, BoardPosition, BoardPositionError, Cell, Symbol, BOARD_SIZE};
pub use game_state::{
    Departure, FirstMover, GameError, GameState, JoinOutcome, MoveResult, Phase, RoundOutcome,
    SeatSnapshot, Snapshot,
};
pub use input::{parse_move, INVALID_POSITION};
pub use player::{PlayerNum, Seat, SessionId};
