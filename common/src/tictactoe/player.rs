use crate::tictactoe::board::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// Stable handle for one accepted connection. Issued by the dispatcher, never reused.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_simple())
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerNum {
    P1,
    P2,
}

impl PlayerNum {
    pub fn symbol(&self) -> Symbol {
        match self {
            PlayerNum::P1 => Symbol::X,
            PlayerNum::P2 => Symbol::O,
        }
    }

    pub fn other(&self) -> PlayerNum {
        match self {
            PlayerNum::P1 => PlayerNum::P2,
            PlayerNum::P2 => PlayerNum::P1,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PlayerNum::P1 => 0,
            PlayerNum::P2 => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Seat {
    id: SessionId,
    player_num: PlayerNum,
    pub score: u32,
}

impl Seat {
    pub fn new(id: SessionId, player_num: PlayerNum) -> Self {
        Seat {
            id,
            player_num,
            score: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn player_num(&self) -> PlayerNum {
        self.player_num
    }

    pub fn symbol(&self) -> Symbol {
        self.player_num.symbol()
    }

    pub fn increment_score(&mut self) {
        self.score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_follows_player_num() {
        assert_eq!(PlayerNum::P1.symbol(), Symbol::X);
        assert_eq!(PlayerNum::P2.symbol(), Symbol::O);
        assert_eq!(PlayerNum::P1.other(), PlayerNum::P2);
        assert_eq!(PlayerNum::P2.other().index(), 0);
    }

    #[test]
    fn test_increment_score() {
        let mut seat = Seat::new(SessionId::new(), PlayerNum::P2);
        assert_eq!(seat.score, 0);
        seat.increment_score();
        seat.increment_score();
        assert_eq!(seat.score, 2);
        assert_eq!(seat.symbol(), Symbol::O);
    }

    #[test]
    fn test_session_ids_are_distinct() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
