use crate::tictactoe::{Board, Cell, Phase, Snapshot, Symbol, BOARD_SIZE};
use serde::Serialize;

const RESET: &str = "\x1b[0m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const BOLD_YELLOW: &str = "\x1b[1;33m";

/// Everything the server ever tells a client.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Waiting,
    Board(Snapshot),
    YourTurn,
    OpponentsTurn,
    NotYourTurn,
    CellTaken,
    YouWin,
    YouLose,
    GameFull,
    OpponentLeft,
}

impl Notice {
    pub fn render(&self, color: bool) -> String {
        match self {
            Notice::Waiting => "waiting for an opponent to join\n".to_string(),
            Notice::Board(snapshot) => render_snapshot(snapshot, color),
            Notice::YourTurn => highlight("your turn:", BOLD_GREEN, color) + "\n",
            Notice::OpponentsTurn => highlight("opponent's turn!", BOLD_RED, color) + "\n",
            Notice::NotYourTurn => highlight("IT'S NOT YOUR TURN", BOLD_YELLOW, color) + "\n",
            Notice::CellTaken => highlight("THIS PLACE IS ALREADY TAKEN", BOLD_RED, color) + "\n",
            Notice::YouWin => format!("\n{}\n\n", highlight("YOU WIN", BOLD_GREEN, color)),
            Notice::YouLose => format!("\n{}\n\n", highlight("YOU LOSE", BOLD_YELLOW, color)),
            Notice::GameFull => {
                highlight("Game is full, try again later!", BOLD_RED, color) + "\n"
            }
            Notice::OpponentLeft => {
                "\nYour opponent left the game.\nReset.\nWaiting for a new opponent.\n".to_string()
            }
        }
    }
}

fn highlight(text: &str, code: &str, color: bool) -> String {
    if color {
        format!("{}{}{}", code, text, RESET)
    } else {
        text.to_string()
    }
}

fn render_symbol(symbol: Symbol, color: bool) -> String {
    let code = match symbol {
        Symbol::X => BLUE,
        Symbol::O => CYAN,
    };
    highlight(&symbol.to_string(), code, color)
}

// Empty cells show their own index so players can see which number to send.
fn render_cell(idx: usize, cell: Cell, color: bool) -> String {
    match cell {
        Cell::Empty => idx.to_string(),
        Cell::Taken(symbol) => render_symbol(symbol, color),
    }
}

pub fn render_board(board: &Board, color: bool) -> String {
    board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            let line = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| render_cell(row * 3 + col, *cell, color))
                .collect::<Vec<String>>()
                .join(" | ");
            line + "\n"
        })
        .collect()
}

fn render_snapshot(snapshot: &Snapshot, color: bool) -> String {
    if snapshot.phase == Phase::Waiting {
        return Notice::Waiting.render(color);
    }
    let score = snapshot
        .seats_by_player_num()
        .iter()
        .map(|s| format!("{}:{}", render_symbol(s.symbol, color), s.score))
        .collect::<Vec<String>>()
        .join(" ");
    format!("{}{}\n", render_board(&snapshot.board, color), score)
}

#[derive(Serialize, Debug)]
pub struct SeatStatus {
    pub symbol: Symbol,
    pub score: u32,
}

/// Body of the HTTP status route. Session ids stay private.
#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub phase: Phase,
    pub seats: Vec<SeatStatus>,
    pub board: [Cell; BOARD_SIZE],
}

impl From<&Snapshot> for StatusResponse {
    fn from(snapshot: &Snapshot) -> Self {
        StatusResponse {
            phase: snapshot.phase,
            seats: snapshot
                .seats_by_player_num()
                .iter()
                .map(|s| SeatStatus {
                    symbol: s.symbol,
                    score: s.score,
                })
                .collect(),
            board: *snapshot.board.cells(),
        }
    }
}
