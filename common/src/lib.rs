mod tictactoe;

pub mod messages;

pub use tictactoe::*;
