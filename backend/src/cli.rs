//! Command-line configuration for the game server.

use clap::{Parser, ValueEnum};
use common::FirstMover;
use std::net::IpAddr;
use std::path::PathBuf;

/// Two-player tic-tac-toe over plain TCP
#[derive(Parser, Debug)]
#[command(name = "tictactoe-server")]
#[command(version)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port for game connections
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Port for the HTTP health/status routes. Disabled when omitted.
    #[arg(long)]
    pub status_port: Option<u16>,

    /// Directory for the daily rolling log file
    #[arg(long, default_value = "./logs")]
    pub log_dir: PathBuf,

    /// Maximum log level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Which seat moves first once both are taken
    #[arg(long, value_enum, default_value_t = FirstMoverArg::LastJoined)]
    pub first_mover: FirstMoverArg,

    /// Send plain text without ANSI highlighting
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum FirstMoverArg {
    LastJoined,
    FirstJoined,
    Random,
}

impl From<FirstMoverArg> for FirstMover {
    fn from(arg: FirstMoverArg) -> Self {
        match arg {
            FirstMoverArg::LastJoined => FirstMover::LastJoined,
            FirstMoverArg::FirstJoined => FirstMover::FirstJoined,
            FirstMoverArg::Random => FirstMover::Random,
        }
    }
}
