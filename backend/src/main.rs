use crate::cli::Cli;
use crate::game::Table;
use crate::server::ServerError;
use clap::Parser;
use common::GameState;
use std::net::SocketAddr;
use tracing::info;

mod cli;
mod client;
mod game;
mod handler;
mod server;
mod session;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let cli = Cli::parse();

    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "server.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(cli.log_level)
        .with_writer(non_blocking)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let table = Table::new(GameState::new(cli.first_mover.into()), !cli.no_color).shared();
    info!("created game table, first mover {:?}", cli.first_mover);

    if let Some(status_port) = cli.status_port {
        let status_addr = SocketAddr::new(cli.host, status_port);
        info!("serving status routes on {}", status_addr);
        tokio::task::spawn(warp::serve(handler::routes(table.clone())).run(status_addr));
    }

    let addr = SocketAddr::new(cli.host, cli.port);
    let listener = server::bind(addr).await?;
    info!("listening on {}", addr);

    server::serve(listener, table).await;
    Ok(())
}
