use crate::client::{SendMsg, Sender};
use common::messages::{Notice, StatusResponse};
use common::{Departure, GameError, GameState, MoveResult, RoundOutcome, SessionId, Snapshot};
use hashbrown::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub type SharedTable = Arc<Mutex<Table>>;

/// The one game plus the output sinks of its seated clients. All access goes
/// through the `SharedTable` mutex.
#[derive(Debug)]
pub struct Table {
    game: GameState,
    clients: HashMap<SessionId, Sender>,
    color: bool,
}

/// Notices computed under the lock, queued in order per recipient.
#[derive(Debug)]
pub struct Outbox {
    color: bool,
    messages: Vec<(Sender, Notice)>,
}

impl Outbox {
    fn new(color: bool) -> Self {
        Outbox {
            color,
            messages: Vec::new(),
        }
    }

    fn push(&mut self, sender: &Sender, notice: Notice) {
        self.messages.push((sender.clone(), notice));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // Queues only; the socket writes happen in each connection's writer task.
    pub fn deliver(self) {
        for (sender, notice) in self.messages {
            // A closed sink means that client is already on its way out
            if let Err(err) = sender.send(&notice.render(self.color)) {
                warn!("Dropping {:?} notice: {}", notice, err);
            }
        }
    }
}

#[derive(Debug)]
pub enum Seating {
    Seated(Outbox),
    Rejected(GameError, Outbox),
}

impl Table {
    pub fn new(game: GameState, color: bool) -> Self {
        Table {
            game,
            clients: HashMap::new(),
            color,
        }
    }

    pub fn shared(self) -> SharedTable {
        Arc::new(Mutex::new(self))
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse::from(&self.game.snapshot())
    }

    pub fn seat_client(&mut self, id: SessionId, sender: Sender) -> Seating {
        let mut outbox = Outbox::new(self.color);
        let joined = match self.game.join(id) {
            Ok(joined) => joined,
            Err(err) => {
                outbox.push(&sender, Notice::GameFull);
                return Seating::Rejected(err, outbox);
            }
        };
        info!(
            "client {} seated as {:?} ({})",
            id,
            joined.seat.player_num(),
            joined.seat.symbol()
        );
        self.clients.insert(id, sender);

        if joined.game_started {
            self.broadcast_state(&joined.snapshot, &mut outbox);
        } else if let Some(sender) = self.clients.get(&id) {
            outbox.push(sender, Notice::Waiting);
        }
        Seating::Seated(outbox)
    }

    pub fn handle_move(&mut self, id: SessionId, pos: i32) -> Outbox {
        let mut outbox = Outbox::new(self.color);
        match self.game.apply_move(id, pos) {
            Ok(result) => {
                info!("client {} played {}", id, result.position);
                self.report_move(&result, &mut outbox);
            }
            Err(err) => {
                warn!("Rejected move {} from client {}: {}", pos, id, err);
                let notice = match err {
                    GameError::CellTaken(_) => Notice::CellTaken,
                    GameError::NotYourTurn | GameError::GameFull | GameError::AlreadySeated(_) => {
                        Notice::NotYourTurn
                    }
                };
                if let Some(sender) = self.clients.get(&id) {
                    outbox.push(sender, notice);
                }
            }
        }
        outbox
    }

    pub fn unseat_client(&mut self, id: SessionId) -> Outbox {
        let mut outbox = Outbox::new(self.color);
        self.clients.remove(&id);
        if let Some(Departure { seat, remaining, .. }) = self.game.leave(id) {
            info!("client {} left seat {:?}", id, seat.player_num());
            if let Some(sender) = remaining.and_then(|r| self.clients.get(&r)) {
                outbox.push(sender, Notice::OpponentLeft);
            }
        }
        outbox
    }

    fn report_move(&self, result: &MoveResult, outbox: &mut Outbox) {
        match result.outcome {
            Some(RoundOutcome::Win { winner, loser }) => {
                info!("client {} won against {}", winner, loser);
                if let Some(sender) = self.clients.get(&winner) {
                    outbox.push(sender, Notice::YouWin);
                }
                if let Some(sender) = self.clients.get(&loser) {
                    outbox.push(sender, Notice::YouLose);
                }
            }
            Some(RoundOutcome::Draw) => info!("round ended in a draw"),
            None => {}
        }
        self.broadcast_state(&result.snapshot, outbox);
    }

    // Board and scores to every seat, then who moves next.
    fn broadcast_state(&self, snapshot: &Snapshot, outbox: &mut Outbox) {
        let recipients: Vec<(SessionId, &Sender)> = snapshot
            .seats
            .iter()
            .filter_map(|s| self.clients.get(&s.id).map(|sender| (s.id, sender)))
            .collect();
        for (_, sender) in &recipients {
            outbox.push(sender, Notice::Board(snapshot.clone()));
        }
        for (id, sender) in &recipients {
            let notice = if snapshot.is_turn(*id) {
                Notice::YourTurn
            } else {
                Notice::OpponentsTurn
            };
            outbox.push(sender, notice);
        }
    }
}
