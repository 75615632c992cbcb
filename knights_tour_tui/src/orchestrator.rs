//! Game orchestration: owns the engine and the computer's thinking pause.

use anyhow::Result;
use knights_tour::{Phase, Position, TourEngine};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, info};

/// Commands sent from the UI to the orchestrator.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    /// The human picked a board cell.
    Pick(Position),
    /// Start a fresh game.
    Reset {
        /// Whether the computer makes the opening move.
        npc_first: bool,
    },
}

/// Events sent from orchestrator to UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Game state updated.
    State(GameView),
    /// A pick was rejected by the engine.
    Rejected {
        /// The cell the human tried to play.
        position: Position,
        /// Why the engine refused it.
        reason: String,
    },
}

/// Snapshot of everything the UI renders.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Current phase of the state machine.
    pub phase: Phase,
    /// Current knight position, if any.
    pub position: Option<Position>,
    /// Legal destinations for the side to move.
    pub legal: Vec<Position>,
    /// Cells the knight has burned so far.
    pub visited: Vec<Position>,
    /// Move history in play order.
    pub history: Vec<Position>,
}

impl GameView {
    /// A view with no game behind it, for the UI's first frame.
    pub fn empty() -> Self {
        Self {
            phase: Phase::NotStarted,
            position: None,
            legal: Vec::new(),
            visited: Vec::new(),
            history: Vec::new(),
        }
    }

    fn snapshot(engine: &TourEngine) -> Self {
        Self {
            phase: engine.phase(),
            position: engine.position(),
            legal: engine.legal_moves(),
            visited: Position::all()
                .filter(|cell| engine.board().is_visited(*cell))
                .collect(),
            history: engine.history().to_vec(),
        }
    }
}

/// Drives one engine per session: human commands in, state snapshots out.
pub struct Orchestrator {
    engine: TourEngine,
    npc_delay: Duration,
    cmd_rx: mpsc::UnboundedReceiver<Command>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator with a freshly started game.
    pub fn new(
        seed: Option<u64>,
        npc_first: bool,
        npc_delay: Duration,
        cmd_rx: mpsc::UnboundedReceiver<Command>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        let mut engine = match seed {
            Some(seed) => TourEngine::seeded(seed),
            None => TourEngine::new(),
        };
        engine.reset(npc_first);
        Self {
            engine,
            npc_delay,
            cmd_rx,
            event_tx,
        }
    }

    /// Runs the game loop until the command channel closes.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting game orchestration");
        self.publish()?;

        loop {
            if self.engine.phase() == Phase::AwaitingNpc {
                if !self.npc_turn().await? {
                    return Ok(());
                }
            } else {
                match self.cmd_rx.recv().await {
                    Some(cmd) => self.handle(cmd)?,
                    None => return Ok(()),
                }
            }
        }
    }

    /// The computer's turn: think for the configured pause, then move.
    ///
    /// The pause is a cancellable timer raced against incoming commands: a
    /// reset arriving mid-pause discards the pending computer move, while a
    /// pick is rejected by the engine without disturbing the timer. Returns
    /// `false` when the command channel closed.
    async fn npc_turn(&mut self) -> Result<bool> {
        let think = time::sleep(self.npc_delay);
        tokio::pin!(think);

        loop {
            tokio::select! {
                _ = &mut think => {
                    let reply = self.engine.compute_npc_move()?;
                    debug!(reply = %reply, "computer picked its move");
                    self.engine.apply_npc_move(reply)?;
                    self.publish()?;
                    return Ok(true);
                }
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(Command::Reset { npc_first }) => {
                        self.engine.reset(npc_first);
                        self.publish()?;
                        return Ok(true);
                    }
                    Some(Command::Pick(position)) => {
                        // The state machine guards its own turn order.
                        if let Err(e) = self.engine.apply_human_move(position) {
                            debug!(error = %e, cell = %position, "pick rejected mid-pause");
                            self.event_tx.send(GameEvent::Rejected {
                                position,
                                reason: e.to_string(),
                            })?;
                        }
                    }
                    None => return Ok(false),
                },
            }
        }
    }

    fn handle(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Pick(position) => match self.engine.apply_human_move(position) {
                Ok(()) => self.publish(),
                Err(e) => {
                    debug!(error = %e, cell = %position, "pick rejected");
                    self.event_tx.send(GameEvent::Rejected {
                        position,
                        reason: e.to_string(),
                    })?;
                    Ok(())
                }
            },
            Command::Reset { npc_first } => {
                self.engine.reset(npc_first);
                self.publish()
            }
        }
    }

    fn publish(&self) -> Result<()> {
        self.event_tx
            .send(GameEvent::State(GameView::snapshot(&self.engine)))?;
        Ok(())
    }
}
