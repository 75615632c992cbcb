//! Application state and key handling.

use crate::orchestrator::{Command, GameEvent, GameView};
use crossterm::event::KeyCode;
use knights_tour::{Phase, Position};
use tracing::debug;

/// Main application state.
pub struct App {
    view: GameView,
    cursor: Position,
    status: String,
    npc_first: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(npc_first: bool) -> Self {
        Self {
            view: GameView::empty(),
            cursor: Position::new(3, 4).expect("d4 is on the board"),
            status: "Starting...".to_string(),
            npc_first,
        }
    }

    /// The latest game snapshot.
    pub fn view(&self) -> &GameView {
        &self.view
    }

    /// The cell the selection cursor is on.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The current status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Applies an event from the orchestrator.
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::State(view) => {
                self.status = status_for(&view);
                self.view = view;
            }
            GameEvent::Rejected { position, reason } => {
                debug!(cell = %position, %reason, "pick rejected");
                self.status = match self.view.phase {
                    Phase::AwaitingNpc => "The computer is thinking...".to_string(),
                    _ => "Pick a valid move (one of the highlighted squares).".to_string(),
                };
            }
        }
    }

    /// Translates a key press into an optional command for the orchestrator.
    pub fn handle_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Pick(self.cursor)),
            KeyCode::Char('r') => Some(Command::Reset {
                npc_first: self.npc_first,
            }),
            KeyCode::Char('n') => {
                self.npc_first = !self.npc_first;
                if self.view.position.is_none() {
                    // Nobody has moved yet, so flipping who opens restarts
                    // the game on the spot.
                    Some(Command::Reset {
                        npc_first: self.npc_first,
                    })
                } else {
                    self.status = if self.npc_first {
                        "The computer will open the next game.".to_string()
                    } else {
                        "You will open the next game.".to_string()
                    };
                    None
                }
            }
            _ => None,
        }
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) -> Option<Command> {
        if let Some(next) = self.cursor.offset(dx, dy) {
            self.cursor = next;
        }
        None
    }
}

fn status_for(view: &GameView) -> String {
    match view.phase {
        Phase::NotStarted => "Press 'r' to start a game.".to_string(),
        Phase::AwaitingHuman if view.position.is_none() => {
            "It is your turn. Pick any square.".to_string()
        }
        Phase::AwaitingHuman => "Your turn.".to_string(),
        Phase::AwaitingNpc => "The computer is thinking...".to_string(),
        Phase::HumanWon => "You won! Press 'r' to play again or 'q' to quit.".to_string(),
        Phase::HumanLost => "You lost! Press 'r' to play again or 'q' to quit.".to_string(),
    }
}
