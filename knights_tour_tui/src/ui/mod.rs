//! Rendering for the knight's tour TUI.

mod board;

use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draws the whole application frame.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(11),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .split(f.area());

    let title = Paragraph::new("Knight's Tour vs. the Computer")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    board::render_board(f, chunks[1], app);

    let status = Paragraph::new(app.status())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);

    let moves = app
        .view()
        .history
        .iter()
        .map(|cell| cell.notation())
        .collect::<Vec<_>>()
        .join(", ");
    let log = Paragraph::new(moves)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Moves"));
    f.render_widget(log, chunks[3]);
}
