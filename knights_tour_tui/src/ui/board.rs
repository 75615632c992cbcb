//! Chessboard rendering.

use crate::app::App;
use crate::orchestrator::GameView;
use knights_tour::{BOARD_SIZE, Phase, Position};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

// Board palette.
const DARK_SQUARE: Color = Color::Rgb(0x19, 0x19, 0x19);
const LIGHT_SQUARE: Color = Color::Rgb(0xad, 0xb3, 0xbd);
const KNIGHT: Color = Color::Rgb(0x30, 0x85, 0xee);
const TRAIL: Color = Color::Rgb(0x3c, 0x72, 0xb2);
const CURSOR: Color = Color::Rgb(0xe6, 0xd7, 0x0b);

const CELL_WIDTH: u16 = 3;

/// Renders the 8x8 board with the knight, its trail, the legal-move
/// markers, and the selection cursor.
pub fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let view = app.view();
    let width = 2 + BOARD_SIZE as u16 * CELL_WIDTH;
    let height = BOARD_SIZE as u16 + 1;
    let board_area = center_rect(area, width, height);

    let mut lines: Vec<Line> = Vec::with_capacity(height as usize);
    for y in 0..BOARD_SIZE {
        let mut spans = vec![Span::styled(
            format!("{} ", 8 - y),
            Style::default().fg(Color::DarkGray),
        )];
        for x in 0..BOARD_SIZE {
            let cell = Position::new(x, y).expect("coordinates in bounds");
            spans.push(cell_span(cell, view, app.cursor()));
        }
        lines.push(Line::from(spans));
    }

    let files: String = ('a'..='h').map(|file| format!(" {file} ")).collect();
    lines.push(Line::from(Span::styled(
        format!("  {files}"),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), board_area);
}

fn cell_span(cell: Position, view: &GameView, cursor: Position) -> Span<'static> {
    let is_cursor = cursor == cell && !view.phase.is_terminal();
    let is_knight = view.position == Some(cell);
    let is_trail = !is_knight && view.visited.contains(&cell);
    // Markers only once the knight is placed; the unconstrained opening
    // would light up all 64 squares.
    let is_legal = view.position.is_some()
        && view.phase == Phase::AwaitingHuman
        && view.legal.contains(&cell);

    let dark = (cell.x() + cell.y()) % 2 == 0;
    let bg = if is_cursor {
        CURSOR
    } else if dark {
        DARK_SQUARE
    } else {
        LIGHT_SQUARE
    };

    let (symbol, fg) = if is_knight {
        ("N", KNIGHT)
    } else if is_trail {
        ("•", TRAIL)
    } else if is_legal {
        ("○", TRAIL)
    } else {
        (" ", bg)
    };

    let mut style = Style::default().fg(fg).bg(bg);
    if is_knight {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(format!(" {symbol} "), style)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(horizontal[1])[1]
}
