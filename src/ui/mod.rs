//! User interface rendering.

pub mod formatters;
mod keymap_bar;
mod status_bar;
mod theme;

use crate::app::App;
use crate::viewer;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub use theme::ThemeColors;

const PROMPT: &str = "f(x) = ";

/// Draw the UI.
pub fn draw(f: &mut Frame<'_>, app: &App) {
    let colors = ThemeColors::from_theme(app.theme);

    f.render_widget(
        Block::default().style(Style::default().bg(colors.bg)),
        f.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Expression input
            Constraint::Min(5),    // Plot
            Constraint::Length(1), // Status
            Constraint::Length(1), // Keymap
        ])
        .split(f.area());

    draw_input(f, chunks[0], app, &colors);
    viewer::ui::draw_viewer(f, chunks[1], &app.viewer, &app.layout, &colors);
    status_bar::draw_status(f, chunks[2], app, &colors);
    keymap_bar::draw_keymap(f, chunks[3], app.input.is_active(), &colors);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let editing = app.input.is_active();
    let border = if editing { colors.heading } else { colors.border };

    let line = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default().fg(colors.label).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input.buffer(), Style::default().fg(colors.value)),
    ]);

    let title = format!(" Expression | {} ", app.viewer.mode);
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title)
            .title_style(Style::default().fg(colors.heading))
            .style(Style::default().bg(colors.bg_alt)),
    );
    f.render_widget(paragraph, area);

    if editing {
        let x = area.x + 1 + PROMPT.len() as u16 + app.input.cursor_column();
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position(Position::new(x.min(max_x), area.y + 1));
    }
}
