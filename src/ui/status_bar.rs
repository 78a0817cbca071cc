//! Status bar UI component.

use crate::app::App;
use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the status bar.
pub(crate) fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, colors: &ThemeColors) {
    let has_gaps = app.viewer.artifact.as_ref().is_some_and(|a| a.gaps() > 0);
    let fg = if app.viewer.error.is_some() {
        colors.error
    } else if has_gaps {
        colors.warning
    } else {
        colors.status_fg
    };

    let paragraph =
        Paragraph::new(app.status.as_str()).style(Style::default().fg(fg).bg(colors.bg_alt));

    f.render_widget(paragraph, area);
}
