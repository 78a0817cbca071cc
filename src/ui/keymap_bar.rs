//! Keymap help bar UI component.

use crate::ui::ThemeColors;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Draw the keymap help bar.
pub(crate) fn draw_keymap(f: &mut Frame<'_>, area: Rect, editing: bool, colors: &ThemeColors) {
    let keymap_text = if editing {
        "Enter:plot | Esc:done | ←→:move | ↑↓:history | Home/End"
    } else {
        "q:quit | i:edit | Tab:2D/3D | hjkl:probe | c:palette | y:copy | T:theme | ?:help"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.muted).bg(colors.bg));

    f.render_widget(paragraph, area);
}
