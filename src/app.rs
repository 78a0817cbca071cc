//! Application state and logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::editor::ExpressionInput;
use crate::error::ExprPlotError;
use crate::grapher::Grapher;
use crate::plot::PlotArtifact;
use crate::sampling::PlotMode;
use crate::ui::formatters::format_number;
use crate::util::LayoutConfig;
use crate::viewer::ViewerState;

/// Application theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Gruvbox dark theme.
    GruvboxDark,
    /// Gruvbox light theme.
    GruvboxLight,
}

impl Theme {
    /// Get the next theme in the cycle.
    pub fn next(self) -> Self {
        match self {
            Theme::GruvboxDark => Theme::GruvboxLight,
            Theme::GruvboxLight => Theme::GruvboxDark,
        }
    }

    /// Get the theme name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::GruvboxDark => "Gruvbox Dark",
            Theme::GruvboxLight => "Gruvbox Light",
        }
    }
}

/// Help line shown by `?`.
pub const HELP: &str = "Help: i=edit, Enter=plot, Tab=2D/3D, h/l=probe x, j/k=probe y, c=palette, T=theme, y=copy TSV, q=quit";

/// Whether `key` quits in every mode, including while editing.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Plot pipeline.
    pub grapher: Grapher,
    /// Expression input line.
    pub input: ExpressionInput,
    /// Plot viewer state.
    pub viewer: ViewerState,
    /// Layout constants for the plot views.
    pub layout: LayoutConfig,
    /// Status message.
    pub status: String,
    /// Current theme.
    pub theme: Theme,
}

impl App {
    /// Create a new application instance, plotting `initial` if given.
    pub fn new(grapher: Grapher, mode: PlotMode, initial: Option<String>) -> Self {
        let mut app = Self {
            grapher,
            input: ExpressionInput::new(),
            viewer: ViewerState::new(mode),
            layout: LayoutConfig::default(),
            status: "Ready".to_string(),
            theme: Theme::GruvboxDark,
        };

        match initial {
            Some(text) => {
                app.input.set_buffer(&text);
                app.plot_current();
            },
            None => app.input.start(),
        }

        app
    }

    /// Plot the text in the input line in the current mode.
    pub fn plot_current(&mut self) {
        let text = self.input.buffer().trim().to_string();
        self.plot(text);
    }

    fn plot(&mut self, text: String) {
        let mode = self.viewer.mode;

        match self.grapher.plot(&text, mode) {
            Ok(artifact) => {
                self.status = match &artifact {
                    PlotArtifact::Line(line) if line.gaps > 0 => format!(
                        "Plotted {} in {} ({} undefined points)",
                        text,
                        mode,
                        format_number(line.gaps)
                    ),
                    PlotArtifact::Surface(surface) if surface.gaps > 0 => format!(
                        "Plotted {} in {} ({} undefined cells)",
                        text,
                        mode,
                        format_number(surface.gaps)
                    ),
                    _ => format!("Plotted {} in {}", text, mode),
                };
                self.viewer.show(text, artifact);
            },
            Err(e) => {
                let message = ExprPlotError::from(e).to_string();
                tracing::warn!("{}", message);
                self.status = message.clone();
                self.viewer.set_error(text, message);
            },
        }
    }

    /// Submit the input line and plot it.
    pub fn submit_input(&mut self) {
        if self.input.submit().is_some() {
            self.plot_current();
        }
    }

    /// Switch between 2D and 3D, re-plotting the expression on screen.
    pub fn toggle_mode(&mut self) {
        self.viewer.toggle_mode();
        match self.viewer.expression.clone() {
            Some(text) => self.plot(text),
            None => self.status = format!("Mode: {}", self.viewer.mode),
        }
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Cycle the heatmap palette.
    pub fn cycle_palette(&mut self) {
        self.viewer.cycle_color_palette();
        self.status = format!("Palette: {}", self.viewer.color_palette.name());
    }

    /// Move the probe cursor.
    pub fn move_probe(&mut self, dcol: isize, drow: isize) {
        self.viewer.move_probe(dcol, drow);
    }

    /// Copy the current plot data as TSV.
    pub fn copy_plot(&mut self) {
        match self.viewer.copy_to_clipboard() {
            Ok(()) => self.status = "Plot data copied!".to_string(),
            Err(ExprPlotError::NothingPlotted) => {
                self.status = ExprPlotError::NothingPlotted.to_string()
            },
            Err(e) => {
                tracing::error!("Copy failed: {}", e);
                self.status = format!("Copy failed: {}", e);
            },
        }
    }

    /// Show key help in the status line.
    pub fn help(&mut self) {
        self.status = HELP.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(initial: Option<&str>) -> App {
        App::new(Grapher::default(), PlotMode::TwoD, initial.map(str::to_string))
    }

    #[test]
    fn starts_editing_without_an_expression() {
        let app = app(None);
        assert!(app.input.is_active());
        assert!(app.viewer.artifact.is_none());
        assert_eq!(app.status, "Ready");
    }

    #[test]
    fn initial_expression_is_plotted() {
        let app = app(Some("x**2 + 2*x - 3"));
        assert!(matches!(app.viewer.artifact, Some(PlotArtifact::Line(_))));
        assert_eq!(app.viewer.expression.as_deref(), Some("x**2 + 2*x - 3"));
        assert_eq!(app.status, "Plotted x**2 + 2*x - 3 in 2D");
    }

    #[test]
    fn failed_plot_shows_the_error() {
        let app = app(Some("y + 1"));
        assert!(app.viewer.artifact.is_none());
        let error = app.viewer.error.as_deref().unwrap();
        assert!(error.starts_with("Error plotting graph: "));
        assert!(error.contains("'y'"));
        assert_eq!(app.status, error);
    }

    #[test]
    fn gaps_are_reported_in_the_status() {
        let app = app(Some("log(x)"));
        assert_eq!(app.status, "Plotted log(x) in 2D (200 undefined points)");
    }

    #[test]
    fn submitting_typed_text() {
        let mut app = app(None);
        for c in "sin(x)".chars() {
            app.input.input(c);
        }
        app.submit_input();
        assert!(!app.input.is_active());
        assert!(app.viewer.artifact.is_some());
    }

    #[test]
    fn toggling_mode_replots() {
        let mut app = app(Some("x + 1"));
        app.toggle_mode();
        assert_eq!(app.viewer.mode, PlotMode::ThreeD);
        assert!(matches!(app.viewer.artifact, Some(PlotArtifact::Surface(_))));
        assert_eq!(app.status, "Plotted x + 1 in 3D");
    }

    #[test]
    fn toggling_mode_ignores_a_cancelled_edit() {
        let mut app = app(Some("x + 1"));
        app.input.start();
        for c in " + zz".chars() {
            app.input.input(c);
        }
        app.input.cancel();
        app.toggle_mode();
        assert!(matches!(app.viewer.artifact, Some(PlotArtifact::Surface(_))));
        assert_eq!(app.status, "Plotted x + 1 in 3D");
    }

    #[test]
    fn toggling_mode_after_an_error_retries_the_failed_text() {
        let mut app = app(Some("y + 1"));
        app.toggle_mode();
        assert_eq!(app.viewer.mode, PlotMode::ThreeD);
        assert!(app.viewer.error.is_some());
        assert_eq!(app.viewer.expression.as_deref(), Some("y + 1"));
    }

    #[test]
    fn toggling_mode_with_nothing_plotted() {
        let mut app = app(None);
        app.toggle_mode();
        assert_eq!(app.status, "Mode: 3D");
        assert!(app.viewer.artifact.is_none());
    }

    #[test]
    fn ctrl_c_interrupts_but_plain_c_does_not() {
        assert!(is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn copy_without_plot_reports_it() {
        let mut app = app(None);
        app.copy_plot();
        assert_eq!(app.status, "Nothing plotted yet");
    }

    #[test]
    fn theme_and_palette_cycle() {
        let mut app = app(None);
        app.cycle_theme();
        assert_eq!(app.theme, Theme::GruvboxLight);
        app.cycle_palette();
        assert_eq!(app.status, "Palette: Plasma");
        app.help();
        assert_eq!(app.status, HELP);
    }
}
