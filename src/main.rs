//! exprplot - A terminal-based 2D/3D function plotter.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exprplot::{
    app::{is_interrupt, App},
    grapher::{AxisConfig, Grapher, GrapherConfig},
    sampling::PlotMode,
    ui, ExprPlotError,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "exprplot")]
#[command(about = "A terminal-based 2D/3D function plotter", long_about = None)]
struct Args {
    /// Expression in x to plot, e.g. "x**2 + 2*x - 3"
    expression: Option<String>,

    /// Plot mode: 2D line or 3D surface
    #[arg(long, default_value = "2D")]
    mode: PlotMode,

    /// Number of samples on the 2D line
    #[arg(long, default_value_t = 400)]
    samples: usize,

    /// Samples per axis of the 3D grid
    #[arg(long, default_value_t = 100)]
    grid: usize,

    /// Print the plot data as TSV instead of opening the viewer
    #[arg(long, requires = "expression")]
    print: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn grapher_config(&self) -> GrapherConfig {
        let defaults = GrapherConfig::default();
        GrapherConfig {
            line: AxisConfig {
                samples: self.samples,
                ..defaults.line
            },
            surface: AxisConfig {
                samples: self.grid,
                ..defaults.surface
            },
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        init_logging(log_path)?;
        tracing::info!("Starting exprplot");
    }

    let grapher = Grapher::new(args.grapher_config());

    if args.print {
        let expression = args.expression.as_deref().unwrap_or_default();
        return match grapher.plot(expression, args.mode) {
            Ok(artifact) => {
                io::stdout().lock().write_all(artifact.to_tsv().as_bytes())?;
                Ok(())
            },
            Err(e) => {
                eprintln!("{}", ExprPlotError::from(e));
                std::process::exit(1);
            },
        };
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(grapher, args.mode, args.expression);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("exprplot exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_interrupt(&key) {
            return Ok(());
        }

        // Editing mode - handle separately
        if app.input.is_active() {
            match key.code {
                KeyCode::Enter => app.submit_input(),
                KeyCode::Esc => app.input.cancel(),
                KeyCode::Backspace => app.input.backspace(),
                KeyCode::Delete => app.input.delete(),
                KeyCode::Left => app.input.move_left(),
                KeyCode::Right => app.input.move_right(),
                KeyCode::Home => app.input.home(),
                KeyCode::End => app.input.end(),
                KeyCode::Up => app.input.history_prev(),
                KeyCode::Down => app.input.history_next(),
                KeyCode::Char(c) => app.input.input(c),
                _ => {},
            }
            continue;
        }

        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),

            // Editing
            (KeyModifiers::NONE, KeyCode::Char('i'))
            | (KeyModifiers::NONE, KeyCode::Char('/')) => {
                app.input.start();
            },
            (KeyModifiers::NONE, KeyCode::Enter) => {
                app.plot_current();
            },

            // Plot mode
            (KeyModifiers::NONE, KeyCode::Tab) => {
                app.toggle_mode();
            },

            // Probe
            (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                app.move_probe(-1, 0);
            },
            (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                app.move_probe(1, 0);
            },
            (KeyModifiers::SHIFT, KeyCode::Char('H')) => {
                app.move_probe(-10, 0);
            },
            (KeyModifiers::SHIFT, KeyCode::Char('L')) => {
                app.move_probe(10, 0);
            },
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.move_probe(0, 1);
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.move_probe(0, -1);
            },

            // Features
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                app.cycle_palette();
            },
            (KeyModifiers::SHIFT, KeyCode::Char('T')) => {
                app.cycle_theme();
            },
            (KeyModifiers::NONE, KeyCode::Char('y')) => {
                app.copy_plot();
            },
            (_, KeyCode::Char('?')) => {
                app.help();
            },

            _ => {},
        }
    }
}
