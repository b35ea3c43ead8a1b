mod app;
mod config;
mod event;
mod game;
mod logging;
mod ui;

use std::io::{self, Stdout};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::App;
use config::{Args, Config, Params};
use event::{Event, EventHandler};
use game::input::{Hold, KeyTracker};
use game::GameSession;

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path, &args.log_level) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    // Key releases are only reported with the enhancement protocol.
    let releases = matches!(supports_keyboard_enhancement(), Ok(true));
    if releases {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("enabling key release events")?;
    } else {
        warn!(
            "terminal does not report key releases, holding keys for {} ms ({} ms after a repeat)",
            Params::KEY_FIRST_HOLD_MS,
            Params::KEY_REPEAT_HOLD_MS
        );
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;
    terminal.clear()?;

    let result = run(&mut terminal, &args, releases);

    // Restore terminal
    if releases {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Term, args: &Args, releases: bool) -> anyhow::Result<()> {
    let hold = (!releases).then(Hold::default);
    let session = GameSession::new(Config::default(), args.seed);
    let mut app = App::new(session, KeyTracker::new(hold));

    let size = terminal.size().context("reading terminal size")?;
    app.on_resize(size.width, size.height);
    info!("court ready at {}x{} cells", size.width, size.height);

    let event_handler = EventHandler::new(Params::TICK_MS);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        match event_handler.next()? {
            Event::Tick(now) => app.on_tick(now),
            Event::Key(key) => app.on_key(key, Instant::now()),
            Event::Resize(width, height) => app.on_resize(width, height),
        }

        if app.should_quit {
            break;
        }
    }

    info!("quit");
    Ok(())
}
