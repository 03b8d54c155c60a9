use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

mod app;
mod cli;
mod import;
mod launcher;
mod mnemonic;
mod model;
mod storage;
mod ui;
mod wordlist;

use app::{App, append_log, prune_log_file};
use cli::{Cli, Commands};
use model::{AppEvent, Command, Connection};
use storage::{ConnectionStore, FileStore};

/// Why the interactive UI returned control to the outer loop.
enum Outcome {
    Quit,
    Launch(Connection),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = storage::config_path(cli.config)?;
    let log_path = storage::log_path(&path);

    match cli.command {
        None => run_interactive(&path, &log_path),
        Some(Commands::Import(args)) => {
            let mut store = FileStore::open(path.clone())
                .with_context(|| format!("load config '{}'", path.display()))?;
            cli::run_import(
                &args,
                &mut store,
                wordlist::words(),
                &mut io::stdout(),
                Some(&log_path),
            )?;
            Ok(())
        }
        Some(Commands::Config) => {
            let mut store = FileStore::open(path.clone())
                .with_context(|| format!("load config '{}'", path.display()))?;
            let conn = cli::prompt_add(
                &mut io::stdin().lock(),
                &mut io::stdout(),
                &mut store,
                wordlist::words(),
            )?;
            append_log(&log_path, &format!("Connection '{}' added.", conn.name));
            println!("Config saved successfully to {}", path.display());
            Ok(())
        }
        Some(Commands::Version) => {
            println!("gsm {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_interactive(path: &Path, log_path: &Path) -> Result<()> {
    let store = FileStore::open(path.to_path_buf())
        .with_context(|| format!("load config '{}'", path.display()))?;
    prune_log_file(log_path);
    init_panic_hook();

    let dictionary = wordlist::words().to_vec();
    let mut store: Box<dyn ConnectionStore> = Box::new(store);
    loop {
        store.load().context("reload config for the UI")?;
        let mut app = App::new(store, dictionary.clone(), Some(log_path.to_path_buf()));
        let outcome = run_tui(&mut app)?;
        store = app.into_store();

        match outcome {
            Outcome::Quit => {
                println!("Exiting GSM. See you!");
                return Ok(());
            }
            Outcome::Launch(conn) => launch(store.as_mut(), &conn, log_path),
        }
    }
}

fn launch(store: &mut dyn ConnectionStore, conn: &Connection, log_path: &Path) {
    println!("{}", cli::connect_banner(conn));
    append_log(log_path, &format!("Connecting to '{}'", conn.name));
    let result = launcher::execute(conn);
    let banner = cli::disconnect_banner(conn, &result);
    println!("{banner}");
    append_log(log_path, &banner);

    match cli::record_launch(store, conn, chrono::Local::now()) {
        Ok(true) => {}
        Ok(false) => eprintln!("Connection '{}' no longer exists; usage not recorded.", conn.name),
        Err(err) => {
            eprintln!("Error recording usage for '{}': {err:#}", conn.name);
            append_log(log_path, &format!("Error recording usage: {err:#}"));
        }
    }
    println!("Returning to GSM main menu...");
}

fn run_tui(app: &mut App) -> Result<Outcome> {
    enable_raw_mode().context("enable raw mode")?;
    with_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
            let mut terminal =
                Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
            run_app(&mut terminal, app)
        },
        restore_terminal,
    )
}

/// Runs `body` and then `restore`, whether `body` succeeded or not.
fn with_restore<T>(body: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    let result = body();
    restore();
    result
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<Outcome> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    app.handle_event(AppEvent::Resize(cols, rows));

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, app))?;

        let event = match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Resize(width, height) => AppEvent::Resize(width, height),
            _ => continue,
        };
        for command in app.handle_event(event) {
            match command {
                Command::ClearScreen => terminal.clear().context("clear screen")?,
                Command::Quit => return Ok(Outcome::Quit),
                Command::Launch(conn) => return Ok(Outcome::Launch(conn)),
            }
        }
    }
}

fn init_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}
