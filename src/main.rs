//! Arithmancer - Terminal Multiplication Combat Trainer
//!
//! Terminal host: CLI commands, log setup, and the crossterm event loop
//! that feeds wall-clock time and key events into the game engine.

use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use arithmancer::audio::TerminalBell;
use arithmancer::build_info;
use arithmancer::core::constants::FRAME_MS;
use arithmancer::core::engine::GameEngine;
use arithmancer::curriculum::Curriculum;
use arithmancer::input::{handle_key, InputResult};
use arithmancer::storage::{ProgressStore, SaveFile, Settings, StorageError};
use arithmancer::ui::draw_ui;
use arithmancer::ui::state::UiState;

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "reset" => match run_reset_command() {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Could not reset progress: {}", e);
                    std::process::exit(1);
                }
            },
            "--version" | "-v" => {
                println!(
                    "arithmancer {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Arithmancer - Terminal Multiplication Combat Trainer\n");
                println!("Usage: arithmancer [command]\n");
                println!("Commands:");
                println!("  reset      Wipe saved progress");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'arithmancer --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();
    tracing::info!("Arithmancer starting...");

    let mut settings = Settings::load();

    let store = match SaveFile::new() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Cannot access the save directory: {}", e);
            std::process::exit(1);
        }
    };

    let mut engine = GameEngine::new(
        Curriculum::from_clock(),
        UiState::new(),
        store,
        TerminalBell::new(settings.sound_enabled),
    );
    engine.boot();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let mut last_frame = Instant::now();
    loop {
        let dt = last_frame.elapsed().as_secs_f64();
        last_frame = Instant::now();

        engine.tick(dt);
        engine.renderer_mut().tick(dt);

        terminal.draw(|frame| draw_ui(frame, &engine))?;

        // Poll for input (~16ms non-blocking, the frame cadence)
        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    match handle_key(key_event, &mut engine) {
                        InputResult::Continue => {}
                        InputResult::ToggleSound => {
                            settings.sound_enabled = !settings.sound_enabled;
                            engine.audio_mut().set_enabled(settings.sound_enabled);
                            if let Err(e) = settings.save() {
                                tracing::warn!("Could not save settings: {}", e);
                            }
                        }
                        InputResult::Quit => break,
                    }
                }
                Event::FocusLost => engine.pause(),
                Event::FocusGained => engine.resume(),
                _ => {}
            }
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableFocusChange)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    println!("Goodbye!");

    Ok(())
}

/// Routes tracing output to a file so the alternate screen stays clean.
/// Logging is skipped entirely when no writable data directory exists.
fn init_logging() {
    let dirs = match ProjectDirs::from("", "", "arithmancer") {
        Some(dirs) => dirs,
        None => return,
    };
    if fs::create_dir_all(dirs.data_dir()).is_err() {
        return;
    }
    let file = match File::create(dirs.data_dir().join("arithmancer.log")) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("arithmancer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

/// Wipes saved progress from the command line, without entering the UI.
fn run_reset_command() -> Result<(), StorageError> {
    let mut store = SaveFile::new()?;
    store.reset()?;
    println!("Progress wiped. The next run starts at sums of 3.");
    Ok(())
}
