use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::assets::{AssetStore, DEFAULT_ASSET_DIR};
use space_invaders::config::GameConfig;
use space_invaders::display;
use space_invaders::error::GameError;
use space_invaders::game::{GameLoop, Phase};
use space_invaders::input::{InputEvent, KeyTracker};
use space_invaders::logging;

#[derive(Parser, Debug)]
#[command(name = "space_invaders", about = "Shoot the falling aliens before they reach you")]
struct Cli {
    /// Directory holding player.png, laser.png, alien.png and background.png
    #[arg(long, default_value = DEFAULT_ASSET_DIR)]
    assets: PathBuf,

    /// TOML file overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for alien positions and speeds (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Drain all pending terminal events (non-blocking).  The flag is false once
/// the input thread has gone away.
fn drain_events(rx: &mpsc::Receiver<Event>) -> (Vec<Event>, bool) {
    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(ev) => events.push(ev),
            Err(mpsc::TryRecvError::Empty) => return (events, true),
            Err(mpsc::TryRecvError::Disconnected) => return (events, false),
        }
    }
}

fn sleep_rest_of_frame(frame_start: Instant, frame_budget: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame_budget {
        thread::sleep(frame_budget - elapsed);
    }
}

/// Drives one session until the game-over screen is acknowledged.
fn run<W: Write>(
    out: &mut W,
    assets: &AssetStore,
    game: &mut GameLoop<StdRng>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_budget = game.world().config().frame_duration();
    let mut keys = KeyTracker::default();
    let mut frame: u64 = 0;

    while game.phase() == Phase::Running {
        let frame_start = Instant::now();
        frame += 1;

        let (raw, _) = drain_events(rx);
        let events: Vec<InputEvent> = raw.iter().filter_map(|ev| keys.process(ev, frame)).collect();

        let (phase, _) = game.tick(events, &keys.snapshot(frame));
        if phase == Phase::Running {
            let (cols, rows) = terminal::size()?;
            display::render(out, assets, game.world(), cols, rows)?;
        }

        sleep_rest_of_frame(frame_start, frame_budget);
    }

    // ── Game over: wait for a fresh key press ─────────────────────────────────
    // Whatever was queued during the final frame belongs to the session, not
    // to the acknowledgement; it only refreshes the held-key state.
    for ev in drain_events(rx).0 {
        keys.process(&ev, frame);
    }

    let (cols, rows) = terminal::size()?;
    display::render_game_over(out, game.world().score, cols, rows)?;
    while game.phase() == Phase::GameOver {
        let frame_start = Instant::now();
        frame += 1;

        let (raw, connected) = drain_events(rx);
        for ev in &raw {
            if let Event::Resize(cols, rows) = ev {
                display::render_game_over(out, game.world().score, *cols, *rows)?;
            }
        }
        let events: Vec<InputEvent> = raw.iter().filter_map(|ev| keys.process(ev, frame)).collect();
        game.tick(events, &keys.snapshot(frame));

        // Input thread gone; nothing left to wait for
        if !connected {
            break;
        }
        sleep_rest_of_frame(frame_start, frame_budget);
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init_to_file(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };

    // Mandatory sprites must load before the terminal is taken over
    let assets = AssetStore::load(&cli.assets, &config)?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("starting session (seed: {:?})", cli.seed);
    let mut game = GameLoop::new(config, rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &assets, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("session over, final score {}", game.world().score);
    result.map_err(GameError::from)
}
