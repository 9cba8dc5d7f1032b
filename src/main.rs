use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use dinodash::game::{DinoGame, GameEvent, FRAME_MS};
use dinodash::highscore::ScoreStore;
use dinodash::input::{self, GameAction};
use dinodash::{build_info, ui};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "dinodash {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Dino Dash - Terminal Endless Runner\n");
                println!("Usage: dinodash\n");
                println!("Keys:");
                println!("  Space/Up/Click  Jump (restart after a crash)");
                println!("  F               Fire");
                println!("  N               Toggle night mode");
                println!("  T               Cycle speed tier");
                println!("  R               Reset best score");
                println!("  Q / Esc         Quit");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'dinodash --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let store = ScoreStore::open()?;
    let mut game = DinoGame::new(store.load());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game, &store);

    // Cleanup terminal even when the loop errored out
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    result
}

/// The host loop: draw, poll input, tick. One thread, no locking; input can
/// only interleave between ticks.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut DinoGame,
    store: &ScoreStore,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            ui::render_scene(frame, area, game);
        })?;

        // Poll briefly so rendering stays frame-paced while idle.
        if event::poll(Duration::from_millis(FRAME_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = input::map_key(key, game.phase) {
                        if apply_action(action, game, store) {
                            break;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = input::map_mouse(mouse, game.phase) {
                        if apply_action(action, game, store) {
                            break;
                        }
                    }
                }
                _ => {}
            }
        }

        let dt = last_tick.elapsed();
        if dt >= Duration::from_millis(FRAME_MS) {
            last_tick = Instant::now();
            let events = game.tick(dt.as_millis() as u64, &mut rng);
            react_to_events(&events, store);
        }
    }

    Ok(())
}

/// Apply one logical action. Returns true when the session should end.
fn apply_action(action: GameAction, game: &mut DinoGame, store: &ScoreStore) -> bool {
    match action {
        GameAction::Start => game.start(),
        GameAction::Jump => game.jump(),
        GameAction::Fire => game.fire(),
        GameAction::ToggleNightMode => game.toggle_night_mode(),
        GameAction::CycleSpeedTier => game.set_speed_tier(game.speed_tier.next()),
        GameAction::ResetBest => {
            game.reset_best();
            // Fire-and-forget: a failed write must not disturb the session.
            let _ = store.reset();
        }
        GameAction::Quit => return true,
    }
    false
}

/// React to simulation events: persist an improved best, ring the bell on
/// the noisy ones. Both are best-effort.
fn react_to_events(events: &[GameEvent], store: &ScoreStore) {
    for event in events {
        match event {
            GameEvent::GameOver {
                best,
                improved_best,
                ..
            } => {
                if *improved_best {
                    let _ = store.save(*best);
                }
                ring_bell();
            }
            GameEvent::TargetDestroyed => ring_bell(),
            _ => {}
        }
    }
}

/// Audible feedback. Failures are ignored; feedback may never interrupt the
/// loop.
fn ring_bell() {
    use std::io::Write;
    let mut stdout = io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
