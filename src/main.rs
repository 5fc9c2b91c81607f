//! Balls Game headless runner
//!
//! Plays a seeded autoplay game through the same tick/clock path a browser
//! shell would use, saving after every round.
//!
//! Usage: `balls-game [seed] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use balls_game::persistence::{FileSlot, SAVE_KEY, autosave, load_game};
    use balls_game::platform::TickClock;
    use balls_game::sim::{GameEvent, LaunchVector, TickInput};
    use balls_game::GameConfig;

    /// Simulated host frame length
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop after this many rounds even if the game is still going
    const MAX_ROUNDS: u32 = 500;
    /// Fast-forward any round still running after this many frames
    const FAST_FORWARD_AFTER: u32 = 120;

    balls_game::init_logging();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Config {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut slot = FileSlot::new(std::env::temp_dir().join(format!("{}.json", SAVE_KEY)));
    let mut state = load_game(&slot, config, seed);
    let mut clock = TickClock::default();
    let mut aim = Pcg32::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

    log::info!("Autoplay seed {} (save at {})", seed, slot.path().display());

    let mut rounds = 0;
    while rounds < MAX_ROUNDS && !state.is_game_over() {
        let mut input = TickInput {
            launch: Some(LaunchVector::new(
                aim.random_range(-100.0..100.0),
                aim.random_range(20.0..100.0),
            )),
            ..Default::default()
        };

        let mut frames = 0;
        loop {
            if frames == FAST_FORWARD_AFTER {
                input.fast_forward = true;
            }
            let events = clock.frame(&mut state, &mut input, FRAME_MS);
            if let Err(err) = autosave(&mut slot, &state, &events) {
                log::warn!("Autosave failed: {}", err);
            }
            frames += 1;
            if events.iter().any(|e| matches!(e, GameEvent::LevelAdvanced { .. })) {
                log::debug!("Round {} settled at level {}", rounds + 1, state.level);
            }
            // Launch consumed and every ball back on the floor
            if input.launch.is_none() && !state.round.is_running() {
                break;
            }
        }
        rounds += 1;
    }

    log::info!(
        "Finished after {} rounds: level {}, {} balls, game over: {}",
        rounds,
        state.level,
        state.round.ball_count(),
        state.is_game_over()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    balls_game::init_logging();
}
