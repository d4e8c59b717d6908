//! Lane Hopper entry point
//!
//! The real frontend (canvas drawing, keyboard wiring, sprite decoding) lives
//! outside this crate. This binary runs a headless demo session against the
//! null canvas with a scripted input pattern, mostly useful for watching the
//! reset protocol in the logs and for profiling the sim.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info, warn};

use lane_hopper::consts::SIM_DT;
use lane_hopper::gfx::{FixedSprites, NullCanvas};
use lane_hopper::sim::{Direction, Phase, Session};
use lane_hopper::Tuning;

/// Simulated seconds the demo runs for
const DEMO_SECS: u32 = 120;

fn main() {
    env_logger::init();

    let tuning = load_tuning();
    let seed = match std::env::var("SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };

    let sprites = FixedSprites::stock();
    let Some(mut session) = Session::new(seed, tuning, &sprites) else {
        error!("could not build a session from the stock sprite table");
        std::process::exit(1);
    };

    let mut canvas = NullCanvas::default();
    let mut resets = 0u32;
    let total_ticks = DEMO_SECS * 60;
    for tick_no in 0..total_ticks {
        // Scripted input: hold up in bursts, drift left now and then
        match tick_no % 180 {
            0 => session.handle_input(Direction::Up, true),
            120 => session.handle_input(Direction::Up, false),
            60 => session.handle_input(Direction::Left, true),
            90 => session.handle_input(Direction::Left, false),
            _ => {}
        }

        session.tick(SIM_DT);
        if matches!(session.phase(), Phase::ResetPending { .. }) {
            resets += 1;
        }
        session.render(&mut canvas);
    }

    info!(
        "demo done: seed {seed}, {} ticks, {resets} resets",
        session.time_ticks()
    );
}

/// Tuning comes from the file named in the first CLI argument, if any
fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::load_json(&json) {
            Ok(tuning) => tuning,
            Err(err) => {
                warn!("bad tuning file {path}: {err}; using defaults");
                Tuning::default()
            }
        },
        Err(err) => {
            warn!("cannot read tuning file {path}: {err}; using defaults");
            Tuning::default()
        }
    }
}
