//! skyward: fly the simulation core headlessly and stream events as JSON lines.
//!
//! Usage:
//!   skyward --seconds 60 --seed 7 --fire
//!   SKYWARD_TUNING=tuning.json skyward --realtime

use std::process;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use serde::Serialize;

use skyward_app::autopilot::Autopilot;
use skyward_app::cli::{self, Options};
use skyward_app::game_loop::{self, FRAME_DURATION};
use skyward_app::state::{AppState, LoopCommand, TickReport};
use skyward_app::world::{self, WorldSettings};
use skyward_core::config::FlightTuning;
use skyward_core::constants::NOMINAL_DT;
use skyward_core::state::FlightSnapshot;
use skyward_sim::SimConfig;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match Options::parse(&args, std::env::var(cli::TUNING_ENV).ok()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}\n");
            eprint!("{}", cli::usage());
            process::exit(1);
        }
    };
    if options.help {
        eprint!("{}", cli::usage());
        return;
    }

    let tuning = match &options.tuning {
        Some(path) => match FlightTuning::load(path) {
            Ok(tuning) => {
                tracing::info!(path = %path.display(), "tuning loaded");
                tuning
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "invalid tuning file");
                process::exit(1);
            }
        },
        None => FlightTuning::default(),
    };

    let settings = WorldSettings {
        ground_level: tuning.physics.ground_level,
        ..Default::default()
    };
    let config = SimConfig {
        tuning,
        ..Default::default()
    };
    let objects = world::populate(options.seed, &settings);
    let autopilot = Autopilot {
        fire: options.fire,
        ..Default::default()
    };

    let final_snapshot = if options.realtime {
        run_realtime(config, objects, &autopilot, options.seconds)
    } else {
        let mut engine = game_loop::build_engine(config, objects);
        Some(game_loop::run_scripted(
            &mut engine,
            &autopilot,
            options.seconds,
            NOMINAL_DT,
            |report| emit(&report),
        ))
    };

    match final_snapshot {
        Some(snapshot) => {
            tracing::info!(
                t = snapshot.time.elapsed_secs,
                altitude_ft = snapshot.hud.altitude_feet,
                airspeed_kt = snapshot.hud.airspeed_knots,
                objects = snapshot.world_object_count,
                "flight finished"
            );
            emit(&snapshot);
        }
        None => process::exit(1),
    }
}

/// Drive the loop thread for `seconds` of wall time, feeding autopilot input each frame.
fn run_realtime(
    config: SimConfig,
    objects: Vec<skyward_core::types::WorldObjectDesc>,
    autopilot: &Autopilot,
    seconds: f64,
) -> Option<FlightSnapshot> {
    let state = AppState::new();
    let (report_tx, report_rx) = mpsc::channel::<TickReport>();
    if let Err(e) = state.start(config, objects, report_tx) {
        tracing::error!(error = %e, "failed to start game loop");
        return None;
    }

    let deadline = Instant::now() + Duration::from_secs_f64(seconds);
    while Instant::now() < deadline {
        if let Ok(Some(snapshot)) = state.snapshot() {
            let input = autopilot.input(snapshot.time.elapsed_secs, &snapshot.aircraft);
            if let Err(e) = state.send(LoopCommand::Input(input)) {
                tracing::error!(error = %e, "game loop stopped unexpectedly");
                break;
            }
        }
        for report in report_rx.try_iter() {
            emit(&report);
        }
        std::thread::sleep(FRAME_DURATION);
    }

    if let Err(e) = state.stop() {
        tracing::warn!(error = %e, "failed to stop game loop");
    }
    for report in report_rx.try_iter() {
        emit(&report);
    }
    state.snapshot().ok().flatten()
}

fn emit(value: &impl Serialize) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize output"),
    }
}
