//! Game loop: drives the flight engine from a frame clock.
//!
//! `spawn_game_loop` runs the engine on its own thread at `FRAME_RATE`, feeding
//! it the measured frame delta. Inputs and commands arrive via `mpsc` channel.
//! Non-empty events go out as `TickReport`s and the latest snapshot is stored in
//! shared state for polling. `run_scripted` steps the same engine at a fixed
//! delta as fast as possible, for headless runs.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use skyward_core::commands::ControlInput;
use skyward_core::constants::FRAME_RATE;
use skyward_core::state::FlightSnapshot;
use skyward_core::types::WorldObjectDesc;
use skyward_sim::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::{LoopCommand, TickReport};

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Build an engine and register the world in order.
pub fn build_engine(config: SimConfig, world: Vec<WorldObjectDesc>) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    let ids = engine.register_world_objects(world);
    tracing::info!(objects = ids.len(), "world registered");
    engine
}

/// Spawn the game loop in a new thread.
///
/// Returns the command sender for the driver to use.
pub fn spawn_game_loop(
    config: SimConfig,
    world: Vec<WorldObjectDesc>,
    latest_snapshot: Arc<Mutex<Option<FlightSnapshot>>>,
    reports: mpsc::Sender<TickReport>,
) -> io::Result<mpsc::Sender<LoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    std::thread::Builder::new()
        .name("skyward-game-loop".into())
        .spawn(move || {
            let engine = build_engine(config, world);
            run_game_loop(engine, cmd_rx, &latest_snapshot, &reports);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FlightSnapshot>>,
    reports: &mpsc::Sender<TickReport>,
) {
    let mut input = ControlInput::default();
    let mut last_frame = Instant::now();
    let mut next_tick_time = last_frame;

    loop {
        // 1. Drain all pending messages
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Input(latest)) => input = latest,
                Ok(LoopCommand::Command(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the measured frame delta (the engine clamps hitches)
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f64();
        last_frame = now;
        let events = engine.advance(dt, &input);

        // 3. Report anything noteworthy
        if !events.is_empty() {
            let time = engine.time();
            let _ = reports.send(TickReport {
                tick: time.tick,
                time_secs: time.elapsed_secs,
                events,
            });
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(engine.snapshot());
        }

        // 5. Sleep until the next frame
        next_tick_time += FRAME_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Fly `engine` under `autopilot` for `seconds` of simulation time at a fixed `dt`.
///
/// Every non-empty tick is handed to `on_report`. Returns the final snapshot.
pub fn run_scripted(
    engine: &mut SimulationEngine,
    autopilot: &Autopilot,
    seconds: f64,
    dt: f64,
    mut on_report: impl FnMut(TickReport),
) -> FlightSnapshot {
    let frames = (seconds / dt).ceil().max(0.0) as u64;
    for _ in 0..frames {
        let t = engine.time().elapsed_secs;
        let input = autopilot.input(t, &engine.state());
        let events = engine.advance(dt, &input);
        if !events.is_empty() {
            let time = engine.time();
            on_report(TickReport {
                tick: time.tick,
                time_secs: time.elapsed_secs,
                events,
            });
        }
    }
    engine.snapshot()
}
