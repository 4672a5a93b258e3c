//! Application state shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use skyward_core::commands::{ControlInput, SimCommand};
use skyward_core::events::SimulationEvents;
use skyward_core::state::FlightSnapshot;
use skyward_core::types::WorldObjectDesc;
use skyward_sim::SimConfig;

use crate::game_loop;

/// Messages sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Latest pilot input; held until the next one arrives.
    Input(ControlInput),
    /// A discrete command to forward to the engine.
    Command(SimCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Non-empty events from one tick, as written to the output stream.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub time_secs: f64,
    pub events: SimulationEvents,
}

/// Handles to a running game loop.
///
/// - `command_tx` sits behind a `Mutex` because `mpsc::Sender` is not `Sync`
/// - `latest_snapshot` is shared with the loop thread for synchronous polling
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<FlightSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread with `world` registered in order.
    pub fn start(
        &self,
        config: SimConfig,
        world: Vec<WorldObjectDesc>,
        reports: mpsc::Sender<TickReport>,
    ) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            return Err("Simulation already running".into());
        }

        let cmd_tx =
            game_loop::spawn_game_loop(config, world, self.latest_snapshot.clone(), reports)
                .map_err(|e| format!("Failed to spawn game loop: {e}"))?;

        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        *tx_lock = Some(cmd_tx);
        *running = true;
        Ok(())
    }

    pub fn send(&self, command: LoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {e}")),
            None => Err("Simulation not started".into()),
        }
    }

    /// Latest snapshot published by the loop, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<FlightSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    /// Ask the loop to exit. Safe to call when not running.
    pub fn stop(&self) -> Result<(), String> {
        let mut running = self.running.lock().map_err(|e| e.to_string())?;
        if *running {
            self.send(LoopCommand::Shutdown)?;
            *running = false;
        }
        Ok(())
    }
}
