//! SKYWARD headless driver.
//!
//! Wires the flight core to a seeded demo world, a scripted pilot, and a
//! frame-clocked game loop, and streams events out as JSON lines.

pub mod autopilot;
pub mod cli;
pub mod game_loop;
pub mod state;
pub mod world;

pub use skyward_core as core;
