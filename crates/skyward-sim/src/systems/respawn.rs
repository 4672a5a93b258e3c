//! Reset/respawn policy: `Flying -> ResettingScheduled -> Flying`.
//!
//! A crash schedules a one-shot reset; physics keeps running until it comes due.
//! Crashes reported while a reset is already pending are ignored, so at most
//! one timer is ever outstanding. A manual reset moves the aircraft but leaves
//! the phase alone while a timer is still queued; only the timer returns it to
//! `Flying`.

use skyward_core::enums::ResetPhase;

use crate::kinematics::KinematicState;
use crate::scheduler::{ScheduledAction, Scheduler};

#[derive(Debug, Default)]
pub struct ResetPolicy {
    phase: ResetPhase,
}

impl ResetPolicy {
    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    /// Whether new crashes should be looked for this tick.
    pub fn accepts_collisions(&self) -> bool {
        self.phase == ResetPhase::Flying
    }

    /// React to a crash at `now`. Returns `true` if a reset was scheduled.
    pub fn on_collision(&mut self, scheduler: &mut Scheduler, now: f64, delay: f64) -> bool {
        if self.phase != ResetPhase::Flying {
            return false;
        }
        scheduler.schedule(now + delay, ScheduledAction::ResetAircraft);
        self.phase = ResetPhase::ResettingScheduled;
        true
    }

    /// Put the aircraft back at the spawn pose and resume normal flight.
    ///
    /// Returns `Some(true)` when this put an airborne aircraft back on the ground.
    pub fn respawn(&mut self, state: &mut KinematicState) -> Option<bool> {
        let touched_down = reset_pose(state);
        self.phase = ResetPhase::Flying;
        touched_down
    }

    /// Reset requested from outside. `pending` is the number of queued timers;
    /// while one is outstanding the phase stays `ResettingScheduled`.
    pub fn reset_on_request(&mut self, state: &mut KinematicState, pending: usize) -> Option<bool> {
        let touched_down = reset_pose(state);
        if pending == 0 {
            self.phase = ResetPhase::Flying;
        }
        touched_down
    }
}

fn reset_pose(state: &mut KinematicState) -> Option<bool> {
    let was_on_ground = state.on_ground;
    state.reset();
    (state.on_ground && !was_on_ground).then_some(true)
}
