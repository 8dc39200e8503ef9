use std::collections::BTreeMap;

use crate::timeline::commentary::{CommentaryRes, TimeInfo};
use crate::timeline::tools::ScriptOutcome;
use crate::walkthrough::phase::{Phase, PhaseGroup, flatten, phase_list, phase_to_group};

/// The playback cursor shared by the frame driver and UI controls.
///
/// `running` is the only state flag: stopped when false, running when true.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WalkthroughState {
    pub phase: Phase,
    /// Seconds elapsed within the phase.
    pub time: f64,
    pub running: bool,
    pub last_break_time: Option<f64>,
    /// Length of the phase as measured by the most recent script execution. Infinite until the
    /// current phase has run at least once.
    pub phase_length: f64,
    /// Scrub markers collected during the most recent script execution.
    pub times: Vec<TimeInfo>,
    pub commentary: Option<CommentaryRes>,
    /// Free-form per-phase memo for scripts.
    pub phase_data: BTreeMap<Phase, serde_json::Value>,
    pub phase_list: Vec<PhaseGroup>,
}

impl WalkthroughState {
    pub fn new(phase: Phase, time: f64) -> Self {
        Self {
            phase,
            time: sanitize_time(time),
            running: false,
            last_break_time: None,
            phase_length: f64::INFINITY,
            times: Vec::new(),
            commentary: None,
            phase_data: BTreeMap::new(),
            phase_list: phase_list(),
        }
    }

    /// Advance the clock by `dt` seconds while running, stopping at the phase end.
    /// Returns the time before the tick.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let prev = self.time;
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return prev;
        }
        let next = self.time + dt;
        if next >= self.phase_length {
            self.time = self.phase_length.max(0.0);
            self.running = false;
            self.last_break_time = Some(self.time);
            tracing::debug!(phase = %self.phase, time = self.time, "reached phase end");
        } else {
            self.time = next;
        }
        prev
    }

    /// Start playing. Playing a finished phase restarts it from the beginning.
    pub fn play(&mut self) {
        if self.phase_length > 0.0 && self.time >= self.phase_length {
            self.time = 0.0;
        }
        self.running = true;
        tracing::debug!(phase = %self.phase, time = self.time, "play");
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.last_break_time = Some(self.time);
        tracing::debug!(phase = %self.phase, time = self.time, "pause");
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Switch to `phase` at time zero, stopped. The length is unknown until the next frame.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.time = 0.0;
        self.running = false;
        self.last_break_time = None;
        self.phase_length = f64::INFINITY;
        tracing::debug!(%phase, "set phase");
    }

    /// Jump to `time`, clamped to `[0, phase_length]`. Playback state is unchanged.
    pub fn scrub(&mut self, time: f64) {
        self.time = sanitize_time(time).min(self.phase_length.max(0.0));
    }

    pub fn next_phase(&mut self) -> Option<Phase> {
        let order: Vec<Phase> = flatten(&self.phase_list).collect();
        let idx = order.iter().position(|&p| p == self.phase)?;
        let next = *order.get(idx + 1)?;
        self.set_phase(next);
        Some(next)
    }

    pub fn prev_phase(&mut self) -> Option<Phase> {
        let order: Vec<Phase> = flatten(&self.phase_list).collect();
        let idx = order.iter().position(|&p| p == self.phase)?;
        let prev = *order.get(idx.checked_sub(1)?)?;
        self.set_phase(prev);
        Some(prev)
    }

    pub fn group(&self) -> Option<&PhaseGroup> {
        phase_to_group(&self.phase_list, self.phase)
    }

    /// Clear the per-frame outputs before a script runs.
    pub(crate) fn begin_frame(&mut self) {
        self.times.clear();
        self.commentary = None;
        self.phase_length = 0.0;
    }

    /// Take the measurements of a script run. A time that moved past the end before the phase was
    /// measured is clamped here, stopping playback.
    pub(crate) fn absorb(&mut self, outcome: ScriptOutcome) {
        self.phase_length = outcome.phase_length;
        if self.time > self.phase_length {
            self.time = self.phase_length;
            if self.running {
                self.running = false;
                self.last_break_time = Some(self.time);
                tracing::debug!(phase = %self.phase, time = self.time, "reached phase end");
            }
        }
        self.times = outcome.times;
        self.commentary = outcome.commentary;
    }
}

fn sanitize_time(t: f64) -> f64 {
    if t.is_finite() && t > 0.0 { t } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/walkthrough/state.rs"]
mod tests;
