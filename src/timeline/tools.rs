use crate::foundation::core::Vec3;
use crate::program::camera::Camera;
use crate::timeline::cleanup::cleanup;
use crate::timeline::commentary::{
    CommentaryPart, CommentaryRef, CommentaryRes, EventId, EventRegistry, TimeInfo,
};
use crate::timeline::window::{TimeWindow, WindowKind};

/// Snapshot of the playback clock handed to a phase script.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    /// Phase time for this frame.
    pub now: f64,
    /// Phase time before this frame's tick.
    pub prev: f64,
    pub running: bool,
}

/// Timing primitives for one execution of a phase script.
///
/// A fresh `PhaseTools` is built every frame: windows, events and commentary all derive from
/// `clock.now` and nothing is carried over. While the script declares windows the tools track the
/// largest finite end time, which becomes the phase length.
#[derive(Debug)]
pub struct PhaseTools {
    clock: FrameClock,
    registry: EventRegistry,
    phase_length: f64,
    windows_declared: usize,
}

/// What a script execution leaves behind for the walkthrough state.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptOutcome {
    pub phase_length: f64,
    pub times: Vec<TimeInfo>,
    pub commentary: Option<CommentaryRes>,
    pub windows_declared: usize,
}

impl PhaseTools {
    pub fn new(clock: FrameClock, chars_per_sec: f64) -> Self {
        Self {
            clock,
            registry: EventRegistry::new(clock.now, chars_per_sec),
            phase_length: 0.0,
            windows_declared: 0,
        }
    }

    pub fn now(&self) -> f64 {
        self.clock.now
    }

    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    pub fn phase_length(&self) -> f64 {
        self.phase_length
    }

    /// Window starting `start` seconds after the phase origin.
    pub fn at_time(&mut self, start: f64, duration: f64) -> TimeWindow {
        let w = TimeWindow::resolve(self.clock.now, start, duration, WindowKind::Open);
        self.track(&w);
        w
    }

    /// Window chained after `prev`: starts at `prev.start + prev.duration + gap`.
    pub fn after_time(&mut self, prev: &TimeWindow, gap: f64, duration: f64) -> TimeWindow {
        let gap = if gap.is_finite() { gap } else { 0.0 };
        self.at_time(prev.start + prev.duration + gap, duration)
    }

    /// Instant window anchored to an event's resolved time. Unresolved events give a window that
    /// never starts.
    pub fn at_event(&mut self, event: EventId) -> TimeWindow {
        match self.registry.event_time(event) {
            Some(t) => self.at_time(t, 0.0),
            None => {
                self.windows_declared += 1;
                TimeWindow::never(0.0)
            }
        }
    }

    /// The same window, but active only inside `[start, start + duration)`.
    pub fn closed(&self, w: TimeWindow) -> TimeWindow {
        if w.retired {
            return w;
        }
        TimeWindow::resolve(self.clock.now, w.start, w.duration, WindowKind::Closed)
    }

    /// Retire `earlier` once `terminal` completes. See [`cleanup`].
    pub fn cleanup<'a>(
        &mut self,
        terminal: &TimeWindow,
        earlier: impl IntoIterator<Item = &'a mut TimeWindow>,
    ) -> usize {
        cleanup(terminal, earlier)
    }

    /// Declare a named event to be placed into commentary. `dwell` pauses the reading cursor
    /// after the event's label.
    pub fn c_str(&mut self, label: impl Into<String>, dwell: f64) -> EventId {
        self.registry.declare(label, dwell)
    }

    pub fn event_time(&self, event: EventId) -> Option<f64> {
        self.registry.event_time(event)
    }

    /// Start the phase's commentary at the phase origin.
    pub fn commentary(&mut self, parts: impl IntoIterator<Item = CommentaryPart>) -> CommentaryRef {
        let c = self.registry.commentary(0.0, parts);
        self.track_end(c.end);
        c
    }

    /// Continue `parent` with another paragraph.
    pub fn commentary_para(
        &mut self,
        parent: CommentaryRef,
        parts: impl IntoIterator<Item = CommentaryPart>,
    ) -> CommentaryRef {
        let c = self.registry.commentary_para(parent, parts);
        self.track_end(c.end);
        c
    }

    /// Request a camera move on the frame where `trigger` first becomes active during playback.
    ///
    /// Scrubbing or replaying a paused frame never re-issues the target, so the camera stays
    /// under user control outside of playback. Playing from a scrubbed position past `trigger`
    /// leaves the camera where the user put it.
    pub fn move_camera_to(
        &self,
        camera: &mut Camera,
        trigger: &TimeWindow,
        center: Vec3,
        angle: Vec3,
    ) -> bool {
        if !self.crossed(trigger) {
            return false;
        }
        camera.center_desired = Some(center);
        camera.angle_desired = Some(angle);
        tracing::debug!(?center, ?angle, "camera target requested");
        true
    }

    /// True on the single frame whose tick carried the clock across `w.start` during playback.
    pub fn crossed(&self, w: &TimeWindow) -> bool {
        let FrameClock { now, prev, running } = self.clock;
        if !running || !w.start.is_finite() || now <= prev || w.start > now {
            return false;
        }
        if w.start <= 0.0 {
            prev <= 0.0
        } else {
            prev < w.start
        }
    }

    pub fn finish(self) -> ScriptOutcome {
        let (times, commentary) = self.registry.into_parts();
        ScriptOutcome {
            phase_length: self.phase_length,
            times,
            commentary,
            windows_declared: self.windows_declared,
        }
    }

    fn track(&mut self, w: &TimeWindow) {
        self.windows_declared += 1;
        self.track_end(w.end());
    }

    fn track_end(&mut self, end: f64) {
        if end.is_finite() {
            self.phase_length = self.phase_length.max(end);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/tools.rs"]
mod tests;
