use crate::animation::ease::Ease;

/// Whether a window stays active after its duration has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WindowKind {
    /// Active from `start` onward, holding `t = 1` once settled.
    Open,
    /// Active only inside `[start, start + duration)`.
    Closed,
}

/// A sub-interval of the current phase, derived fresh every frame from the phase time.
///
/// Windows are plain values: nothing about them survives to the next frame. The only way a
/// window's natural `t`/`active` pair is overridden is [`TimeWindow::retire`], which the cleanup
/// tracker applies once a later terminal window completes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimeWindow {
    /// Start offset from the phase origin, in seconds. Infinite for windows that never start.
    pub start: f64,
    /// Duration in seconds. Zero (or a sanitized negative) means an instant step.
    pub duration: f64,
    /// Normalized progress in `[0, 1]`.
    pub t: f64,
    pub active: bool,
    pub kind: WindowKind,
    /// Set when a cleanup forced this window to its terminal state.
    pub retired: bool,
}

impl TimeWindow {
    /// Resolve a window against the phase time `now`.
    pub fn resolve(now: f64, start: f64, duration: f64, kind: WindowKind) -> Self {
        let duration = sanitize_duration(duration);
        if !start.is_finite() {
            return Self::never(duration);
        }
        let t = progress(now, start, duration);
        let active = if now < 0.0 || now.is_nan() || now < start {
            false
        } else {
            match kind {
                WindowKind::Open => true,
                WindowKind::Closed => now < start + duration,
            }
        };
        Self {
            start,
            duration,
            t,
            active,
            kind,
            retired: false,
        }
    }

    /// A window anchored to something that was never reached (for example an event that no
    /// commentary placed). It never starts and has no finite end.
    pub fn never(duration: f64) -> Self {
        Self {
            start: f64::INFINITY,
            duration: sanitize_duration(duration),
            t: 0.0,
            active: false,
            kind: WindowKind::Open,
            retired: false,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    pub fn is_done(&self) -> bool {
        self.t >= 1.0
    }

    pub fn has_started(&self) -> bool {
        self.t > 0.0 || self.active || self.retired
    }

    /// Force the terminal state: fully resolved and no longer active.
    pub fn retire(&mut self) {
        self.t = 1.0;
        self.active = false;
        self.retired = true;
    }

    /// Progress mapped through an easing curve.
    pub fn eased(&self, ease: Ease) -> f64 {
        ease.apply(self.t)
    }
}

/// `clamp((now - start) / duration, 0, 1)`, with zero durations treated as an instant step at
/// `start` and negative `now` treated as "before everything".
pub fn progress(now: f64, start: f64, duration: f64) -> f64 {
    if now.is_nan() || now < 0.0 || !start.is_finite() {
        return 0.0;
    }
    let duration = sanitize_duration(duration);
    if duration <= 0.0 {
        return if now >= start { 1.0 } else { 0.0 };
    }
    ((now - start) / duration).clamp(0.0, 1.0)
}

fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/window.rs"]
mod tests;
