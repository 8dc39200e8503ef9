use crate::program::saved::SavedState;
use crate::program::state::ProgramState;
use crate::timeline::tools::{FrameClock, PhaseTools};
use crate::walkthrough::scripts::WalkthroughArgs;

/// Advance the phase clock by `dt` seconds and run the current phase's script against the
/// freshly generated layout.
///
/// The snapshot is written before the script runs, so it records the time this frame renders.
#[tracing::instrument(skip(state), fields(phase = %state.walkthrough.phase))]
pub fn run_walkthrough(state: &mut ProgramState, dt: f64) {
    let prev = state.walkthrough.tick(dt);
    let now = state.walkthrough.time;

    state.saved = SavedState {
        phase: state.walkthrough.phase,
        phase_time: now,
        camera: state.camera.clone(),
    };

    state.walkthrough.begin_frame();
    let clock = FrameClock {
        now,
        prev,
        // The tick only moves time forward during playback, including the frame that stops at
        // the phase end.
        running: now > prev,
    };
    let mut tools = PhaseTools::new(clock, state.chars_per_sec);

    let phase = state.walkthrough.phase;
    let mut args = WalkthroughArgs {
        layout: &mut state.layout,
        render: &mut state.render,
        camera: &mut state.camera,
        tools: &mut tools,
        phase_data: &mut state.walkthrough.phase_data,
    };
    if !state.registry.dispatch(phase, &mut args) {
        tracing::debug!(%phase, "no script registered");
    }

    let outcome = tools.finish();
    tracing::trace!(
        phase_length = outcome.phase_length,
        windows = outcome.windows_declared,
        "script finished"
    );
    state.walkthrough.absorb(outcome);
}
