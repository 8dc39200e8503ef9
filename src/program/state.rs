use crate::foundation::error::WalkthroughResult;
use crate::layout::gpt::build_layout;
use crate::layout::model::{Layout, ModelData, ModelShape};
use crate::program::camera::Camera;
use crate::program::config::WalkthroughConfig;
use crate::program::fingerprint::{FrameFingerprint, fingerprint_frame};
use crate::program::saved::SavedState;
use crate::render::state::RenderState;
use crate::timeline::commentary::TimeInfo;
use crate::walkthrough::phase::Phase;
use crate::walkthrough::registry::PhaseRegistry;
use crate::walkthrough::run::run_walkthrough;
use crate::walkthrough::state::WalkthroughState;

/// Everything the frame driver owns. Callers hold it and pass it to [`run_program`].
#[derive(Debug)]
pub struct ProgramState {
    pub render: RenderState,
    pub walkthrough: WalkthroughState,
    pub camera: Camera,
    pub layout: Layout,
    pub shape: ModelShape,
    pub model: Option<ModelData>,
    /// Snapshot of the playback position, rewritten every frame.
    pub saved: SavedState,
    pub chars_per_sec: f64,
    pub(crate) registry: PhaseRegistry,
}

/// What one frame produced, in a form convenient for hosts and traces.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameSummary {
    pub phase: Phase,
    pub time: f64,
    pub running: bool,
    pub phase_length: f64,
    pub commentary: Option<String>,
    pub fingerprint: FrameFingerprint,
    pub draw_count: usize,
    pub times: Vec<TimeInfo>,
}

impl ProgramState {
    /// Build the program state, restoring phase, time and camera from `saved` when given.
    ///
    /// One frame is run with a zero delta so the phase length is known before playback starts.
    /// A restored time past the end of the phase is clamped by that frame.
    pub fn new(config: &WalkthroughConfig, saved: Option<SavedState>) -> WalkthroughResult<Self> {
        config.validate()?;
        let model = config.model()?;
        let (phase, time, camera) = match saved {
            Some(s) => (s.phase, s.phase_time, s.camera),
            None => (config.phase, 0.0, Camera::default()),
        };
        let walkthrough = WalkthroughState::new(phase, time);
        let registry = PhaseRegistry::builtin(&walkthrough.phase_list)?;
        let layout = build_layout(config.shape, model.as_ref());

        let mut state = Self {
            render: RenderState::default(),
            saved: SavedState {
                phase,
                phase_time: walkthrough.time,
                camera: camera.clone(),
            },
            walkthrough,
            camera,
            layout,
            shape: config.shape,
            model,
            chars_per_sec: config.chars_per_sec,
            registry,
        };
        run_program(&mut state, 0.0);
        Ok(state)
    }

    /// Switch phase and run a zero-delta frame so the new phase's length is measured.
    pub fn set_phase(&mut self, phase: Phase) -> FrameSummary {
        self.walkthrough.set_phase(phase);
        run_program(self, 0.0)
    }

    /// Attach (or drop) model data. Takes effect on the next frame.
    pub fn set_model(&mut self, model: Option<ModelData>) -> WalkthroughResult<()> {
        if let Some(m) = &model {
            ModelData::new(&self.shape, m.input_buf.clone())?;
        }
        self.model = model;
        Ok(())
    }
}

/// Run one frame: reset render buffers, ease the camera, regenerate the layout and run the
/// walkthrough. The layout and render state are left for the renderer to consume.
pub fn run_program(state: &mut ProgramState, dt: f64) -> FrameSummary {
    state.render.reset();
    if state.walkthrough.running {
        state.camera.move_to_desired(dt);
    }
    state.layout = build_layout(state.shape, state.model.as_ref());

    run_walkthrough(state, dt);

    let wt = &state.walkthrough;
    FrameSummary {
        phase: wt.phase,
        time: wt.time,
        running: wt.running,
        phase_length: wt.phase_length,
        commentary: wt.commentary.as_ref().map(|c| c.visible.clone()),
        fingerprint: fingerprint_frame(&state.layout, &state.render, wt),
        draw_count: state.render.draw.len(),
        times: wt.times.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/state.rs"]
mod tests;
