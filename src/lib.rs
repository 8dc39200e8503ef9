//! Timeline engine for a scripted, frame-driven walkthrough of a transformer model.
//!
//! Every frame the host calls [`run_program`]: the phase clock advances, the block layout is
//! regenerated, and the current phase script re-derives all of its timing windows from the
//! phase time alone before mutating the layout and the render display list. Nothing about an
//! animation survives between frames except the clock, which is what makes scrubbing, pausing
//! and restarting deterministic.
//!
//! - Timing: [`PhaseTools`], [`TimeWindow`], [`cleanup`], commentary events
//! - Playback: [`WalkthroughState`], [`PhaseRegistry`], [`Phase`]
//! - Layout: [`Layout`] arena with [`split_grid`] / [`find_sub_blocks`] / [`hide_from_block`]
//! - Output: [`RenderState`] draw commands and a [`FrameFingerprint`] per frame
#![forbid(unsafe_code)]

pub(crate) mod animation;
pub(crate) mod foundation;
pub(crate) mod layout;
pub(crate) mod program;
pub(crate) mod render;
pub(crate) mod timeline;
pub(crate) mod walkthrough;

pub use crate::animation::ease::Ease;
pub use crate::foundation::core::{Dim, Vec3, Vec4};
pub use crate::foundation::error::{WalkthroughError, WalkthroughResult};
pub use crate::foundation::math::{Lerp, cell_index, lerp, lerp_smoothstep, one_hot_array, smoothstep};

pub use crate::timeline::cleanup::cleanup;
pub use crate::timeline::commentary::{
    CommentaryEvent, CommentaryPart, CommentaryRef, CommentaryRes, CommentarySegment, EventId,
    EventRegistry, TimeInfo,
};
pub use crate::timeline::tools::{FrameClock, PhaseTools, ScriptOutcome};
pub use crate::timeline::window::{TimeWindow, WindowKind, progress};

pub use crate::layout::block::{
    Block, BlockAccess, BlockDeps, BlockId, BlockKind, DotDep, IdxSource, IndexMap, Qkv, SubGrid,
    TensorRef,
};
pub use crate::layout::gpt::gen_gpt_layout;
pub use crate::layout::grid::{find_sub_blocks, hide_from_block, split_grid};
pub use crate::layout::model::{
    HeadLayout, LayerNormLayout, Layout, ModelData, ModelShape, TransformerLayout,
};

pub use crate::render::annotations::{
    add_source_dest_curve_line, block_dimension, block_index, draw_text_on_model, draw_thread,
    index_mapping_lines, render_indexes,
};
pub use crate::render::state::{
    DimStyle, DrawCmd, RenderState, TextAlignHoriz, TextAlignVert, TextOpts, TokenColors,
    dim_style_color,
};

pub use crate::program::camera::Camera;
pub use crate::program::config::{DEFAULT_CHARS_PER_SEC, WalkthroughConfig};
pub use crate::program::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use crate::program::saved::SavedState;
pub use crate::program::state::{FrameSummary, ProgramState, run_program};

pub use crate::walkthrough::phase::{
    Phase, PhaseGroup, PhaseGroupId, PhaseInfo, phase_list, phase_to_group,
};
pub use crate::walkthrough::registry::PhaseRegistry;
pub use crate::walkthrough::run::run_walkthrough;
pub use crate::walkthrough::scripts::{PhaseScript, WalkthroughArgs};
pub use crate::walkthrough::state::WalkthroughState;
