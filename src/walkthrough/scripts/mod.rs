//! Per-phase scripts.
//!
//! A script is re-run from scratch every frame. It declares the same windows in the same order
//! on every call and only branches on their computed values, so `times`, cleanup and the phase
//! length stay consistent while the clock moves in either direction.

use std::collections::BTreeMap;

use crate::layout::block::{Block, BlockId};
use crate::layout::model::Layout;
use crate::program::camera::Camera;
use crate::render::state::RenderState;
use crate::timeline::tools::PhaseTools;
use crate::walkthrough::phase::Phase;

mod input;
mod intro;
mod layer_norm;

/// Everything a phase script may read or write during one frame.
pub struct WalkthroughArgs<'a> {
    pub layout: &'a mut Layout,
    pub render: &'a mut RenderState,
    pub camera: &'a mut Camera,
    pub tools: &'a mut PhaseTools,
    pub phase_data: &'a mut BTreeMap<Phase, serde_json::Value>,
}

pub type PhaseScript = fn(&mut WalkthroughArgs<'_>);

pub(crate) fn builtin_scripts() -> [(Phase, PhaseScript); 5] {
    [
        (Phase::IntroOverview, intro::intro_overview),
        (Phase::InputFirst, input::input_first),
        (Phase::InputDetailTables, input::input_detail_tables),
        (Phase::InputDetailTokEmbed, input::input_detail_tok_embed),
        (Phase::LayerNorm1, layer_norm::layer_norm1),
    ]
}

fn with_block(layout: &mut Layout, id: BlockId, f: impl FnOnce(&mut Block)) {
    if let Some(b) = layout.get_mut(id) {
        f(b);
    }
}

fn set_highlight(layout: &mut Layout, id: BlockId, highlight: f64) {
    with_block(layout, id, |b| b.highlight = highlight);
}

fn set_opacity(layout: &mut Layout, id: BlockId, opacity: f64) {
    with_block(layout, id, |b| b.opacity = opacity);
}

/// Toggle data display on a block. Blocks without data access are left alone.
fn set_access_disabled(layout: &mut Layout, id: BlockId, disable: bool) {
    with_block(layout, id, |b| {
        if let Some(access) = b.access.as_mut() {
            access.disable = disable;
        }
    });
}

fn block_field(layout: &Layout, id: BlockId, f: impl FnOnce(&Block) -> f64) -> Option<f64> {
    layout.get(id).map(f)
}
