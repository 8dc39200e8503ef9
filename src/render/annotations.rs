//! Helpers that turn layout coordinates into retained draw commands.
//!
//! Every helper resolves its anchor blocks against the current layout and silently records
//! nothing when a block is missing.

use crate::foundation::core::{Dim, Vec3, Vec4};
use crate::layout::block::BlockId;
use crate::layout::model::Layout;
use crate::render::state::{DimStyle, DrawCmd, RenderState, TextOpts, TokenColors};

pub fn draw_text_on_model(render: &mut RenderState, text: impl Into<String>, pos: Vec3, opts: TextOpts) {
    render.push(DrawCmd::Text {
        text: text.into(),
        pos,
        opts,
    });
}

/// Dimension label running along one edge of `block`. Fully transparent labels are dropped.
pub fn block_dimension(
    render: &mut RenderState,
    layout: &Layout,
    block: BlockId,
    dim: Dim,
    style: DimStyle,
    opacity: f64,
) {
    let Some(b) = layout.get(block) else {
        return;
    };
    if opacity <= 0.0 {
        return;
    }
    let inset = layout.margin / 2.0;
    let (from, to) = match dim {
        Dim::X => {
            let y = b.y - inset;
            (Vec3::new(b.x, y, b.z), Vec3::new(b.x + b.dx, y, b.z))
        }
        Dim::Y => {
            let x = b.x - inset;
            (Vec3::new(x, b.y, b.z), Vec3::new(x, b.y + b.dy, b.z))
        }
        Dim::Z => {
            let x = b.x - inset;
            (Vec3::new(x, b.y, b.z), Vec3::new(x, b.y, b.z + b.dz))
        }
    };
    render.push(DrawCmd::BlockDimension {
        block,
        dim,
        style,
        cells: b.cells(dim),
        from,
        to,
        opacity,
    });
}

/// Index label over the fractional cell `index` along `dim`, pushed `offset` world units further
/// along the axis.
#[allow(clippy::too_many_arguments)]
pub fn block_index(
    render: &mut RenderState,
    layout: &Layout,
    block: BlockId,
    dim: Dim,
    style: DimStyle,
    index: f64,
    offset: f64,
    opacity: f64,
) {
    let Some(b) = layout.get(block) else {
        return;
    };
    if opacity <= 0.0 || !index.is_finite() {
        return;
    }
    let n = b.cells(dim).max(1) as f64;
    let along = b.pos().get(dim) + (index + 0.5) * b.extent().get(dim) / n + offset;
    let pos = match dim {
        Dim::X => Vec3::new(along, b.y - layout.margin / 2.0, b.z),
        Dim::Y => Vec3::new(b.x - layout.margin / 2.0, along, b.z),
        Dim::Z => Vec3::new(b.x - layout.margin / 2.0, b.y, along),
    };
    render.push(DrawCmd::BlockIndex {
        block,
        dim,
        style,
        index,
        pos,
        opacity,
    });
}

/// Connector from the bottom of column `src_idx` in `src` to the top of column `dest_idx` in
/// `dest`.
#[allow(clippy::too_many_arguments)]
pub fn index_mapping_lines(
    render: &mut RenderState,
    layout: &Layout,
    src: BlockId,
    dest: BlockId,
    color: Vec4,
    pad_top: f64,
    pad_bot: f64,
    src_idx: usize,
    dest_idx: usize,
) {
    let (Some(s), Some(d)) = (layout.get(src), layout.get(dest)) else {
        return;
    };
    if src_idx >= s.cx || dest_idx >= d.cx {
        return;
    }
    let top = s.cell_center(Vec3::new(src_idx as f64, 0.0, 0.0));
    let bot = d.cell_center(Vec3::new(dest_idx as f64, 0.0, 0.0));
    render.push(DrawCmd::IndexMapping {
        src,
        dest,
        src_idx,
        dest_idx,
        from: Vec3::new(top.x, s.y + s.dy + pad_top, top.z),
        to: Vec3::new(bot.x, d.y - pad_bot, bot.z),
        color,
    });
}

/// Column index labels over `block`, optionally tinted per column.
pub fn render_indexes(
    render: &mut RenderState,
    layout: &Layout,
    block: BlockId,
    color: Vec4,
    opacity: f64,
    t_idx: usize,
    overlay: Option<TokenColors>,
) {
    let Some(b) = layout.get(block) else {
        return;
    };
    if opacity <= 0.0 {
        return;
    }
    render.push(DrawCmd::Indexes {
        block,
        color,
        opacity,
        t_idx,
        labels: (0..b.cx).map(|i| i.to_string()).collect(),
        overlay,
    });
}

#[allow(clippy::too_many_arguments)]
pub fn add_source_dest_curve_line(
    render: &mut RenderState,
    layout: &Layout,
    src: BlockId,
    dest: BlockId,
    src_cell: Vec3,
    dest_cell: Vec3,
    color: Vec4,
) {
    let (Some(s), Some(d)) = (layout.get(src), layout.get(dest)) else {
        return;
    };
    render.push(DrawCmd::Curve {
        src,
        dest,
        src_cell,
        dest_cell,
        from: s.cell_center(src_cell),
        to: d.cell_center(dest_cell),
        color,
    });
}

/// Thread over cells `[start, end)` along `dim`, clamped to the block. Empty ranges draw nothing.
#[allow(clippy::too_many_arguments)]
pub fn draw_thread(
    render: &mut RenderState,
    layout: &Layout,
    block: BlockId,
    dim: Dim,
    cell: usize,
    start: usize,
    end: usize,
    color: Vec4,
) {
    let Some(b) = layout.get(block) else {
        return;
    };
    let end = end.min(b.cells(dim));
    if start >= end {
        return;
    }
    render.push(DrawCmd::Thread {
        block,
        dim,
        cell,
        start,
        end,
        color,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/annotations.rs"]
mod tests;
