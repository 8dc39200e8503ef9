//! Subdivision of blocks into addressable sub-blocks.

use crate::foundation::core::Dim;
use crate::foundation::math::cell_index;
use crate::layout::block::{Block, BlockId, SubGrid};
use crate::layout::model::Layout;

/// Split `id` along `dim` around the cell containing the fractional position `at`.
///
/// Produces up to three children covering `[0, i)`, `[i, i + 1)` and `[i + 1, n)` (empty ranges
/// are skipped), spaced apart by `gap` world units, and returns the single-cell child. Splitting
/// again at the same cell returns the existing child; a changed `gap` only moves the existing
/// children. A different `dim` or cell re-partitions the block.
///
/// Returns `None` without touching the layout when `id` is unknown or `at` is outside the block.
pub fn split_grid(
    layout: &mut Layout,
    id: BlockId,
    dim: Dim,
    at: f64,
    gap: f64,
) -> Option<BlockId> {
    let parent = layout.get(id)?;
    let n = parent.cells(dim);
    let cell = cell_index(at).filter(|&i| i < n)?;
    let gap = if gap.is_finite() { gap } else { 0.0 };

    if let Some(grid) = &parent.grid
        && grid.dim == dim
        && grid.cell == cell
    {
        let children = grid.children.clone();
        if grid.gap != gap {
            place_children(layout, id, dim, gap, &children);
            if let Some(SubGrid { gap: g, .. }) = layout.get_mut(id).and_then(|b| b.grid.as_mut())
            {
                *g = gap;
            }
        }
        return middle_child(layout, &children, cell);
    }

    let template = parent.clone();
    let mut children = Vec::with_capacity(3);
    for (lo, hi) in [(0, cell), (cell, cell + 1), (cell + 1, n)] {
        if lo >= hi {
            continue;
        }
        children.push(layout.push(child_of(&template, dim, lo, hi)));
    }
    place_children(layout, id, dim, gap, &children);
    let parent = layout.get_mut(id)?;
    parent.grid = Some(SubGrid {
        dim,
        cell,
        gap,
        children: children.clone(),
    });
    tracing::trace!(block = %parent.name, ?dim, cell, "split block");
    middle_child(layout, &children, cell)
}

/// Children of `id` split along `dim` whose cell range intersects the inclusive `[lo, hi]`.
/// Missing bounds are open. Returns nothing when the block is not split along `dim`.
pub fn find_sub_blocks(
    layout: &Layout,
    id: BlockId,
    dim: Dim,
    lo: Option<usize>,
    hi: Option<usize>,
) -> Vec<BlockId> {
    let Some(grid) = layout.get(id).and_then(|b| b.grid.as_ref()) else {
        return Vec::new();
    };
    if grid.dim != dim {
        return Vec::new();
    }
    grid.children
        .iter()
        .copied()
        .filter(|&c| {
            let Some((a, b)) = layout.get(c).and_then(|blk| blk.range_in_parent) else {
                return false;
            };
            lo.is_none_or(|lo| b > lo) && hi.is_none_or(|hi| a <= hi)
        })
        .collect()
}

/// Hide every top-level block after `id` in model order, together with its sub-blocks.
/// Returns the number of blocks hidden.
pub fn hide_from_block(layout: &mut Layout, id: BlockId) -> usize {
    let Some(idx) = layout.cube_index(id) else {
        return 0;
    };
    let mut stack: Vec<BlockId> = layout.cubes[idx + 1..].to_vec();
    let mut hidden = 0;
    while let Some(b) = stack.pop() {
        let Some(blk) = layout.get_mut(b) else {
            continue;
        };
        blk.opacity = 0.0;
        hidden += 1;
        if let Some(grid) = &blk.grid {
            stack.extend(grid.children.iter().copied());
        }
    }
    hidden
}

fn child_of(parent: &Block, dim: Dim, lo: usize, hi: usize) -> Block {
    let mut child = parent.clone();
    child.name = format!("{}[{}:{lo}..{hi}]", parent.name, dim_tag(dim));
    child.set_cells(dim, hi - lo);
    child.grid = None;
    child.parent = Some(parent.id);
    child.range_in_parent = Some((lo, hi));
    child
}

fn place_children(layout: &mut Layout, parent: BlockId, dim: Dim, gap: f64, children: &[BlockId]) {
    let Some(p) = layout.get(parent) else {
        return;
    };
    let n = p.cells(dim).max(1);
    let origin = p.pos().get(dim);
    let cell_size = p.extent().get(dim) / n as f64;
    for (k, &c) in children.iter().enumerate() {
        let Some(child) = layout.get_mut(c) else {
            continue;
        };
        let Some((lo, hi)) = child.range_in_parent else {
            continue;
        };
        child.set_pos(dim, origin + lo as f64 * cell_size + k as f64 * gap);
        child.set_extent(dim, (hi - lo) as f64 * cell_size);
    }
}

fn middle_child(layout: &Layout, children: &[BlockId], cell: usize) -> Option<BlockId> {
    children
        .iter()
        .copied()
        .find(|&c| layout.get(c).and_then(|b| b.range_in_parent) == Some((cell, cell + 1)))
}

fn dim_tag(dim: Dim) -> &'static str {
    match dim {
        Dim::X => "x",
        Dim::Y => "y",
        Dim::Z => "z",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
