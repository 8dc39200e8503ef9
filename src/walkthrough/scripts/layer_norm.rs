use crate::foundation::core::Dim;
use crate::foundation::math::lerp_smoothstep;
use crate::layout::block::BlockId;
use crate::layout::grid::{find_sub_blocks, split_grid};
use crate::layout::model::Layout;
use crate::walkthrough::scripts::{
    WalkthroughArgs, block_field, set_highlight, set_opacity, with_block,
};

const TARGET_HEAD: usize = 2;

/// Fade out all but one attention head, line its q/k/v blocks up beside the layer-norm output,
/// then step through the cells of the v block showing which inputs feed each one.
pub(super) fn layer_norm1(args: &mut WalkthroughArgs<'_>) {
    let WalkthroughArgs { layout, tools, .. } = args;
    let layout: &mut Layout = layout;

    let t0_dissolve_heads = tools.at_time(0.5, 1.0);
    let t2_align_qkv = tools.after_time(&t0_dissolve_heads, 0.5, 1.0);
    let t3_v_mm = tools.after_time(&t2_align_qkv, 0.0, 4.0);

    let Some(block) = layout.transformer.first().cloned() else {
        tracing::trace!("layout has no transformer blocks");
        return;
    };
    let head_idx = TARGET_HEAD.min(block.heads.len().saturating_sub(1));
    let Some(head) = block.heads.get(head_idx).cloned() else {
        return;
    };
    let ln_resid = block.ln1.ln_resid;

    for (i, other) in block.heads.iter().enumerate() {
        if i == head_idx {
            continue;
        }
        for &cube in &other.cubes {
            set_opacity(layout, cube, lerp_smoothstep(1.0, 0.0, t0_dissolve_heads.t));
        }
    }

    let (Some(head_z), Some(target_z)) = (
        block_field(layout, head.attn_mtx, |b| b.z),
        block_field(layout, ln_resid, |b| b.z),
    ) else {
        return;
    };
    let delta_z = lerp_smoothstep(0.0, target_z - head_z, t2_align_qkv.t);
    for &cube in &head.cubes {
        with_block(layout, cube, |b| b.z += delta_z);
    }

    let (Some(q_dy), Some(base_y)) = (
        block_field(layout, head.q, |b| b.dy),
        block_field(layout, head.q, |b| b.y),
    ) else {
        return;
    };
    let stride_y = q_dy + layout.margin;
    let qkv = [
        (head.q, head.q_weight, head.q_bias, 0.0),
        (head.k, head.k_weight, head.k_bias, -stride_y),
        (head.v, head.v_weight, head.v_bias, -2.0 * stride_y),
    ];
    for (out, weight, bias, offset) in qkv {
        let Some((y0, z0)) = layout.get(out).map(|b| (b.y, b.z)) else {
            continue;
        };
        let y = lerp_smoothstep(y0, base_y + offset, t2_align_qkv.t);
        let z = lerp_smoothstep(z0, target_z, t2_align_qkv.t);
        for id in [out, weight, bias] {
            with_block(layout, id, |b| {
                b.y = y;
                b.z = z;
            });
        }
    }

    let (Some(resid_mid), Some(k_mid), Some(resid_idx)) = (
        mid_y(layout, ln_resid),
        mid_y(layout, head.k),
        layout.cube_index(ln_resid),
    ) else {
        return;
    };
    let y_delta = lerp_smoothstep(0.0, resid_mid - k_mid, t2_align_qkv.t);
    let faded = lerp_smoothstep(1.0, 0.2, t2_align_qkv.t);

    let cubes = layout.cubes.clone();
    for &cube in &cubes[..resid_idx] {
        set_opacity(layout, cube, faded);
    }
    let mut after_attn = false;
    for &cube in &cubes[resid_idx + 1..] {
        with_block(layout, cube, |b| {
            b.y += y_delta;
            if after_attn {
                b.opacity = b.opacity.min(faded);
            }
        });
        after_attn = after_attn || cube == head.v_out;
    }

    if t3_v_mm.active {
        walk_dot_product(layout, head.v, t3_v_mm.t);
    }
}

fn mid_y(layout: &Layout, id: BlockId) -> Option<f64> {
    block_field(layout, id, |b| b.y + b.dy / 2.0)
}

/// Highlight the output cell reached at progress `t` and the rows/columns of both dot-product
/// sources that feed it.
fn walk_dot_product(layout: &mut Layout, target: BlockId, t: f64) {
    let Some((cx, cy, deps)) = layout.get(target).map(|b| (b.cx, b.cy, b.deps)) else {
        return;
    };
    let Some([dep_a, dep_b]) = deps.and_then(|d| d.dot) else {
        return;
    };
    let dot_len = deps.map_or(0, |d| d.dot_len);

    let x_pos = t * cx as f64;
    let x_idx = x_pos.floor() as usize;
    let y_pos = (x_pos - x_idx as f64) * cy as f64;
    let y_idx = y_pos.floor() as usize;

    for dep in [dep_a, dep_b] {
        let Some(dot_dim) = dep.src_idx.dot_dim() else {
            continue;
        };
        let (sx, sy) = dep.src_idx.map(x_idx, y_idx, dot_len / 2);
        let at = match dot_dim {
            Dim::X => sx,
            _ => sy,
        };
        split_grid(layout, dep.src, dot_dim, at as f64, 0.0);
        if let Some(&sub) = find_sub_blocks(layout, dep.src, dot_dim, Some(at), Some(at)).first() {
            set_highlight(layout, sub, 0.3);
        }
    }

    split_grid(layout, target, Dim::X, x_pos, 0.0);
    let Some(&col) = find_sub_blocks(layout, target, Dim::X, Some(x_idx), Some(x_idx)).first()
    else {
        return;
    };
    set_highlight(layout, col, 0.3);
    split_grid(layout, col, Dim::Y, y_pos, 0.0);
    if let Some(&cell) = find_sub_blocks(layout, col, Dim::Y, Some(y_idx), Some(y_idx)).first() {
        set_highlight(layout, cell, 0.7);
    }
}
