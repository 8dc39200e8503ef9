//! GPT block layout generation.
//!
//! The embedding stage sits at the top. Each transformer block stacks its layer norm, its
//! attention heads (one depth slice per head) and the attention residual downward along `+y`.

use crate::foundation::error::WalkthroughResult;
use crate::layout::block::{
    Block, BlockAccess, BlockDeps, BlockId, BlockKind, DotDep, IdxSource, IndexMap, Qkv,
    TensorRef,
};
use crate::layout::model::{
    HeadLayout, LayerNormLayout, Layout, ModelData, ModelShape, TransformerLayout,
};

const CELL: f64 = 1.5;
const MARGIN: f64 = 10.0;
const HEAD_DEPTH_SPACING: f64 = 40.0;

struct Builder {
    layout: Layout,
    with_access: bool,
}

struct BlockSpec {
    name: String,
    kind: BlockKind,
    x: f64,
    y: f64,
    z: f64,
    cx: usize,
    cy: usize,
    src: TensorRef,
}

impl Builder {
    fn add(&mut self, spec: BlockSpec) -> BlockId {
        let id = self.layout.push(Block {
            id: BlockId(0),
            name: spec.name,
            kind: spec.kind,
            x: spec.x,
            y: spec.y,
            z: spec.z,
            dx: spec.cx as f64 * CELL,
            dy: spec.cy as f64 * CELL,
            dz: CELL,
            cx: spec.cx,
            cy: spec.cy,
            cz: 1,
            highlight: 0.0,
            opacity: 1.0,
            access: self.with_access.then_some(BlockAccess {
                src: spec.src,
                disable: false,
            }),
            deps: None,
            grid: None,
            parent: None,
            range_in_parent: None,
        });
        self.layout.cubes.push(id);
        id
    }
}

/// Build the block layout for `shape`, attaching data access when `model` is available.
pub fn gen_gpt_layout(shape: ModelShape, model: Option<&ModelData>) -> WalkthroughResult<Layout> {
    shape.validate()?;
    Ok(build_layout(shape, model))
}

/// Layout generation for an already validated shape.
pub(crate) fn build_layout(shape: ModelShape, model: Option<&ModelData>) -> Layout {
    let placeholder = BlockId(0);
    let mut b = Builder {
        layout: Layout {
            blocks: Vec::new(),
            cubes: Vec::new(),
            cell: CELL,
            margin: MARGIN,
            shape,
            idx_obj: placeholder,
            tok_embed: placeholder,
            pos_embed: placeholder,
            residual0: placeholder,
            transformer: Vec::new(),
            model: model.cloned(),
        },
        with_access: model.is_some(),
    };

    let t_w = shape.t as f64 * CELL;
    let c_h = shape.c as f64 * CELL;
    let resid_x = -t_w / 2.0;

    let idx_obj = b.add(BlockSpec {
        name: "idx".to_owned(),
        kind: BlockKind::Intermediate,
        x: resid_x,
        y: 0.0,
        z: 0.0,
        cx: shape.t,
        cy: 1,
        src: TensorRef::TokenIndices,
    });

    let embed_y = CELL + MARGIN;
    let tok_w = shape.vocab_size as f64 * CELL;
    let tok_embed = b.add(BlockSpec {
        name: "tok_embed".to_owned(),
        kind: BlockKind::Weights,
        x: resid_x - MARGIN - tok_w,
        y: embed_y,
        z: 0.0,
        cx: shape.vocab_size,
        cy: shape.c,
        src: TensorRef::TokenEmbedding,
    });
    let pos_embed = b.add(BlockSpec {
        name: "pos_embed".to_owned(),
        kind: BlockKind::Weights,
        x: resid_x + t_w + MARGIN,
        y: embed_y,
        z: 0.0,
        cx: shape.t,
        cy: shape.c,
        src: TensorRef::PositionEmbedding,
    });
    let residual0 = b.add(BlockSpec {
        name: "residual0".to_owned(),
        kind: BlockKind::Intermediate,
        x: resid_x,
        y: embed_y,
        z: 0.0,
        cx: shape.t,
        cy: shape.c,
        src: TensorRef::EmbedOutput,
    });
    b.layout.idx_obj = idx_obj;
    b.layout.tok_embed = tok_embed;
    b.layout.pos_embed = pos_embed;
    b.layout.residual0 = residual0;

    let mut y = embed_y + c_h + MARGIN;
    let a = shape.head_dim();
    let a_h = a as f64 * CELL;
    for layer in 0..shape.n_blocks {
        let ln_agg1 = b.add(BlockSpec {
            name: format!("l{layer}.ln1.agg1"),
            kind: BlockKind::Aggregate,
            x: resid_x,
            y,
            z: 0.0,
            cx: shape.t,
            cy: 1,
            src: TensorRef::LayerNormResidual { layer },
        });
        let ln_agg2 = b.add(BlockSpec {
            name: format!("l{layer}.ln1.agg2"),
            kind: BlockKind::Aggregate,
            x: resid_x,
            y: y + CELL,
            z: 0.0,
            cx: shape.t,
            cy: 1,
            src: TensorRef::LayerNormResidual { layer },
        });
        y += 2.0 * CELL + MARGIN;
        let ln_resid = b.add(BlockSpec {
            name: format!("l{layer}.ln1.resid"),
            kind: BlockKind::Intermediate,
            x: resid_x,
            y,
            z: 0.0,
            cx: shape.t,
            cy: shape.c,
            src: TensorRef::LayerNormResidual { layer },
        });
        y += c_h + MARGIN;

        let mut heads = Vec::with_capacity(shape.n_heads);
        let heads_y = y;
        for head in 0..shape.n_heads {
            let z = -(head as f64) * HEAD_DEPTH_SPACING;
            let mut cubes = Vec::new();
            let mut qkv_ids = Vec::with_capacity(3);
            let mut hy = heads_y;
            for qkv in Qkv::ALL {
                let tag = match qkv {
                    Qkv::Q => "q",
                    Qkv::K => "k",
                    Qkv::V => "v",
                };
                let weight = b.add(BlockSpec {
                    name: format!("l{layer}.h{head}.{tag}_weight"),
                    kind: BlockKind::Weights,
                    x: resid_x - MARGIN - shape.c as f64 * CELL,
                    y: hy,
                    z,
                    cx: shape.c,
                    cy: a,
                    src: TensorRef::HeadWeight { layer, head, qkv },
                });
                let bias = b.add(BlockSpec {
                    name: format!("l{layer}.h{head}.{tag}_bias"),
                    kind: BlockKind::Weights,
                    x: resid_x - MARGIN / 2.0 - CELL,
                    y: hy,
                    z,
                    cx: 1,
                    cy: a,
                    src: TensorRef::HeadBias { layer, head, qkv },
                });
                let out = b.add(BlockSpec {
                    name: format!("l{layer}.h{head}.{tag}"),
                    kind: BlockKind::Intermediate,
                    x: resid_x,
                    y: hy,
                    z,
                    cx: shape.t,
                    cy: a,
                    src: TensorRef::HeadOutput { layer, head, qkv },
                });
                // out[t, i] = sum_c ln_resid[t, c] * weight[c, i]
                if let Some(blk) = b.layout.get_mut(out) {
                    blk.deps = Some(BlockDeps {
                        dot: Some([
                            DotDep {
                                src: ln_resid,
                                src_idx: IndexMap {
                                    x: IdxSource::X,
                                    y: IdxSource::Dot,
                                },
                            },
                            DotDep {
                                src: weight,
                                src_idx: IndexMap {
                                    x: IdxSource::Dot,
                                    y: IdxSource::Y,
                                },
                            },
                        ]),
                        dot_len: shape.c,
                    });
                }
                cubes.extend([weight, bias, out]);
                qkv_ids.push((weight, bias, out));
                hy += a_h + MARGIN;
            }
            let attn_mtx = b.add(BlockSpec {
                name: format!("l{layer}.h{head}.attn"),
                kind: BlockKind::Intermediate,
                x: resid_x,
                y: hy,
                z,
                cx: shape.t,
                cy: shape.t,
                src: TensorRef::AttentionMatrix { layer, head },
            });
            hy += t_w + MARGIN;
            let v_out = b.add(BlockSpec {
                name: format!("l{layer}.h{head}.v_out"),
                kind: BlockKind::Intermediate,
                x: resid_x,
                y: hy,
                z,
                cx: shape.t,
                cy: a,
                src: TensorRef::HeadValueOutput { layer, head },
            });
            hy += a_h + MARGIN;
            cubes.extend([attn_mtx, v_out]);
            y = y.max(hy);

            let [(q_weight, q_bias, q), (k_weight, k_bias, k), (v_weight, v_bias, v)] =
                [qkv_ids[0], qkv_ids[1], qkv_ids[2]];
            heads.push(HeadLayout {
                q_weight,
                k_weight,
                v_weight,
                q_bias,
                k_bias,
                v_bias,
                q,
                k,
                v,
                attn_mtx,
                v_out,
                cubes,
            });
        }

        let attn_resid = b.add(BlockSpec {
            name: format!("l{layer}.attn_resid"),
            kind: BlockKind::Intermediate,
            x: resid_x,
            y,
            z: 0.0,
            cx: shape.t,
            cy: shape.c,
            src: TensorRef::AttentionResidual { layer },
        });
        y += c_h + MARGIN;

        b.layout.transformer.push(TransformerLayout {
            ln1: LayerNormLayout {
                ln_agg1,
                ln_agg2,
                ln_resid,
            },
            heads,
            attn_resid,
        });
    }

    tracing::trace!(
        blocks = b.layout.blocks.len(),
        has_model = b.with_access,
        "generated layout"
    );
    b.layout
}

#[cfg(test)]
#[path = "../../tests/unit/layout/gpt.rs"]
mod tests;
