use crate::foundation::core::{Dim, Vec3, Vec4};
use crate::foundation::math::{lerp, lerp_smoothstep, one_hot_array};
use crate::layout::block::BlockKind;
use crate::layout::grid::{find_sub_blocks, hide_from_block, split_grid};
use crate::render::annotations::{
    add_source_dest_curve_line, block_dimension, block_index, draw_text_on_model, draw_thread,
    index_mapping_lines, render_indexes,
};
use crate::render::state::{
    DimStyle, TextAlignHoriz, TextAlignVert, TextOpts, TokenColors, dim_style_color,
};
use crate::walkthrough::phase::Phase;
use crate::walkthrough::scripts::{
    WalkthroughArgs, set_access_disabled, set_highlight,
};

const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Sweep a fading highlight down the intermediate blocks, revealing the model as it goes.
pub(super) fn input_first(args: &mut WalkthroughArgs<'_>) {
    let WalkthroughArgs {
        layout,
        camera,
        tools,
        ..
    } = args;

    let t0 = tools.c_str("", 0.0);
    tools.commentary([
        "These vectors now pass through the stages of the model, going through a series of \
         transformers."
            .into(),
        t0.into(),
    ]);
    let t_cam = tools.at_time(0.0, 0.0);
    let t1 = tools.at_event(t0);
    let t1a = tools.after_time(&t1, 2.0, 0.0);
    let t2 = tools.after_time(&t1a, 0.2, 5.0);

    tools.move_camera_to(
        camera,
        &t_cam,
        Vec3::new(0.0, 0.0, -30.0),
        Vec3::new(290.0, 20.0, 1.2),
    );

    let blocks: Vec<_> = layout
        .cubes
        .iter()
        .copied()
        .filter(|&id| layout.get(id).is_some_and(|b| b.kind == BlockKind::Intermediate))
        .collect();
    if blocks.is_empty() {
        return;
    }

    let pos = lerp_smoothstep(0.0, blocks.len() as f64, t2.t);
    let idx = pos.floor() as usize;
    if t2.active {
        for i in (0..=idx.min(blocks.len() - 1)).rev() {
            // Earlier blocks fade out the further the sweep has moved past them.
            let falloff = 1.0 - (pos - i as f64) / 8.0;
            if falloff < 0.0 {
                break;
            }
            set_highlight(layout, blocks[i], falloff * 0.8);
        }
    }
    if idx < blocks.len() - 1 {
        hide_from_block(layout, blocks[idx]);
    }
}

/// Label the embedding tables and annotate their dimensions.
pub(super) fn input_detail_tables(args: &mut WalkthroughArgs<'_>) {
    let WalkthroughArgs {
        layout,
        render,
        tools,
        ..
    } = args;

    let show_all = tools.at_time(0.0, 0.5);
    let (Some(tok), Some(pos)) = (layout.get(layout.tok_embed), layout.get(layout.pos_embed))
    else {
        return;
    };
    let label_y = tok.y + tok.dy / 4.0;
    let text_color = Vec4::new(0.0, 0.0, 0.0, 1.0).mul(show_all.t);
    draw_text_on_model(
        render,
        "token-embedding matrix",
        Vec3::new(tok.x - layout.margin, label_y, 0.0),
        TextOpts {
            align: TextAlignHoriz::Right,
            valign: TextAlignVert::Middle,
            color: text_color,
            size: 3.0,
        },
    );
    draw_text_on_model(
        render,
        "position-embedding matrix",
        Vec3::new(pos.x + pos.dx + layout.margin, label_y, 0.0),
        TextOpts {
            align: TextAlignHoriz::Left,
            valign: TextAlignVert::Middle,
            color: text_color,
            size: 3.0,
        },
    );

    let dims = [
        (layout.tok_embed, Dim::X, DimStyle::NVocab),
        (layout.tok_embed, Dim::Y, DimStyle::C),
        (layout.pos_embed, Dim::X, DimStyle::T),
        (layout.pos_embed, Dim::Y, DimStyle::C),
        (layout.residual0, Dim::X, DimStyle::T),
        (layout.residual0, Dim::Y, DimStyle::C),
    ];
    for (block, dim, style) in dims {
        block_dimension(render, layout, block, dim, style, show_all.t);
    }
}

/// Walk through the embedding step: pick an example token, look up its column in the token
/// embedding, add the position embedding, then repeat for every time step.
pub(super) fn input_detail_tok_embed(args: &mut WalkthroughArgs<'_>) {
    let WalkthroughArgs {
        layout,
        render,
        camera,
        tools,
        phase_data,
    } = args;

    let t_str = tools.c_str("t", 1.0);
    let c = tools.commentary([
        "Let's start at the top. To compute the vectors at each time ".into(),
        t_str.into(),
        " we do a couple of steps:".into(),
    ]);

    let t_cam = tools.at_time(0.0, 0.0);
    tools.move_camera_to(camera, &t_cam, Vec3::ZERO, Vec3::new(290.0, 20.0, 1.5));

    let mut t0_expand_at0 = tools.at_time(0.2, 0.1);
    let t1_tot_eq3 = tools.after_time(&t0_expand_at0, 0.2, 1.0);
    let mut t2_expand_split = tools.after_time(&t1_tot_eq3, 0.4, 0.1);
    let t3_show_tok_idx = tools.after_time(&t2_expand_split, 1.0, 0.2);
    let mut t4_highlight_tok_idx = tools.after_time(&t3_show_tok_idx, 1.0, 0.4);
    let mut t5_iter_1col = tools.after_time(&t4_highlight_tok_idx, 1.0, 1.0);
    let t6_cleanup1 = tools.after_time(&t5_iter_1col, 1.0, 0.3);
    tools.cleanup(
        &t6_cleanup1,
        [
            &mut t0_expand_at0,
            &mut t2_expand_split,
            &mut t4_highlight_tok_idx,
            &mut t5_iter_1col,
        ],
    );
    let t7_iter_cols = tools.after_time(&t6_cleanup1, 0.0, 5.0);

    let (idx_obj, tok_embed, pos_embed, residual0) = (
        layout.idx_obj,
        layout.tok_embed,
        layout.pos_embed,
        layout.residual0,
    );
    let n_t = layout.shape.t;
    let n_vocab = layout.shape.vocab_size;
    let example_t = 3.min(n_t - 1);
    let example_tok = layout.input_token(example_t).unwrap_or(1).min(n_vocab - 1);

    if t6_cleanup1.t < 1.0 {
        let idx = lerp(0.0, example_t as f64, t1_tot_eq3.t);
        let split = lerp_smoothstep(t0_expand_at0.t, example_t as f64, t2_expand_split.t);
        block_index(
            render,
            layout,
            residual0,
            Dim::X,
            DimStyle::SmallT,
            idx,
            split / 2.0,
            t0_expand_at0.t,
        );
        split_grid(layout, residual0, Dim::X, idx + 0.5, split);
        split_grid(layout, idx_obj, Dim::X, idx + 0.5, split);
    }

    let embed_mtx = tools.c_str("token embedding matrix", 0.0);
    let tok_col = tools.c_str("j", 0.0);
    tools.commentary_para(
        c,
        [
            "\n\n1. From the ".into(),
            embed_mtx.into(),
            ", select the ".into(),
            tok_col.into(),
            "'th column.".into(),
        ],
    );

    if layout.model.is_none() {
        tracing::trace!("no model data, skipping embedding walk");
        return;
    }
    phase_data.insert(
        Phase::InputDetailTokEmbed,
        serde_json::json!({ "example_t": example_t, "example_tok": example_tok }),
    );

    let embed_off_color = Vec4::rgb(0.5, 0.5, 0.5).mul(0.6);
    let vocab_color = dim_style_color(DimStyle::NVocab);
    let pad_top = layout.cell * 0.3;
    let pad_bot = layout.cell * 0.3 + 3.0;

    if t7_iter_cols.t <= 0.0 {
        render_indexes(
            render,
            layout,
            tok_embed,
            embed_off_color,
            t3_show_tok_idx.t,
            example_t,
            Some(TokenColors {
                color2: vocab_color,
                mixes: one_hot_array(n_vocab, example_tok, t4_highlight_tok_idx.t),
            }),
        );
    }

    if t4_highlight_tok_idx.t > 0.0 {
        split_grid(layout, tok_embed, Dim::X, example_tok as f64, 0.0);
        let col = find_sub_blocks(layout, tok_embed, Dim::X, Some(example_tok), Some(example_tok));
        if let Some(&sub) = col.first() {
            set_highlight(layout, sub, lerp(0.0, 0.2, t4_highlight_tok_idx.t));
        }
        render.token_colors = Some(TokenColors {
            color2: vocab_color,
            mixes: one_hot_array(n_t, example_t, t4_highlight_tok_idx.t),
        });
        index_mapping_lines(
            render,
            layout,
            idx_obj,
            tok_embed,
            vocab_color.mul(t4_highlight_tok_idx.t),
            pad_top,
            pad_bot,
            example_t,
            example_tok,
        );
    }

    if t7_iter_cols.t < 1.0 {
        hide_from_block(layout, residual0);
    }

    if t5_iter_1col.t > 0.0 && t6_cleanup1.t <= 0.0 {
        let col = find_sub_blocks(layout, residual0, Dim::X, Some(example_t), Some(example_t));
        if let Some(&sub) = col.first() {
            set_access_disabled(layout, sub, false);
            let cy = layout.get(sub).map_or(0, |b| b.cy);
            let y_pos = t5_iter_1col.t * cy as f64;
            let y_idx = y_pos.floor() as usize;
            if y_idx < cy {
                add_source_dest_curve_line(
                    render,
                    layout,
                    tok_embed,
                    residual0,
                    Vec3::new(example_tok as f64, y_idx as f64, 0.0),
                    Vec3::new(example_t as f64, y_idx as f64, 0.0),
                    RED,
                );
                draw_thread(render, layout, sub, Dim::Y, 0, 0, y_idx + 1, RED);
                draw_thread(render, layout, tok_embed, Dim::Y, example_tok, 0, y_idx + 1, RED);
                draw_thread(render, layout, pos_embed, Dim::Y, example_t, 0, y_idx + 1, RED);
            }
            split_grid(layout, sub, Dim::Y, y_pos, 0.0);
            for below in find_sub_blocks(layout, sub, Dim::Y, Some(y_idx + 1), None) {
                set_access_disabled(layout, below, true);
            }
        }
    }

    if t7_iter_cols.active {
        let n_c = layout.get(residual0).map_or(0, |b| b.cy);
        let t_pos = t7_iter_cols.t * n_t as f64;
        let t_idx = (t_pos.floor() as usize).min(n_t - 1);
        let c_pos = (t_pos - t_idx as f64).min(1.0) * n_c as f64;
        let y_idx = c_pos.floor() as usize;
        let Some(tok_idx) = layout.input_token(t_idx) else {
            return;
        };

        render.token_colors = Some(TokenColors {
            color2: vocab_color,
            mixes: one_hot_array(n_t, t_idx, 1.0),
        });

        split_grid(layout, residual0, Dim::X, t_idx as f64 + 0.5, 0.0);
        if t_idx > 0 {
            for left in find_sub_blocks(layout, residual0, Dim::X, None, Some(t_idx - 1)) {
                set_access_disabled(layout, left, false);
            }
        }
        let col = find_sub_blocks(layout, residual0, Dim::X, Some(t_idx), Some(t_idx));
        if let Some(&sub) = col.first() {
            set_highlight(layout, sub, 0.2);
            set_access_disabled(layout, sub, false);

            let curve_color = RED.mul(0.3);
            if y_idx < n_c {
                let dest = Vec3::new(t_idx as f64, y_idx as f64, 0.0);
                add_source_dest_curve_line(
                    render,
                    layout,
                    tok_embed,
                    residual0,
                    Vec3::new(tok_idx as f64, y_idx as f64, 0.0),
                    dest,
                    curve_color,
                );
                add_source_dest_curve_line(render, layout, pos_embed, residual0, dest, dest, curve_color);
            }
            draw_thread(render, layout, residual0, Dim::Y, t_idx, 0, y_idx + 1, RED);
            draw_thread(render, layout, tok_embed, Dim::Y, tok_idx, 0, y_idx + 1, RED);
            draw_thread(render, layout, pos_embed, Dim::Y, t_idx, 0, y_idx + 1, RED);

            split_grid(layout, sub, Dim::Y, c_pos + 0.5, 0.0);
            for below in find_sub_blocks(layout, sub, Dim::Y, Some(y_idx + 1), None) {
                set_access_disabled(layout, below, true);
            }
        }

        render_indexes(
            render,
            layout,
            tok_embed,
            embed_off_color,
            t3_show_tok_idx.t,
            t_idx,
            Some(TokenColors {
                color2: vocab_color,
                mixes: one_hot_array(n_vocab, tok_idx, 1.0),
            }),
        );
        index_mapping_lines(
            render,
            layout,
            idx_obj,
            tok_embed,
            vocab_color.mul(t3_show_tok_idx.t),
            pad_top,
            pad_bot,
            t_idx,
            tok_idx,
        );

        if let Some(tok_sub) = split_grid(layout, tok_embed, Dim::X, tok_idx as f64 + 0.5, 0.0) {
            set_highlight(layout, tok_sub, 0.2);
        }
        if let Some(pos_sub) = split_grid(layout, pos_embed, Dim::X, t_idx as f64 + 0.5, 0.0) {
            set_highlight(layout, pos_sub, 0.2);
        }
    }
}
