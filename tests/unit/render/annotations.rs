use super::*;
use crate::layout::gpt::gen_gpt_layout;
use crate::layout::model::ModelShape;

fn layout() -> Layout {
    gen_gpt_layout(ModelShape::default(), None).unwrap()
}

#[test]
fn missing_blocks_record_nothing() {
    let l = layout();
    let mut r = RenderState::default();
    let ghost = BlockId(9_999);
    block_dimension(&mut r, &l, ghost, Dim::X, DimStyle::T, 1.0);
    draw_thread(&mut r, &l, ghost, Dim::Y, 0, 0, 4, Vec4::ZERO);
    add_source_dest_curve_line(&mut r, &l, ghost, l.residual0, Vec3::ZERO, Vec3::ZERO, Vec4::ZERO);
    assert!(r.draw.is_empty());
}

#[test]
fn transparent_labels_are_dropped() {
    let l = layout();
    let mut r = RenderState::default();
    block_dimension(&mut r, &l, l.residual0, Dim::X, DimStyle::T, 0.0);
    block_index(&mut r, &l, l.residual0, Dim::X, DimStyle::SmallT, 1.0, 0.0, 0.0);
    assert!(r.draw.is_empty());
    block_dimension(&mut r, &l, l.residual0, Dim::Y, DimStyle::C, 0.5);
    assert_eq!(r.draw.len(), 1);
    let DrawCmd::BlockDimension { cells, .. } = &r.draw[0] else {
        panic!("expected a dimension label");
    };
    assert_eq!(*cells, 48);
}

#[test]
fn thread_range_is_clamped_to_block() {
    let l = layout();
    let mut r = RenderState::default();
    draw_thread(&mut r, &l, l.residual0, Dim::Y, 3, 0, 1_000, Vec4::ZERO);
    draw_thread(&mut r, &l, l.residual0, Dim::Y, 3, 5, 5, Vec4::ZERO);
    assert_eq!(r.draw.len(), 1);
    let DrawCmd::Thread { end, .. } = r.draw[0] else {
        panic!("expected a thread");
    };
    assert_eq!(end, 48);
}

#[test]
fn curve_endpoints_are_cell_centers() {
    let l = layout();
    let mut r = RenderState::default();
    let cell = Vec3::new(1.0, 2.0, 0.0);
    add_source_dest_curve_line(&mut r, &l, l.tok_embed, l.residual0, cell, cell, Vec4::ZERO);
    let DrawCmd::Curve { from, to, .. } = r.draw[0] else {
        panic!("expected a curve");
    };
    let tok = l.get(l.tok_embed).unwrap();
    assert_eq!(from, tok.cell_center(cell));
    assert_eq!(to, l.get(l.residual0).unwrap().cell_center(cell));
}

#[test]
fn index_mapping_rejects_out_of_range_columns() {
    let l = layout();
    let mut r = RenderState::default();
    index_mapping_lines(&mut r, &l, l.idx_obj, l.tok_embed, Vec4::ZERO, 0.3, 3.3, 3, 7);
    assert!(r.draw.is_empty());
    index_mapping_lines(&mut r, &l, l.idx_obj, l.tok_embed, Vec4::ZERO, 0.3, 3.3, 3, 2);
    assert_eq!(r.draw.len(), 1);
}

#[test]
fn render_indexes_labels_every_column() {
    let l = layout();
    let mut r = RenderState::default();
    render_indexes(&mut r, &l, l.tok_embed, Vec4::ZERO, 1.0, 3, None);
    let DrawCmd::Indexes { labels, .. } = &r.draw[0] else {
        panic!("expected indexes");
    };
    assert_eq!(labels, &["0", "1", "2"]);
}
