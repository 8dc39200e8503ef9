use super::*;
use crate::layout::gpt::gen_gpt_layout;
use crate::layout::model::ModelShape;

fn layout() -> Layout {
    gen_gpt_layout(ModelShape::default(), None).unwrap()
}

#[test]
fn repeated_split_returns_same_child() {
    let mut l = layout();
    let tok = l.tok_embed;
    let a = split_grid(&mut l, tok, Dim::X, 1.5, 0.5).unwrap();
    let len_after_first = l.arena_len();
    let b = split_grid(&mut l, tok, Dim::X, 1.5, 0.5).unwrap();
    assert_eq!(a, b);
    assert_eq!(l.arena_len(), len_after_first);

    let grid = l.get(tok).unwrap().grid.clone().unwrap();
    assert_eq!(grid.children.len(), 3);
    assert_eq!(l.get(a).unwrap().range_in_parent, Some((1, 2)));
    assert_eq!(l.get(a).unwrap().cx, 1);
}

#[test]
fn scenario_c_split_at_three_and_a_half() {
    let mut l = layout();
    let resid = l.residual0;
    let first = split_grid(&mut l, resid, Dim::X, 3.5, 0.0).unwrap();
    let kids = l.get(resid).unwrap().grid.clone().unwrap().children;
    let again = split_grid(&mut l, resid, Dim::X, 3.5, 0.0).unwrap();
    assert_eq!(first, again);
    assert_eq!(l.get(resid).unwrap().grid.clone().unwrap().children, kids);

    let moved = split_grid(&mut l, resid, Dim::X, 5.2, 0.0).unwrap();
    assert_ne!(moved, first);
    assert_eq!(l.get(moved).unwrap().range_in_parent, Some((5, 6)));
    let ranges: Vec<_> = l
        .get(resid)
        .unwrap()
        .grid
        .clone()
        .unwrap()
        .children
        .iter()
        .map(|&c| l.get(c).unwrap().range_in_parent.unwrap())
        .collect();
    assert_eq!(ranges, vec![(0, 5), (5, 6), (6, 11)]);
}

#[test]
fn gap_change_moves_children_in_place() {
    let mut l = layout();
    let resid = l.residual0;
    let mid = split_grid(&mut l, resid, Dim::X, 2.0, 0.0).unwrap();
    let x0 = l.get(mid).unwrap().x;
    let len = l.arena_len();

    let same = split_grid(&mut l, resid, Dim::X, 2.0, 1.0).unwrap();
    assert_eq!(same, mid);
    assert_eq!(l.arena_len(), len);
    assert_eq!(l.get(mid).unwrap().x, x0 + 1.0);
}

#[test]
fn split_at_edge_skips_empty_ranges() {
    let mut l = layout();
    let resid = l.residual0;
    let mid = split_grid(&mut l, resid, Dim::X, 0.0, 0.0).unwrap();
    let grid = l.get(resid).unwrap().grid.clone().unwrap();
    assert_eq!(grid.children.len(), 2);
    assert_eq!(grid.children[0], mid);
}

#[test]
fn out_of_range_split_is_none_and_does_not_mutate() {
    let mut l = layout();
    let resid = l.residual0;
    let before = l.clone();
    assert_eq!(split_grid(&mut l, resid, Dim::X, 11.0, 0.0), None);
    assert_eq!(split_grid(&mut l, resid, Dim::X, -0.5, 0.0), None);
    assert_eq!(split_grid(&mut l, resid, Dim::X, f64::NAN, 0.0), None);
    assert_eq!(l, before);
}

#[test]
fn split_along_y_partitions_channels() {
    let mut l = layout();
    let resid = l.residual0;
    let row = split_grid(&mut l, resid, Dim::Y, 10.0, 0.0).unwrap();
    let blk = l.get(row).unwrap();
    assert_eq!(blk.cy, 1);
    assert_eq!(blk.cx, 11);
    assert!((blk.y - (l.get(resid).unwrap().y + 10.0 * l.cell)).abs() < 1e-9);
}

#[test]
fn find_sub_blocks_intersects_inclusive_range() {
    let mut l = layout();
    let resid = l.residual0;
    split_grid(&mut l, resid, Dim::X, 4.0, 0.0).unwrap();

    assert_eq!(find_sub_blocks(&l, resid, Dim::X, Some(4), Some(4)).len(), 1);
    assert_eq!(find_sub_blocks(&l, resid, Dim::X, Some(3), Some(4)).len(), 2);
    assert_eq!(find_sub_blocks(&l, resid, Dim::X, None, None).len(), 3);
    assert_eq!(find_sub_blocks(&l, resid, Dim::X, Some(5), None).len(), 1);
    assert!(find_sub_blocks(&l, resid, Dim::Y, None, None).is_empty());
    assert!(find_sub_blocks(&l, l.pos_embed, Dim::X, None, None).is_empty());
}

#[test]
fn hide_from_block_hides_later_cubes_only() {
    let mut l = layout();
    let resid = l.residual0;
    let idx = l.cube_index(resid).unwrap();
    let hidden = hide_from_block(&mut l, resid);
    assert_eq!(hidden, l.cubes.len() - idx - 1);
    assert_eq!(l.get(resid).unwrap().opacity, 1.0);
    assert_eq!(l.get(l.tok_embed).unwrap().opacity, 1.0);
    let last = *l.cubes.last().unwrap();
    assert_eq!(l.get(last).unwrap().opacity, 0.0);
}
