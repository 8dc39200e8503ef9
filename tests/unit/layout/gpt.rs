use super::*;
use crate::foundation::core::Dim;
use crate::layout::model::ModelShape;

#[test]
fn default_shape_has_expected_handles() {
    let shape = ModelShape::default();
    let l = gen_gpt_layout(shape, None).unwrap();
    assert_eq!(l.transformer.len(), shape.n_blocks);
    assert_eq!(l.transformer[0].heads.len(), shape.n_heads);
    assert_eq!(l.get(l.residual0).unwrap().cx, shape.t);
    assert_eq!(l.get(l.residual0).unwrap().cy, shape.c);
    assert_eq!(l.get(l.tok_embed).unwrap().cx, shape.vocab_size);
    assert_eq!(l.arena_len(), l.cubes.len());
}

#[test]
fn access_only_with_model() {
    let shape = ModelShape::default();
    let bare = gen_gpt_layout(shape, None).unwrap();
    assert!(bare.cubes.iter().all(|&c| bare.get(c).unwrap().access.is_none()));

    let model = ModelData::new(&shape, vec![0; shape.t]).unwrap();
    let full = gen_gpt_layout(shape, Some(&model)).unwrap();
    assert!(full.cubes.iter().all(|&c| full.get(c).unwrap().access.is_some()));
    assert_eq!(full.input_token(3), Some(0));
}

#[test]
fn qkv_blocks_depend_on_layer_norm_and_weights() {
    let l = gen_gpt_layout(ModelShape::default(), None).unwrap();
    let layer = &l.transformer[0];
    let head = &layer.heads[1];
    let deps = l.get(head.v).unwrap().deps.unwrap();
    let [a, b] = deps.dot.unwrap();
    assert_eq!(a.src, layer.ln1.ln_resid);
    assert_eq!(b.src, head.v_weight);
    assert_eq!(deps.dot_len, 48);
    assert_eq!(a.src_idx.map(2, 5, 7), (2, 7));
    assert_eq!(b.src_idx.map(2, 5, 7), (7, 5));
    assert_eq!(a.src_idx.dot_dim(), Some(Dim::Y));
}

#[test]
fn generation_is_deterministic() {
    let shape = ModelShape::default();
    assert_eq!(
        gen_gpt_layout(shape, None).unwrap(),
        gen_gpt_layout(shape, None).unwrap()
    );
}

#[test]
fn invalid_shapes_are_rejected() {
    let mut shape = ModelShape::default();
    shape.n_heads = 5;
    assert!(gen_gpt_layout(shape, None).is_err());
    shape = ModelShape::default();
    shape.t = 0;
    assert!(gen_gpt_layout(shape, None).is_err());
    assert!(ModelData::new(&ModelShape::default(), vec![9; 11]).is_err());
    assert!(ModelData::new(&ModelShape::default(), vec![0; 3]).is_err());
}
