use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"walkthrough");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_u8(b'w');
    b.write_bytes(b"alkthrough");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn smoothstep_endpoints_and_midpoint() {
    assert_eq!(smoothstep(-1.0), 0.0);
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(0.5), 0.5);
    assert_eq!(smoothstep(1.0), 1.0);
    assert_eq!(smoothstep(2.0), 1.0);
    assert_eq!(lerp_smoothstep(2.0, 4.0, 1.0), 4.0);
}

#[test]
fn one_hot_ignores_out_of_range() {
    assert_eq!(one_hot_array(3, 1, 0.5), vec![0.0, 0.5, 0.0]);
    assert_eq!(one_hot_array(3, 7, 1.0), vec![0.0, 0.0, 0.0]);
}

#[test]
fn cell_index_floors_and_rejects_negative() {
    assert_eq!(cell_index(3.5), Some(3));
    assert_eq!(cell_index(0.0), Some(0));
    assert_eq!(cell_index(-0.1), None);
    assert_eq!(cell_index(f64::NAN), None);
}

#[test]
fn vec_lerp_matches_scalar() {
    let a = Vec3::new(0.0, 10.0, -2.0);
    let b = Vec3::new(10.0, 0.0, 2.0);
    assert_eq!(Vec3::lerp(&a, &b, 0.5), Vec3::new(5.0, 5.0, 0.0));
}
