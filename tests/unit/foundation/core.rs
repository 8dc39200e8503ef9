use super::*;

#[test]
fn vec3_axis_access_roundtrips() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(v.get(Dim::X), 1.0);
    assert_eq!(v.get(Dim::Y), 2.0);
    assert_eq!(v.get(Dim::Z), 3.0);
    assert_eq!(v.with(Dim::Y, 9.0), Vec3::new(1.0, 9.0, 3.0));
}

#[test]
fn vec3_arithmetic() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(0.5, 0.5, 0.5);
    assert_eq!(a + b, Vec3::new(1.5, 2.5, 3.5));
    assert_eq!(a - b, Vec3::new(0.5, 1.5, 2.5));
    assert_eq!(b * 2.0, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
}

#[test]
fn vec4_mul_fades_alpha_too() {
    let c = Vec4::rgb(1.0, 0.0, 0.0).mul(0.5);
    assert_eq!(c, Vec4::new(0.5, 0.0, 0.0, 0.5));
}
