use super::*;

#[test]
fn approaches_and_snaps_to_target() {
    let mut cam = Camera::default();
    let target = Vec3::new(0.0, 0.0, -30.0);
    cam.center_desired = Some(target);

    let start_dist = (target - cam.center).length();
    cam.move_to_desired(1.0 / 60.0);
    assert!((target - cam.center).length() < start_dist);

    for _ in 0..2_000 {
        cam.move_to_desired(1.0 / 60.0);
    }
    assert_eq!(cam.center, target);
    assert_eq!(cam.center_desired, None);
}

#[test]
fn zero_dt_is_a_noop() {
    let mut cam = Camera::default();
    cam.angle_desired = Some(Vec3::new(290.0, 20.0, 1.2));
    let before = cam.clone();
    cam.move_to_desired(0.0);
    cam.move_to_desired(f64::NAN);
    assert_eq!(cam, before);
}

#[test]
fn desired_targets_are_not_persisted() {
    let mut cam = Camera::default();
    cam.center_desired = Some(Vec3::ZERO);
    let json = serde_json::to_string(&cam).unwrap();
    let back: Camera = serde_json::from_str(&json).unwrap();
    assert_eq!(back.center, cam.center);
    assert_eq!(back.center_desired, None);
}
