use super::*;
use crate::foundation::core::Vec3;

#[test]
fn json_round_trip_keeps_pose() {
    let mut camera = Camera::default();
    camera.center = Vec3::new(1.0, 2.0, 3.0);
    let saved = SavedState {
        phase: Phase::InputDetailTables,
        phase_time: 1.25,
        camera,
    };
    let back = SavedState::from_json_str(&saved.to_json().unwrap()).unwrap();
    assert_eq!(back, saved);
}

#[test]
fn unknown_phase_is_a_serde_error() {
    let err = SavedState::from_json_str(
        r#"{ "phase": "Outro", "phase_time": 0.0,
             "camera": { "angle": {"x":0,"y":0,"z":0}, "center": {"x":0,"y":0,"z":0} } }"#,
    )
    .unwrap_err();
    assert!(matches!(err, crate::foundation::error::WalkthroughError::Serde(_)));
}

#[test]
fn save_and_load_through_a_file() {
    let dir = std::path::PathBuf::from("target").join("unit_saved_state");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("state.json");
    let saved = SavedState {
        phase: Phase::LayerNorm1,
        phase_time: 2.0,
        camera: Camera::default(),
    };
    saved.save_to_path(&path).unwrap();
    assert_eq!(SavedState::load_from_path(&path).unwrap(), saved);
}
