use super::*;

fn state(phase: Phase, tokens: bool) -> ProgramState {
    let mut cfg = WalkthroughConfig {
        phase,
        ..WalkthroughConfig::default()
    };
    if tokens {
        cfg.input_tokens = Some(vec![2, 1, 0, 1, 1, 2, 0, 0, 1, 2, 2]);
    }
    ProgramState::new(&cfg, None).unwrap()
}

#[test]
fn new_measures_the_phase_length() {
    let s = state(Phase::InputDetailTokEmbed, true);
    assert!(s.walkthrough.phase_length > 0.0);
    assert_eq!(s.walkthrough.time, 0.0);
    assert!(!s.walkthrough.running);
}

#[test]
fn restored_time_is_clamped_to_the_phase() {
    let cfg = WalkthroughConfig::default();
    let saved = SavedState {
        phase: Phase::InputDetailTables,
        phase_time: 1_000.0,
        camera: Camera::default(),
    };
    let s = ProgramState::new(&cfg, Some(saved)).unwrap();
    assert_eq!(s.walkthrough.phase, Phase::InputDetailTables);
    assert_eq!(s.walkthrough.time, s.walkthrough.phase_length);
}

#[test]
fn snapshot_tracks_the_clock() {
    let mut s = state(Phase::IntroOverview, false);
    s.walkthrough.play();
    run_program(&mut s, 0.5);
    assert_eq!(s.saved.phase, Phase::IntroOverview);
    assert_eq!(s.saved.phase_time, 0.5);
}

#[test]
fn layout_is_regenerated_every_frame() {
    let mut s = state(Phase::InputDetailTokEmbed, true);
    s.walkthrough.scrub(3.0);
    let a = run_program(&mut s, 0.0);
    let arena = s.layout.arena_len();
    let b = run_program(&mut s, 0.0);
    assert_eq!(a, b);
    assert_eq!(s.layout.arena_len(), arena);
}

#[test]
fn set_model_validates_against_shape() {
    let mut s = state(Phase::IntroOverview, false);
    assert!(s.set_model(Some(ModelData { input_buf: vec![0; 2] })).is_err());
    assert!(s.set_model(Some(ModelData { input_buf: vec![0; 11] })).is_ok());
    run_program(&mut s, 0.0);
    assert!(s.layout.model.is_some());
}

#[test]
fn scrub_after_phase_change_uses_the_new_length() {
    let mut s = state(Phase::InputDetailTables, false);
    let short = s.walkthrough.phase_length;

    s.walkthrough.set_phase(Phase::InputDetailTokEmbed);
    s.walkthrough.scrub(5.0);
    let frame = run_program(&mut s, 0.0);
    assert!(frame.phase_length > 5.0, "{short} -> {}", frame.phase_length);
    assert_eq!(frame.time, 5.0);
}

#[test]
fn set_phase_measures_the_new_phase() {
    let mut s = state(Phase::InputDetailTables, false);
    let frame = s.set_phase(Phase::LayerNorm1);
    assert_eq!(frame.phase, Phase::LayerNorm1);
    assert_eq!(frame.time, 0.0);
    assert!(frame.phase_length > 0.5);
    assert_eq!(s.walkthrough.phase_length, frame.phase_length);
}
