use super::*;

#[test]
fn open_window_stays_active_once_settled() {
    let w = TimeWindow::resolve(5.0, 1.0, 2.0, WindowKind::Open);
    assert_eq!(w.t, 1.0);
    assert!(w.active);
    assert!(w.is_done());
}

#[test]
fn closed_window_deactivates_at_end() {
    let inside = TimeWindow::resolve(2.5, 1.0, 2.0, WindowKind::Closed);
    assert!(inside.active);
    assert_eq!(inside.t, 0.75);

    let at_end = TimeWindow::resolve(3.0, 1.0, 2.0, WindowKind::Closed);
    assert!(!at_end.active);
    assert_eq!(at_end.t, 1.0);
}

#[test]
fn before_start_is_inactive_with_zero_progress() {
    let w = TimeWindow::resolve(0.5, 1.0, 2.0, WindowKind::Open);
    assert_eq!(w.t, 0.0);
    assert!(!w.active);
}

#[test]
fn zero_and_negative_durations_are_instant_steps() {
    for dur in [0.0, -1.0, f64::NAN] {
        let before = TimeWindow::resolve(0.999, 1.0, dur, WindowKind::Open);
        let at = TimeWindow::resolve(1.0, 1.0, dur, WindowKind::Open);
        assert_eq!(before.t, 0.0);
        assert!(!before.active);
        assert_eq!(at.t, 1.0);
        assert!(at.active);
        assert_eq!(at.duration, 0.0);
    }
}

#[test]
fn negative_now_yields_inactive_zero() {
    let w = TimeWindow::resolve(-0.5, 0.0, 1.0, WindowKind::Open);
    assert_eq!(w.t, 0.0);
    assert!(!w.active);
}

#[test]
fn progress_is_monotonic_in_now() {
    for (start, dur) in [(0.0, 1.0), (1.5, 0.2), (2.0, 0.0), (0.3, 4.0)] {
        let mut prev = 0.0;
        for i in 0..=400 {
            let now = i as f64 * 0.0125;
            let t = progress(now, start, dur);
            assert!(t >= prev, "start={start} dur={dur} now={now}");
            prev = t;
        }
    }
}

#[test]
fn never_window_does_not_start() {
    let w = TimeWindow::never(1.0);
    assert!(!w.start.is_finite());
    assert!(!w.active);
    assert!(!w.has_started());
    let resolved = TimeWindow::resolve(100.0, f64::INFINITY, 1.0, WindowKind::Open);
    assert_eq!(resolved.t, 0.0);
    assert!(!resolved.active);
}

#[test]
fn retire_forces_terminal_state() {
    let mut w = TimeWindow::resolve(0.5, 0.0, 2.0, WindowKind::Open);
    w.retire();
    assert_eq!(w.t, 1.0);
    assert!(!w.active);
    assert!(w.retired);
}

#[test]
fn eased_progress_uses_curve() {
    let w = TimeWindow::resolve(0.5, 0.0, 1.0, WindowKind::Open);
    assert_eq!(w.eased(Ease::InQuad), 0.25);
}
