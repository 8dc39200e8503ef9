use super::*;
use crate::timeline::window::WindowKind;

fn windows_at(now: f64) -> (TimeWindow, TimeWindow, TimeWindow) {
    let a = TimeWindow::resolve(now, 0.0, 1.0, WindowKind::Open);
    let b = TimeWindow::resolve(now, 1.0, 1.0, WindowKind::Closed);
    let terminal = TimeWindow::resolve(now, 4.0, 1.0, WindowKind::Open);
    (a, b, terminal)
}

#[test]
fn unresolved_terminal_leaves_windows_untouched() {
    let (mut a, mut b, terminal) = windows_at(4.5);
    let before = (a, b);
    assert_eq!(cleanup(&terminal, [&mut a, &mut b]), 0);
    assert_eq!((a, b), before);
    assert!(a.active);
}

#[test]
fn resolved_terminal_retires_open_and_closed_windows() {
    for now in [5.0, 5.5, 100.0] {
        let (mut a, mut b, terminal) = windows_at(now);
        // Natural state: open window still active, closed one already inactive.
        assert!(a.active);
        assert!(!b.active);

        assert_eq!(cleanup(&terminal, [&mut a, &mut b]), 2);
        for w in [a, b] {
            assert_eq!(w.t, 1.0);
            assert!(!w.active);
            assert!(w.retired);
        }
    }
}

#[test]
fn retires_windows_that_never_started() {
    let terminal = TimeWindow::resolve(2.0, 0.0, 1.0, WindowKind::Open);
    let mut late = TimeWindow::resolve(2.0, 10.0, 1.0, WindowKind::Open);
    assert_eq!(late.t, 0.0);
    cleanup(&terminal, [&mut late]);
    assert_eq!(late.t, 1.0);
    assert!(!late.active);
}
