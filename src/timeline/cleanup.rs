use crate::timeline::window::TimeWindow;

/// Retire every window in `earlier` once `terminal` has fully resolved.
///
/// The windows are mutated in place, so every later read of them in the same script invocation
/// sees `t = 1, active = false`. Because `terminal.t` is non-decreasing in phase time, the forced
/// state holds for every phase time at or after the terminal window's completion.
///
/// Returns the number of windows retired by this call.
pub fn cleanup<'a>(
    terminal: &TimeWindow,
    earlier: impl IntoIterator<Item = &'a mut TimeWindow>,
) -> usize {
    if !terminal.is_done() {
        return 0;
    }
    let mut n = 0;
    for w in earlier {
        w.retire();
        n += 1;
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cleanup.rs"]
mod tests;
