use super::*;
use crate::walkthrough::phase::{PhaseGroupId, PhaseInfo, phase_list};

fn noop(_: &mut WalkthroughArgs<'_>) {}

fn all_noop() -> Vec<(Phase, PhaseScript)> {
    Phase::ALL.iter().map(|&p| (p, noop as PhaseScript)).collect()
}

#[test]
fn builtin_registry_covers_every_phase() {
    let reg = PhaseRegistry::builtin(&phase_list()).unwrap();
    assert!(Phase::ALL.iter().all(|&p| reg.contains(p)));
}

#[test]
fn missing_script_is_rejected() {
    let scripts = all_noop().into_iter().filter(|(p, _)| *p != Phase::LayerNorm1);
    let err = PhaseRegistry::new(&phase_list(), scripts).unwrap_err();
    assert!(matches!(err, WalkthroughError::Validation(_)));
    assert!(err.to_string().contains("LayerNorm1"));
}

#[test]
fn unlisted_phase_is_rejected() {
    let mut list = phase_list();
    list[1].phases.retain(|p| p.id != Phase::InputFirst);
    let err = PhaseRegistry::new(&list, all_noop()).unwrap_err();
    assert!(err.to_string().contains("InputFirst"));
}

#[test]
fn duplicate_listing_is_rejected() {
    let mut list = phase_list();
    list.push(PhaseGroup {
        group_id: PhaseGroupId::Intro,
        title: "Again".to_owned(),
        phases: vec![PhaseInfo {
            id: Phase::IntroOverview,
            title: "Overview".to_owned(),
        }],
    });
    assert!(PhaseRegistry::new(&list, all_noop()).is_err());
}
