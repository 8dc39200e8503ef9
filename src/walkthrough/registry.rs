use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::error::{WalkthroughError, WalkthroughResult};
use crate::walkthrough::phase::{Phase, PhaseGroup, flatten};
use crate::walkthrough::scripts::{self, PhaseScript, WalkthroughArgs};

/// Mapping from phase id to its script, checked against a phase list when built.
#[derive(Clone, Debug)]
pub struct PhaseRegistry {
    scripts: BTreeMap<Phase, PhaseScript>,
}

impl PhaseRegistry {
    /// Registry of the built-in scripts, validated against `list`.
    pub fn builtin(list: &[PhaseGroup]) -> WalkthroughResult<Self> {
        Self::new(list, scripts::builtin_scripts())
    }

    /// Build a registry, rejecting phase lists that name a phase twice, miss a phase, or name a
    /// phase without a script.
    #[tracing::instrument(skip_all, fields(groups = list.len()))]
    pub fn new(
        list: &[PhaseGroup],
        scripts: impl IntoIterator<Item = (Phase, PhaseScript)>,
    ) -> WalkthroughResult<Self> {
        let scripts: BTreeMap<Phase, PhaseScript> = scripts.into_iter().collect();

        let mut seen = BTreeSet::new();
        for phase in flatten(list) {
            if !seen.insert(phase) {
                return Err(WalkthroughError::validation(format!(
                    "phase {phase} is listed more than once"
                )));
            }
            if !scripts.contains_key(&phase) {
                return Err(WalkthroughError::validation(format!(
                    "phase {phase} has no registered script"
                )));
            }
        }
        if let Some(missing) = Phase::ALL.into_iter().find(|p| !seen.contains(p)) {
            return Err(WalkthroughError::validation(format!(
                "phase {missing} is not reachable from the phase list"
            )));
        }

        tracing::debug!(phases = seen.len(), "phase registry validated");
        Ok(Self { scripts })
    }

    pub fn contains(&self, phase: Phase) -> bool {
        self.scripts.contains_key(&phase)
    }

    /// Run the script for `phase`. Returns false when no script is registered.
    pub fn dispatch(&self, phase: Phase, args: &mut WalkthroughArgs<'_>) -> bool {
        match self.scripts.get(&phase) {
            Some(script) => {
                script(args);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/walkthrough/registry.rs"]
mod tests;
