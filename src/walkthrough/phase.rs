use std::fmt;
use std::str::FromStr;

use crate::foundation::error::WalkthroughError;

/// One scripted segment of the walkthrough.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum Phase {
    IntroOverview,
    InputFirst,
    InputDetailTables,
    InputDetailTokEmbed,
    LayerNorm1,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::IntroOverview,
        Phase::InputFirst,
        Phase::InputDetailTables,
        Phase::InputDetailTokEmbed,
        Phase::LayerNorm1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Phase::IntroOverview => "IntroOverview",
            Phase::InputFirst => "InputFirst",
            Phase::InputDetailTables => "InputDetailTables",
            Phase::InputDetailTokEmbed => "InputDetailTokEmbed",
            Phase::LayerNorm1 => "LayerNorm1",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = WalkthroughError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| WalkthroughError::validation(format!("unknown phase \"{s}\"")))
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum PhaseGroupId {
    Intro,
    DetailedInput,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseInfo {
    pub id: Phase,
    pub title: String,
}

/// Navigation group of phases.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PhaseGroup {
    pub group_id: PhaseGroupId,
    pub title: String,
    pub phases: Vec<PhaseInfo>,
}

fn info(id: Phase, title: &str) -> PhaseInfo {
    PhaseInfo {
        id,
        title: title.to_owned(),
    }
}

/// The built-in phase list, in navigation order.
pub fn phase_list() -> Vec<PhaseGroup> {
    vec![
        PhaseGroup {
            group_id: PhaseGroupId::Intro,
            title: "Introduction".to_owned(),
            phases: vec![info(Phase::IntroOverview, "Overview")],
        },
        PhaseGroup {
            group_id: PhaseGroupId::DetailedInput,
            title: "Detailed - Input".to_owned(),
            phases: vec![
                info(Phase::InputFirst, "The First"),
                info(Phase::InputDetailTables, "Embedding Tables"),
                info(Phase::InputDetailTokEmbed, "Embedding Action"),
                info(Phase::LayerNorm1, "First Layer Norm"),
            ],
        },
    ]
}

pub fn phase_to_group(list: &[PhaseGroup], phase: Phase) -> Option<&PhaseGroup> {
    list.iter()
        .find(|g| g.phases.iter().any(|p| p.id == phase))
}

/// Phases in navigation order across all groups.
pub fn flatten(list: &[PhaseGroup]) -> impl Iterator<Item = Phase> + '_ {
    list.iter().flat_map(|g| g.phases.iter().map(|p| p.id))
}

#[cfg(test)]
#[path = "../../tests/unit/walkthrough/phase.rs"]
mod tests;
