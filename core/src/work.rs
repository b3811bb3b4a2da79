//! Work categories and per-category tallies.
//!
//! Tokens carry no payload beyond their category, so every piece of
//! work in the simulation is fully described by a `WorkCategory`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of work an operations team can be handed.
///
/// - `Operational`: necessary, team-local toil that grows with the number
///   of systems the team has onboarded.
/// - `InTeamProject`: a siloed project that only helps the team itself.
/// - `CrossTeamProject`: work with (or benefits from) other teams.
/// - `Onboarding`: takes on a new system; spawns follow-on work and
///   permanently raises operational demand.
///
/// The derived ordering is display order only. Processing is FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    Operational,
    InTeamProject,
    CrossTeamProject,
    Onboarding,
}

impl WorkCategory {
    /// Every category, in display order.
    pub const ALL: [WorkCategory; 4] = [
        Self::Operational,
        Self::InTeamProject,
        Self::CrossTeamProject,
        Self::Onboarding,
    ];

    /// Stable name used in the event log and the history table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Operational      => "operational",
            Self::InTeamProject    => "in_team_project",
            Self::CrossTeamProject => "cross_team_project",
            Self::Onboarding       => "onboarding",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for WorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A count for every category. Absent categories read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    counts: [u32; 4],
}

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: WorkCategory) -> u32 {
        self.counts[category.index()]
    }

    pub fn add(&mut self, category: WorkCategory, n: u32) {
        self.counts[category.index()] += n;
    }

    pub fn increment(&mut self, category: WorkCategory) {
        self.add(category, 1);
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn clear(&mut self) {
        self.counts = [0; 4];
    }

    /// `(category, count)` pairs in display order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (WorkCategory, u32)> + '_ {
        WorkCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Non-zero categories, largest count first. Ties keep display order.
    pub fn most_common(&self) -> Vec<(WorkCategory, u32)> {
        let mut pairs: Vec<_> = self.iter().filter(|(_, n)| *n > 0).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

impl FromIterator<WorkCategory> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = WorkCategory>>(iter: I) -> Self {
        let mut counts = Self::new();
        for category in iter {
            counts.increment(category);
        }
        counts
    }
}

impl fmt::Display for CategoryCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .most_common()
            .into_iter()
            .map(|(c, n)| format!("{c}={n}"))
            .collect();
        if parts.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}
