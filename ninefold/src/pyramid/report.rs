//! Summary of a finished build.

use std::path::PathBuf;

use crate::coord::DirectionAddress;
use crate::map::LevelSize;

/// One written level of the pyramid.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRecord {
    /// 0 for the top map.
    pub survey: u32,
    /// Most recent steps leading to this level (empty for the top map).
    pub address: DirectionAddress,
    pub directory: PathBuf,
    pub map_file: PathBuf,
    pub size: LevelSize,
    pub extent: f64,
}

/// Everything a build wrote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub levels: Vec<LevelRecord>,
    /// Branches that ended because their survey had no size configured.
    pub pruned: usize,
}

impl BuildReport {
    pub(crate) fn pruned_branch() -> Self {
        Self {
            levels: Vec::new(),
            pruned: 1,
        }
    }

    pub(crate) fn merge(&mut self, other: BuildReport) {
        self.levels.extend(other.levels);
        self.pruned += other.pruned;
    }

    /// Order levels by survey, then by directory.
    pub(crate) fn sort(&mut self) {
        self.levels
            .sort_by(|a, b| a.survey.cmp(&b.survey).then_with(|| a.directory.cmp(&b.directory)));
    }

    /// Levels written at the given survey.
    pub fn levels_at(&self, survey: u32) -> impl Iterator<Item = &LevelRecord> {
        self.levels.iter().filter(move |l| l.survey == survey)
    }

    /// Deepest survey written.
    pub fn deepest_survey(&self) -> u32 {
        self.levels.iter().map(|l| l.survey).max().unwrap_or(0)
    }

    /// The level written into `directory`, if any.
    pub fn level_in(&self, directory: &std::path::Path) -> Option<&LevelRecord> {
        self.levels.iter().find(|l| l.directory == directory)
    }
}
