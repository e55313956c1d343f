//! Experiment paradigms offered by the launcher

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::CatalogError;

/// Visual stimulus-response paradigms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentKind {
    VisualN170,
    VisualP300,
    VisualSsvep,
}

impl ExperimentKind {
    /// All experiments in menu order.
    pub const ALL: [ExperimentKind; 3] = [
        ExperimentKind::VisualN170,
        ExperimentKind::VisualP300,
        ExperimentKind::VisualSsvep,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used for the data directory and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ExperimentKind::VisualN170 => "visual_n170",
            ExperimentKind::VisualP300 => "visual_p300",
            ExperimentKind::VisualSsvep => "visual_ssvep",
        }
    }

    /// Label shown in the intro menu.
    pub fn menu_label(&self) -> &'static str {
        match self {
            ExperimentKind::VisualN170 => "visual n170",
            ExperimentKind::VisualP300 => "visual p300",
            ExperimentKind::VisualSsvep => "ssvep",
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExperimentKind {
    type Err = CatalogError;

    /// Accepts the directory name (`visual_ssvep`) or the short form (`ssvep`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "visual_n170" | "n170" => Ok(ExperimentKind::VisualN170),
            "visual_p300" | "p300" => Ok(ExperimentKind::VisualP300),
            "visual_ssvep" | "ssvep" => Ok(ExperimentKind::VisualSsvep),
            other => Err(CatalogError::UnknownExperiment(other.to_string())),
        }
    }
}
