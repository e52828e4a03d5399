//! Synthesis payload produced by the chair

use crate::debate::vote::{Vote, VoteTally};
use serde::{Deserialize, Serialize};

/// How aligned the cabinet was, judged from recorded votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusStrength {
    /// Nobody opposed
    Strong,
    /// A majority approved but there was opposition
    Divided,
    /// No approving majority
    Contested,
}

impl ConsensusStrength {
    /// Derive consensus strength from the debate's vote tally.
    ///
    /// Used when the chair's payload does not state one. Abstentions count
    /// against a majority but not as opposition.
    pub fn from_tally(tally: &VoteTally) -> Self {
        if tally.total() == 0 || tally.oppose == 0 {
            ConsensusStrength::Strong
        } else if tally.approve * 2 > tally.total() {
            ConsensusStrength::Divided
        } else {
            ConsensusStrength::Contested
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConsensusStrength::Strong => "strong",
            ConsensusStrength::Divided => "divided",
            ConsensusStrength::Contested => "contested",
        }
    }
}

impl std::fmt::Display for ConsensusStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One actionable option presented to the user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanOption {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tradeoffs: String,
    /// Names of ministers whose positions back this option
    #[serde(default)]
    pub supporters: Vec<String>,
}

/// Structured output of the synthesis phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisPayload {
    /// One- or two-sentence synthesis of the cabinet's sentiment
    pub summary: String,
    pub consensus: ConsensusStrength,
    /// Two to three options with title/description/tradeoffs
    #[serde(default)]
    pub options: Vec<PlanOption>,
}

impl SynthesisPayload {
    pub fn new(summary: impl Into<String>, consensus: ConsensusStrength) -> Self {
        Self {
            summary: summary.into(),
            consensus,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<PlanOption>) -> Self {
        self.options = options;
        self
    }

    /// The synthesis vote is fixed: the chair abstains.
    pub fn vote() -> Vote {
        Vote::Abstain
    }
}
