//! Debate phase state machine
//!
//! Phases run in a fixed linear order. CrossExam is conditional on a Skeptic
//! being seated; Rebuttal is conditional on at least two opening statements.
//! Any phase except Synthesis may be skipped by the global deadline —
//! Synthesis always runs.

use serde::{Deserialize, Serialize};

/// Phase of a cabinet debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Every seated minister states a position and a vote
    Opening,
    /// Ministers respond to each other's openings
    Rebuttal,
    /// The Skeptic's dedicated challenge turn
    CrossExam,
    /// Final statements and votes (Skeptic excluded)
    Closing,
    /// The chair compiles the transcript into options
    Synthesis,
    /// Terminal state
    Done,
}

impl DebatePhase {
    pub fn as_str(&self) -> &str {
        match self {
            DebatePhase::Opening => "opening",
            DebatePhase::Rebuttal => "rebuttal",
            DebatePhase::CrossExam => "cross_exam",
            DebatePhase::Closing => "closing",
            DebatePhase::Synthesis => "synthesis",
            DebatePhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            DebatePhase::Opening => "Opening Statements",
            DebatePhase::Rebuttal => "Rebuttal",
            DebatePhase::CrossExam => "Cross-Examination",
            DebatePhase::Closing => "Closing Statements",
            DebatePhase::Synthesis => "Synthesis",
            DebatePhase::Done => "Done",
        }
    }

    /// The phase that follows this one in the full sequence.
    pub fn next(&self) -> DebatePhase {
        match self {
            DebatePhase::Opening => DebatePhase::Rebuttal,
            DebatePhase::Rebuttal => DebatePhase::CrossExam,
            DebatePhase::CrossExam => DebatePhase::Closing,
            DebatePhase::Closing => DebatePhase::Synthesis,
            DebatePhase::Synthesis => DebatePhase::Done,
            DebatePhase::Done => DebatePhase::Done,
        }
    }

    /// Whether the global deadline may skip this phase.
    pub fn skippable_on_timeout(&self) -> bool {
        !matches!(self, DebatePhase::Synthesis | DebatePhase::Done)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
