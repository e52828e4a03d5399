//! Vote primitive attached to debate turns

use serde::{Deserialize, Serialize};

/// A minister's recommendation on the brief
///
/// Attached to opening and closing turns. Synthesis turns always carry
/// Abstain — the chair does not vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Approve,
    #[default]
    Abstain,
    Oppose,
}

impl Vote {
    pub fn as_str(&self) -> &str {
        match self {
            Vote::Approve => "approve",
            Vote::Abstain => "abstain",
            Vote::Oppose => "oppose",
        }
    }

    /// Parse a vote from untrusted model output.
    ///
    /// Anything that is not recognisably approve/oppose is the neutral
    /// default — a malformed vote must never fail a turn.
    pub fn parse_lossy(raw: &str) -> Vote {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approve" | "approved" | "yes" => Vote::Approve,
            "oppose" | "opposed" | "reject" | "no" => Vote::Oppose,
            _ => Vote::Abstain,
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tally of votes recorded across a debate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub approve: usize,
    pub abstain: usize,
    pub oppose: usize,
}

impl VoteTally {
    pub fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Approve => self.approve += 1,
            Vote::Abstain => self.abstain += 1,
            Vote::Oppose => self.oppose += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.approve + self.abstain + self.oppose
    }
}

impl FromIterator<Vote> for VoteTally {
    fn from_iter<I: IntoIterator<Item = Vote>>(iter: I) -> Self {
        let mut tally = VoteTally::default();
        for vote in iter {
            tally.record(vote);
        }
        tally
    }
}
