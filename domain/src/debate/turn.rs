//! Transcript records
//!
//! A turn is one appended entry in a brief's transcript: a minister
//! statement, a system marker, or a user interjection. Turn indices are
//! strictly increasing within a brief and records are immutable once
//! appended.

use crate::brief::BriefId;
use crate::cabinet::MinisterId;
use crate::core::model::ModelId;
use crate::debate::vote::Vote;
use serde::{Deserialize, Serialize};

/// Kind of transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Opening,
    Rebuttal,
    CrossExam,
    Closing,
    Synthesis,
    /// Orchestrator marker (session start, timeout, etc.)
    System,
    /// User-submitted text injected mid-debate
    Interjection,
}

impl TurnKind {
    pub fn as_str(&self) -> &str {
        match self {
            TurnKind::Opening => "opening",
            TurnKind::Rebuttal => "rebuttal",
            TurnKind::CrossExam => "cross_exam",
            TurnKind::Closing => "closing",
            TurnKind::Synthesis => "synthesis",
            TurnKind::System => "system",
            TurnKind::Interjection => "interjection",
        }
    }
}

impl std::fmt::Display for TurnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side metadata attached to a turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Vote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelId>,
    /// Turn index this statement responds to, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responding_to: Option<u64>,
    /// Set when the turn records an invoker failure instead of a statement
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
    /// Set when a user interjection was present in this turn's prompt
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub interjection: bool,
}

/// One immutable transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub brief_id: BriefId,
    pub turn_index: u64,
    /// None for system markers and user interjections
    pub speaker: Option<MinisterId>,
    pub speaker_role: String,
    pub kind: TurnKind,
    /// Free text, or the JSON-encoded synthesis payload for synthesis turns
    pub content: String,
    #[serde(default)]
    pub metadata: TurnMetadata,
}

impl TurnRecord {
    /// A system marker turn with no speaker.
    pub fn system(brief_id: BriefId, turn_index: u64, content: impl Into<String>) -> Self {
        Self {
            brief_id,
            turn_index,
            speaker: None,
            speaker_role: "system".to_string(),
            kind: TurnKind::System,
            content: content.into(),
            metadata: TurnMetadata::default(),
        }
    }

    /// A user interjection turn.
    pub fn interjection(brief_id: BriefId, turn_index: u64, text: impl Into<String>) -> Self {
        Self {
            brief_id,
            turn_index,
            speaker: None,
            speaker_role: "user".to_string(),
            kind: TurnKind::Interjection,
            content: text.into(),
            metadata: TurnMetadata::default(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.metadata.error
    }

    /// A "Name (Role): statement" line for previous-statements prompts.
    pub fn statement_line(&self, speaker_name: &str) -> String {
        format!("{} ({}): {}", speaker_name, self.speaker_role, self.content)
    }
}
