//! Cabinet membership: ministers, roles, and the default panel
//!
//! Ministers are configured outside this core (the orchestrator reads them,
//! the reputation engine writes their status fields). The default cabinet
//! mirrors the seats a fresh user starts with.

use crate::core::model::ModelId;
use crate::reputation::ReputationState;
use serde::{Deserialize, Serialize};

/// Identifier of a cabinet member (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinisterId(String);

impl MinisterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MinisterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MinisterId {
    fn from(s: &str) -> Self {
        MinisterId::new(s)
    }
}

/// Debate role of a minister
///
/// Two role tags carry debate semantics: the Synthesizer chairs the session
/// and produces the final synthesis (and never votes), the Skeptic gets the
/// dedicated cross-examination turn and sits out the closing round. Every
/// other tag is an advisor portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MinisterRole {
    /// Chair of the session; produces the synthesis, does not vote
    Synthesizer,
    /// Opposition seat; performs cross-examination, excluded from closing
    Skeptic,
    /// Regular advisor with a named portfolio (e.g. "Ethics")
    Advisor(String),
}

impl MinisterRole {
    pub fn as_str(&self) -> &str {
        match self {
            MinisterRole::Synthesizer => "Synthesizer",
            MinisterRole::Skeptic => "Skeptic",
            MinisterRole::Advisor(portfolio) => portfolio,
        }
    }

    pub fn is_synthesizer(&self) -> bool {
        matches!(self, MinisterRole::Synthesizer)
    }

    pub fn is_skeptic(&self) -> bool {
        matches!(self, MinisterRole::Skeptic)
    }
}

impl From<String> for MinisterRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Synthesizer" => MinisterRole::Synthesizer,
            "Skeptic" => MinisterRole::Skeptic,
            _ => MinisterRole::Advisor(s),
        }
    }
}

impl From<MinisterRole> for String {
    fn from(role: MinisterRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for MinisterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A configured AI participant (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Minister {
    pub id: MinisterId,
    pub name: String,
    pub role: MinisterRole,
    pub system_prompt: String,
    pub model: ModelId,
    pub temperature: f32,
    pub enabled: bool,
    /// Deterministic speaking order within a round
    pub seat_index: u32,
    #[serde(default)]
    pub reputation: ReputationState,
}

impl Minister {
    pub fn new(
        id: MinisterId,
        name: impl Into<String>,
        role: MinisterRole,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            system_prompt: system_prompt.into(),
            model: ModelId::default(),
            temperature: 0.7,
            enabled: true,
            seat_index: 0,
            reputation: ReputationState::default(),
        }
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_seat(mut self, seat_index: u32) -> Self {
        self.seat_index = seat_index;
        self
    }

    /// Whether this minister may be seated in a new session.
    pub fn is_available(&self) -> bool {
        self.enabled && !self.reputation.status.is_suspended()
    }
}

/// The default cabinet a fresh user starts with.
pub fn default_cabinet() -> Vec<Minister> {
    let seats = [
        (
            "prime-minister",
            "Prime Minister",
            MinisterRole::Synthesizer,
            "You are the Prime Minister. Your role is to synthesize competing advice from \
             your cabinet ministers and present 2-3 clear options to the user. Be concise, \
             balanced, and focused on actionable outcomes.",
            0.7,
        ),
        (
            "productivity",
            "Minister of Productivity",
            MinisterRole::Advisor("Productivity".to_string()),
            "You are the Minister of Productivity. Your focus is on efficiency, output, and \
             minimizing wasted time. Advise the user on how to achieve their goals as \
             quickly and effectively as possible.",
            0.5,
        ),
        (
            "ethics",
            "Minister of Ethics",
            MinisterRole::Advisor("Ethics".to_string()),
            "You are the Minister of Ethics. Your focus is on values, integrity, and \
             long-term consequences. Ensure the user's goals align with their core values \
             and do not cause harm.",
            0.6,
        ),
        (
            "philosophy",
            "Minister of Philosophy",
            MinisterRole::Advisor("Philosophy".to_string()),
            "You are the Minister of Philosophy. Your focus is on the \"why\" behind the \
             goals. Help the user find meaning and clarity in their pursuits.",
            0.8,
        ),
        (
            "economy",
            "Minister of Economy",
            MinisterRole::Advisor("Opportunity Cost".to_string()),
            "You are the Minister of Economy. Your focus is on resources and opportunity \
             costs. Remind the user what they are giving up by choosing one path over \
             another.",
            0.5,
        ),
        (
            "opposition",
            "Opposition Leader",
            MinisterRole::Skeptic,
            "You are the Opposition Leader. Your role is to be a skeptic. Highlight the \
             flaws in the user's logic, the risks involved, and the potential for \
             rationalization.",
            0.9,
        ),
    ];

    seats
        .into_iter()
        .enumerate()
        .map(|(i, (id, name, role, prompt, temperature))| {
            Minister::new(MinisterId::new(id), name, role, prompt)
                .with_temperature(temperature)
                .with_seat(i as u32)
        })
        .collect()
}
