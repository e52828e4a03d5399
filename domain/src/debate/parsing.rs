//! Best-effort extraction of structured payloads from model output
//!
//! The completion service nominally returns JSON, but the text is untrusted.
//! Extraction runs in three tiers:
//!
//! 1. strict: the expected schema parses cleanly;
//! 2. loose: the text is a JSON object, but the expected field is missing —
//!    take the first string field of useful length;
//! 3. fallback: treat the raw text as the content, or substitute a
//!    placeholder naming the speaker when even that is blank.
//!
//! A parse failure must never abort a debate, so none of these functions
//! return errors.

use crate::debate::synthesis::{ConsensusStrength, SynthesisPayload};
use crate::debate::vote::{Vote, VoteTally};
use serde_json::Value;

/// Minimum length for a string field to be taken as content in the loose tier
const MIN_CONTENT_LEN: usize = 20;

/// Parsed statement turn: free-text content plus a vote
#[derive(Debug, Clone, PartialEq)]
pub struct TurnPayload {
    pub content: String,
    pub vote: Vote,
}

/// Extract a statement payload from raw model output.
pub fn parse_turn_payload(raw: &str, speaker_name: &str) -> TurnPayload {
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        // Tier 3: not JSON at all
        return TurnPayload {
            content: fallback_content(raw, speaker_name),
            vote: Vote::Abstain,
        };
    };

    let Value::Object(map) = &value else {
        return TurnPayload {
            content: fallback_content(raw, speaker_name),
            vote: Vote::Abstain,
        };
    };

    let vote = map
        .get("vote")
        .and_then(Value::as_str)
        .map(Vote::parse_lossy)
        .unwrap_or_default();

    // Tier 1: the expected primary field
    if let Some(content) = map.get("content").and_then(Value::as_str)
        && !content.trim().is_empty()
    {
        return TurnPayload {
            content: content.to_string(),
            vote,
        };
    }

    // Tier 2: first string field of useful length
    if let Some(content) = scan_for_content(map) {
        return TurnPayload { content, vote };
    }

    TurnPayload {
        content: fallback_content(raw, speaker_name),
        vote,
    }
}

/// Extract a synthesis payload from raw chair output.
///
/// `tally` supplies the consensus strength when the chair's JSON omits one.
pub fn parse_synthesis_payload(
    raw: &str,
    speaker_name: &str,
    tally: &VoteTally,
) -> SynthesisPayload {
    // Tier 1: full schema
    if let Ok(payload) = serde_json::from_str::<SynthesisPayload>(raw) {
        return payload;
    }

    let derived = ConsensusStrength::from_tally(tally);

    // Tier 1b: schema minus the consensus tag (the original never emitted one)
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) {
        let summary = map
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| scan_for_content(&map));

        if let Some(summary) = summary {
            let options = map
                .get("options")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default();
            return SynthesisPayload {
                summary,
                consensus: derived,
                options,
            };
        }
    }

    // Tier 3
    SynthesisPayload::new(fallback_content(raw, speaker_name), derived)
}

/// Scan a parsed object for the first string value of useful length.
fn scan_for_content(map: &serde_json::Map<String, Value>) -> Option<String> {
    map.values()
        .filter_map(Value::as_str)
        .find(|s| s.trim().len() >= MIN_CONTENT_LEN)
        .map(str::to_string)
}

/// Raw text as content, or a placeholder naming the speaker.
fn fallback_content(raw: &str, speaker_name: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        format!("[no response from {speaker_name}]")
    } else {
        trimmed.to_string()
    }
}
