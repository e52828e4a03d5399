//! Turn executor
//!
//! Wraps one gateway call with a per-call timeout, parses the result
//! defensively, and produces the body of a canonical transcript record.
//! Fail-fast: no retries. A timeout or gateway failure becomes a visible
//! error turn with a neutral vote; a minister that disappeared from the
//! cabinet mid-session becomes a silent skip.

use crate::ports::agent_gateway::{AgentGateway, CompletionRequest, GatewayError};
use crate::ports::cabinet_repository::CabinetRepository;
use crate::ports::StoreError;
use cabinet_domain::{
    BriefId, Minister, MinisterId, PromptTemplate, SynthesisPayload, TurnKind, TurnMetadata,
    TurnRecord, Vote, VoteTally, parse_synthesis_payload, parse_turn_payload,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Per-call timeout for statement turns (opening, rebuttal, cross-exam, closing)
pub const STATEMENT_TIMEOUT: Duration = Duration::from_secs(8);
/// Per-call timeout for the synthesis turn, which processes the most context
pub const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(20);

/// Output token budget for statement turns
pub const STATEMENT_TOKEN_BUDGET: u32 = 200;
/// Output token budget for the synthesis turn
pub const SYNTHESIS_TOKEN_BUDGET: u32 = 400;

/// A transcript record minus its brief id and turn index
///
/// The orchestrator assigns indices: for parallel phases they are assigned
/// in seat order only after the whole round is collected.
#[derive(Debug, Clone)]
pub struct TurnBody {
    pub speaker: MinisterId,
    pub speaker_role: String,
    pub kind: TurnKind,
    pub content: String,
    pub metadata: TurnMetadata,
}

impl TurnBody {
    pub fn into_record(self, brief_id: BriefId, turn_index: u64) -> TurnRecord {
        TurnRecord {
            brief_id,
            turn_index,
            speaker: Some(self.speaker),
            speaker_role: self.speaker_role,
            kind: self.kind,
            content: self.content,
            metadata: self.metadata,
        }
    }
}

/// Result of executing one turn
#[derive(Debug)]
pub enum TurnOutcome {
    /// A statement or error-marker turn to append
    Completed(TurnBody),
    /// The minister no longer exists; drop them from the round, record nothing
    Skipped,
}

/// Result of executing the synthesis turn
#[derive(Debug)]
pub enum SynthesisOutcome {
    Completed {
        body: TurnBody,
        /// None when the chair's call failed and the turn is an error marker
        payload: Option<SynthesisPayload>,
    },
    Skipped,
}

/// Executes single turns against the agent gateway
pub struct TurnExecutor<G: AgentGateway> {
    gateway: Arc<G>,
    cabinet: Arc<dyn CabinetRepository>,
}

impl<G: AgentGateway> TurnExecutor<G> {
    pub fn new(gateway: Arc<G>, cabinet: Arc<dyn CabinetRepository>) -> Self {
        Self { gateway, cabinet }
    }

    /// Execute one statement turn (opening, rebuttal, cross-exam, closing).
    ///
    /// `interjection` is user text armed for exactly this turn; it is
    /// appended to the prompt and flagged in the turn metadata.
    pub async fn execute_statement(
        &self,
        minister: &Minister,
        kind: TurnKind,
        mut prompt: String,
        interjection: Option<&str>,
    ) -> Result<TurnOutcome, StoreError> {
        if self.minister_is_gone(&minister.id).await? {
            debug!("Minister {} vanished mid-session, skipping turn", minister.id);
            return Ok(TurnOutcome::Skipped);
        }

        if let Some(text) = interjection {
            prompt.push_str(&PromptTemplate::interjection_block(text));
        }

        let request = CompletionRequest::for_minister(minister, prompt, STATEMENT_TOKEN_BUDGET);
        let result = self.call_with_timeout(request, STATEMENT_TIMEOUT).await;

        // Opening and closing turns carry votes; the others do not.
        let votes_here = matches!(kind, TurnKind::Opening | TurnKind::Closing);

        let body = match result {
            Ok(raw) => {
                let payload = parse_turn_payload(&raw, &minister.name);
                TurnBody {
                    speaker: minister.id.clone(),
                    speaker_role: minister.role.as_str().to_string(),
                    kind,
                    content: payload.content,
                    metadata: TurnMetadata {
                        vote: votes_here.then_some(payload.vote),
                        model: Some(minister.model.clone()),
                        responding_to: None,
                        error: false,
                        interjection: interjection.is_some(),
                    },
                }
            }
            Err(e) => {
                warn!("Minister {} failed {} turn: {}", minister.name, kind, e);
                Self::error_body(minister, kind, &e, votes_here)
            }
        };

        Ok(TurnOutcome::Completed(body))
    }

    /// Execute the synthesis turn. The chair never votes: the recorded vote
    /// is always abstain.
    pub async fn execute_synthesis(
        &self,
        minister: &Minister,
        prompt: String,
        tally: &VoteTally,
    ) -> Result<SynthesisOutcome, StoreError> {
        if self.minister_is_gone(&minister.id).await? {
            debug!("Chair {} vanished mid-session, skipping synthesis", minister.id);
            return Ok(SynthesisOutcome::Skipped);
        }

        let request = CompletionRequest::for_minister(minister, prompt, SYNTHESIS_TOKEN_BUDGET);
        let result = self.call_with_timeout(request, SYNTHESIS_TIMEOUT).await;

        let outcome = match result {
            Ok(raw) => {
                let payload = parse_synthesis_payload(&raw, &minister.name, tally);
                let content = serde_json::to_string(&payload)
                    .unwrap_or_else(|_| payload.summary.clone());
                SynthesisOutcome::Completed {
                    body: TurnBody {
                        speaker: minister.id.clone(),
                        speaker_role: minister.role.as_str().to_string(),
                        kind: TurnKind::Synthesis,
                        content,
                        metadata: TurnMetadata {
                            vote: Some(SynthesisPayload::vote()),
                            model: Some(minister.model.clone()),
                            responding_to: None,
                            error: false,
                            interjection: false,
                        },
                    },
                    payload: Some(payload),
                }
            }
            Err(e) => {
                warn!("Chair {} failed synthesis: {}", minister.name, e);
                SynthesisOutcome::Completed {
                    body: Self::error_body(minister, TurnKind::Synthesis, &e, true),
                    payload: None,
                }
            }
        };

        Ok(outcome)
    }

    /// One gateway call raced against the per-call deadline. No retries.
    async fn call_with_timeout(
        &self,
        request: CompletionRequest,
        deadline: Duration,
    ) -> Result<String, GatewayError> {
        match tokio::time::timeout(deadline, self.gateway.complete(request)).await {
            Ok(Ok(response)) => Ok(response.content),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(GatewayError::Timeout),
        }
    }

    async fn minister_is_gone(&self, id: &MinisterId) -> Result<bool, StoreError> {
        Ok(self.cabinet.get(id).await?.is_none())
    }

    fn error_body(
        minister: &Minister,
        kind: TurnKind,
        error: &GatewayError,
        votes_here: bool,
    ) -> TurnBody {
        TurnBody {
            speaker: minister.id.clone(),
            speaker_role: minister.role.as_str().to_string(),
            kind,
            content: format!("Error: {error}"),
            metadata: TurnMetadata {
                vote: votes_here.then_some(Vote::Abstain),
                model: Some(minister.model.clone()),
                responding_to: None,
                error: true,
                interjection: false,
            },
        }
    }
}
