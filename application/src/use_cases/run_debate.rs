//! Debate orchestrator
//!
//! Drives one brief through the phase sequence as a single authoritative
//! loop: Opening runs ministers in parallel with a concurrency cap, later
//! phases run sequentially in seat order. Control signals (interjection,
//! extend, stop) are drained only at turn and phase boundaries. The global
//! time budget may skip any phase except Synthesis, which always runs when
//! a chair is seated.

use crate::control::{ControlReceiver, ControlSignal};
use crate::ports::StoreError;
use crate::ports::agent_gateway::AgentGateway;
use crate::ports::brief_repository::BriefRepository;
use crate::ports::cabinet_repository::CabinetRepository;
use crate::ports::progress::DebateProgress;
use crate::ports::transcript_store::TranscriptStore;
use crate::use_cases::execute_turn::{SynthesisOutcome, TurnBody, TurnExecutor, TurnOutcome};
use cabinet_domain::{
    Brief, BriefId, BriefStatus, DebatePhase, DomainError, Minister, PromptTemplate,
    SynthesisPayload, TurnKind, TurnRecord, VoteTally,
};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

/// Default wall-clock budget for one debate
pub const DEFAULT_GLOBAL_BUDGET: Duration = Duration::from_secs(120);
/// Default cap on concurrent opening statements
pub const DEFAULT_OPENING_CONCURRENCY: usize = 4;

/// Tunable limits for one debate run
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// Global wall-clock budget; interjections and extensions restart it
    pub global_budget: Duration,
    /// How many opening statements run in flight at once
    pub opening_concurrency: usize,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            global_budget: DEFAULT_GLOBAL_BUDGET,
            opening_concurrency: DEFAULT_OPENING_CONCURRENCY,
        }
    }
}

/// Failures that abort a debate run
#[derive(Error, Debug)]
pub enum DebateError {
    #[error("Brief not found: {0}")]
    BriefNotFound(String),

    #[error("No ministers are available to debate")]
    NoMinisters,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What a completed debate produced
#[derive(Debug)]
pub struct DebateOutcome {
    pub brief_id: BriefId,
    /// Phases that actually ran, in order
    pub phases_run: Vec<DebatePhase>,
    /// None when no chair was seated or the chair's call failed
    pub synthesis: Option<SynthesisPayload>,
    pub tally: VoteTally,
    /// Every transcript record appended, in index order
    pub turns: Vec<TurnRecord>,
    /// The global budget expired and skipped at least one phase
    pub timed_out: bool,
    /// The user stopped the debate early
    pub stopped: bool,
}

/// Use case: run a full cabinet debate over one brief
pub struct RunDebateUseCase<G: AgentGateway> {
    executor: TurnExecutor<G>,
    briefs: Arc<dyn BriefRepository>,
    cabinet: Arc<dyn CabinetRepository>,
    transcript: Arc<dyn TranscriptStore>,
    config: DebateConfig,
}

impl<G: AgentGateway> RunDebateUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        briefs: Arc<dyn BriefRepository>,
        cabinet: Arc<dyn CabinetRepository>,
        transcript: Arc<dyn TranscriptStore>,
        config: DebateConfig,
    ) -> Self {
        Self {
            executor: TurnExecutor::new(gateway, cabinet.clone()),
            briefs,
            cabinet,
            transcript,
            config,
        }
    }

    /// Run the debate to completion.
    ///
    /// The brief always ends terminal: Done on success, Done-and-flagged when
    /// orchestration hit an unrecoverable error.
    pub async fn execute(
        &self,
        brief_id: &BriefId,
        control: ControlReceiver,
        progress: &dyn DebateProgress,
    ) -> Result<DebateOutcome, DebateError> {
        let mut brief = self
            .briefs
            .get(brief_id)
            .await?
            .ok_or_else(|| DebateError::BriefNotFound(brief_id.to_string()))?;
        brief.transition(BriefStatus::Running)?;
        self.briefs.update(&brief).await?;

        let mut run = DebateRun {
            use_case: self,
            brief: brief.clone(),
            control,
            progress,
            deadline: Instant::now() + self.config.global_budget,
            turns: Vec::new(),
            lines: Vec::new(),
            opening_count: 0,
            tally: VoteTally::default(),
            phases_run: Vec::new(),
            pending_interjection: None,
            stopped: false,
            timed_out: false,
        };

        match run.drive().await {
            Ok(outcome) => {
                brief.transition(BriefStatus::Done)?;
                self.briefs.update(&brief).await?;
                Ok(outcome)
            }
            Err(e) => {
                warn!("Debate on brief {} aborted: {}", brief.id, e);
                brief.flag_terminal();
                // Best effort: the store just failed, but the brief must not
                // be left Running if at all avoidable.
                let _ = self.briefs.update(&brief).await;
                Err(e)
            }
        }
    }

    /// Append with one retry. A second failure is unrecoverable.
    async fn append_turn(&self, turn: &TurnRecord) -> Result<(), StoreError> {
        if let Err(e) = self.transcript.append(turn).await {
            warn!("Transcript append failed, retrying once: {}", e);
            self.transcript.append(turn).await?;
        }
        Ok(())
    }
}

/// Mutable state of one in-flight debate
struct DebateRun<'a, G: AgentGateway> {
    use_case: &'a RunDebateUseCase<G>,
    brief: Brief,
    control: ControlReceiver,
    progress: &'a dyn DebateProgress,
    deadline: Instant,
    turns: Vec<TurnRecord>,
    /// "Name (Role): statement" lines of every successful turn so far
    lines: Vec<String>,
    /// Successful opening statements; Rebuttal needs at least two
    opening_count: usize,
    tally: VoteTally,
    phases_run: Vec<DebatePhase>,
    pending_interjection: Option<String>,
    stopped: bool,
    timed_out: bool,
}

impl<G: AgentGateway> DebateRun<'_, G> {
    async fn drive(&mut self) -> Result<DebateOutcome, DebateError> {
        let ministers = self.use_case.cabinet.active_ministers().await?;
        let chair = ministers.iter().find(|m| m.role.is_synthesizer()).cloned();
        let debaters: Vec<Minister> = ministers
            .into_iter()
            .filter(|m| !m.role.is_synthesizer())
            .collect();
        if debaters.is_empty() {
            return Err(DebateError::NoMinisters);
        }
        let skeptic = debaters.iter().find(|m| m.role.is_skeptic()).cloned();

        info!(
            "Debate on brief {} convening with {} debaters",
            self.brief.id,
            debaters.len()
        );
        self.append_system(format!(
            "Cabinet session convened: {} ministers seated.",
            debaters.len() + chair.iter().count()
        ))
        .await?;

        let mut phase = DebatePhase::Opening;
        while phase.skippable_on_timeout() {
            if !self.boundary().await? {
                break;
            }
            let completed = match phase {
                DebatePhase::Opening => {
                    self.opening_round(&debaters).await?;
                    true
                }
                DebatePhase::Rebuttal if self.opening_count >= 2 => {
                    self.rebuttal_round(&debaters).await?
                }
                DebatePhase::CrossExam => match &skeptic {
                    Some(s) => self.cross_exam_round(s).await?,
                    None => true,
                },
                // Closing is the response to cross-examination; without a
                // Skeptic seated neither phase exists.
                DebatePhase::Closing if skeptic.is_some() => {
                    self.closing_round(&debaters).await?
                }
                _ => true,
            };
            if !completed {
                break;
            }
            phase = phase.next();
        }

        // Synthesis is exempt from the budget: residual signals are drained
        // so a queued stop does not leak into a later run, but they no longer
        // change anything.
        self.drain_signals().await?;
        let synthesis = match &chair {
            Some(chair) => self.synthesis_round(chair).await?,
            None => None,
        };

        self.append_system("Cabinet session closed.").await?;

        Ok(DebateOutcome {
            brief_id: self.brief.id.clone(),
            phases_run: std::mem::take(&mut self.phases_run),
            synthesis,
            tally: self.tally,
            turns: std::mem::take(&mut self.turns),
            timed_out: self.timed_out,
            stopped: self.stopped,
        })
    }

    /// Everyone states a position at once, capped; records land in seat order.
    async fn opening_round(&mut self, debaters: &[Minister]) -> Result<(), DebateError> {
        self.phases_run.push(DebatePhase::Opening);
        self.progress
            .on_phase_start(&DebatePhase::Opening, debaters.len());

        let executor = &self.use_case.executor;
        let context = self.brief.context.clone();
        let cap = self.use_case.config.opening_concurrency.max(1);
        let mut interjection = self.pending_interjection.take();

        // `buffered` keeps completion order equal to seat order, so indices
        // can be assigned as results arrive.
        let calls = debaters.iter().map(|m| {
            let prompt = PromptTemplate::opening(m, &context);
            let armed = interjection.take();
            async move {
                let outcome = executor
                    .execute_statement(m, TurnKind::Opening, prompt, armed.as_deref())
                    .await;
                (m, outcome)
            }
        });
        let results: Vec<(&Minister, Result<TurnOutcome, StoreError>)> =
            futures::stream::iter(calls).buffered(cap).collect().await;

        for (minister, result) in results {
            match result? {
                TurnOutcome::Completed(body) => {
                    let success = !body.metadata.error;
                    if success {
                        self.opening_count += 1;
                    }
                    self.append_body(body, minister).await?;
                    self.progress
                        .on_turn_complete(&DebatePhase::Opening, minister, success);
                }
                TurnOutcome::Skipped => {}
            }
        }

        self.progress.on_phase_complete(&DebatePhase::Opening);
        Ok(())
    }

    /// Sequential responses to the opening round. Returns false when the
    /// round was cut short by the budget or a stop signal.
    async fn rebuttal_round(&mut self, debaters: &[Minister]) -> Result<bool, DebateError> {
        self.phases_run.push(DebatePhase::Rebuttal);
        self.progress
            .on_phase_start(&DebatePhase::Rebuttal, debaters.len());

        for minister in debaters {
            if !self.boundary().await? {
                return Ok(false);
            }
            // Rejoined per turn so each speaker sees the rebuttals before theirs
            let so_far = self.lines.join("\n");
            let prompt = PromptTemplate::rebuttal(minister, &self.brief.context, &so_far);
            self.run_statement(minister, TurnKind::Rebuttal, DebatePhase::Rebuttal, prompt)
                .await?;
        }

        self.progress.on_phase_complete(&DebatePhase::Rebuttal);
        Ok(true)
    }

    /// The Skeptic's single challenge turn.
    async fn cross_exam_round(&mut self, skeptic: &Minister) -> Result<bool, DebateError> {
        self.phases_run.push(DebatePhase::CrossExam);
        self.progress.on_phase_start(&DebatePhase::CrossExam, 1);

        let so_far = self.lines.join("\n");
        let prompt = PromptTemplate::cross_exam(skeptic, &self.brief.context, &so_far);
        self.run_statement(skeptic, TurnKind::CrossExam, DebatePhase::CrossExam, prompt)
            .await?;

        self.progress.on_phase_complete(&DebatePhase::CrossExam);
        Ok(true)
    }

    /// Final positions and votes; the Skeptic sits this one out.
    async fn closing_round(&mut self, debaters: &[Minister]) -> Result<bool, DebateError> {
        let closers: Vec<&Minister> = debaters.iter().filter(|m| !m.role.is_skeptic()).collect();
        if closers.is_empty() {
            return Ok(true);
        }
        self.phases_run.push(DebatePhase::Closing);
        self.progress
            .on_phase_start(&DebatePhase::Closing, closers.len());

        for minister in closers {
            if !self.boundary().await? {
                return Ok(false);
            }
            let so_far = self.lines.join("\n");
            let prompt = PromptTemplate::closing(minister, &self.brief.context, &so_far);
            self.run_statement(minister, TurnKind::Closing, DebatePhase::Closing, prompt)
                .await?;
        }

        self.progress.on_phase_complete(&DebatePhase::Closing);
        Ok(true)
    }

    /// The chair compiles the debate. Runs regardless of budget or stop.
    async fn synthesis_round(
        &mut self,
        chair: &Minister,
    ) -> Result<Option<SynthesisPayload>, DebateError> {
        self.phases_run.push(DebatePhase::Synthesis);
        self.progress.on_phase_start(&DebatePhase::Synthesis, 1);

        let transcript = self.lines.join("\n");
        let prompt = PromptTemplate::synthesis(chair, &self.brief.context, &transcript);
        let outcome = self
            .use_case
            .executor
            .execute_synthesis(chair, prompt, &self.tally)
            .await?;

        let payload = match outcome {
            SynthesisOutcome::Completed { body, payload } => {
                let success = !body.metadata.error;
                self.append_body(body, chair).await?;
                self.progress
                    .on_turn_complete(&DebatePhase::Synthesis, chair, success);
                payload
            }
            SynthesisOutcome::Skipped => None,
        };

        self.progress.on_phase_complete(&DebatePhase::Synthesis);
        Ok(payload)
    }

    async fn run_statement(
        &mut self,
        minister: &Minister,
        kind: TurnKind,
        phase: DebatePhase,
        prompt: String,
    ) -> Result<(), DebateError> {
        let responding_to = self.last_spoken_index();
        let interjection = self.pending_interjection.take();
        let outcome = self
            .use_case
            .executor
            .execute_statement(minister, kind, prompt, interjection.as_deref())
            .await?;
        if let TurnOutcome::Completed(mut body) = outcome {
            let success = !body.metadata.error;
            if success {
                // Rebuttal, cross-exam, and closing statements respond to the
                // accumulated transcript; anchor them to its latest spoken turn
                body.metadata.responding_to = responding_to;
            }
            self.append_body(body, minister).await?;
            self.progress.on_turn_complete(&phase, minister, success);
        }
        Ok(())
    }

    /// Index of the most recent turn whose statement feeds the next prompt.
    fn last_spoken_index(&self) -> Option<u64> {
        self.turns
            .iter()
            .rev()
            .find(|t| !t.is_error() && t.kind != TurnKind::System)
            .map(|t| t.turn_index)
    }

    /// Boundary between turns/phases: drain signals, then consult the clock.
    /// Returns false when the run should cut straight to synthesis.
    async fn boundary(&mut self) -> Result<bool, DebateError> {
        self.drain_signals().await?;
        if self.stopped {
            return Ok(false);
        }
        if Instant::now() >= self.deadline {
            if !self.timed_out {
                self.timed_out = true;
                self.append_system("Time budget exhausted; proceeding to synthesis.")
                    .await?;
                self.progress.on_timeout();
            }
            return Ok(false);
        }
        Ok(true)
    }

    async fn drain_signals(&mut self) -> Result<(), DebateError> {
        for signal in self.control.drain() {
            match signal {
                ControlSignal::Interjection(text) => {
                    info!("User interjection on brief {}", self.brief.id);
                    let turn = TurnRecord::interjection(
                        self.brief.id.clone(),
                        self.turns.len() as u64,
                        text.clone(),
                    );
                    self.use_case.append_turn(&turn).await?;
                    self.turns.push(turn);
                    self.lines.push(format!("The user (interjecting): {text}"));
                    self.pending_interjection = Some(text);
                    self.reset_deadline();
                }
                ControlSignal::Extend => {
                    info!("Budget extended on brief {}", self.brief.id);
                    self.reset_deadline();
                }
                ControlSignal::Stop => {
                    info!("Stop requested on brief {}", self.brief.id);
                    self.stopped = true;
                }
            }
        }
        Ok(())
    }

    fn reset_deadline(&mut self) {
        self.deadline = Instant::now() + self.use_case.config.global_budget;
        // An extension also clears the timed-out cut so remaining phases run
        self.timed_out = false;
    }

    async fn append_body(&mut self, body: TurnBody, minister: &Minister) -> Result<(), DebateError> {
        if let Some(vote) = body.metadata.vote
            && !body.metadata.error
        {
            self.tally.record(vote);
        }
        let record = body.into_record(self.brief.id.clone(), self.turns.len() as u64);
        self.use_case.append_turn(&record).await?;
        if !record.is_error() {
            self.lines.push(record.statement_line(&minister.name));
        }
        self.turns.push(record);
        Ok(())
    }

    async fn append_system(&mut self, content: impl Into<String>) -> Result<(), DebateError> {
        let turn = TurnRecord::system(self.brief.id.clone(), self.turns.len() as u64, content);
        self.use_case.append_turn(&turn).await?;
        self.turns.push(turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::control_channel;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::testing::{MemoryPorts, MockGateway};
    use cabinet_domain::{BriefContext, MinisterId, default_cabinet};

    const SYNTHESIS_JSON: &str = r#"{
        "summary": "The cabinet leans toward shipping now with a safety review.",
        "consensus": "divided",
        "options": [
            {"title": "Ship now", "description": "Release this week", "tradeoffs": "Less polish", "supporters": ["Minister of Productivity"]},
            {"title": "Delay a month", "description": "Harden first", "tradeoffs": "Lost momentum", "supporters": ["Minister of Ethics"]}
        ]
    }"#;

    fn use_case(
        ports: &MemoryPorts,
        gateway: Arc<MockGateway>,
        config: DebateConfig,
    ) -> RunDebateUseCase<MockGateway> {
        RunDebateUseCase::new(
            gateway,
            ports.briefs.clone(),
            ports.cabinet.clone(),
            ports.transcript.clone(),
            config,
        )
    }

    async fn seed_brief(ports: &MemoryPorts) -> BriefId {
        let brief = Brief::new(
            BriefId::new("b-1"),
            "Ship it?",
            BriefContext::new("Decide whether to ship", "Two weeks runway"),
        );
        let id = brief.id.clone();
        ports.briefs.insert(brief).await.unwrap();
        id
    }

    fn scripted_gateway() -> Arc<MockGateway> {
        let gateway = Arc::new(MockGateway::new());
        gateway.respond_with(r#"{"content": "A considered statement here.", "vote": "approve"}"#);
        gateway.respond_for("Prime Minister", SYNTHESIS_JSON);
        gateway
    }

    #[tokio::test]
    async fn test_full_debate_runs_every_phase() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert_eq!(
            outcome.phases_run,
            vec![
                DebatePhase::Opening,
                DebatePhase::Rebuttal,
                DebatePhase::CrossExam,
                DebatePhase::Closing,
                DebatePhase::Synthesis,
            ]
        );
        assert!(!outcome.timed_out);
        assert!(!outcome.stopped);
        let synthesis = outcome.synthesis.expect("synthesis payload");
        assert_eq!(synthesis.options.len(), 2);
        // 5 opening votes plus 4 closing votes (the Skeptic sits out closing)
        assert_eq!(outcome.tally.approve, 9);

        let brief = ports.briefs.get(&id).await.unwrap().unwrap();
        assert_eq!(brief.status, BriefStatus::Done);
        assert!(!brief.flagged);
    }

    #[tokio::test]
    async fn test_turn_indices_are_contiguous_in_seat_order() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        for (i, turn) in outcome.turns.iter().enumerate() {
            assert_eq!(turn.turn_index, i as u64);
        }
        // Opening records are in seat order despite running in parallel
        let openings: Vec<_> = outcome
            .turns
            .iter()
            .filter(|t| t.kind == TurnKind::Opening)
            .collect();
        assert_eq!(openings.len(), 5);
        assert_eq!(
            openings[0].speaker.as_ref().unwrap().as_str(),
            "productivity"
        );
        assert_eq!(openings[4].speaker.as_ref().unwrap().as_str(), "opposition");

        let stored = ports.transcript.list(&id).await.unwrap();
        assert_eq!(stored, outcome.turns);
    }

    #[tokio::test]
    async fn test_no_skeptic_skips_cross_exam_and_closing() {
        let ports = MemoryPorts::new();
        ports.cabinet.seed(
            default_cabinet()
                .into_iter()
                .filter(|m| !m.role.is_skeptic())
                .collect(),
        );
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert_eq!(
            outcome.phases_run,
            vec![
                DebatePhase::Opening,
                DebatePhase::Rebuttal,
                DebatePhase::Synthesis,
            ]
        );
    }

    #[tokio::test]
    async fn test_rebuttal_skipped_with_a_single_debater() {
        let ports = MemoryPorts::new();
        ports.cabinet.seed(
            default_cabinet()
                .into_iter()
                .filter(|m| m.role.is_synthesizer() || m.id.as_str() == "ethics")
                .collect(),
        );
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert_eq!(
            outcome.phases_run,
            vec![DebatePhase::Opening, DebatePhase::Synthesis]
        );
    }

    #[tokio::test]
    async fn test_rebuttal_prompts_accumulate_same_round_statements() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        gateway.respond_for(
            "Productivity",
            r#"{"content": "Throughput beats caution here.", "vote": "approve"}"#,
        );
        let uc = use_case(&ports, gateway.clone(), DebateConfig::default());
        let (_control, rx) = control_channel();

        uc.execute(&id, rx, &NoProgress).await.unwrap();

        let rebuttal_prompts: Vec<String> = gateway
            .seen_prompts()
            .into_iter()
            .filter(|p| p.contains("PREVIOUS STATEMENTS"))
            .collect();
        assert_eq!(rebuttal_prompts.len(), 5);

        let needle = "Throughput beats caution here.";
        // Seat 0 speaks first: its own prompt carries only the openings,
        // everyone after also sees its rebuttal.
        assert_eq!(rebuttal_prompts[0].matches(needle).count(), 1);
        assert_eq!(rebuttal_prompts[1].matches(needle).count(), 2);
        assert_eq!(rebuttal_prompts[4].matches(needle).count(), 2);
    }

    #[tokio::test]
    async fn test_later_statements_reference_the_latest_prior_turn() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        let openings: Vec<_> = outcome
            .turns
            .iter()
            .filter(|t| t.kind == TurnKind::Opening)
            .collect();
        assert!(openings.iter().all(|t| t.metadata.responding_to.is_none()));

        let rebuttals: Vec<_> = outcome
            .turns
            .iter()
            .filter(|t| t.kind == TurnKind::Rebuttal)
            .collect();
        let last_opening = openings.last().unwrap();
        assert_eq!(
            rebuttals[0].metadata.responding_to,
            Some(last_opening.turn_index)
        );
        assert_eq!(
            rebuttals[1].metadata.responding_to,
            Some(rebuttals[0].turn_index)
        );

        let cross_exam = outcome
            .turns
            .iter()
            .find(|t| t.kind == TurnKind::CrossExam)
            .unwrap();
        assert_eq!(
            cross_exam.metadata.responding_to,
            Some(rebuttals.last().unwrap().turn_index)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_minister_deleted_mid_session_leaves_no_turns() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        gateway.delay(Duration::from_millis(100));
        let config = DebateConfig {
            opening_concurrency: 1,
            ..DebateConfig::default()
        };
        let uc = use_case(&ports, gateway, config);
        let (_control, rx) = control_channel();

        // Ethics is seated when the debate convenes but deleted while seat 0
        // is still speaking its opening.
        let cabinet = ports.cabinet.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cabinet.remove(&MinisterId::new("ethics"));
        });

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert!(
            outcome
                .turns
                .iter()
                .all(|t| t.speaker.as_ref().map(|s| s.as_str()) != Some("ethics"))
        );
        // The rest of the cabinet still debates every phase
        assert!(outcome.phases_run.contains(&DebatePhase::Closing));
        assert!(outcome.synthesis.is_some());
        let stored = ports.transcript.list(&id).await.unwrap();
        assert_eq!(stored, outcome.turns);
    }

    #[tokio::test]
    async fn test_no_chair_means_no_synthesis() {
        let ports = MemoryPorts::new();
        ports.cabinet.seed(
            default_cabinet()
                .into_iter()
                .filter(|m| !m.role.is_synthesizer())
                .collect(),
        );
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert!(outcome.synthesis.is_none());
        assert!(!outcome.phases_run.contains(&DebatePhase::Synthesis));
        // The brief still closes cleanly
        let brief = ports.briefs.get(&id).await.unwrap().unwrap();
        assert_eq!(brief.status, BriefStatus::Done);
    }

    #[tokio::test]
    async fn test_empty_cabinet_flags_the_brief() {
        let ports = MemoryPorts::new();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let err = uc.execute(&id, rx, &NoProgress).await.unwrap_err();
        assert!(matches!(err, DebateError::NoMinisters));

        let brief = ports.briefs.get(&id).await.unwrap().unwrap();
        assert_eq!(brief.status, BriefStatus::Done);
        assert!(brief.flagged);
    }

    #[tokio::test]
    async fn test_unknown_brief_is_rejected() {
        let ports = MemoryPorts::with_default_cabinet();
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let err = uc
            .execute(&BriefId::new("missing"), rx, &NoProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::BriefNotFound(_)));
    }

    #[tokio::test]
    async fn test_finished_brief_cannot_rerun() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());

        let (_c1, rx1) = control_channel();
        uc.execute(&id, rx1, &NoProgress).await.unwrap();

        let (_c2, rx2) = control_channel();
        let err = uc.execute(&id, rx2, &NoProgress).await.unwrap_err();
        assert!(matches!(err, DebateError::Domain(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_cuts_to_synthesis() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        gateway.delay(Duration::from_secs(3));
        let config = DebateConfig {
            global_budget: Duration::from_secs(5),
            ..DebateConfig::default()
        };
        let uc = use_case(&ports, gateway, config);
        let (_control, rx) = control_channel();

        // Openings take two 3s waves under the concurrency cap, so the 5s
        // budget is spent before Rebuttal starts.
        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert!(outcome.timed_out);
        assert_eq!(
            outcome.phases_run,
            vec![DebatePhase::Opening, DebatePhase::Synthesis]
        );
        assert!(outcome.synthesis.is_some());
        assert!(
            outcome
                .turns
                .iter()
                .any(|t| t.kind == TurnKind::System && t.content.contains("budget exhausted"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_mid_rebuttal_still_synthesizes_partial_transcript() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        gateway.delay(Duration::from_secs(3));
        let config = DebateConfig {
            global_budget: Duration::from_secs(10),
            ..DebateConfig::default()
        };
        let uc = use_case(&ports, gateway, config);
        let (_control, rx) = control_channel();

        // Openings take 6s (two waves); the clock runs out after the second
        // rebuttal turn, so the round is cut short mid-phase.
        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert!(outcome.timed_out);
        assert_eq!(
            outcome.phases_run,
            vec![
                DebatePhase::Opening,
                DebatePhase::Rebuttal,
                DebatePhase::Synthesis,
            ]
        );
        let rebuttals = outcome
            .turns
            .iter()
            .filter(|t| t.kind == TurnKind::Rebuttal)
            .count();
        assert_eq!(rebuttals, 2);
        // The timeout marker lands before the synthesis turn
        let marker = outcome
            .turns
            .iter()
            .position(|t| t.kind == TurnKind::System && t.content.contains("budget exhausted"))
            .expect("timeout marker");
        let synthesis = outcome
            .turns
            .iter()
            .position(|t| t.kind == TurnKind::Synthesis)
            .expect("synthesis turn");
        assert!(marker < synthesis);
    }

    #[tokio::test]
    async fn test_stop_signal_jumps_to_synthesis() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let uc = use_case(&ports, scripted_gateway(), DebateConfig::default());
        let (control, rx) = control_channel();
        control.stop();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        assert!(outcome.stopped);
        assert_eq!(outcome.phases_run, vec![DebatePhase::Synthesis]);
        assert!(outcome.synthesis.is_some());
        assert!(!outcome.timed_out);
    }

    #[tokio::test]
    async fn test_interjection_recorded_and_armed_exactly_once() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        let uc = use_case(&ports, gateway.clone(), DebateConfig::default());
        let (control, rx) = control_channel();
        control.interject("the budget was doubled");

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        // One interjection record in the transcript
        let interjections: Vec<_> = outcome
            .turns
            .iter()
            .filter(|t| t.kind == TurnKind::Interjection)
            .collect();
        assert_eq!(interjections.len(), 1);
        assert_eq!(interjections[0].content, "the budget was doubled");

        // The armed text reaches exactly one minister prompt
        let carrying: Vec<_> = gateway
            .seen_prompts()
            .into_iter()
            .filter(|p| p.contains("THE USER INTERJECTS"))
            .collect();
        assert_eq!(carrying.len(), 1);

        let flagged = outcome
            .turns
            .iter()
            .filter(|t| t.metadata.interjection)
            .count();
        assert_eq!(flagged, 1);
    }

    #[tokio::test]
    async fn test_failed_turns_do_not_feed_later_prompts() {
        let ports = MemoryPorts::with_default_cabinet();
        let id = seed_brief(&ports).await;
        let gateway = scripted_gateway();
        gateway.fail_for("Minister of Ethics", "connection reset");
        let uc = use_case(&ports, gateway.clone(), DebateConfig::default());
        let (_control, rx) = control_channel();

        let outcome = uc.execute(&id, rx, &NoProgress).await.unwrap();

        // The failure is visible in the transcript
        assert!(outcome.turns.iter().any(|t| t.is_error()));
        // but its error text never appears in another minister's prompt
        assert!(
            gateway
                .seen_prompts()
                .iter()
                .all(|p| !p.contains("connection reset"))
        );
        // and the debate still completed every phase
        assert!(outcome.phases_run.contains(&DebatePhase::Closing));
    }
}
