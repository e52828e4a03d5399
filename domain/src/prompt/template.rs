//! Prompt templates for each debate phase
//!
//! The literal wording is deliberately plain; what matters to the
//! orchestrator is the structure: every statement prompt asks for the same
//! JSON shape the three-tier parser expects, and later phases embed the
//! accumulated previous statements.

use crate::brief::BriefContext;
use crate::cabinet::Minister;

/// Templates for generating prompts at each debate phase
pub struct PromptTemplate;

impl PromptTemplate {
    fn context_block(context: &BriefContext) -> String {
        format!(
            "CONTEXT:\nGoals: {}\nConstraints: {}\nValues: {}",
            context.goals,
            context.constraints,
            context.values.join(", ")
        )
    }

    fn role_line(minister: &Minister) -> String {
        format!("Your role: {} ({})", minister.name, minister.role)
    }

    /// Appended to a statement prompt when a user interjection is armed.
    pub fn interjection_block(text: &str) -> String {
        format!("\n\nTHE USER INTERJECTS:\n{text}\n\nTake this into account.")
    }

    /// Opening statement: position plus a vote.
    pub fn opening(minister: &Minister, context: &BriefContext) -> String {
        format!(
            "{}\n\n{}\n\nProvide your analysis and recommendation (2-3 sentences). Be concise.\n\
             Respond as JSON: {{\"content\": \"your advice\", \"vote\": \"approve\" | \"abstain\" | \"oppose\"}}",
            Self::context_block(context),
            Self::role_line(minister),
        )
    }

    /// Rebuttal: respond to colleagues' openings.
    pub fn rebuttal(minister: &Minister, context: &BriefContext, previous: &str) -> String {
        format!(
            "CONTEXT:\nGoals: {}\n\nPREVIOUS STATEMENTS:\n{}\n\n{}\n\n\
             Respond to your colleagues. Reference at least one other minister's point. Be brief (2 sentences).\n\
             Respond as JSON: {{\"content\": \"your rebuttal\"}}",
            context.goals,
            previous,
            Self::role_line(minister),
        )
    }

    /// Cross-examination: the Skeptic's dedicated challenge.
    pub fn cross_exam(minister: &Minister, context: &BriefContext, previous: &str) -> String {
        format!(
            "{}\n\nDEBATE SO FAR:\n{}\n\n{}\n\n\
             Cross-examine the cabinet's reasoning. Name the weakest claim made so far and press on it (2-3 sentences).\n\
             Respond as JSON: {{\"content\": \"your challenge\"}}",
            Self::context_block(context),
            previous,
            Self::role_line(minister),
        )
    }

    /// Closing statement: final position plus a vote.
    pub fn closing(minister: &Minister, context: &BriefContext, previous: &str) -> String {
        format!(
            "{}\n\nDEBATE SO FAR:\n{}\n\n{}\n\n\
             Give your final position in light of the debate (2 sentences).\n\
             Respond as JSON: {{\"content\": \"your closing\", \"vote\": \"approve\" | \"abstain\" | \"oppose\"}}",
            Self::context_block(context),
            previous,
            Self::role_line(minister),
        )
    }

    /// Synthesis: the chair compiles the whole transcript into options.
    pub fn synthesis(minister: &Minister, context: &BriefContext, transcript: &str) -> String {
        format!(
            "CABINET DISCUSSION:\n{}\n\nORIGINAL {}\n\n{}\n\n\
             Synthesize this into 2-3 actionable options.\n\
             Respond as JSON:\n\
             {{\n  \"summary\": \"Brief synthesis (2 sentences)\",\n  \
             \"consensus\": \"strong\" | \"divided\" | \"contested\",\n  \
             \"options\": [{{\"title\": \"Option name\", \"description\": \"What it entails\", \
             \"tradeoffs\": \"Key tradeoffs\", \"supporters\": [\"minister names\"]}}]\n}}",
            transcript,
            Self::context_block(context),
            Self::role_line(minister),
        )
    }
}
