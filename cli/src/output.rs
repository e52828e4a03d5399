//! Console output formatting for debate results

use cabinet_application::use_cases::{DebateOutcome, MinisterRatingResult};
use cabinet_domain::{Minister, MinisterId, ModelOption, TurnKind};
use std::collections::HashMap;

/// Formats debate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete debate: transcript, tally, and synthesis.
    pub fn format(outcome: &DebateOutcome, ministers: &[Minister]) -> String {
        let names: HashMap<&MinisterId, &str> = ministers
            .iter()
            .map(|m| (&m.id, m.name.as_str()))
            .collect();
        let mut output = String::new();

        output.push_str(&Self::header("Cabinet Deliberation"));
        output.push('\n');

        let mut current_kind: Option<TurnKind> = None;
        for turn in &outcome.turns {
            if turn.kind == TurnKind::Synthesis {
                continue; // rendered separately below
            }
            if current_kind != Some(turn.kind) {
                current_kind = Some(turn.kind);
                if let Some(title) = Self::phase_title(turn.kind) {
                    output.push_str(&Self::section_header(title));
                }
            }
            match turn.kind {
                TurnKind::System => {
                    output.push_str(&format!("\n  [{}]\n", turn.content));
                }
                TurnKind::Interjection => {
                    output.push_str(&format!("\n-- You interject --\n{}\n", turn.content));
                }
                _ => {
                    let name = turn
                        .speaker
                        .as_ref()
                        .and_then(|id| names.get(id).copied())
                        .unwrap_or("Unknown");
                    let vote = match turn.metadata.vote {
                        Some(vote) if !turn.is_error() => format!(" [{vote}]"),
                        _ => String::new(),
                    };
                    output.push_str(&format!(
                        "\n-- {} ({}){} --\n{}\n",
                        name, turn.speaker_role, vote, turn.content
                    ));
                }
            }
        }

        output.push_str(&Self::section_header("Votes"));
        output.push_str(&format!(
            "\n  approve {}  /  abstain {}  /  oppose {}\n",
            outcome.tally.approve, outcome.tally.abstain, outcome.tally.oppose
        ));

        output.push_str(&Self::format_synthesis(outcome));
        output.push_str(&Self::footer());
        output
    }

    /// Format only the synthesis (concise output).
    pub fn format_synthesis_only(outcome: &DebateOutcome) -> String {
        let mut output = format!("=== Cabinet Synthesis ({}) ===\n", outcome.brief_id);
        output.push_str(&Self::format_synthesis(outcome));
        output
    }

    /// Format as JSON.
    pub fn format_json(outcome: &DebateOutcome) -> String {
        let value = serde_json::json!({
            "brief_id": &outcome.brief_id,
            "phases_run": &outcome.phases_run,
            "timed_out": outcome.timed_out,
            "stopped": outcome.stopped,
            "tally": outcome.tally,
            "synthesis": &outcome.synthesis,
            "turns": &outcome.turns,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_synthesis(outcome: &DebateOutcome) -> String {
        let mut output = Self::section_header("Synthesis");

        let Some(synthesis) = &outcome.synthesis else {
            output.push_str("\n  (no synthesis was produced)\n");
            return output;
        };

        output.push_str(&format!(
            "\n{}\n\nConsensus: {}\n",
            synthesis.summary, synthesis.consensus
        ));
        for (i, option) in synthesis.options.iter().enumerate() {
            output.push_str(&format!(
                "\nOption {}: {}\n  {}\n  Tradeoffs: {}\n",
                i + 1,
                option.title,
                option.description,
                option.tradeoffs
            ));
            if !option.supporters.is_empty() {
                output.push_str(&format!(
                    "  Backed by: {}\n",
                    option.supporters.join(", ")
                ));
            }
        }
        if outcome.timed_out {
            output.push_str("\n(The time budget expired; some phases were skipped.)\n");
        }
        output
    }

    /// Format rating results as a standings table.
    pub fn format_ratings(results: &[MinisterRatingResult]) -> String {
        let mut output = String::from("Updated standings:\n");
        for result in results {
            let average = result
                .average
                .map(|a| format!("{a:.1}"))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<28} {:<10} avg {}  ({} sessions)\n",
                result.name,
                result.status.to_string(),
                average,
                result.sessions
            ));
            if let Some(change) = &result.change {
                output.push_str(&format!(
                    "    ! {} -> {}: {}\n",
                    change.from, change.to, change.reason
                ));
            }
        }
        output
    }

    /// Format the seated cabinet.
    pub fn format_cabinet(ministers: &[Minister]) -> String {
        let mut output = String::from("The cabinet:\n");
        for minister in ministers {
            let average = minister
                .reputation
                .average()
                .map(|a| format!("{a:.1}"))
                .unwrap_or_else(|| "-".to_string());
            let availability = if minister.is_available() {
                ""
            } else {
                "  [not seated]"
            };
            output.push_str(&format!(
                "  {:<28} {:<16} {:<10} avg {}{}\n",
                minister.name,
                minister.role.to_string(),
                minister.reputation.status.to_string(),
                average,
                availability
            ));
        }
        output
    }

    /// Format the model catalog.
    pub fn format_models(models: &[ModelOption]) -> String {
        let mut output = String::from("Available models:\n");
        for model in models {
            output.push_str(&format!(
                "  {:<14} {:<14} [{:?} cost]  {}\n",
                model.id.to_string(),
                model.name,
                model.cost_tier,
                model.description
            ));
        }
        output
    }

    fn phase_title(kind: TurnKind) -> Option<&'static str> {
        match kind {
            TurnKind::Opening => Some("Opening Statements"),
            TurnKind::Rebuttal => Some("Rebuttal"),
            TurnKind::CrossExam => Some("Cross-Examination"),
            TurnKind::Closing => Some("Closing Statements"),
            _ => None,
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{line}\n{title:^60}\n{line}")
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title, "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60))
    }
}

/// Parse a `minister=stars` rating argument.
pub fn parse_rating_arg(arg: &str) -> Result<(String, u8), String> {
    let (id, stars) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected MINISTER=STARS, got '{arg}'"))?;
    let stars: u8 = stars
        .trim()
        .parse()
        .map_err(|_| format!("'{stars}' is not a number of stars (1-5)"))?;
    Ok((id.trim().to_string(), stars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabinet_domain::{BriefId, ConsensusStrength, SynthesisPayload, VoteTally};

    fn outcome_with_synthesis() -> DebateOutcome {
        DebateOutcome {
            brief_id: BriefId::new("b-1"),
            phases_run: vec![],
            synthesis: Some(
                SynthesisPayload::new("Cabinet agrees.", ConsensusStrength::Strong),
            ),
            tally: VoteTally {
                approve: 3,
                abstain: 1,
                oppose: 1,
            },
            turns: vec![],
            timed_out: false,
            stopped: false,
        }
    }

    #[test]
    fn test_synthesis_only_output() {
        let text = ConsoleFormatter::format_synthesis_only(&outcome_with_synthesis());
        assert!(text.contains("Cabinet agrees."));
        assert!(text.contains("Consensus: strong"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let text = ConsoleFormatter::format_json(&outcome_with_synthesis());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["brief_id"], "b-1");
        assert_eq!(value["tally"]["approve"], 3);
        assert_eq!(value["synthesis"]["summary"], "Cabinet agrees.");
    }

    #[test]
    fn test_parse_rating_arg() {
        assert_eq!(
            parse_rating_arg("ethics=4").unwrap(),
            ("ethics".to_string(), 4)
        );
        assert!(parse_rating_arg("ethics").is_err());
        assert!(parse_rating_arg("ethics=lots").is_err());
    }
}
