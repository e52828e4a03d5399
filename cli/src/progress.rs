//! Console progress reporting for a running debate
//!
//! Writes to stderr so piped stdout stays clean for the formatted result.

use cabinet_application::ports::progress::DebateProgress;
use cabinet_domain::{DebatePhase, Minister};

/// Plain-text progress reporter
pub struct ConsoleProgress;

impl DebateProgress for ConsoleProgress {
    fn on_phase_start(&self, phase: &DebatePhase, total_turns: usize) {
        let turns = if total_turns == 1 { "turn" } else { "turns" };
        eprintln!("> {} ({} {})", phase.display_name(), total_turns, turns);
    }

    fn on_turn_complete(&self, _phase: &DebatePhase, minister: &Minister, success: bool) {
        let mark = if success { "+" } else { "x" };
        eprintln!("  {} {}", mark, minister.name);
    }

    fn on_phase_complete(&self, _phase: &DebatePhase) {}

    fn on_timeout(&self) {
        eprintln!("  ! time budget exhausted - cutting to synthesis");
    }
}
