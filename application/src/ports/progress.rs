//! Progress notification port
//!
//! Defines the interface for reporting progress during a debate.

use cabinet_domain::{DebatePhase, Minister};

/// Callback for progress updates while a debate runs
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (console, logs, etc.)
pub trait DebateProgress: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &DebatePhase, total_turns: usize);

    /// Called when one minister's turn completes within a phase
    fn on_turn_complete(&self, phase: &DebatePhase, minister: &Minister, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &DebatePhase);

    /// Called when the global deadline skips remaining phases
    fn on_timeout(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DebateProgress for NoProgress {
    fn on_phase_start(&self, _phase: &DebatePhase, _total_turns: usize) {}
    fn on_turn_complete(&self, _phase: &DebatePhase, _minister: &Minister, _success: bool) {}
    fn on_phase_complete(&self, _phase: &DebatePhase) {}
}
