// felilite/src/provision/best_effort.rs
//! Continue-on-error runner for provisioning phases whose individual writes
//! may fail without failing the whole operation.

use std::fmt::Display;

use log::warn;

use crate::Result;

/// Per-phase step counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    /// Steps that ran and succeeded.
    pub succeeded: usize,
    /// Steps that ran and failed.
    pub failed: usize,
    /// Steps never run because the phase had stopped.
    pub skipped: usize,
}

impl Tally {
    /// Steps that actually ran.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Every step ran and succeeded.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

/// When a phase gives up on its remaining steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Keep going after ordinary failures; stop once the link is gone.
    OnLinkLost,
    /// Stop at the first failure of any kind.
    OnFirstFailure,
}

/// Runs steps, recording each outcome instead of propagating it. Once
/// stopped, further steps are recorded as skipped and not run.
#[derive(Debug)]
pub struct BestEffort {
    phase: &'static str,
    policy: StopPolicy,
    tally: Tally,
    stopped: bool,
}

impl BestEffort {
    /// Runner for `phase` that stops only when the link is lost.
    pub fn new(phase: &'static str) -> Self {
        Self::with_policy(phase, StopPolicy::OnLinkLost)
    }

    /// Runner for `phase` with an explicit stop policy.
    pub fn with_policy(phase: &'static str, policy: StopPolicy) -> Self {
        Self {
            phase,
            policy,
            tally: Tally::default(),
            stopped: false,
        }
    }

    /// No further step will run.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Run one step labelled `label`. Returns whether the step succeeded.
    pub fn step<L, F>(&mut self, label: L, f: F) -> bool
    where
        L: Display,
        F: FnOnce() -> Result<()>,
    {
        if self.stopped {
            self.tally.skipped += 1;
            return false;
        }

        match f() {
            Ok(()) => {
                self.tally.succeeded += 1;
                true
            }
            Err(e) => {
                self.tally.failed += 1;
                warn!("{}: step {} failed: {}", self.phase, label, e);
                if e.is_link_lost() || self.policy == StopPolicy::OnFirstFailure {
                    warn!("{}: remaining steps abandoned", self.phase);
                    self.stopped = true;
                }
                false
            }
        }
    }

    /// Close the current phase and start `phase`, carrying over a stop.
    pub fn next_phase(&mut self, phase: &'static str) -> Tally {
        self.phase = phase;
        std::mem::take(&mut self.tally)
    }

    /// Counts for the last phase.
    pub fn finish(self) -> Tally {
        self.tally
    }
}
