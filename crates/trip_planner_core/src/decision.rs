//! crates/trip_planner_core/src/decision.rs
//!
//! The swipe reducer. Walks a candidate batch one item at a time, recording
//! accept/reject, and hands the accepted set over exactly once when the batch runs out.

use crate::domain::Activity;
use tracing::debug;

/// What a single call to [`DecisionEngine::decide`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The decision was recorded; `next_index` is the candidate now on top.
    Advanced { next_index: usize },
    /// The last candidate was decided. Carries the accepted set in decision order.
    Finished(Vec<Activity>),
    /// The engine had already finished; nothing changed.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct DecisionEngine {
    candidates: Vec<Activity>,
    current_index: usize,
    liked: Vec<Activity>,
    emitted: bool,
}

impl DecisionEngine {
    pub fn new(candidates: Vec<Activity>) -> Self {
        Self {
            candidates,
            current_index: 0,
            liked: Vec::new(),
            emitted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// The candidate awaiting a decision, if any.
    pub fn current(&self) -> Option<&Activity> {
        self.candidates.get(self.current_index)
    }

    /// 1-based position of the current candidate, for "n of N" displays.
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.current_index + 1, self.candidates.len()))
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.candidates.len()
    }

    /// Records a decision on the current candidate and advances.
    pub fn decide(&mut self, accept: bool) -> DecisionOutcome {
        let Some(current) = self.candidates.get(self.current_index) else {
            debug!("Decision ignored: candidate batch already exhausted.");
            return DecisionOutcome::Ignored;
        };

        if accept {
            self.liked.push(current.clone());
        }
        debug!(
            "Candidate {} '{}' {} ({} liked so far).",
            self.current_index,
            current.name,
            if accept { "accepted" } else { "rejected" },
            self.liked.len()
        );
        self.current_index += 1;

        if self.is_finished() {
            match self.take_finished() {
                Some(liked) => DecisionOutcome::Finished(liked),
                None => DecisionOutcome::Ignored,
            }
        } else {
            DecisionOutcome::Advanced {
                next_index: self.current_index,
            }
        }
    }

    /// Hands over the accepted set once the batch is exhausted.
    ///
    /// Returns `None` while candidates remain and on every call after the first
    /// successful one. An engine built from an empty batch is finished from the start.
    pub fn take_finished(&mut self) -> Option<Vec<Activity>> {
        if !self.is_finished() || self.emitted {
            return None;
        }
        self.emitted = true;
        Some(std::mem::take(&mut self.liked))
    }
}
