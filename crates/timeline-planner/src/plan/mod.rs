//! Mutation planning over read-only track snapshots.
//!
//! Three entry points live on [`Planner`]:
//! - [`Planner::resolve_occlusions`] clears room for a new interval
//! - [`Planner::resolve_ripple`] opens or closes time at a point
//! - [`Planner::plan_duplicate_block`] copies a multi-clip selection
//!
//! None of them write anywhere. Each returns a [`MutationPlan`](crate::model::MutationPlan)
//! that an apply layer executes in order inside one transaction.

pub mod duplicate;
pub mod occlusion;
pub mod ripple;

pub use duplicate::DuplicatePlan;
pub use occlusion::{PlannedMove, PlannedMoves};

use crate::error::PlanError;
use crate::limits::MAX_CLAMP_PASSES;
use crate::model::{ClipRecord, IdGenerator, RandomIds, NIL_ID};
use crate::validate::validate_track;

/// Planner behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerOptions {
    /// Fail with [`PlanError::StalePlannedClip`] when a declared
    /// already-planned clip is missing from the track, instead of logging a
    /// warning. Virtual entries never fail.
    pub strict_planned_lookup: bool,
    /// Check clip invariants and track non-overlap on every snapshot before
    /// planning against it.
    pub validate_inputs: bool,
    /// Pass limit for the duplicate offset clamp.
    pub clamp_pass_limit: usize,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            strict_planned_lookup: false,
            validate_inputs: true,
            clamp_pass_limit: MAX_CLAMP_PASSES,
        }
    }
}

/// Plans clip mutations, drawing fresh ids from `G`.
#[derive(Debug, Clone, Default)]
pub struct Planner<G = RandomIds> {
    ids: G,
    options: PlannerOptions,
}

impl Planner<RandomIds> {
    /// Creates a planner with random UUIDv4 ids and default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> Planner<G> {
    /// Creates a planner drawing ids from `ids`.
    pub fn with_ids(ids: G) -> Self {
        Self {
            ids,
            options: PlannerOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn ids(&self) -> &G {
        &self.ids
    }

    pub fn into_ids(self) -> G {
        self.ids
    }

    /// Validates a track's clips when input validation is enabled.
    fn check_track(&self, clips: &[ClipRecord]) -> Result<(), PlanError> {
        if !self.options.validate_inputs {
            return Ok(());
        }
        let track = clips.first().map(|c| c.track_id).unwrap_or(NIL_ID);
        validate_track(track, clips)?;
        Ok(())
    }
}
