//! Interval mutation planner for editing timelines.
//!
//! Clips on a track occupy half-open frame intervals that never overlap. This
//! crate decides how those clips must change when material is placed, time is
//! rippled, or a selection is duplicated, and returns the answer as an
//! ordered [`MutationPlan`] of inserts, updates and deletes. It never touches
//! storage: the caller supplies a read-only snapshot and applies the plan in
//! one transaction.
//!
//! ```
//! use timeline_planner::{ClipRecord, DerivedIds, MutationAction, PlannedMoves, Planner};
//!
//! let track = [1u8; 16];
//! let clips = vec![ClipRecord::new([2u8; 16], track, 0, 30)];
//!
//! let mut planner = Planner::with_ids(DerivedIds::new("doc"));
//! let plan = planner
//!     .resolve_occlusions(&clips, 10, 10, None, &PlannedMoves::new())
//!     .unwrap();
//!
//! // The clip straddles [10, 20): it keeps [0, 10) and a new clip takes [20, 30).
//! assert_eq!(plan.len(), 2);
//! assert!(matches!(plan.actions[1], MutationAction::Insert { .. }));
//! ```

pub mod apply;
pub mod error;
pub mod interval;
pub mod limits;
pub mod model;
pub mod plan;
pub mod validate;

pub use apply::ClipTable;
pub use error::{ApplyError, PlanError, ValidationError};
pub use interval::{merge_adjacent_inclusive, merge_overlapping, InclusiveRange, Span};
pub use model::{
    ClipKind, ClipRecord, DerivedIds, Frame, Id, IdGenerator, MutationAction, MutationPlan,
    RandomIds, Rate, SequenceSnapshot, TrackSnapshot, TrackType,
};
pub use plan::{DuplicatePlan, PlannedMove, PlannedMoves, Planner, PlannerOptions};
