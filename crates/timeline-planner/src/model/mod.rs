//! Data model types for the timeline planner.
//!
//! This module contains the types the planner reads and produces:
//! - Identifiers (UUIDs) and id generation
//! - Clip records
//! - Track and sequence snapshots
//! - Mutation actions and plans

pub mod clip;
pub mod id;
pub mod plan;
pub mod track;

pub use clip::{ClipKind, ClipRecord, Frame, Rate};
pub use id::{derived_uuid, format_id, DerivedIds, Id, IdGenerator, RandomIds, NIL_ID};
pub use plan::{MutationAction, MutationPlan};
pub use track::{SequenceSnapshot, TrackSnapshot, TrackType};
