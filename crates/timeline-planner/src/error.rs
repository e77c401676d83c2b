//! Error types for planning, validation and plan application.

use thiserror::Error;

use crate::model::{format_id, ClipKind, Frame, Id, TrackType};

/// A clip record or track snapshot that breaks a model invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("clip {} has non-positive duration {duration}", format_id(.clip))]
    NonPositiveDuration { clip: Id, duration: Frame },

    #[error(
        "clip {} source range [{source_in}, {source_out}) does not match duration {duration}",
        format_id(.clip)
    )]
    SourceMismatch {
        clip: Id,
        source_in: Frame,
        source_out: Frame,
        duration: Frame,
    },

    #[error("clip {} starts before frame 0 (at {start})", format_id(.clip))]
    NegativeStart { clip: Id, start: Frame },

    #[error(
        "clips {} and {} overlap on track {}",
        format_id(.first),
        format_id(.second),
        format_id(.track)
    )]
    Overlap { track: Id, first: Id, second: Id },
}

/// Failure to produce a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    // Precondition violations
    #[error("invalid duration {duration}: must be at least 1")]
    InvalidDuration { duration: Frame },

    #[error("clip {} not found", format_id(.clip))]
    ClipNotFound { clip: Id },

    #[error("anchor clip {} not found in sequence", format_id(.clip))]
    AnchorNotFound { clip: Id },

    #[error("track {} not found in sequence", format_id(.track))]
    TrackNotFound { track: Id },

    #[error("clip {} is a {kind:?} clip, only timeline clips can be planned", format_id(.clip))]
    NotTimelineClip { clip: Id, kind: ClipKind },

    #[error(
        "clip {} belongs to a different sequence than the rest of the selection",
        format_id(.clip)
    )]
    MixedSequences { clip: Id },

    #[error("target track type {target:?} does not match anchor track type {anchor:?}")]
    TrackTypeMismatch { target: TrackType, anchor: TrackType },

    #[error("shifting clip {} by {shift} would move it before frame 0", format_id(.clip))]
    NegativeStart { clip: Id, shift: Frame },

    #[error("ripple of {shift} at frame {insert_point} would overlap clips on the track")]
    RippleOverlap {
        insert_point: Frame,
        shift: Frame,
        #[source]
        source: ValidationError,
    },

    #[error("already-planned clip {} is not on the track", format_id(.clip))]
    StalePlannedClip { clip: Id },

    #[error("invalid input snapshot: {0}")]
    InvalidInput(#[from] ValidationError),

    // Internal consistency violations
    #[error(
        "overlap of clip {} [{start}, {end}) with [{new_start}, {new_end}) fits no occlusion case",
        format_id(.clip)
    )]
    UnclassifiedOverlap {
        clip: Id,
        start: Frame,
        end: Frame,
        new_start: Frame,
        new_end: Frame,
    },

    #[error(
        "duplicates of {} and {} overlap each other on track {}",
        format_id(.first),
        format_id(.second),
        format_id(.track)
    )]
    SiblingOverlap { track: Id, first: Id, second: Id },

    #[error("offset clamp did not settle within {passes} passes")]
    ClampDiverged { passes: usize },
}

/// Rejection of a plan by the apply layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("action {index}: clip {} already exists", format_id(.clip))]
    DuplicateId { index: usize, clip: Id },

    #[error("action {index}: clip {} does not exist", format_id(.clip))]
    MissingClip { index: usize, clip: Id },

    #[error("action {index}: stored clip {} differs from the plan's snapshot", format_id(.clip))]
    StaleSnapshot { index: usize, clip: Id },

    #[error("action {index}: {source}")]
    Overlap {
        index: usize,
        #[source]
        source: ValidationError,
    },
}
