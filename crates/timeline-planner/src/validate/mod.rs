//! Invariant checks for clip records and tracks.
//!
//! Clip-level checks cover a single record. Track-level checks cover the
//! global property the planner exists to preserve: no two clips on a track
//! share a frame.

use crate::error::ValidationError;
use crate::model::{ClipRecord, Id};

/// Validates a single clip record.
///
/// - `duration >= 1`
/// - `source_out - source_in == duration`
/// - `timeline_start >= 0`
pub fn validate_clip(clip: &ClipRecord) -> Result<(), ValidationError> {
    if clip.duration < 1 {
        return Err(ValidationError::NonPositiveDuration {
            clip: clip.id,
            duration: clip.duration,
        });
    }
    if clip.source_out - clip.source_in != clip.duration {
        return Err(ValidationError::SourceMismatch {
            clip: clip.id,
            source_in: clip.source_in,
            source_out: clip.source_out,
            duration: clip.duration,
        });
    }
    if clip.timeline_start < 0 {
        return Err(ValidationError::NegativeStart {
            clip: clip.id,
            start: clip.timeline_start,
        });
    }
    Ok(())
}

/// Checks that no two clips overlap. All clips are taken to be on `track`.
pub fn check_non_overlapping<'a, I>(track: Id, clips: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = &'a ClipRecord>,
{
    let mut sorted: Vec<&ClipRecord> = clips.into_iter().collect();
    sorted.sort_by_key(|c| (c.timeline_start, c.end()));

    for pair in sorted.windows(2) {
        if pair[1].timeline_start < pair[0].end() {
            return Err(ValidationError::Overlap {
                track,
                first: pair[0].id,
                second: pair[1].id,
            });
        }
    }
    Ok(())
}

/// Validates every clip of a track and the track's non-overlap property.
pub fn validate_track(track: Id, clips: &[ClipRecord]) -> Result<(), ValidationError> {
    for clip in clips {
        validate_clip(clip)?;
    }
    check_non_overlapping(track, clips)
}
