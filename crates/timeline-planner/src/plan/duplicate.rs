//! Duplicating a multi-clip selection to another track and offset.
//!
//! The selection keeps its shape: every clip moves by the same frame offset
//! and the same number of track positions (within its own track type). The
//! offset is first clamped so that no copy lands on top of an original from
//! the selection, then the copies are placed and whatever else they cover on
//! the target tracks is trimmed, split or deleted.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::apply::apply_to_clips;
use crate::error::{PlanError, ValidationError};
use crate::interval::{merge_adjacent_inclusive, merge_overlapping, InclusiveRange, Span};
use crate::model::{
    format_id, ClipKind, ClipRecord, Frame, Id, IdGenerator, MutationAction, MutationPlan,
    SequenceSnapshot, TrackSnapshot,
};
use crate::plan::{Planner, PlannedMoves};
use crate::validate::{check_non_overlapping, validate_clip};

/// Result of [`Planner::plan_duplicate_block`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicatePlan {
    /// Occlusion actions first, then one insert per copy.
    pub plan: MutationPlan,
    /// Ids of the copies, in selection order.
    pub new_clip_ids: Vec<Id>,
    /// Frame offset applied to the copies, after clamping.
    pub delta: Frame,
}

impl DuplicatePlan {
    fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }
}

/// A selected clip and the track its copy goes to.
struct Placement<'a> {
    source: &'a ClipRecord,
    target: &'a TrackSnapshot,
}

impl<G: IdGenerator> Planner<G> {
    /// Plans copies of `source_clip_ids` offset by `requested_delta` frames and
    /// by the track distance from the anchor clip's track to `target_track_id`.
    ///
    /// Returns an empty plan when nothing would change or when no offset in
    /// the requested direction avoids the selection's own clips.
    pub fn plan_duplicate_block(
        &mut self,
        sequence: &SequenceSnapshot,
        source_clip_ids: &[Id],
        anchor_clip_id: &Id,
        target_track_id: &Id,
        requested_delta: Frame,
    ) -> Result<DuplicatePlan, PlanError> {
        let sources = self.resolve_sources(sequence, source_clip_ids)?;

        let (anchor_track, _) = sequence
            .find_clip(anchor_clip_id)
            .ok_or(PlanError::AnchorNotFound {
                clip: *anchor_clip_id,
            })?;
        let target_track = sequence
            .track(target_track_id)
            .ok_or(PlanError::TrackNotFound {
                track: *target_track_id,
            })?;
        if target_track.track_type != anchor_track.track_type {
            return Err(PlanError::TrackTypeMismatch {
                target: target_track.track_type,
                anchor: anchor_track.track_type,
            });
        }

        let track_delta = target_track.index - anchor_track.index;
        if track_delta == 0 && requested_delta == 0 {
            debug!("duplicate onto itself, nothing to plan");
            return Ok(DuplicatePlan::empty());
        }

        let Some(lower_bound) = sources.iter().map(|(_, c)| -c.timeline_start).max() else {
            return Ok(DuplicatePlan::empty());
        };
        let delta = requested_delta.max(lower_bound);

        let placements: Vec<Placement<'_>> = sources
            .iter()
            .filter_map(|&(track, clip)| {
                let target = sequence.track_at(track.track_type, track.index + track_delta);
                if target.is_none() {
                    debug!(
                        clip = %format_id(&clip.id),
                        index = track.index + track_delta,
                        "no track at mapped index, clip left out of duplicate"
                    );
                }
                target.map(|target| Placement {
                    source: clip,
                    target,
                })
            })
            .collect();
        if placements.is_empty() {
            return Ok(DuplicatePlan::empty());
        }

        let forbidden = forbidden_deltas(&placements, &sources);
        let delta = self.clamp_delta(delta, requested_delta >= 0, &forbidden)?;
        if delta < lower_bound {
            debug!(requested_delta, delta, lower_bound, "no feasible duplicate offset");
            return Ok(DuplicatePlan::empty());
        }

        // Copies in selection order, and grouped per target track.
        let mut ordered = Vec::with_capacity(placements.len());
        let mut copies: BTreeMap<Id, Vec<ClipRecord>> = BTreeMap::new();
        let mut new_clip_ids = Vec::with_capacity(placements.len());
        for placement in &placements {
            let source = placement.source;
            if delta == 0 && placement.target.id == source.track_id {
                continue;
            }
            let copy = ClipRecord {
                id: self.ids.next_id(),
                track_id: placement.target.id,
                timeline_start: source.timeline_start + delta,
                ..source.clone()
            };
            new_clip_ids.push(copy.id);
            copies.entry(placement.target.id).or_default().push(copy.clone());
            ordered.push(copy);
        }

        for (track, track_copies) in &copies {
            check_non_overlapping(*track, track_copies).map_err(|err| match err {
                ValidationError::Overlap {
                    track,
                    first,
                    second,
                } => PlanError::SiblingOverlap {
                    track,
                    first,
                    second,
                },
                other => PlanError::InvalidInput(other),
            })?;
        }

        let mut plan = MutationPlan::new();
        for (track_id, track_copies) in &copies {
            let Some(track) = sequence.track(track_id) else {
                continue;
            };
            let spans: Vec<Span> = track_copies.iter().map(ClipRecord::span).collect();

            // Each span is cleared against the track as left by the previous
            // spans, so chained splits of one long clip stay consistent.
            let mut working = track.clips.clone();
            for span in merge_overlapping(&spans) {
                let cleared = self.resolve_occlusions(
                    &working,
                    span.start,
                    span.duration(),
                    None,
                    &PlannedMoves::new(),
                )?;
                apply_to_clips(&mut working, &cleared);
                plan.extend(cleared);
            }
        }

        for copy in ordered {
            plan.push(MutationAction::Insert { clip: copy });
        }
        Ok(DuplicatePlan {
            plan,
            new_clip_ids,
            delta,
        })
    }

    /// Looks up the selection, rejecting missing, non-timeline and foreign clips.
    fn resolve_sources<'a>(
        &self,
        sequence: &'a SequenceSnapshot,
        source_clip_ids: &[Id],
    ) -> Result<Vec<(&'a TrackSnapshot, &'a ClipRecord)>, PlanError> {
        let mut seen = BTreeSet::new();
        let mut sources = Vec::with_capacity(source_clip_ids.len());
        for id in source_clip_ids {
            if !seen.insert(*id) {
                continue;
            }
            let (track, clip) = sequence
                .find_clip(id)
                .ok_or(PlanError::ClipNotFound { clip: *id })?;
            if clip.kind != ClipKind::Timeline {
                return Err(PlanError::NotTimelineClip {
                    clip: clip.id,
                    kind: clip.kind,
                });
            }
            if clip
                .owner_sequence_id
                .is_some_and(|owner| owner != sequence.sequence_id)
            {
                return Err(PlanError::MixedSequences { clip: clip.id });
            }
            if self.options.validate_inputs {
                validate_clip(clip)?;
            }
            sources.push((track, clip));
        }
        Ok(sources)
    }

    /// Walks `delta` past every forbidden range it falls into, moving right
    /// when `forward` and left otherwise, until it is clear on every track.
    fn clamp_delta(
        &self,
        mut delta: Frame,
        forward: bool,
        forbidden: &BTreeMap<Id, Vec<InclusiveRange>>,
    ) -> Result<Frame, PlanError> {
        for _ in 0..self.options.clamp_pass_limit {
            let mut moved = false;
            for ranges in forbidden.values() {
                if forward {
                    for &(lo, hi) in ranges {
                        if lo <= delta && delta <= hi {
                            delta = hi + 1;
                            moved = true;
                        }
                    }
                } else {
                    for &(lo, hi) in ranges.iter().rev() {
                        if lo <= delta && delta <= hi {
                            delta = lo - 1;
                            moved = true;
                        }
                    }
                }
            }
            if !moved {
                return Ok(delta);
            }
        }
        Err(PlanError::ClampDiverged {
            passes: self.options.clamp_pass_limit,
        })
    }
}

/// Offsets at which a copy would share a frame with a selected original on
/// its target track, merged per track.
///
/// A copy of `[s, e)` moved by `d` overlaps an original `[os, oe)` exactly
/// when `os - e < d < oe - s`.
fn forbidden_deltas(
    placements: &[Placement<'_>],
    sources: &[(&TrackSnapshot, &ClipRecord)],
) -> BTreeMap<Id, Vec<InclusiveRange>> {
    let mut per_track: BTreeMap<Id, Vec<InclusiveRange>> = BTreeMap::new();
    for placement in placements {
        let copy = placement.source;
        let ranges = per_track.entry(placement.target.id).or_default();
        for (track, original) in sources {
            if track.id != placement.target.id {
                continue;
            }
            ranges.push((
                original.timeline_start - copy.end() + 1,
                original.end() - copy.timeline_start - 1,
            ));
        }
    }
    per_track
        .into_iter()
        .map(|(track, ranges)| (track, merge_adjacent_inclusive(&ranges)))
        .collect()
}
