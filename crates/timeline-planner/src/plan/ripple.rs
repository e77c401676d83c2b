//! Opening and closing time on a track.
//!
//! A ripple shifts every clip starting at or after the insertion point and
//! splits a clip that straddles it. The apply layer checks non-overlap after
//! each action, so the order of shifts follows the direction of travel:
//! rightmost first when opening time, leftmost first when closing it. Split
//! remainders are inserted last, into space the shifts have vacated.

use tracing::debug;

use crate::error::PlanError;
use crate::limits::SPLIT_NAME_SUFFIX;
use crate::model::track::sorted_by_start;
use crate::model::{ClipRecord, Frame, Id, IdGenerator, MutationAction, MutationPlan, NIL_ID};
use crate::plan::Planner;
use crate::validate::{check_non_overlapping, validate_clip};

impl<G: IdGenerator> Planner<G> {
    /// Plans a ripple of `shift_amount` frames at `insert_point`.
    ///
    /// A zero shift yields an empty plan. A negative shift that would push a
    /// clip before frame 0 or onto an earlier clip is rejected.
    pub fn resolve_ripple(
        &mut self,
        track_clips: &[ClipRecord],
        insert_point: Frame,
        shift_amount: Frame,
    ) -> Result<MutationPlan, PlanError> {
        if shift_amount == 0 {
            debug!(insert_point, "zero ripple shift, nothing to plan");
            return Ok(MutationPlan::new());
        }
        self.check_track(track_clips)?;

        let mut updates = Vec::new();
        let mut inserts = Vec::new();
        let mut untouched = Vec::new();

        for clip in sorted_by_start(track_clips) {
            if clip.timeline_start >= insert_point {
                let shifted = ClipRecord {
                    timeline_start: clip.timeline_start + shift_amount,
                    ..clip.clone()
                };
                if shifted.timeline_start < 0 {
                    return Err(PlanError::NegativeStart {
                        clip: clip.id,
                        shift: shift_amount,
                    });
                }
                updates.push(MutationAction::update(&clip, shifted));
            } else if insert_point < clip.end() {
                let left = clip.truncated(insert_point - clip.timeline_start);
                let mut right = clip.split_remainder(
                    self.ids.next_id(),
                    insert_point,
                    insert_point + shift_amount,
                );
                right.name.push_str(SPLIT_NAME_SUFFIX);
                if right.timeline_start < 0 {
                    return Err(PlanError::NegativeStart {
                        clip: clip.id,
                        shift: shift_amount,
                    });
                }
                updates.push(MutationAction::update(&clip, left));
                inserts.push(MutationAction::Insert { clip: right });
            } else {
                untouched.push(clip);
            }
        }

        if shift_amount > 0 {
            updates.reverse();
        }

        let track = track_clips.first().map(|c| c.track_id).unwrap_or(NIL_ID);
        let result = untouched
            .iter()
            .chain(updates.iter().chain(&inserts).filter_map(MutationAction::resulting_clip));
        check_non_overlapping(track, result).map_err(|source| PlanError::RippleOverlap {
            insert_point,
            shift: shift_amount,
            source,
        })?;

        let mut plan = MutationPlan::from(updates);
        plan.actions.extend(inserts);
        Ok(plan)
    }

    /// Plans deleting a clip and closing the gap it leaves.
    ///
    /// Clips after the deleted one move left by its duration.
    pub fn plan_ripple_delete(
        &mut self,
        track_clips: &[ClipRecord],
        clip_id: &Id,
    ) -> Result<MutationPlan, PlanError> {
        let target = track_clips
            .iter()
            .find(|c| &c.id == clip_id)
            .ok_or(PlanError::ClipNotFound { clip: *clip_id })?;
        self.check_track(track_clips)?;

        let rest: Vec<ClipRecord> = track_clips
            .iter()
            .filter(|c| &c.id != clip_id)
            .cloned()
            .collect();

        let mut plan = MutationPlan::new();
        plan.push(MutationAction::delete(target));
        plan.extend(self.resolve_ripple(&rest, target.end(), -target.duration)?);
        Ok(plan)
    }

    /// Plans inserting `clip` at `insert_point`, pushing later material right
    /// by its duration.
    ///
    /// The clip is inserted under a fresh id on the rippled track; the
    /// caller's `id`, `track_id` and `timeline_start` are ignored. An empty
    /// track keeps the clip's own `track_id`.
    pub fn plan_ripple_insert(
        &mut self,
        track_clips: &[ClipRecord],
        clip: &ClipRecord,
        insert_point: Frame,
    ) -> Result<MutationPlan, PlanError> {
        if clip.duration < 1 {
            return Err(PlanError::InvalidDuration {
                duration: clip.duration,
            });
        }
        let mut placed = ClipRecord {
            track_id: track_clips.first().map_or(clip.track_id, |c| c.track_id),
            timeline_start: insert_point,
            ..clip.clone()
        };
        validate_clip(&placed)?;

        let mut plan = self.resolve_ripple(track_clips, insert_point, clip.duration)?;
        placed.id = self.ids.next_id();
        plan.push(MutationAction::Insert { clip: placed });
        Ok(plan)
    }

    /// Plans closing every gap on a track.
    ///
    /// The first clip stays put; each later clip moves left to the end of the
    /// one before it. Updates run in ascending start order.
    pub fn plan_remove_gaps(
        &mut self,
        track_clips: &[ClipRecord],
    ) -> Result<MutationPlan, PlanError> {
        if track_clips.len() < 2 {
            return Ok(MutationPlan::new());
        }
        self.check_track(track_clips)?;

        let sorted = sorted_by_start(track_clips);
        let mut plan = MutationPlan::new();
        let mut write_position = sorted[0].end();
        for clip in &sorted[1..] {
            if clip.timeline_start > write_position {
                let moved = ClipRecord {
                    timeline_start: write_position,
                    ..clip.clone()
                };
                write_position = moved.end();
                plan.push(MutationAction::update(clip, moved));
            } else {
                write_position = clip.end();
            }
        }
        debug!(moved = plan.len(), "planned gap removal");
        Ok(plan)
    }
}
