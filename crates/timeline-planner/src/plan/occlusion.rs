//! Clearing room for a new interval on a track.
//!
//! Every clip overlapping the new interval falls into exactly one case:
//!
//! ```text
//! new:        |=========|
//! covered:      |---|            -> Delete
//! tail:    |------|              -> Update, keep [start, new_start)
//! head:             |-----|      -> Update, keep [new_end, end)
//! straddle: |---------------|    -> Update left + Insert right
//! ```
//!
//! Decisions never depend on other clips, so the input order is irrelevant.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::error::PlanError;
use crate::interval::Span;
use crate::model::{format_id, ClipRecord, Frame, Id, IdGenerator, MutationAction, MutationPlan};
use crate::plan::Planner;

/// Where a caller intends a clip to end up in the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    /// Intended interval. Only reported in diagnostics; the resolver never
    /// checks it against the track.
    pub span: Span,
    /// The clip is not expected on the track yet (for example a clip being
    /// dragged in from another track), so its absence is not reported.
    pub virtual_clip: bool,
}

/// Clips a caller is moving itself, keyed by id.
///
/// The occlusion resolver leaves these alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannedMoves {
    moves: BTreeMap<Id, PlannedMove>,
}

impl PlannedMoves {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a clip already on the track and its intended interval.
    pub fn insert(&mut self, id: Id, start: Frame, duration: Frame) {
        self.moves.insert(
            id,
            PlannedMove {
                span: Span::from_start_duration(start, duration),
                virtual_clip: false,
            },
        );
    }

    /// Declares a clip that is not on the track yet.
    pub fn insert_virtual(&mut self, id: Id, start: Frame, duration: Frame) {
        self.moves.insert(
            id,
            PlannedMove {
                span: Span::from_start_duration(start, duration),
                virtual_clip: true,
            },
        );
    }

    pub fn get(&self, id: &Id) -> Option<&PlannedMove> {
        self.moves.get(id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.moves.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &PlannedMove)> {
        self.moves.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occlusion {
    Covered,
    Tail,
    Head,
    Straddle,
}

fn classify(clip: &Span, new: &Span, overlap: &Span) -> Option<Occlusion> {
    if overlap.start <= clip.start && overlap.end >= clip.end {
        Some(Occlusion::Covered)
    } else if clip.start < new.start && clip.end <= new.end {
        Some(Occlusion::Tail)
    } else if clip.start >= new.start && clip.end > new.end {
        Some(Occlusion::Head)
    } else if clip.start < new.start && clip.end > new.end {
        Some(Occlusion::Straddle)
    } else {
        None
    }
}

impl<G: IdGenerator> Planner<G> {
    /// Plans the deletes, trims and splits that clear `[new_start, new_start + new_duration)`.
    ///
    /// `exclude_id` names a clip to ignore (typically the one being placed).
    /// Clips in `already_planned` are skipped as well; declared non-virtual
    /// entries missing from `track_clips` are logged, or rejected when
    /// [`PlannerOptions::strict_planned_lookup`](crate::plan::PlannerOptions) is set.
    pub fn resolve_occlusions(
        &mut self,
        track_clips: &[ClipRecord],
        new_start: Frame,
        new_duration: Frame,
        exclude_id: Option<&Id>,
        already_planned: &PlannedMoves,
    ) -> Result<MutationPlan, PlanError> {
        if new_duration < 1 {
            return Err(PlanError::InvalidDuration {
                duration: new_duration,
            });
        }
        self.check_track(track_clips)?;
        self.check_planned(track_clips, already_planned)?;

        let new = Span::from_start_duration(new_start, new_duration);
        let mut plan = MutationPlan::new();

        for clip in track_clips {
            if exclude_id == Some(&clip.id) || already_planned.contains(&clip.id) {
                continue;
            }
            let span = clip.span();
            let Some(overlap) = span.intersect(&new) else {
                continue;
            };

            let case = classify(&span, &new, &overlap).ok_or(PlanError::UnclassifiedOverlap {
                clip: clip.id,
                start: span.start,
                end: span.end,
                new_start: new.start,
                new_end: new.end,
            })?;
            trace!(clip = %format_id(&clip.id), ?case, "occlusion");

            match case {
                Occlusion::Covered => plan.push(MutationAction::delete(clip)),
                Occlusion::Tail => {
                    let kept = new.start - span.start;
                    if kept < 1 {
                        plan.push(MutationAction::delete(clip));
                    } else {
                        plan.push(MutationAction::update(clip, clip.truncated(kept)));
                    }
                }
                Occlusion::Head => {
                    if span.end - new.end < 1 {
                        plan.push(MutationAction::delete(clip));
                    } else {
                        plan.push(MutationAction::update(clip, clip.trimmed_head(new.end)));
                    }
                }
                Occlusion::Straddle => {
                    let left = clip.truncated(new.start - span.start);
                    let right = clip.split_remainder(self.ids.next_id(), new.end, new.end);
                    plan.push(MutationAction::update(clip, left));
                    plan.push(MutationAction::Insert { clip: right });
                }
            }
        }

        Ok(plan)
    }

    fn check_planned(
        &self,
        track_clips: &[ClipRecord],
        already_planned: &PlannedMoves,
    ) -> Result<(), PlanError> {
        for (id, planned) in already_planned.iter() {
            if planned.virtual_clip || track_clips.iter().any(|c| &c.id == id) {
                continue;
            }
            if self.options.strict_planned_lookup {
                return Err(PlanError::StalePlannedClip { clip: *id });
            }
            warn!(
                clip = %format_id(id),
                start = planned.span.start,
                end = planned.span.end,
                "already-planned clip not found on track"
            );
        }
        Ok(())
    }
}
