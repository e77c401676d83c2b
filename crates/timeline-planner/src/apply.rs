//! In-memory reference apply layer.
//!
//! [`ClipTable`] executes a plan the way a persistent store is expected to:
//! actions run in plan order, `Update` and `Delete` snapshots must match the
//! stored record, and the touched track is checked for overlap after every
//! single action. A failed plan leaves the table untouched.

use std::collections::BTreeMap;

use crate::error::ApplyError;
use crate::model::track::sorted_by_start;
use crate::model::{ClipRecord, Id, MutationAction, MutationPlan, SequenceSnapshot};
use crate::validate::check_non_overlapping;

/// Clips keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipTable {
    clips: BTreeMap<Id, ClipRecord>,
}

impl ClipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clips(clips: impl IntoIterator<Item = ClipRecord>) -> Self {
        Self {
            clips: clips.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Loads every clip of every track in `sequence`.
    pub fn from_sequence(sequence: &SequenceSnapshot) -> Self {
        Self::from_clips(
            sequence
                .tracks
                .iter()
                .flat_map(|t| t.clips.iter().cloned()),
        )
    }

    pub fn get(&self, id: &Id) -> Option<&ClipRecord> {
        self.clips.get(id)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clips(&self) -> impl Iterator<Item = &ClipRecord> {
        self.clips.values()
    }

    /// Clips on `track`, ordered by timeline start.
    pub fn track_clips(&self, track: &Id) -> Vec<ClipRecord> {
        let clips: Vec<ClipRecord> = self
            .clips
            .values()
            .filter(|c| &c.track_id == track)
            .cloned()
            .collect();
        sorted_by_start(&clips)
    }

    /// Applies `plan` atomically.
    pub fn apply(&mut self, plan: &MutationPlan) -> Result<(), ApplyError> {
        let mut staged = self.clone();
        for (index, action) in plan.iter().enumerate() {
            staged.apply_action(index, action)?;
        }
        *self = staged;
        Ok(())
    }

    /// Undoes a previously applied `plan`.
    pub fn revert(&mut self, plan: &MutationPlan) -> Result<(), ApplyError> {
        self.apply(&plan.inverse())
    }

    fn apply_action(&mut self, index: usize, action: &MutationAction) -> Result<(), ApplyError> {
        match action {
            MutationAction::Insert { clip } => {
                if self.clips.contains_key(&clip.id) {
                    return Err(ApplyError::DuplicateId {
                        index,
                        clip: clip.id,
                    });
                }
                self.clips.insert(clip.id, clip.clone());
                self.check_track(index, &clip.track_id)
            }
            MutationAction::Update {
                clip_id,
                after,
                before,
            } => {
                self.expect_current(index, clip_id, before)?;
                self.clips.insert(*clip_id, after.clone());
                self.check_track(index, &after.track_id)
            }
            MutationAction::Delete { before } => {
                self.expect_current(index, &before.id, before)?;
                self.clips.remove(&before.id);
                Ok(())
            }
        }
    }

    fn expect_current(
        &self,
        index: usize,
        id: &Id,
        snapshot: &ClipRecord,
    ) -> Result<(), ApplyError> {
        match self.clips.get(id) {
            None => Err(ApplyError::MissingClip { index, clip: *id }),
            Some(current) if current != snapshot => {
                Err(ApplyError::StaleSnapshot { index, clip: *id })
            }
            Some(_) => Ok(()),
        }
    }

    fn check_track(&self, index: usize, track: &Id) -> Result<(), ApplyError> {
        check_non_overlapping(
            *track,
            self.clips.values().filter(|c| &c.track_id == track),
        )
        .map_err(|source| ApplyError::Overlap { index, source })
    }
}

/// Applies `plan` to a plain clip list without any checks.
///
/// Used to carry a track forward between planning steps.
pub(crate) fn apply_to_clips(clips: &mut Vec<ClipRecord>, plan: &MutationPlan) {
    for action in plan {
        match action {
            MutationAction::Insert { clip } => clips.push(clip.clone()),
            MutationAction::Update { clip_id, after, .. } => {
                if let Some(slot) = clips.iter_mut().find(|c| &c.id == clip_id) {
                    *slot = after.clone();
                }
            }
            MutationAction::Delete { before } => clips.retain(|c| c.id != before.id),
        }
    }
}
