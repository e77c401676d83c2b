//! Mutation actions and plans.
//!
//! A plan is the planner's only output. Update and Delete actions carry the
//! record as it was read, so an undo layer can reverse a plan without going
//! back to storage.

use crate::model::{ClipRecord, Id};

/// A single change to the persisted clip set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationAction {
    /// Persist a clip built by the planner under a fresh id.
    Insert { clip: ClipRecord },
    /// Replace the fields of an existing clip.
    Update {
        clip_id: Id,
        after: ClipRecord,
        before: ClipRecord,
    },
    /// Remove an existing clip.
    Delete { before: ClipRecord },
}

impl MutationAction {
    pub(crate) fn update(before: &ClipRecord, after: ClipRecord) -> Self {
        MutationAction::Update {
            clip_id: before.id,
            after,
            before: before.clone(),
        }
    }

    pub(crate) fn delete(before: &ClipRecord) -> Self {
        MutationAction::Delete {
            before: before.clone(),
        }
    }

    /// Id of the clip this action touches.
    pub fn clip_id(&self) -> Id {
        match self {
            MutationAction::Insert { clip } => clip.id,
            MutationAction::Update { clip_id, .. } => *clip_id,
            MutationAction::Delete { before } => before.id,
        }
    }

    /// The record as it exists once this action is applied, if any.
    pub fn resulting_clip(&self) -> Option<&ClipRecord> {
        match self {
            MutationAction::Insert { clip } => Some(clip),
            MutationAction::Update { after, .. } => Some(after),
            MutationAction::Delete { .. } => None,
        }
    }

    /// The action that undoes this one.
    pub fn inverse(&self) -> MutationAction {
        match self {
            MutationAction::Insert { clip } => MutationAction::Delete {
                before: clip.clone(),
            },
            MutationAction::Update {
                clip_id,
                after,
                before,
            } => MutationAction::Update {
                clip_id: *clip_id,
                after: before.clone(),
                before: after.clone(),
            },
            MutationAction::Delete { before } => MutationAction::Insert {
                clip: before.clone(),
            },
        }
    }
}

/// Ordered sequence of actions, applied first to last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationPlan {
    pub actions: Vec<MutationAction>,
}

impl MutationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: MutationAction) {
        self.actions.push(action);
    }

    pub fn extend(&mut self, other: MutationPlan) {
        self.actions.extend(other.actions);
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MutationAction> {
        self.actions.iter()
    }

    pub fn inserts(&self) -> impl Iterator<Item = &ClipRecord> {
        self.actions.iter().filter_map(|a| match a {
            MutationAction::Insert { clip } => Some(clip),
            _ => None,
        })
    }

    pub fn updates(&self) -> impl Iterator<Item = (&ClipRecord, &ClipRecord)> {
        self.actions.iter().filter_map(|a| match a {
            MutationAction::Update { after, before, .. } => Some((before, after)),
            _ => None,
        })
    }

    pub fn deletes(&self) -> impl Iterator<Item = &ClipRecord> {
        self.actions.iter().filter_map(|a| match a {
            MutationAction::Delete { before } => Some(before),
            _ => None,
        })
    }

    /// The plan that reverses this one: inverted actions in reverse order.
    pub fn inverse(&self) -> MutationPlan {
        MutationPlan {
            actions: self.actions.iter().rev().map(MutationAction::inverse).collect(),
        }
    }
}

impl From<Vec<MutationAction>> for MutationPlan {
    fn from(actions: Vec<MutationAction>) -> Self {
        Self { actions }
    }
}

impl IntoIterator for MutationPlan {
    type Item = MutationAction;
    type IntoIter = std::vec::IntoIter<MutationAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a> IntoIterator for &'a MutationPlan {
    type Item = &'a MutationAction;
    type IntoIter = std::slice::Iter<'a, MutationAction>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
