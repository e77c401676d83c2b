//! Read-only track and sequence snapshots supplied by the caller.

use crate::model::{ClipRecord, Id};

/// Media type carried by a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackType {
    Video,
    Audio,
}

/// A track and the clips it currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSnapshot {
    pub id: Id,
    pub track_type: TrackType,
    /// Position among the sequence's tracks of the same type.
    pub index: i32,
    pub clips: Vec<ClipRecord>,
}

impl TrackSnapshot {
    pub fn new(id: Id, track_type: TrackType, index: i32) -> Self {
        Self {
            id,
            track_type,
            index,
            clips: Vec::new(),
        }
    }

    /// Adds a clip, assigning it to this track.
    pub fn with_clip(mut self, mut clip: ClipRecord) -> Self {
        clip.track_id = self.id;
        self.clips.push(clip);
        self
    }

    pub fn clip(&self, id: &Id) -> Option<&ClipRecord> {
        self.clips.iter().find(|c| &c.id == id)
    }

    /// Clips ordered by timeline start.
    pub fn sorted_clips(&self) -> Vec<ClipRecord> {
        sorted_by_start(&self.clips)
    }
}

/// All tracks of one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSnapshot {
    pub sequence_id: Id,
    pub tracks: Vec<TrackSnapshot>,
}

impl SequenceSnapshot {
    pub fn new(sequence_id: Id) -> Self {
        Self {
            sequence_id,
            tracks: Vec::new(),
        }
    }

    pub fn with_track(mut self, track: TrackSnapshot) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn track(&self, id: &Id) -> Option<&TrackSnapshot> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Finds the track of the given type at the given index.
    pub fn track_at(&self, track_type: TrackType, index: i32) -> Option<&TrackSnapshot> {
        self.tracks
            .iter()
            .find(|t| t.track_type == track_type && t.index == index)
    }

    /// Finds a clip and the track holding it.
    pub fn find_clip(&self, id: &Id) -> Option<(&TrackSnapshot, &ClipRecord)> {
        self.tracks
            .iter()
            .find_map(|t| t.clip(id).map(|c| (t, c)))
    }
}

/// Returns a copy of `clips` ordered by timeline start (ties by id).
pub(crate) fn sorted_by_start(clips: &[ClipRecord]) -> Vec<ClipRecord> {
    let mut sorted = clips.to_vec();
    sorted.sort_by(|a, b| {
        a.timeline_start
            .cmp(&b.timeline_start)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}
