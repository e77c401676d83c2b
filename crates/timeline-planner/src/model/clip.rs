//! Clip records as the planner sees them.
//!
//! A clip occupies the half-open timeline interval
//! `[timeline_start, timeline_start + duration)` and plays the source interval
//! `[source_in, source_out)` of its media, one source frame per timeline frame.

use crate::interval::Span;
use crate::model::Id;

/// Discrete timeline position or length.
pub type Frame = i64;

/// Frame rate attached to a clip.
///
/// Stored for metadata only: the planner copies it onto clips it derives and
/// never converts between rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rate {
    pub num: i32,
    pub den: i32,
}

impl Rate {
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Self::new(24, 1)
    }
}

/// Kind tag of a persisted clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipKind {
    /// A clip placed on a sequence track. The only kind the planner mutates.
    Timeline,
    /// A master clip describing a media item in the project bin.
    Master,
}

/// The planner's view of a persisted clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRecord {
    pub id: Id,
    pub track_id: Id,
    pub name: String,
    pub media_id: Option<Id>,
    pub timeline_start: Frame,
    pub duration: Frame,
    pub source_in: Frame,
    pub source_out: Frame,
    pub enabled: bool,
    pub offline: bool,
    pub kind: ClipKind,
    /// Master clip this clip was cut from.
    pub parent_clip_id: Option<Id>,
    /// Sequence owning the track this clip lives on.
    pub owner_sequence_id: Option<Id>,
    pub rate: Rate,
}

impl ClipRecord {
    /// Creates an enabled, online timeline clip with `source_in = 0`.
    pub fn new(id: Id, track_id: Id, timeline_start: Frame, duration: Frame) -> Self {
        Self {
            id,
            track_id,
            name: String::new(),
            media_id: None,
            timeline_start,
            duration,
            source_in: 0,
            source_out: duration,
            enabled: true,
            offline: false,
            kind: ClipKind::Timeline,
            parent_clip_id: None,
            owner_sequence_id: None,
            rate: Rate::default(),
        }
    }

    /// Sets the source interval start, keeping `source_out - source_in == duration`.
    pub fn with_source_in(mut self, source_in: Frame) -> Self {
        self.source_in = source_in;
        self.source_out = source_in + self.duration;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_sequence(mut self, sequence_id: Id) -> Self {
        self.owner_sequence_id = Some(sequence_id);
        self
    }

    /// Exclusive end of the timeline interval.
    pub fn end(&self) -> Frame {
        self.timeline_start + self.duration
    }

    /// Timeline interval as a span.
    pub fn span(&self) -> Span {
        Span::new(self.timeline_start, self.end())
    }

    /// Keeps the first `duration` frames, cutting from the tail.
    pub(crate) fn truncated(&self, duration: Frame) -> ClipRecord {
        ClipRecord {
            duration,
            source_out: self.source_in + duration,
            ..self.clone()
        }
    }

    /// Keeps everything from timeline frame `at` onward, cutting from the head.
    pub(crate) fn trimmed_head(&self, at: Frame) -> ClipRecord {
        let trim = at - self.timeline_start;
        ClipRecord {
            timeline_start: at,
            duration: self.end() - at,
            source_in: self.source_in + trim,
            ..self.clone()
        }
    }

    /// Builds the right-hand piece of a split at timeline frame `at`, placed
    /// at `new_start` under a fresh identity.
    pub(crate) fn split_remainder(&self, id: Id, at: Frame, new_start: Frame) -> ClipRecord {
        ClipRecord {
            id,
            timeline_start: new_start,
            duration: self.end() - at,
            source_in: self.source_in + (at - self.timeline_start),
            source_out: self.source_out,
            ..self.clone()
        }
    }
}
