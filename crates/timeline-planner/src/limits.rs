//! Numeric guards and fixed strings used while planning.

/// Upper bound on clamp walk passes over all target tracks.
///
/// Each pass moves the offset strictly in one direction past at least one
/// forbidden range, so the walk finishes in at most one pass per range plus
/// one; this only catches a broken invariant.
pub const MAX_CLAMP_PASSES: usize = 10_000;

/// Suffix appended to the name of the right-hand piece of a ripple split.
pub const SPLIT_NAME_SUFFIX: &str = " (split)";
