//! Property-based invariant tests for the planner.
//!
//! For random non-overlapping tracks and random requests:
//!
//! 1. Occlusion plans apply in order without transient overlap and leave the
//!    requested interval free.
//! 2. Ripple plans that open time apply in order without transient overlap,
//!    and gap removal leaves a track packed.
//! 3. Duplicate plans apply in order and place every reported copy.
//! 4. Reverting any applied plan restores the original clip set.
//! 5. Planning never mutates its input and is deterministic for a given id seed.

use proptest::prelude::*;
use timeline_planner::{
    ClipRecord, ClipTable, DerivedIds, Frame, Id, MutationAction, MutationPlan, PlannedMoves,
    Planner, SequenceSnapshot, TrackSnapshot, TrackType,
};

const SEQ: Id = [0x50; 16];
const V1: Id = [0xA1; 16];
const V2: Id = [0xA2; 16];
const V3: Id = [0xA3; 16];

// ── Helpers ─────────────────────────────────────────────────────────────

/// Layout of a track as (gap before clip, clip duration) pairs.
fn track_layout(max_clips: usize) -> impl Strategy<Value = Vec<(Frame, Frame)>> {
    proptest::collection::vec((0i64..15, 1i64..25), 0..=max_clips)
}

fn build_track(track: Id, id_base: u8, layout: &[(Frame, Frame)]) -> Vec<ClipRecord> {
    let mut clips = Vec::with_capacity(layout.len());
    let mut cursor = 0;
    for (i, &(gap, duration)) in layout.iter().enumerate() {
        let start = cursor + gap;
        let mut id = [id_base; 16];
        id[15] = i as u8;
        clips.push(
            ClipRecord::new(id, track, start, duration)
                .with_source_in(start * 3)
                .with_sequence(SEQ)
                .with_name(format!("clip {}", i)),
        );
        cursor = start + duration;
    }
    clips
}

fn planner() -> Planner<DerivedIds> {
    Planner::with_ids(DerivedIds::new("proptest"))
}

fn assert_no_overlap(table: &ClipTable, track: &Id) -> Result<(), TestCaseError> {
    let clips = table.track_clips(track);
    for pair in clips.windows(2) {
        prop_assert!(
            pair[0].end() <= pair[1].timeline_start,
            "overlap between [{}, {}) and [{}, {})",
            pair[0].timeline_start,
            pair[0].end(),
            pair[1].timeline_start,
            pair[1].end()
        );
    }
    Ok(())
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 4. Occlusion
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn occlusion_plan_clears_span_and_reverts(
        layout in track_layout(8),
        new_start in 0i64..200,
        new_duration in 1i64..60,
    ) {
        let clips = build_track(V1, 1, &layout);
        let snapshot = clips.clone();
        let plan = planner()
            .resolve_occlusions(&clips, new_start, new_duration, None, &PlannedMoves::new())
            .unwrap();
        prop_assert_eq!(&clips, &snapshot);

        let mut table = ClipTable::from_clips(clips.clone());
        let original = table.clone();
        table.apply(&plan).unwrap();
        assert_no_overlap(&table, &V1)?;

        // The requested interval is now free.
        let mut filled = table.clone();
        let placed = ClipRecord::new([0xFF; 16], V1, new_start, new_duration);
        filled
            .apply(&MutationPlan::from(vec![MutationAction::Insert { clip: placed }]))
            .unwrap();

        table.revert(&plan).unwrap();
        prop_assert_eq!(table, original);
    }
}

proptest! {
    #[test]
    fn occlusion_emits_at_most_one_action_per_existing_clip(
        layout in track_layout(8),
        new_start in 0i64..200,
        new_duration in 1i64..60,
    ) {
        let clips = build_track(V1, 1, &layout);
        let plan = planner()
            .resolve_occlusions(&clips, new_start, new_duration, None, &PlannedMoves::new())
            .unwrap();

        for clip in &clips {
            let touching = plan
                .iter()
                .filter(|a| !matches!(a, MutationAction::Insert { .. }) && a.clip_id() == clip.id)
                .count();
            prop_assert!(touching <= 1);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2 + 4. Ripple
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn opening_ripple_applies_in_order_and_reverts(
        layout in track_layout(8),
        insert_point in 0i64..200,
        shift in 1i64..100,
    ) {
        let clips = build_track(V1, 1, &layout);
        let plan = planner().resolve_ripple(&clips, insert_point, shift).unwrap();

        let mut table = ClipTable::from_clips(clips.clone());
        let original = table.clone();
        table.apply(&plan).unwrap();
        assert_no_overlap(&table, &V1)?;

        // Nothing remains across the insertion point and nothing starts in the gap.
        for clip in table.track_clips(&V1) {
            prop_assert!(clip.end() <= insert_point || clip.timeline_start >= insert_point + shift);
        }

        table.revert(&plan).unwrap();
        prop_assert_eq!(table, original);
    }
}

proptest! {
    #[test]
    fn ripple_delete_closes_gap(
        layout in track_layout(8).prop_filter("needs a clip", |l| !l.is_empty()),
        pick in any::<proptest::sample::Index>(),
    ) {
        let clips = build_track(V1, 1, &layout);
        let target = &clips[pick.index(clips.len())];
        let plan = planner().plan_ripple_delete(&clips, &target.id).unwrap();

        let mut table = ClipTable::from_clips(clips.clone());
        table.apply(&plan).unwrap();
        assert_no_overlap(&table, &V1)?;
        prop_assert_eq!(table.len(), clips.len() - 1);

        for clip in &clips {
            if clip.timeline_start >= target.end() {
                let moved = table.get(&clip.id).unwrap();
                prop_assert_eq!(moved.timeline_start, clip.timeline_start - target.duration);
            }
        }
    }
}

proptest! {
    #[test]
    fn remove_gaps_packs_track_and_reverts(layout in track_layout(8)) {
        let clips = build_track(V1, 1, &layout);
        let plan = planner().plan_remove_gaps(&clips).unwrap();
        prop_assert_eq!(plan.len(), plan.updates().count());

        let mut table = ClipTable::from_clips(clips.clone());
        let original = table.clone();
        table.apply(&plan).unwrap();
        assert_no_overlap(&table, &V1)?;

        let packed = table.track_clips(&V1);
        if let Some(first) = packed.first() {
            prop_assert_eq!(first.timeline_start, clips[0].timeline_start);
        }
        for pair in packed.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].timeline_start);
        }

        table.revert(&plan).unwrap();
        prop_assert_eq!(table, original);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3 + 4 + 5. Duplicate
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn duplicate_block_applies_and_reverts(
        v1_layout in track_layout(6).prop_filter("needs a clip", |l| !l.is_empty()),
        v2_layout in track_layout(6),
        selection_mask in any::<u8>(),
        to_v2 in any::<bool>(),
        requested_delta in -80i64..80,
    ) {
        let v1_clips = build_track(V1, 1, &v1_layout);
        let v2_clips = build_track(V2, 2, &v2_layout);

        let mut selected: Vec<Id> = v1_clips
            .iter()
            .enumerate()
            .filter(|&(i, _)| (selection_mask >> i) & 1 == 1)
            .map(|(_, c)| c.id)
            .collect();
        if selected.is_empty() {
            selected.push(v1_clips[0].id);
        }
        let anchor = selected[0];

        let mut v1 = TrackSnapshot::new(V1, TrackType::Video, 1);
        v1.clips = v1_clips;
        let mut v2 = TrackSnapshot::new(V2, TrackType::Video, 2);
        v2.clips = v2_clips;
        let sequence = SequenceSnapshot::new(SEQ).with_track(v1).with_track(v2);
        let target = if to_v2 { V2 } else { V1 };

        let result = planner()
            .plan_duplicate_block(&sequence, &selected, &anchor, &target, requested_delta)
            .unwrap();

        let again = planner()
            .plan_duplicate_block(&sequence, &selected, &anchor, &target, requested_delta)
            .unwrap();
        prop_assert_eq!(&result, &again);

        let mut table = ClipTable::from_sequence(&sequence);
        let original = table.clone();
        table.apply(&result.plan).unwrap();
        assert_no_overlap(&table, &V1)?;
        assert_no_overlap(&table, &V2)?;

        for id in &result.new_clip_ids {
            let copy = table.get(id).unwrap();
            prop_assert!(copy.timeline_start >= 0);
            prop_assert_eq!(copy.track_id, target);
        }
        // Selected originals are never displaced by their own copies.
        for id in &selected {
            prop_assert_eq!(table.get(id), original.get(id));
        }

        table.revert(&result.plan).unwrap();
        prop_assert_eq!(table, original);
    }
}

fn masked_ids(clips: &[ClipRecord], mask: u8) -> Vec<Id> {
    clips
        .iter()
        .enumerate()
        .filter(|&(i, _)| (mask >> i) & 1 == 1)
        .map(|(_, c)| c.id)
        .collect()
}

proptest! {
    #[test]
    fn duplicate_across_three_tracks_applies_and_reverts(
        v1_layout in track_layout(5).prop_filter("needs a clip", |l| !l.is_empty()),
        v2_layout in track_layout(5).prop_filter("needs a clip", |l| !l.is_empty()),
        v3_layout in track_layout(5),
        v1_mask in any::<u8>(),
        v2_mask in any::<u8>(),
        target_index in 0usize..3,
        requested_delta in -80i64..80,
    ) {
        let v1_clips = build_track(V1, 1, &v1_layout);
        let v2_clips = build_track(V2, 2, &v2_layout);
        let v3_clips = build_track(V3, 3, &v3_layout);

        // The selection always spans V1 and V2.
        let mut selected = masked_ids(&v1_clips, v1_mask);
        if selected.is_empty() {
            selected.push(v1_clips[0].id);
        }
        let anchor = selected[0];
        let from_v2 = masked_ids(&v2_clips, v2_mask);
        if from_v2.is_empty() {
            selected.push(v2_clips[0].id);
        } else {
            selected.extend(from_v2);
        }

        let mut tracks = Vec::new();
        for (index, (id, clips)) in [(V1, v1_clips), (V2, v2_clips), (V3, v3_clips)]
            .into_iter()
            .enumerate()
        {
            let mut track = TrackSnapshot::new(id, TrackType::Video, index as i32 + 1);
            track.clips = clips;
            tracks.push(track);
        }
        let target = tracks[target_index].id;
        let sequence = tracks
            .into_iter()
            .fold(SequenceSnapshot::new(SEQ), SequenceSnapshot::with_track);

        let result = planner()
            .plan_duplicate_block(&sequence, &selected, &anchor, &target, requested_delta)
            .unwrap();
        let inserted: Vec<Id> = result.plan.inserts().map(|c| c.id).collect();
        prop_assert_eq!(&inserted, &result.new_clip_ids);

        let mut table = ClipTable::from_sequence(&sequence);
        let original = table.clone();
        table.apply(&result.plan).unwrap();
        for track in [V1, V2, V3] {
            assert_no_overlap(&table, &track)?;
        }
        for id in &selected {
            prop_assert_eq!(table.get(id), original.get(id));
        }

        table.revert(&result.plan).unwrap();
        prop_assert_eq!(table, original);
    }
}
