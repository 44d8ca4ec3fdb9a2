use std::fmt::{Display, Formatter};

use crate::time::MIN_SEGMENT_DURATION;
use serde::{Deserialize, Serialize};

/// Opaque identifier for timeline segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u64);

impl Display for SegmentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "seg-{}", self.0)
    }
}

/// One contiguous slice of the source video included in the output clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub id: SegmentId,
    /// Absolute source seconds, inclusive.
    pub source_start: f64,
    /// Absolute source seconds, exclusive.
    pub source_end: f64,
    /// Horizontal anchor of the 9:16 window: 0 = left, 0.5 = center, 1 = right.
    pub crop_x: f64,
}

impl TimelineSegment {
    pub fn new(id: SegmentId, source_start: f64, source_end: f64, crop_x: f64) -> Self {
        Self {
            id,
            source_start,
            source_end,
            crop_x,
        }
    }

    /// Returns the segment length in seconds.
    pub fn duration(&self) -> f64 {
        self.source_end - self.source_start
    }
}

/// Position of one segment on the concatenated output timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentOffset {
    pub segment_id: SegmentId,
    pub timeline_start: f64,
    pub timeline_end: f64,
}

impl SegmentOffset {
    fn contains(&self, time: f64) -> bool {
        self.timeline_start <= time && time <= self.timeline_end
    }
}

/// Result of mapping a timeline time back to the source video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourcePosition {
    pub segment_id: SegmentId,
    pub index: usize,
    pub source_time: f64,
}

/// Computes each segment's `[timeline_start, timeline_end)` as a running sum
/// of the preceding durations.
///
/// # Example
/// ```
/// use engine::timeline::{SegmentId, TimelineSegment, segment_offsets};
///
/// let segments = vec![
///     TimelineSegment::new(SegmentId(1), 10.0, 20.0, 0.5),
///     TimelineSegment::new(SegmentId(2), 50.0, 70.0, 0.5),
/// ];
/// let offsets = segment_offsets(&segments);
/// assert_eq!(offsets[1].timeline_start, 10.0);
/// assert_eq!(offsets[1].timeline_end, 30.0);
/// ```
pub fn segment_offsets(segments: &[TimelineSegment]) -> Vec<SegmentOffset> {
    let mut cursor = 0.0;
    segments
        .iter()
        .map(|segment| {
            let timeline_start = cursor;
            cursor += segment.duration();
            SegmentOffset {
                segment_id: segment.id,
                timeline_start,
                timeline_end: cursor,
            }
        })
        .collect()
}

/// Returns the length of the concatenated output, or 0 for an empty list.
pub fn total_duration(segments: &[TimelineSegment]) -> f64 {
    segment_offsets(segments)
        .last()
        .map(|offset| offset.timeline_end)
        .unwrap_or(0.0)
}

/// Maps a virtual timeline time to the source time under it.
///
/// Both interval ends are inclusive, so a time on the seam between two
/// segments resolves to the earlier one. Times past the end clamp to the end
/// of the last segment. Returns `None` only for an empty list.
///
/// # Example
/// ```
/// use engine::timeline::{SegmentId, TimelineSegment, timeline_to_source};
///
/// let segments = vec![TimelineSegment::new(SegmentId(1), 10.0, 40.0, 0.5)];
/// let position = timeline_to_source(&segments, 15.0).expect("non-empty timeline");
/// assert_eq!(position.source_time, 25.0);
/// ```
pub fn timeline_to_source(segments: &[TimelineSegment], time: f64) -> Option<SourcePosition> {
    let offsets = segment_offsets(segments);

    if let Some(index) = offsets.iter().position(|offset| offset.contains(time)) {
        let segment = &segments[index];
        return Some(SourcePosition {
            segment_id: segment.id,
            index,
            source_time: segment.source_start + (time - offsets[index].timeline_start),
        });
    }

    let index = segments.len().checked_sub(1)?;
    let last = &segments[index];
    Some(SourcePosition {
        segment_id: last.id,
        index,
        source_time: last.source_end,
    })
}

/// Finds the index of the segment with `id`.
pub fn find_segment_index(segments: &[TimelineSegment], id: SegmentId) -> Option<usize> {
    segments.iter().position(|segment| segment.id == id)
}

/// Returns the source time a split at `playhead` would cut at, when both
/// halves would keep at least [`MIN_SEGMENT_DURATION`].
pub fn split_point(segments: &[TimelineSegment], playhead: f64) -> Option<SourcePosition> {
    let position = timeline_to_source(segments, playhead)?;
    let segment = &segments[position.index];
    let head = position.source_time - segment.source_start;
    let tail = segment.source_end - position.source_time;
    if head < MIN_SEGMENT_DURATION || tail < MIN_SEGMENT_DURATION {
        return None;
    }
    Some(position)
}

/// Whether a split at `playhead` would be accepted.
pub fn can_split(segments: &[TimelineSegment], playhead: f64) -> bool {
    split_point(segments, playhead).is_some()
}

/// Whether deleting `id` would be accepted: it exists and is not the last one.
pub fn can_delete(segments: &[TimelineSegment], id: SegmentId) -> bool {
    segments.len() > 1 && find_segment_index(segments, id).is_some()
}

/// Clamps a requested start trim the way the editor applies it, or returns
/// `None` when the request would leave the segment under the floor.
pub fn clamp_trim_start(segment: &TimelineSegment, new_start: f64) -> Option<f64> {
    let new_start = new_start.max(0.0);
    if segment.source_end - new_start < MIN_SEGMENT_DURATION {
        return None;
    }
    Some(new_start)
}

/// Clamps a requested end trim so the segment keeps the minimum duration.
pub fn clamp_trim_end(segment: &TimelineSegment, new_end: f64) -> f64 {
    new_end.max(segment.source_start + MIN_SEGMENT_DURATION)
}

/// Whether a start trim on `id` to `new_start` would change the segment.
pub fn can_trim_start(segments: &[TimelineSegment], id: SegmentId, new_start: f64) -> bool {
    find_segment_index(segments, id)
        .and_then(|index| clamp_trim_start(&segments[index], new_start))
        .is_some()
}

/// Whether an end trim on `id` targets an existing segment. End trims never
/// reject; they clamp.
pub fn can_trim_end(segments: &[TimelineSegment], id: SegmentId) -> bool {
    find_segment_index(segments, id).is_some()
}
