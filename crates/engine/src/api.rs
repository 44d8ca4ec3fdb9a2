use crate::ids::{SegmentIdSource, SequentialIds};
use crate::timeline::{
    SegmentId, SegmentOffset, SourcePosition, TimelineSegment, can_delete, can_split,
    clamp_trim_end, clamp_trim_start, find_segment_index, segment_offsets, split_point,
    timeline_to_source, total_duration,
};
use crate::time::MIN_SEGMENT_DURATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Display scale shared by the timeline views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    pub pixels_per_second: f64,
    pub scroll_left: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            pixels_per_second: 50.0,
            scroll_left: 0.0,
        }
    }
}

/// Partial zoom update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomUpdate {
    pub pixels_per_second: Option<f64>,
    pub scroll_left: Option<f64>,
}

/// Partial segment update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentUpdate {
    pub source_start: Option<f64>,
    pub source_end: Option<f64>,
    pub crop_x: Option<f64>,
}

impl SegmentUpdate {
    pub fn crop(crop_x: f64) -> Self {
        Self {
            crop_x: Some(crop_x),
            ..Self::default()
        }
    }
}

/// Editing actions accepted by the editor.
///
/// Actions never fail. Requests that would break a timeline invariant leave
/// the state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Replaces every segment, clears the selection and rewinds the playhead.
    SetSegments { segments: Vec<TimelineSegment> },
    SelectSegment { segment_id: Option<SegmentId> },
    /// Sets the playhead verbatim. Use [`Editor::seek`] for a clamped seek.
    SetPlayhead { time: f64 },
    SetPlaying { playing: bool },
    SetZoom { zoom: ZoomUpdate },
    /// Moves a segment's source start. Clamped to `>= 0`; ignored when the
    /// segment would drop below [`MIN_SEGMENT_DURATION`].
    TrimSegmentStart { segment_id: SegmentId, new_start: f64 },
    /// Moves a segment's source end, clamped to keep [`MIN_SEGMENT_DURATION`].
    TrimSegmentEnd { segment_id: SegmentId, new_end: f64 },
    /// Splits the segment under the playhead into two.
    ///
    /// # Example
    /// ```
    /// use engine::{Action, Editor};
    /// use engine::timeline::{SegmentId, TimelineSegment};
    ///
    /// let mut editor = Editor::with_segments(vec![TimelineSegment::new(
    ///     SegmentId(1),
    ///     10.0,
    ///     40.0,
    ///     0.5,
    /// )]);
    /// editor.dispatch(Action::SetPlayhead { time: 15.0 });
    /// editor.dispatch(Action::SplitAtPlayhead);
    /// assert_eq!(editor.state().segments.len(), 2);
    /// assert_eq!(editor.state().segments[1].source_start, 25.0);
    /// ```
    SplitAtPlayhead,
    /// Removes a segment. The last remaining segment is never removed.
    DeleteSegment { segment_id: SegmentId },
    UpdateSegment {
        segment_id: SegmentId,
        update: SegmentUpdate,
    },
}

/// Full editor state for one clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub segments: Vec<TimelineSegment>,
    pub selected_segment_id: Option<SegmentId>,
    /// Seconds on the virtual output timeline.
    pub playhead_time: f64,
    pub playing: bool,
    pub zoom: ZoomState,
}

impl EditorState {
    pub fn new(segments: Vec<TimelineSegment>) -> Self {
        Self {
            segments,
            selected_segment_id: None,
            playhead_time: 0.0,
            playing: false,
            zoom: ZoomState::default(),
        }
    }

    pub fn segment_offsets(&self) -> Vec<SegmentOffset> {
        segment_offsets(&self.segments)
    }

    pub fn total_duration(&self) -> f64 {
        total_duration(&self.segments)
    }

    pub fn timeline_to_source(&self, time: f64) -> Option<SourcePosition> {
        timeline_to_source(&self.segments, time)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&TimelineSegment> {
        find_segment_index(&self.segments, id).map(|index| &self.segments[index])
    }

    pub fn selected_segment(&self) -> Option<&TimelineSegment> {
        self.selected_segment_id.and_then(|id| self.segment(id))
    }

    pub fn can_split(&self) -> bool {
        can_split(&self.segments, self.playhead_time)
    }

    pub fn can_delete(&self, id: SegmentId) -> bool {
        can_delete(&self.segments, id)
    }
}

/// Applies one action to `state` and returns the next state.
///
/// `ids` hands out the id of an accepted split's right half and is told
/// about every list adopted through [`Action::SetSegments`].
pub fn reduce<I>(state: &EditorState, action: &Action, ids: &mut I) -> EditorState
where
    I: SegmentIdSource + ?Sized,
{
    let mut next = state.clone();
    match action {
        Action::SetSegments { segments } => {
            next.segments = segments.clone();
            ids.observe(&next.segments);
            next.selected_segment_id = None;
            next.playhead_time = 0.0;
        }
        Action::SelectSegment { segment_id } => match segment_id {
            Some(id) if find_segment_index(&next.segments, *id).is_none() => {
                debug!(segment_id = %id, "select ignored: unknown segment");
            }
            _ => next.selected_segment_id = *segment_id,
        },
        Action::SetPlayhead { time } => next.playhead_time = *time,
        Action::SetPlaying { playing } => next.playing = *playing,
        Action::SetZoom { zoom } => {
            if let Some(pixels_per_second) = zoom.pixels_per_second {
                next.zoom.pixels_per_second = pixels_per_second;
            }
            if let Some(scroll_left) = zoom.scroll_left {
                next.zoom.scroll_left = scroll_left;
            }
        }
        Action::TrimSegmentStart {
            segment_id,
            new_start,
        } => trim_start(&mut next, *segment_id, *new_start),
        Action::TrimSegmentEnd {
            segment_id,
            new_end,
        } => trim_end(&mut next, *segment_id, *new_end),
        Action::SplitAtPlayhead => split_at_playhead(&mut next, ids),
        Action::DeleteSegment { segment_id } => delete_segment(&mut next, *segment_id),
        Action::UpdateSegment { segment_id, update } => {
            update_segment(&mut next, *segment_id, update)
        }
    }
    next
}

fn trim_start(state: &mut EditorState, segment_id: SegmentId, new_start: f64) {
    let Some(index) = find_segment_index(&state.segments, segment_id) else {
        debug!(%segment_id, "trim start ignored: unknown segment");
        return;
    };
    let segment = &mut state.segments[index];
    let Some(clamped) = clamp_trim_start(segment, new_start) else {
        debug!(
            %segment_id,
            new_start,
            source_end = segment.source_end,
            "trim start rejected: below minimum duration"
        );
        return;
    };
    segment.source_start = clamped;
    debug!(%segment_id, source_start = clamped, "trim start accepted");
}

fn trim_end(state: &mut EditorState, segment_id: SegmentId, new_end: f64) {
    let Some(index) = find_segment_index(&state.segments, segment_id) else {
        debug!(%segment_id, "trim end ignored: unknown segment");
        return;
    };
    let segment = &mut state.segments[index];
    let clamped = clamp_trim_end(segment, new_end);
    segment.source_end = clamped;
    debug!(
        %segment_id,
        requested = new_end,
        source_end = clamped,
        "trim end accepted"
    );
}

fn split_at_playhead<I>(state: &mut EditorState, ids: &mut I)
where
    I: SegmentIdSource + ?Sized,
{
    let Some(position) = split_point(&state.segments, state.playhead_time) else {
        warn!(
            playhead = state.playhead_time,
            "split rejected: no segment with room on both sides"
        );
        return;
    };

    let Some(right_id) = fresh_id(&state.segments, ids) else {
        warn!(
            playhead = state.playhead_time,
            "split rejected: id source only returned ids already in use"
        );
        return;
    };

    let current = state.segments[position.index].clone();
    let left = TimelineSegment {
        source_end: position.source_time,
        ..current.clone()
    };
    let right = TimelineSegment {
        id: right_id,
        source_start: position.source_time,
        ..current
    };

    debug!(
        playhead = state.playhead_time,
        split_time = position.source_time,
        segment_id = %left.id,
        next_segment_id = %right.id,
        left_duration = left.duration(),
        right_duration = right.duration(),
        "split accepted"
    );

    state.selected_segment_id = Some(right.id);
    state.segments[position.index] = left;
    state.segments.insert(position.index + 1, right);
}

/// Draws ids until one is unused. A source yielding distinct ids needs at
/// most `segments.len() + 1` draws.
fn fresh_id<I>(segments: &[TimelineSegment], ids: &mut I) -> Option<SegmentId>
where
    I: SegmentIdSource + ?Sized,
{
    (0..=segments.len())
        .map(|_| ids.next_id())
        .find(|id| find_segment_index(segments, *id).is_none())
}

fn delete_segment(state: &mut EditorState, segment_id: SegmentId) {
    if state.segments.len() <= 1 {
        debug!(%segment_id, "delete rejected: last segment");
        return;
    }
    let Some(index) = find_segment_index(&state.segments, segment_id) else {
        debug!(%segment_id, "delete ignored: unknown segment");
        return;
    };

    state.segments.remove(index);
    if state.selected_segment_id == Some(segment_id) {
        state.selected_segment_id = None;
    }
    let duration = total_duration(&state.segments);
    state.playhead_time = state.playhead_time.min(duration);

    debug!(
        %segment_id,
        segment_count = state.segments.len(),
        playhead = state.playhead_time,
        "delete accepted"
    );
}

fn update_segment(state: &mut EditorState, segment_id: SegmentId, update: &SegmentUpdate) {
    let Some(index) = find_segment_index(&state.segments, segment_id) else {
        debug!(%segment_id, "update ignored: unknown segment");
        return;
    };

    let current = &state.segments[index];
    let merged = TimelineSegment {
        id: current.id,
        source_start: update.source_start.unwrap_or(current.source_start),
        source_end: update.source_end.unwrap_or(current.source_end),
        crop_x: update.crop_x.map_or(current.crop_x, |crop_x| crop_x.clamp(0.0, 1.0)),
    };

    if merged.source_start < 0.0 || merged.duration() < MIN_SEGMENT_DURATION {
        debug!(
            %segment_id,
            source_start = merged.source_start,
            source_end = merged.source_end,
            "update rejected: invalid source range"
        );
        return;
    }

    state.segments[index] = merged;
}

/// Observable change produced by one dispatched action.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SegmentsChanged(TimelineSnapshot),
    SelectionChanged { segment_id: Option<SegmentId> },
    PlayheadChanged { time: f64 },
    PlaybackChanged { playing: bool },
    ZoomChanged(ZoomState),
}

/// Segment list plus its derived layout, handed to views on change.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSnapshot {
    pub segments: Vec<TimelineSegment>,
    pub offsets: Vec<SegmentOffset>,
    pub total_duration: f64,
}

impl TimelineSnapshot {
    fn from_segments(segments: &[TimelineSegment]) -> Self {
        Self {
            segments: segments.to_vec(),
            offsets: segment_offsets(segments),
            total_duration: total_duration(segments),
        }
    }
}

/// Single-owner editing session: state plus the id source used by splits.
#[derive(Debug)]
pub struct Editor<I = SequentialIds> {
    state: EditorState,
    ids: I,
}

impl Editor<SequentialIds> {
    /// Creates an editor whose new ids continue after the given segments.
    pub fn with_segments(segments: Vec<TimelineSegment>) -> Self {
        let ids = SequentialIds::after(&segments);
        Self::new(EditorState::new(segments), ids)
    }
}

impl<I> Editor<I>
where
    I: SegmentIdSource,
{
    pub fn new(state: EditorState, ids: I) -> Self {
        Self { state, ids }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }

    /// Applies one action and returns what changed. Rejected actions return
    /// no events.
    pub fn dispatch(&mut self, action: Action) -> Vec<Event> {
        let next = reduce(&self.state, &action, &mut self.ids);
        let events = diff_events(&self.state, &next);
        self.state = next;
        events
    }

    /// Moves the playhead, clamped to `[0, total_duration]`.
    pub fn seek(&mut self, time: f64) -> Vec<Event> {
        let clamped = time.clamp(0.0, self.state.total_duration().max(0.0));
        self.dispatch(Action::SetPlayhead { time: clamped })
    }

    pub fn can_split(&self) -> bool {
        self.state.can_split()
    }

    pub fn can_delete(&self, id: SegmentId) -> bool {
        self.state.can_delete(id)
    }
}

fn diff_events(previous: &EditorState, next: &EditorState) -> Vec<Event> {
    let mut events = Vec::new();
    if previous.segments != next.segments {
        events.push(Event::SegmentsChanged(TimelineSnapshot::from_segments(
            &next.segments,
        )));
    }
    if previous.selected_segment_id != next.selected_segment_id {
        events.push(Event::SelectionChanged {
            segment_id: next.selected_segment_id,
        });
    }
    if previous.playhead_time != next.playhead_time {
        events.push(Event::PlayheadChanged {
            time: next.playhead_time,
        });
    }
    if previous.playing != next.playing {
        events.push(Event::PlaybackChanged {
            playing: next.playing,
        });
    }
    if previous.zoom != next.zoom {
        events.push(Event::ZoomChanged(next.zoom));
    }
    events
}

#[cfg(test)]
mod tests {
    use super::{Action, Editor, EditorState, Event, SegmentUpdate, ZoomUpdate, reduce};
    use crate::ids::{SegmentIdSource, SequentialIds};
    use crate::timeline::{SegmentId, TimelineSegment};

    fn seg(id: u64, start: f64, end: f64) -> TimelineSegment {
        TimelineSegment::new(SegmentId(id), start, end, 0.5)
    }

    fn editor(segments: Vec<TimelineSegment>) -> Editor {
        Editor::with_segments(segments)
    }

    #[test]
    fn split_at_playhead_creates_contiguous_halves_with_new_id() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        editor.dispatch(Action::SetPlayhead { time: 15.0 });

        let events = editor.dispatch(Action::SplitAtPlayhead);

        let segments = &editor.state().segments;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], seg(1, 10.0, 25.0));
        assert_eq!(segments[1].source_start, 25.0);
        assert_eq!(segments[1].source_end, 40.0);
        assert_eq!(segments[1].crop_x, 0.5);
        assert_ne!(segments[1].id, SegmentId(1));
        assert_eq!(editor.state().selected_segment_id, Some(segments[1].id));

        assert!(matches!(events[0], Event::SegmentsChanged(_)));
        assert_eq!(
            events[1],
            Event::SelectionChanged {
                segment_id: Some(segments[1].id)
            }
        );
    }

    #[test]
    fn split_keeps_crop_of_the_original_segment() {
        let mut editor = editor(vec![TimelineSegment::new(SegmentId(1), 0.0, 20.0, 0.2)]);
        editor.dispatch(Action::SetPlayhead { time: 8.0 });
        editor.dispatch(Action::SplitAtPlayhead);

        let segments = &editor.state().segments;
        assert!(segments.iter().all(|segment| segment.crop_x == 0.2));
    }

    #[test]
    fn split_near_either_edge_is_a_no_op() {
        for playhead in [0.0, 0.5, 29.5, 30.0] {
            let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
            editor.dispatch(Action::SetPlayhead { time: playhead });
            assert!(!editor.can_split());

            let events = editor.dispatch(Action::SplitAtPlayhead);

            assert!(events.is_empty(), "playhead {playhead} must not split");
            assert_eq!(editor.state().segments, vec![seg(1, 10.0, 40.0)]);
        }
    }

    #[test]
    fn failed_split_does_not_consume_an_id() {
        let state = EditorState::new(vec![seg(1, 0.0, 10.0)]);
        let mut ids = SequentialIds::after(&state.segments);

        let next = reduce(&state, &Action::SplitAtPlayhead, &mut ids);

        assert_eq!(next, state);
        assert_eq!(ids.next_id(), SegmentId(2));
    }

    #[test]
    fn split_second_segment_maps_through_offsets() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 100.0, 120.0)]);
        editor.dispatch(Action::SetPlayhead { time: 15.0 });
        editor.dispatch(Action::SplitAtPlayhead);

        let segments = &editor.state().segments;
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], seg(2, 100.0, 105.0));
        assert_eq!(segments[2].source_start, 105.0);
        assert_eq!(segments[2].id, SegmentId(3));
    }

    #[test]
    fn delete_first_segment_shrinks_timeline_and_clamps_playhead() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 30.0, 50.0)]);
        editor.dispatch(Action::SetPlayhead { time: 25.0 });

        editor.dispatch(Action::DeleteSegment {
            segment_id: SegmentId(1),
        });

        let state = editor.state();
        assert_eq!(state.segments, vec![seg(2, 30.0, 50.0)]);
        let offsets = state.segment_offsets();
        assert_eq!(offsets[0].timeline_start, 0.0);
        assert_eq!(offsets[0].timeline_end, 20.0);
        assert_eq!(state.playhead_time, 20.0);
    }

    #[test]
    fn delete_never_removes_the_last_segment() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 30.0, 50.0)]);
        for id in [1, 2, 2, 7] {
            editor.dispatch(Action::DeleteSegment {
                segment_id: SegmentId(id),
            });
            assert!(!editor.state().segments.is_empty());
        }
        assert_eq!(editor.state().segments, vec![seg(2, 30.0, 50.0)]);
        assert!(!editor.can_delete(SegmentId(2)));
    }

    #[test]
    fn deleting_selected_segment_clears_selection() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 30.0, 50.0)]);
        editor.dispatch(Action::SelectSegment {
            segment_id: Some(SegmentId(2)),
        });
        editor.dispatch(Action::DeleteSegment {
            segment_id: SegmentId(2),
        });
        assert_eq!(editor.state().selected_segment_id, None);
    }

    #[test]
    fn deleting_other_segment_keeps_selection_by_id() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 30.0, 50.0), seg(3, 60.0, 70.0)]);
        editor.dispatch(Action::SelectSegment {
            segment_id: Some(SegmentId(3)),
        });
        editor.dispatch(Action::DeleteSegment {
            segment_id: SegmentId(1),
        });
        assert_eq!(editor.state().selected_segment_id, Some(SegmentId(3)));
        assert_eq!(
            editor.state().selected_segment().map(|segment| segment.source_start),
            Some(60.0)
        );
    }

    #[test]
    fn trim_end_below_floor_clamps_to_minimum_duration() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        editor.dispatch(Action::TrimSegmentEnd {
            segment_id: SegmentId(1),
            new_end: 10.5,
        });
        assert_eq!(editor.state().segments[0].source_end, 11.0);
    }

    #[test]
    fn trim_start_below_floor_leaves_segment_unchanged() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        let events = editor.dispatch(Action::TrimSegmentStart {
            segment_id: SegmentId(1),
            new_start: 39.5,
        });
        assert!(events.is_empty());
        assert_eq!(editor.state().segments[0], seg(1, 10.0, 40.0));
    }

    #[test]
    fn trim_start_clamps_negative_start_to_zero() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        editor.dispatch(Action::TrimSegmentStart {
            segment_id: SegmentId(1),
            new_start: -4.0,
        });
        assert_eq!(editor.state().segments[0].source_start, 0.0);
    }

    #[test]
    fn trims_never_leave_a_segment_under_one_second() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        for target in [-5.0, 0.0, 12.0, 25.0, 38.9, 39.0, 39.2, 41.0, 100.0] {
            editor.dispatch(Action::TrimSegmentStart {
                segment_id: SegmentId(1),
                new_start: target,
            });
            editor.dispatch(Action::TrimSegmentEnd {
                segment_id: SegmentId(1),
                new_end: target,
            });
            assert!(editor.state().segments[0].duration() >= 1.0);
        }
    }

    #[test]
    fn set_segments_resets_selection_and_playhead() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0), seg(2, 30.0, 50.0)]);
        editor.dispatch(Action::SelectSegment {
            segment_id: Some(SegmentId(1)),
        });
        editor.dispatch(Action::SetPlayhead { time: 12.0 });

        editor.dispatch(Action::SetSegments {
            segments: vec![seg(9, 0.0, 5.0)],
        });

        let state = editor.state();
        assert_eq!(state.segments, vec![seg(9, 0.0, 5.0)]);
        assert_eq!(state.selected_segment_id, None);
        assert_eq!(state.playhead_time, 0.0);
    }

    #[test]
    fn split_after_set_segments_never_reuses_an_id() {
        let mut editor = editor(vec![seg(1, 0.0, 30.0)]);
        editor.dispatch(Action::SetSegments {
            segments: vec![seg(1, 0.0, 10.0), seg(2, 20.0, 40.0)],
        });
        editor.dispatch(Action::SetPlayhead { time: 5.0 });
        editor.dispatch(Action::SplitAtPlayhead);

        let ids: Vec<_> = editor.state().segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SegmentId(1), SegmentId(3), SegmentId(2)]);

        editor.dispatch(Action::DeleteSegment {
            segment_id: SegmentId(2),
        });
        assert_eq!(
            editor.state().segments,
            vec![seg(1, 0.0, 5.0), seg(3, 5.0, 10.0)]
        );
    }

    /// Replays a fixed list of ids, then keeps returning the last one.
    struct ScriptedIds(Vec<u64>);

    impl SegmentIdSource for ScriptedIds {
        fn next_id(&mut self) -> SegmentId {
            if self.0.len() > 1 {
                SegmentId(self.0.remove(0))
            } else {
                SegmentId(self.0[0])
            }
        }
    }

    #[test]
    fn split_skips_ids_already_in_the_list() {
        let state = EditorState {
            playhead_time: 5.0,
            ..EditorState::new(vec![seg(1, 0.0, 10.0), seg(2, 20.0, 40.0)])
        };

        let next = reduce(&state, &Action::SplitAtPlayhead, &mut ScriptedIds(vec![2, 1, 7]));
        let ids: Vec<_> = next.segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SegmentId(1), SegmentId(7), SegmentId(2)]);

        let stuck = reduce(&state, &Action::SplitAtPlayhead, &mut ScriptedIds(vec![2]));
        assert_eq!(stuck, state);
    }

    #[test]
    fn selecting_an_unknown_segment_is_ignored() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0)]);
        let events = editor.dispatch(Action::SelectSegment {
            segment_id: Some(SegmentId(42)),
        });
        assert!(events.is_empty());
        assert_eq!(editor.state().selected_segment_id, None);
    }

    #[test]
    fn set_playhead_is_verbatim_but_seek_clamps() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0)]);
        editor.dispatch(Action::SetPlayhead { time: 99.0 });
        assert_eq!(editor.state().playhead_time, 99.0);

        editor.seek(99.0);
        assert_eq!(editor.state().playhead_time, 10.0);
        editor.seek(-3.0);
        assert_eq!(editor.state().playhead_time, 0.0);
    }

    #[test]
    fn zoom_update_merges_only_given_fields() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0)]);
        editor.dispatch(Action::SetZoom {
            zoom: ZoomUpdate {
                scroll_left: Some(120.0),
                ..ZoomUpdate::default()
            },
        });
        let events = editor.dispatch(Action::SetZoom {
            zoom: ZoomUpdate {
                pixels_per_second: Some(80.0),
                ..ZoomUpdate::default()
            },
        });

        let zoom = editor.state().zoom;
        assert_eq!(zoom.pixels_per_second, 80.0);
        assert_eq!(zoom.scroll_left, 120.0);
        assert_eq!(events, vec![Event::ZoomChanged(zoom)]);
    }

    #[test]
    fn play_flag_toggles_without_other_changes() {
        let mut editor = editor(vec![seg(1, 0.0, 10.0)]);
        let events = editor.dispatch(Action::SetPlaying { playing: true });
        assert_eq!(events, vec![Event::PlaybackChanged { playing: true }]);
        assert!(editor.state().playing);
    }

    #[test]
    fn update_segment_clamps_crop_and_rejects_short_ranges() {
        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        editor.dispatch(Action::UpdateSegment {
            segment_id: SegmentId(1),
            update: SegmentUpdate::crop(1.4),
        });
        assert_eq!(editor.state().segments[0].crop_x, 1.0);

        let events = editor.dispatch(Action::UpdateSegment {
            segment_id: SegmentId(1),
            update: SegmentUpdate {
                source_end: Some(10.2),
                crop_x: Some(0.0),
                ..SegmentUpdate::default()
            },
        });
        assert!(events.is_empty());
        assert_eq!(editor.state().segments[0], TimelineSegment::new(SegmentId(1), 10.0, 40.0, 1.0));
    }

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let actions: Vec<Action> = serde_json::from_str(
            r#"[
                { "type": "SET_PLAYHEAD", "time": 15.0 },
                { "type": "SPLIT_AT_PLAYHEAD" },
                { "type": "UPDATE_SEGMENT", "segment_id": 2, "update": { "crop_x": 0.25 } }
            ]"#,
        )
        .expect("actions should parse");

        let mut editor = editor(vec![seg(1, 10.0, 40.0)]);
        for action in actions {
            editor.dispatch(action);
        }
        assert_eq!(
            editor.state().segments,
            vec![
                seg(1, 10.0, 25.0),
                TimelineSegment::new(SegmentId(2), 25.0, 40.0, 0.25)
            ]
        );
    }
}
