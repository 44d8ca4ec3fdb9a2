use std::collections::HashSet;
use std::path::Path;

use crate::api::{Action, Editor, EditorState, Event, ZoomState};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::export::{
    RenderBackend, RenderRequest, SourceMedia, build_render_request, validate_segment,
};
use crate::ids::{SegmentIdSource, SequentialIds};
use crate::presets::SubtitleStyle;
use crate::snap::snap_clip_with;
use crate::time::MIN_SEGMENT_DURATION;
use crate::timeline::TimelineSegment;
use crate::transcript::{ClipSuggestion, TranscriptFragment};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Editing session for one suggested clip, as persisted between visits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSession {
    pub source: SourceMedia,
    pub suggestion: ClipSuggestion,
    pub state: EditorState,
}

impl ClipSession {
    /// Seeds a session with one segment covering the suggestion.
    ///
    /// The suggestion is used as given; snap it first with
    /// [`ClipSession::from_raw_suggestion`] when it comes straight from the
    /// model.
    pub fn seed<I>(
        source: SourceMedia,
        suggestion: ClipSuggestion,
        config: &EngineConfig,
        ids: &mut I,
    ) -> Self
    where
        I: SegmentIdSource + ?Sized,
    {
        let start = suggestion.start.max(0.0);
        let end = suggestion.end.max(start + MIN_SEGMENT_DURATION);
        let segment = TimelineSegment::new(
            ids.next_id(),
            start,
            end,
            config.editor.default_crop_x.clamp(0.0, 1.0),
        );

        let mut state = EditorState::new(vec![segment]);
        state.zoom = ZoomState {
            pixels_per_second: config.editor.default_pixels_per_second,
            ..ZoomState::default()
        };

        info!(
            source = %source.path.display(),
            start,
            end,
            title = %suggestion.title,
            "clip session seeded"
        );

        Self {
            source,
            suggestion,
            state,
        }
    }

    /// Snaps a raw suggestion onto sentence boundaries, then seeds from it.
    pub fn from_raw_suggestion<I>(
        source: SourceMedia,
        suggestion: &ClipSuggestion,
        fragments: &[TranscriptFragment],
        config: &EngineConfig,
        ids: &mut I,
    ) -> Self
    where
        I: SegmentIdSource + ?Sized,
    {
        let snapped = snap_clip_with(suggestion, fragments, &config.snap);
        Self::seed(source, snapped, config, ids)
    }

    /// Replays `actions` in order and returns every emitted event.
    pub fn apply_actions<A>(&mut self, actions: A) -> Vec<Event>
    where
        A: IntoIterator<Item = Action>,
    {
        let state = std::mem::replace(&mut self.state, EditorState::new(Vec::new()));
        let ids = SequentialIds::after(&state.segments);
        let mut editor = Editor::new(state, ids);

        let mut events = Vec::new();
        for action in actions {
            events.extend(editor.dispatch(action));
        }
        self.state = editor.into_state();
        debug!(
            event_count = events.len(),
            segment_count = self.state.segments.len(),
            "session actions applied"
        );
        events
    }

    /// Builds the render request for the session's current cut.
    pub fn render_request(
        &self,
        fragments: &[TranscriptFragment],
        subtitle_style: Option<SubtitleStyle>,
    ) -> Result<RenderRequest> {
        build_render_request(
            &self.source,
            &self.state.segments,
            fragments,
            subtitle_style,
        )
    }

    /// Hands the current cut to the renderer.
    pub fn commit<R>(
        &self,
        renderer: &R,
        fragments: &[TranscriptFragment],
        subtitle_style: Option<SubtitleStyle>,
    ) -> Result<R::Output>
    where
        R: RenderBackend,
    {
        let request = self.render_request(fragments, subtitle_style)?;
        info!(
            segment_count = request.segments.len(),
            total_duration = request.total_duration,
            "committing clip to renderer"
        );
        renderer.render(&request)
    }

    /// Writes the session as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            EngineError::SessionSerialization {
                path: path.to_path_buf(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(|source| EngineError::SessionIo {
            context: "failed to write session",
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a session written by [`ClipSession::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::SessionIo {
            context: "failed to read session",
            path: path.to_path_buf(),
            source,
        })?;
        let session: Self =
            serde_json::from_str(&json).map_err(|source| EngineError::SessionSerialization {
                path: path.to_path_buf(),
                source,
            })?;
        session.validate()?;
        Ok(session)
    }

    fn validate(&self) -> Result<()> {
        if self.state.segments.is_empty() {
            return Err(EngineError::InvalidSessionFile {
                reason: "session has no segments".to_string(),
            });
        }
        let mut seen = HashSet::with_capacity(self.state.segments.len());
        for segment in &self.state.segments {
            if !seen.insert(segment.id) {
                return Err(EngineError::InvalidSessionFile {
                    reason: format!("segment id {} appears more than once", segment.id),
                });
            }
            validate_segment(segment)?;
        }
        if let Some(id) = self.state.selected_segment_id {
            if self.state.segment(id).is_none() {
                return Err(EngineError::InvalidSessionFile {
                    reason: format!("selected segment {id} does not exist"),
                });
            }
        }
        Ok(())
    }
}
