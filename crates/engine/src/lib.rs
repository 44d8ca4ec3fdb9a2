//! Clip editing core: a segment timeline editor and transcript boundary snapping.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod ids;
pub mod presets;
pub mod project;
pub mod snap;
pub mod subtitles;
pub mod time;
pub mod timeline;
pub mod transcript;

pub use api::{
    Action, Editor, EditorState, Event, SegmentUpdate, TimelineSnapshot, ZoomState, ZoomUpdate,
    reduce,
};
pub use config::{EditorConfig, EngineConfig, SnapConfig};
pub use error::{EngineError, Result};
pub use export::{
    CropRect, RenderBackend, RenderRequest, RenderSegment, SourceMedia, build_render_request,
    crop_window,
};
pub use ids::{SegmentIdSource, SequentialIds};
pub use project::ClipSession;
pub use snap::{snap_all_clips_to_sentences, snap_clip_to_sentences};
pub use time::MIN_SEGMENT_DURATION;
pub use timeline::{SegmentId, SegmentOffset, SourcePosition, TimelineSegment};
pub use transcript::{ClipSuggestion, Sentence, TranscriptFragment};
