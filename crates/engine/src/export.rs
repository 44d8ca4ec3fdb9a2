use std::path::PathBuf;

use crate::error::{EngineError, Result};
use crate::presets::SubtitleStyle;
use crate::subtitles::{SubtitleCue, timeline_subtitles};
use crate::time::MIN_SEGMENT_DURATION;
use crate::timeline::{SegmentId, TimelineSegment, segment_offsets, total_duration};
use crate::transcript::TranscriptFragment;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Source video the segments refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMedia {
    pub path: PathBuf,
    /// Pixel size, when known. Without it the renderer derives crops itself.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl SourceMedia {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

/// Pixel rectangle of the vertical window inside a source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Derives the 9:16 window for a `width`x`height` frame anchored at `crop_x`.
///
/// The window keeps the full height; its width is capped to the frame and
/// rounded down to an even pixel count.
///
/// # Example
/// ```
/// use engine::export::{CropRect, crop_window};
///
/// let rect = crop_window(1920, 1080, 0.5).expect("valid dimensions");
/// assert_eq!(rect, CropRect { x: 656, y: 0, width: 608, height: 1080 });
/// ```
pub fn crop_window(width: u32, height: u32, crop_x: f64) -> Result<CropRect> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidSourceDimensions { width, height });
    }

    let ideal = (f64::from(height) * 9.0 / 16.0).round() as u32;
    let crop_width = (ideal.min(width) & !1).max(1);
    let slack = width - crop_width;
    let x = (f64::from(slack) * crop_x.clamp(0.0, 1.0)).round() as u32;

    Ok(CropRect {
        x: x.min(slack),
        y: 0,
        width: crop_width,
        height,
    })
}

/// One segment in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSegment {
    pub id: SegmentId,
    pub source_start: f64,
    pub source_end: f64,
    pub timeline_start: f64,
    pub timeline_end: f64,
    pub crop_x: f64,
    pub crop: Option<CropRect>,
}

/// Everything the external renderer needs to produce the final clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub source: SourceMedia,
    pub segments: Vec<RenderSegment>,
    pub subtitles: Vec<SubtitleCue>,
    pub subtitle_style: Option<SubtitleStyle>,
    pub total_duration: f64,
}

/// Opaque rendering service invoked once per committed clip.
pub trait RenderBackend {
    type Output;

    fn render(&self, request: &RenderRequest) -> Result<Self::Output>;
}

/// Builds the render request for the current segment list.
///
/// Fails when the list is empty or a segment breaks a timeline invariant,
/// which can only happen for lists that did not come out of the editor.
pub fn build_render_request(
    source: &SourceMedia,
    segments: &[TimelineSegment],
    fragments: &[TranscriptFragment],
    subtitle_style: Option<SubtitleStyle>,
) -> Result<RenderRequest> {
    if segments.is_empty() {
        return Err(EngineError::EmptyTimeline);
    }

    let dimensions = source.width.zip(source.height);
    let mut render_segments = Vec::with_capacity(segments.len());

    for (segment, offset) in segments.iter().zip(segment_offsets(segments)) {
        validate_segment(segment)?;
        let crop = dimensions
            .map(|(width, height)| crop_window(width, height, segment.crop_x))
            .transpose()?;

        render_segments.push(RenderSegment {
            id: segment.id,
            source_start: segment.source_start,
            source_end: segment.source_end,
            timeline_start: offset.timeline_start,
            timeline_end: offset.timeline_end,
            crop_x: segment.crop_x,
            crop,
        });
    }

    let subtitles = timeline_subtitles(segments, fragments);
    let total_duration = total_duration(segments);
    info!(
        source = %source.path.display(),
        segment_count = render_segments.len(),
        cue_count = subtitles.len(),
        total_duration,
        "render request built"
    );

    Ok(RenderRequest {
        source: source.clone(),
        segments: render_segments,
        subtitles,
        subtitle_style,
        total_duration,
    })
}

/// Checks the range, minimum duration and crop of one segment.
pub(crate) fn validate_segment(segment: &TimelineSegment) -> Result<()> {
    if !segment.source_start.is_finite()
        || !segment.source_end.is_finite()
        || segment.source_start < 0.0
        || segment.source_end < segment.source_start
    {
        return Err(EngineError::InvalidSourceRange {
            segment_id: segment.id,
            source_start: segment.source_start,
            source_end: segment.source_end,
        });
    }
    if segment.duration() < MIN_SEGMENT_DURATION {
        return Err(EngineError::SegmentTooShort {
            segment_id: segment.id,
            duration: segment.duration(),
        });
    }
    if !(0.0..=1.0).contains(&segment.crop_x) {
        return Err(EngineError::CropOutOfRange {
            segment_id: segment.id,
            crop_x: segment.crop_x,
        });
    }
    Ok(())
}
