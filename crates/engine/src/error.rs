use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::timeline::SegmentId;

/// Result type used by the engine crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors produced by persistence and render-request validation.
///
/// Editing actions and boundary snapping never return these; they clamp or
/// ignore invalid input instead.
#[derive(Debug)]
pub enum EngineError {
    EmptyTimeline,
    SegmentTooShort {
        segment_id: SegmentId,
        duration: f64,
    },
    InvalidSourceRange {
        segment_id: SegmentId,
        source_start: f64,
        source_end: f64,
    },
    CropOutOfRange {
        segment_id: SegmentId,
        crop_x: f64,
    },
    InvalidSourceDimensions {
        width: u32,
        height: u32,
    },
    SessionIo {
        context: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    SessionSerialization {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidSessionFile {
        reason: String,
    },
    PresetSerialization {
        name: String,
        source: serde_json::Error,
    },
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTimeline => write!(f, "timeline has no segments"),
            Self::SegmentTooShort {
                segment_id,
                duration,
            } => write!(
                f,
                "segment {segment_id} is shorter than the minimum duration: {duration:.3}s"
            ),
            Self::InvalidSourceRange {
                segment_id,
                source_start,
                source_end,
            } => write!(
                f,
                "invalid source range in segment {segment_id}: {source_start}..{source_end}"
            ),
            Self::CropOutOfRange { segment_id, crop_x } => {
                write!(f, "crop anchor out of range in segment {segment_id}: {crop_x}")
            }
            Self::InvalidSourceDimensions { width, height } => {
                write!(f, "invalid source dimensions {width}x{height}")
            }
            Self::SessionIo {
                context,
                path,
                source,
            } => write!(f, "{context}: {} ({source})", path.display()),
            Self::SessionSerialization { path, source } => {
                write!(
                    f,
                    "session serialization/deserialization failed at {} ({source})",
                    path.display()
                )
            }
            Self::InvalidSessionFile { reason } => write!(f, "invalid session file: {reason}"),
            Self::PresetSerialization { name, source } => {
                write!(f, "subtitle preset {name:?} could not be encoded ({source})")
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SessionIo { source, .. } => Some(source),
            Self::SessionSerialization { source, .. } => Some(source),
            Self::PresetSerialization { source, .. } => Some(source),
            _ => None,
        }
    }
}
