use crate::time::format_srt_timestamp;
use crate::timeline::{TimelineSegment, segment_offsets};
use crate::transcript::TranscriptFragment;
use serde::{Deserialize, Serialize};

/// One subtitle block, timed on the virtual output timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Rebases transcript fragments onto the edited timeline.
///
/// Emits one cue per fragment overlapping a segment, clipped to that
/// segment's source range and shifted by its timeline offset. Cues follow
/// timeline order; a fragment spanning two kept segments yields two cues.
///
/// # Example
/// ```
/// use engine::subtitles::timeline_subtitles;
/// use engine::timeline::{SegmentId, TimelineSegment};
/// use engine::transcript::TranscriptFragment;
///
/// let segments = vec![TimelineSegment::new(SegmentId(1), 10.0, 20.0, 0.5)];
/// let fragments = vec![TranscriptFragment::new(8.0, 12.0, "Hi there.")];
/// let cues = timeline_subtitles(&segments, &fragments);
/// assert_eq!((cues[0].start, cues[0].end), (0.0, 2.0));
/// ```
pub fn timeline_subtitles(
    segments: &[TimelineSegment],
    fragments: &[TranscriptFragment],
) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();

    for (segment, offset) in segments.iter().zip(segment_offsets(segments)) {
        let shift = offset.timeline_start - segment.source_start;
        for fragment in fragments {
            let text = fragment.text.trim();
            if text.is_empty() {
                continue;
            }
            let clip_start = fragment.start.max(segment.source_start);
            let clip_end = fragment.end.min(segment.source_end);
            if clip_end <= clip_start {
                continue;
            }

            cues.push(SubtitleCue {
                index: cues.len() + 1,
                start: clip_start + shift,
                end: clip_end + shift,
                text: text.to_string(),
            });
        }
    }

    cues
}

/// Renders cues as SubRip text.
pub fn to_srt(cues: &[SubtitleCue]) -> String {
    let mut srt = String::new();
    for cue in cues {
        srt.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            cue.index,
            format_srt_timestamp(cue.start),
            format_srt_timestamp(cue.end),
            cue.text
        ));
    }
    srt
}
