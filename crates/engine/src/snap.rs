//! Aligns AI-proposed clip ranges onto transcript sentence boundaries.
//!
//! Snapping never fails. Degenerate input (no fragments) and snaps that would
//! produce a clip under [`SnapConfig::min_clip_duration`] return the
//! suggestion untouched.

use crate::config::SnapConfig;
use crate::time::round_centiseconds;
use crate::transcript::{ClipSuggestion, Sentence, TranscriptFragment, build_sentences};
use tracing::debug;

/// Snaps one suggestion with the default constants.
///
/// # Example
/// ```
/// use engine::snap::snap_clip_to_sentences;
/// use engine::transcript::{ClipSuggestion, TranscriptFragment};
///
/// let fragments = vec![
///     TranscriptFragment::new(0.0, 2.0, "Hello."),
///     TranscriptFragment::new(2.0, 5.0, "World today."),
///     TranscriptFragment::new(5.0, 9.0, "Great stuff here."),
/// ];
/// // The snapped clip would be 5.3s long, under the 30s floor.
/// let snapped = snap_clip_to_sentences(&ClipSuggestion::spanning(1.8, 4.9), &fragments);
/// assert_eq!((snapped.start, snapped.end), (1.8, 4.9));
/// ```
pub fn snap_clip_to_sentences(
    suggestion: &ClipSuggestion,
    fragments: &[TranscriptFragment],
) -> ClipSuggestion {
    snap_clip_with(suggestion, fragments, &SnapConfig::default())
}

/// Snaps one suggestion with explicit constants.
pub fn snap_clip_with(
    suggestion: &ClipSuggestion,
    fragments: &[TranscriptFragment],
    config: &SnapConfig,
) -> ClipSuggestion {
    let sentences = build_sentences(fragments);
    if fragments.is_empty() || sentences.is_empty() {
        return suggestion.clone();
    }

    let snapped_start = snap_start(suggestion.start, &sentences, fragments, config.max_drift);
    let snapped_end = snap_end(suggestion.end, &sentences, fragments, config.max_drift);

    let start = (snapped_start - config.pad_start).max(0.0);
    let end = snapped_end + config.pad_end;

    if end - start < config.min_clip_duration {
        debug!(
            suggested_start = suggestion.start,
            suggested_end = suggestion.end,
            snapped_start = start,
            snapped_end = end,
            min_clip_duration = config.min_clip_duration,
            "snap discarded: clip under minimum duration"
        );
        return suggestion.clone();
    }

    ClipSuggestion {
        start: round_centiseconds(start),
        end: round_centiseconds(end),
        ..suggestion.clone()
    }
}

/// Snaps every suggestion independently; clips never influence each other.
pub fn snap_all_clips_to_sentences(
    suggestions: &[ClipSuggestion],
    fragments: &[TranscriptFragment],
) -> Vec<ClipSuggestion> {
    snap_all_clips_with(suggestions, fragments, &SnapConfig::default())
}

pub fn snap_all_clips_with(
    suggestions: &[ClipSuggestion],
    fragments: &[TranscriptFragment],
    config: &SnapConfig,
) -> Vec<ClipSuggestion> {
    suggestions
        .iter()
        .map(|suggestion| snap_clip_with(suggestion, fragments, config))
        .collect()
}

/// Picks the sentence start a clip beginning at `suggested` should use.
///
/// On a boundary shared by two sentences, the one starting there wins.
pub fn snap_start(
    suggested: f64,
    sentences: &[Sentence],
    fragments: &[TranscriptFragment],
    max_drift: f64,
) -> f64 {
    let Some(index) = sentences
        .iter()
        .rposition(|sentence| sentence.contains(suggested))
    else {
        return nearest(fragments.iter().map(|fragment| fragment.start), suggested)
            .unwrap_or(suggested);
    };

    let containing = sentences[index];
    if suggested - containing.start <= max_drift {
        return containing.start;
    }
    match sentences.get(index + 1) {
        Some(next) if (next.start - suggested).abs() <= max_drift => next.start,
        _ => containing.start,
    }
}

/// Picks the sentence end a clip finishing at `suggested` should use.
///
/// Sentences are scanned front to back rather than from the end, so on a
/// boundary shared by two sentences the one ending there wins and the
/// following sentence is not pulled in. A suggestion already sitting on a
/// sentence end therefore keeps it.
pub fn snap_end(
    suggested: f64,
    sentences: &[Sentence],
    fragments: &[TranscriptFragment],
    max_drift: f64,
) -> f64 {
    if let Some(index) = sentences
        .iter()
        .position(|sentence| sentence.contains(suggested))
    {
        let containing = sentences[index];
        if containing.end - suggested <= max_drift {
            return containing.end;
        }
        return match index.checked_sub(1).map(|previous| sentences[previous]) {
            Some(previous) if (suggested - previous.end).abs() <= max_drift => previous.end,
            _ => containing.end,
        };
    }

    let past_last = sentences.last().is_some_and(|last| suggested > last.end);
    if past_last {
        if let Some(sentence) = sentences
            .iter()
            .rev()
            .find(|sentence| sentence.end <= suggested + max_drift)
        {
            return sentence.end;
        }
    }

    nearest(fragments.iter().map(|fragment| fragment.end), suggested).unwrap_or(suggested)
}

fn nearest(candidates: impl Iterator<Item = f64>, target: f64) -> Option<f64> {
    candidates.fold(None, |best: Option<f64>, candidate| match best {
        Some(current) if (current - target).abs() <= (candidate - target).abs() => Some(current),
        _ => Some(candidate),
    })
}
