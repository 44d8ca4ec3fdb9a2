use serde::{Deserialize, Serialize};

/// One timestamped piece of transcript text, in source seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptFragment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Whether the trimmed text closes a sentence.
    pub fn ends_sentence(&self) -> bool {
        self.text.trim_end().ends_with(is_terminal_punctuation)
    }
}

/// AI-proposed clip candidate. Only `start` and `end` are ever adjusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipSuggestion {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub score: f64,
}

impl ClipSuggestion {
    /// Creates an untitled suggestion covering `start..end`.
    pub fn spanning(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            title: String::new(),
            description: String::new(),
            hashtags: Vec::new(),
            score: 0.0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A transcript range believed to hold one complete spoken sentence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub start: f64,
    pub end: f64,
}

impl Sentence {
    pub(crate) fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }
}

fn is_terminal_punctuation(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '»' | '"')
}

/// Groups fragments into sentences.
///
/// A sentence closes on a fragment whose trimmed text ends in terminal
/// punctuation. The trailing group is closed even without punctuation.
///
/// # Example
/// ```
/// use engine::transcript::{TranscriptFragment, build_sentences};
///
/// let fragments = vec![
///     TranscriptFragment::new(0.0, 1.5, "So here is"),
///     TranscriptFragment::new(1.5, 3.0, "the idea."),
///     TranscriptFragment::new(3.0, 4.0, "Next"),
/// ];
/// let sentences = build_sentences(&fragments);
/// assert_eq!(sentences.len(), 2);
/// assert_eq!((sentences[0].start, sentences[0].end), (0.0, 3.0));
/// assert_eq!((sentences[1].start, sentences[1].end), (3.0, 4.0));
/// ```
pub fn build_sentences(fragments: &[TranscriptFragment]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut open: Option<Sentence> = None;

    for (index, fragment) in fragments.iter().enumerate() {
        let sentence = open.get_or_insert(Sentence {
            start: fragment.start,
            end: fragment.end,
        });
        sentence.end = fragment.end;

        if fragment.ends_sentence() || index + 1 == fragments.len() {
            sentences.extend(open.take());
        }
    }

    sentences
}
