use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Snap AI clip suggestions to sentences and edit vertical clip cuts.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON config file overriding snapping and editor defaults
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the sentence ranges found in a transcript
    Sentences(TranscriptArgs),
    /// Snap every suggestion in a file onto sentence boundaries
    Snap(SnapArgs),
    /// Create an editing session from one suggestion
    Seed(SeedArgs),
    /// Replay a JSON list of editing actions onto a session
    Edit(EditArgs),
    /// Emit the render request (or SRT subtitles) for a session
    RenderPlan(RenderPlanArgs),
    /// Manage subtitle style presets
    Presets {
        /// Preset store file
        #[arg(long, default_value = "subtitle-presets.json", value_hint = ValueHint::FilePath)]
        store: PathBuf,

        #[command(subcommand)]
        command: PresetCommand,
    },
}

#[derive(Args, Debug)]
pub struct TranscriptArgs {
    /// Transcript fragments as a JSON array of {start, end, text}
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub transcript: PathBuf,
}

#[derive(Args, Debug)]
pub struct SnapArgs {
    #[command(flatten)]
    pub transcript: TranscriptArgs,

    /// Clip suggestions as a JSON array
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub suggestions: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    #[command(flatten)]
    pub transcript: TranscriptArgs,

    /// Clip suggestions as a JSON array
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub suggestions: PathBuf,

    /// Which suggestion to seed from
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Source video path recorded in the session
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub source: PathBuf,

    /// Source frame width in pixels
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Source frame height in pixels
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    /// Session file to create
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Session file, updated in place
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub session: PathBuf,

    /// Actions as a JSON array, e.g. [{"type": "SPLIT_AT_PLAYHEAD"}]
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub actions: PathBuf,
}

#[derive(Args, Debug)]
pub struct RenderPlanArgs {
    /// Session file
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub session: PathBuf,

    #[command(flatten)]
    pub transcript: TranscriptArgs,

    /// Subtitle preset to attach to the request
    #[arg(long)]
    pub preset: Option<String>,

    /// Preset store file
    #[arg(long, default_value = "subtitle-presets.json", value_hint = ValueHint::FilePath)]
    pub presets: PathBuf,

    /// Emit SubRip subtitles instead of the JSON request
    #[arg(long)]
    pub srt: bool,

    /// Write the result here instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List saved preset names
    List,
    /// Save a preset from a JSON style file
    Save {
        name: String,
        #[arg(long, value_hint = ValueHint::FilePath)]
        style: PathBuf,
    },
    /// Delete a preset
    Delete { name: String },
}
