use std::path::Path;

use anyhow::{Context, Result, bail};
use engine::presets::{SubtitlePresets, SubtitleStyle};
use engine::snap::snap_all_clips_with;
use engine::subtitles::to_srt;
use engine::transcript::build_sentences;
use engine::{
    Action, ClipSession, ClipSuggestion, EngineConfig, SequentialIds, SourceMedia,
    TranscriptFragment,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::cli::{
    Cli, Command, EditArgs, PresetCommand, RenderPlanArgs, SeedArgs, SnapArgs, TranscriptArgs,
};
use crate::store::JsonFileStore;

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Sentences(args) => sentences(&args),
        Command::Snap(args) => snap(&args, &config),
        Command::Seed(args) => seed(&args, &config),
        Command::Edit(args) => edit(&args),
        Command::RenderPlan(args) => render_plan(&args),
        Command::Presets { store, command } => presets(&store, command),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => read_json(path, "config"),
        None => Ok(EngineConfig::default()),
    }
}

fn sentences(args: &TranscriptArgs) -> Result<()> {
    let fragments = read_transcript(args)?;
    let sentences = build_sentences(&fragments);
    info!(
        fragment_count = fragments.len(),
        sentence_count = sentences.len(),
        "sentences built"
    );
    write_json(None, &sentences)
}

fn snap(args: &SnapArgs, config: &EngineConfig) -> Result<()> {
    let fragments = read_transcript(&args.transcript)?;
    let suggestions: Vec<ClipSuggestion> = read_json(&args.suggestions, "suggestions")?;

    let snapped = snap_all_clips_with(&suggestions, &fragments, &config.snap);
    let unchanged = snapped
        .iter()
        .zip(&suggestions)
        .filter(|(after, before)| after == before)
        .count();
    info!(
        suggestion_count = suggestions.len(),
        unchanged, "suggestions snapped"
    );
    write_json(args.out.as_deref(), &snapped)
}

fn seed(args: &SeedArgs, config: &EngineConfig) -> Result<()> {
    let fragments = read_transcript(&args.transcript)?;
    let suggestions: Vec<ClipSuggestion> = read_json(&args.suggestions, "suggestions")?;
    let Some(suggestion) = suggestions.get(args.index) else {
        bail!(
            "suggestion index {} out of range ({} suggestions)",
            args.index,
            suggestions.len()
        );
    };

    let mut source = SourceMedia::new(&args.source);
    if let (Some(width), Some(height)) = (args.width, args.height) {
        source = source.with_dimensions(width, height);
    }

    let session = ClipSession::from_raw_suggestion(
        source,
        suggestion,
        &fragments,
        config,
        &mut SequentialIds::new(),
    );
    session
        .save(&args.out)
        .with_context(|| format!("failed to create session {}", args.out.display()))?;
    println!(
        "seeded {} ({:.2}s..{:.2}s)",
        args.out.display(),
        session.suggestion.start,
        session.suggestion.end
    );
    Ok(())
}

fn edit(args: &EditArgs) -> Result<()> {
    let mut session = ClipSession::load(&args.session)
        .with_context(|| format!("failed to open session {}", args.session.display()))?;
    let actions: Vec<Action> = read_json(&args.actions, "actions")?;
    let action_count = actions.len();

    let events = session.apply_actions(actions);
    session.save(&args.session)?;

    println!(
        "applied {action_count} actions ({} changes): {} segments, {}",
        events.len(),
        session.state.segments.len(),
        engine::time::format_clock(session.state.total_duration())
    );
    Ok(())
}

fn render_plan(args: &RenderPlanArgs) -> Result<()> {
    let session = ClipSession::load(&args.session)
        .with_context(|| format!("failed to open session {}", args.session.display()))?;
    let fragments = read_transcript(&args.transcript)?;
    let style = match &args.preset {
        Some(name) => Some(find_preset(&args.presets, name)?),
        None => None,
    };

    let request = session.render_request(&fragments, style)?;
    if args.srt {
        write_text(args.out.as_deref(), &to_srt(&request.subtitles))
    } else {
        write_json(args.out.as_deref(), &request)
    }
}

fn find_preset(store: &Path, name: &str) -> Result<SubtitleStyle> {
    let presets = SubtitlePresets::new(JsonFileStore::open(store)?);
    presets
        .get(name)
        .with_context(|| format!("subtitle preset {name:?} not found in {}", store.display()))
}

fn presets(store: &Path, command: PresetCommand) -> Result<()> {
    let mut presets = SubtitlePresets::new(JsonFileStore::open(store)?);

    match command {
        PresetCommand::List => {
            for (name, style) in presets.list() {
                println!("{name}\t{} {}px", style.font_family, style.font_size);
            }
            return Ok(());
        }
        PresetCommand::Save { name, style } => {
            let style: SubtitleStyle = read_json(&style, "subtitle style")?;
            presets.save(&name, style)?;
        }
        PresetCommand::Delete { name } => {
            if !presets.delete(&name)? {
                bail!("subtitle preset {name:?} not found");
            }
        }
    }

    presets.into_store().flush()
}

fn read_transcript(args: &TranscriptArgs) -> Result<Vec<TranscriptFragment>> {
    read_json(&args.transcript, "transcript")
}

fn read_json<T>(path: &Path, what: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {what} file {}", path.display()))
}

fn write_json<T>(out: Option<&Path>, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    write_text(out, &(json + "\n"))
}

fn write_text(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
