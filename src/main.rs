use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::{info, Level};

use viral_clip_editor::{
    config::Config,
    error::EditorError,
    pipeline::EditPipeline,
    schema::{clip_suggestion_schema, parse_actions, suggestion_schema},
    tools::ToolRegistry,
    video::{FrameLoader, PassthroughEditor},
};

#[derive(Parser)]
#[command(
    name = "viral-clip-editor",
    version,
    about = "Apply AI-suggested edits to video clips stored as frame sequences",
    long_about = "Viral-Clip-Editor runs the editing actions proposed by a generative model (trims, speed ramps, text overlays, effects) over a directory of frames and writes the edited frames plus an edit report."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available editing tools
    Tools {
        /// Show a single tool and its parameters
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print a response schema for the AI model
    Schema {
        #[arg(short, long, value_enum, default_value = "clip")]
        kind: SchemaKind,
    },

    /// Apply editing actions to a frame directory
    Apply {
        /// Directory containing the clip's frames, in name order
        #[arg(short, long)]
        frames: PathBuf,

        /// JSON file with an action array or a full clip suggestion
        #[arg(short, long)]
        actions: PathBuf,

        /// Output directory for edited frames and report.json
        #[arg(short, long)]
        output: PathBuf,

        /// Frames per second of the sequence (overrides configuration)
        #[arg(long)]
        fps: Option<f64>,

        /// Configuration file (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    /// Viral clip suggestion with editing actions
    Clip,
    /// Per-frame suggestions
    Suggestions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Tools { name } => list_tools(name.as_deref()),
        Command::Schema { kind } => print_schema(kind),
        Command::Apply {
            frames,
            actions,
            output,
            fps,
            config,
        } => apply(frames, actions, output, fps, config).await,
    }
}

/// Surface library errors with their user-facing wording
fn friendly(err: EditorError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn list_tools(name: Option<&str>) -> Result<()> {
    let registry = ToolRegistry::new();

    match name {
        Some(name) => {
            let spec = registry.require(name).map_err(friendly)?;
            println!("{}: {}", spec.name, spec.description);
            println!("parameters: {}", spec.parameters.join(", "));
        }
        None => println!("{}", registry.tool_descriptions()),
    }
    Ok(())
}

fn print_schema(kind: SchemaKind) -> Result<()> {
    let schema = match kind {
        SchemaKind::Clip => clip_suggestion_schema(),
        SchemaKind::Suggestions => suggestion_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

async fn apply(
    frames_dir: PathBuf,
    actions_path: PathBuf,
    output: PathBuf,
    fps: Option<f64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    info!("Starting Viral-Clip-Editor v{}", env!("CARGO_PKG_VERSION"));
    info!("Frames: {:?}", frames_dir);
    info!("Actions: {:?}", actions_path);
    info!("Output: {:?}", output);

    // Load configuration
    let mut config = match config_path {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path).map_err(friendly)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };
    if let Some(fps) = fps {
        config.pipeline.fps = fps;
    }
    config.validate()?;

    let frames = FrameLoader::new(config.loader.clone())
        .load_dir(&frames_dir)
        .map_err(friendly)?;
    let text = std::fs::read_to_string(&actions_path)
        .with_context(|| format!("Failed to read actions from {:?}", actions_path))?;
    let actions = parse_actions(&text)?;
    info!("Loaded {} frames and {} actions", frames.len(), actions.len());

    let editor = PassthroughEditor::new();
    let processed = EditPipeline::new(config.pipeline.clone(), &editor)
        .run(frames, &actions)
        .await;

    std::fs::create_dir_all(&output)?;
    let written = match &processed.frames {
        Some(frames) => FrameLoader::write_frames(frames, &output)?,
        None => Vec::new(),
    };

    let report = json!({
        "generatedAt": chrono::Utc::now().to_rfc3339(),
        "fps": config.pipeline.fps,
        "frameCount": written.len(),
        "metadata": processed.metadata,
        "exportActions": processed.export_actions,
        "editRequests": editor.into_requests(),
    });
    let report_path = output.join("report.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;

    for entry in processed.applied_edits() {
        info!("  {}", entry);
    }
    info!("Wrote {} frames and report to {:?}", written.len(), output);
    Ok(())
}
