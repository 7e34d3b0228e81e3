//! # Edit Pipeline
//!
//! Runs AI-suggested editing actions over a frame sequence and produces the
//! final frames together with an audit log of the edits that were committed.
//!
//! ```rust,no_run
//! use viral_clip_editor::{
//!     pipeline::process_video_with_edits,
//!     schema::ClipSuggestion,
//!     video::{Frame, PassthroughEditor},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let clip = ClipSuggestion::from_json(&std::fs::read_to_string("clip.json")?)?;
//! let frames: Vec<Frame> = Vec::new();
//! let editor = PassthroughEditor::new();
//!
//! let processed = process_video_with_edits(frames, clip.editing_actions(), 10.0, &editor).await;
//! for entry in processed.applied_edits() {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

pub mod output;
pub mod runner;

pub use output::{ProcessedVideo, VideoMetadata};
pub use runner::{process_video_with_edits, EditPipeline, PipelineState};
