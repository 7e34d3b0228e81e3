//! # Viral-Clip-Editor
//!
//! Apply AI-suggested edits to short video clips represented as frame sequences.
//!
//! A generative model proposes a clip ([`schema::ClipSuggestion`]) together with
//! a list of editing actions. This library defines the JSON schemas used to
//! request that data, and runs the actions over the clip's frames: trims,
//! speed changes, text overlays and key-frame touch-ups rendered through an
//! external image editor.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use viral_clip_editor::{
//!     config::Config,
//!     pipeline::EditPipeline,
//!     schema::parse_actions,
//!     video::{FrameLoader, PassthroughEditor},
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let frames = FrameLoader::new(config.loader.clone()).load_dir("frames/")?;
//! let actions = parse_actions(&std::fs::read_to_string("actions.json")?)?;
//!
//! let editor = PassthroughEditor::new();
//! let pipeline = EditPipeline::new(config.pipeline.clone(), &editor);
//! let processed = pipeline.run(frames, &actions).await;
//!
//! println!("{:?}", processed.metadata.applied_edits);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`tools`] - The closed tool set and its registry
//! - [`schema`] - AI response schemas and suggestion types
//! - [`video`] - Frames, edit primitives and the frame editor seam
//! - [`pipeline`] - The action-by-action edit runner
//! - [`config`] - Configuration management
//!
//! ## Plugging in an AI Editor
//!
//! Text overlays and key-frame effects are rendered by implementing
//! [`FrameEditor`](video::FrameEditor):
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use viral_clip_editor::{video::{Frame, FrameEditor}, Result};
//!
//! struct MyImageModel;
//!
//! #[async_trait]
//! impl FrameEditor for MyImageModel {
//!     async fn edit_frame(
//!         &self,
//!         frame: &Frame,
//!         prompt: &str,
//!         prev: Option<&Frame>,
//!         next: Option<&Frame>,
//!     ) -> Result<String> {
//!         // Send the frame and prompt to your model, return the new image data
//!         Ok(frame.data.clone())
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod tools;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{EditorError, Result},
    pipeline::{process_video_with_edits, EditPipeline, ProcessedVideo},
    schema::{ClipSuggestion, EditingAction},
    tools::{ToolKind, ToolRegistry},
    video::{Frame, FrameEditor},
};
