//! # Editing Tools
//!
//! The closed set of tools an AI suggestion can name, and the registry used to
//! look them up and describe them in prompts.
//!
//! ## Built-in Tools
//!
//! - **trim**, **textOverlay**, **speed**: applied to frames by the edit pipeline
//! - **effects**, **colorGrading**: applied to key frames through the frame editor
//! - **audio**, **cropZoom**, **transition**: deferred to video export
//!
//! ## Usage
//!
//! ```rust
//! use viral_clip_editor::tools::{ToolKind, ToolRegistry};
//!
//! let registry = ToolRegistry::new();
//! assert_eq!(registry.resolve("textOverlay"), Some(ToolKind::TextOverlay));
//!
//! let prompt_block = registry.tool_descriptions();
//! assert!(prompt_block.starts_with("- trim: "));
//! ```

pub mod kind;
pub mod params;
pub mod registry;

pub use kind::{ToolKind, ToolSpec, TOOL_SPECS};
pub use params::{ActionParams, Position};
pub use registry::{ToolInvocation, ToolRegistry};
