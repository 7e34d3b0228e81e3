//! # AI Schema Definitions
//!
//! Response shapes requested from the generative model, and the Rust types its
//! JSON is parsed into. The edit pipeline only consumes
//! [`ClipSuggestion::editing_actions`].

pub mod definitions;
pub mod types;

pub use definitions::{clip_suggestion_schema, suggestion_schema};
pub use types::{parse_actions, AiSuggestion, ClipSuggestion, EditingAction, ViralPotential};
