//! # Video Frame Module
//!
//! Frame sequences, the edit primitives applied to them, the external frame
//! editor seam, and reading/writing frames on disk.

pub mod editor;
pub mod loader;
pub mod primitives;
pub mod types;

pub use editor::{DeadlineEditor, EditRequest, FrameEditor, PassthroughEditor};
pub use loader::FrameLoader;
pub use primitives::{
    apply_key_frame_prompt, apply_speed_change, apply_text_overlay, apply_trim, TrimRange,
};
pub use types::Frame;
