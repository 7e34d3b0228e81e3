use serde::{Deserialize, Serialize};

use crate::{schema::EditingAction, video::Frame};

/// Result of an edit pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedVideo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Frame>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    pub metadata: VideoMetadata,

    /// Actions handed to the export stage (audio, crop/zoom, transitions)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub export_actions: Vec<EditingAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    pub duration: f64,
    pub start_time: f64,
    pub end_time: f64,

    /// One entry per committed edit, in application order
    pub applied_edits: Vec<String>,
}

impl ProcessedVideo {
    pub fn frame_count(&self) -> usize {
        self.frames.as_ref().map_or(0, Vec::len)
    }

    pub fn applied_edits(&self) -> &[String] {
        &self.metadata.applied_edits
    }
}
