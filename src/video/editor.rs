use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    error::{FrameEditError, Result},
    video::types::Frame,
};

/// External image editor used for text overlays and key-frame touch-ups
///
/// Implementations are typically network-bound AI image edits. The returned
/// string is the new encoded image data for `frame`; `prev` and `next` are
/// the neighbouring frames of the current sequence, offered for visual
/// continuity.
#[async_trait]
pub trait FrameEditor: Send + Sync {
    async fn edit_frame(
        &self,
        frame: &Frame,
        prompt: &str,
        prev: Option<&Frame>,
        next: Option<&Frame>,
    ) -> Result<String>;
}

/// Bounds every call of an inner editor with a deadline
pub struct DeadlineEditor<'a> {
    inner: &'a dyn FrameEditor,
    deadline: Duration,
}

impl<'a> DeadlineEditor<'a> {
    pub fn new(inner: &'a dyn FrameEditor, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }
}

#[async_trait]
impl<'a> FrameEditor for DeadlineEditor<'a> {
    async fn edit_frame(
        &self,
        frame: &Frame,
        prompt: &str,
        prev: Option<&Frame>,
        next: Option<&Frame>,
    ) -> Result<String> {
        match tokio::time::timeout(self.deadline, self.inner.edit_frame(frame, prompt, prev, next)).await {
            Ok(result) => result,
            Err(_) => Err(FrameEditError::Timeout {
                index: frame.id,
                millis: self.deadline.as_millis() as u64,
            }
            .into()),
        }
    }
}

/// An edit request as seen by [`PassthroughEditor`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub frame_id: usize,
    pub prompt: String,
    pub prev_frame_id: Option<usize>,
    pub next_frame_id: Option<usize>,
}

/// Editor that leaves frame data untouched and records what it was asked to do
///
/// Used by the CLI to plan AI edits without calling a model, and by tests.
#[derive(Debug, Default)]
pub struct PassthroughEditor {
    requests: Mutex<Vec<EditRequest>>,
}

impl PassthroughEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the requests recorded so far
    pub async fn requests(&self) -> Vec<EditRequest> {
        self.requests.lock().await.clone()
    }

    pub fn into_requests(self) -> Vec<EditRequest> {
        self.requests.into_inner()
    }
}

#[async_trait]
impl FrameEditor for PassthroughEditor {
    async fn edit_frame(
        &self,
        frame: &Frame,
        prompt: &str,
        prev: Option<&Frame>,
        next: Option<&Frame>,
    ) -> Result<String> {
        debug!("Recording edit for frame {}: {}", frame.id, prompt);
        self.requests.lock().await.push(EditRequest {
            frame_id: frame.id,
            prompt: prompt.to_string(),
            prev_frame_id: prev.map(|f| f.id),
            next_frame_id: next.map(|f| f.id),
        });
        Ok(frame.data.clone())
    }
}
