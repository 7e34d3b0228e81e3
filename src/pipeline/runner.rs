use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    config::PipelineConfig,
    error::{Result, ToolError},
    pipeline::output::{ProcessedVideo, VideoMetadata},
    schema::EditingAction,
    tools::{ActionParams, ToolKind, ToolRegistry},
    video::{
        editor::{DeadlineEditor, FrameEditor},
        primitives::{apply_key_frame_prompt, apply_speed_change, apply_text_overlay, TrimRange},
        types::{sequence_duration, Frame},
    },
};

/// Applies an ordered list of editing actions to a frame sequence
///
/// Actions run strictly in order, one at a time. Each action sees the
/// sequence produced by the previous one, and every editor call is awaited
/// (under the configured deadline) before the next is made. A failing action
/// is logged and leaves the sequence as it was before that action; the run
/// always completes.
pub struct EditPipeline<'a> {
    config: PipelineConfig,
    editor: DeadlineEditor<'a>,
    registry: ToolRegistry,
}

/// Accumulator threaded through the action fold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    pub frames: Vec<Frame>,
    pub applied_edits: Vec<String>,
    pub export_actions: Vec<EditingAction>,
}

impl PipelineState {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    fn finish(self, fps: f64) -> ProcessedVideo {
        let duration = sequence_duration(self.frames.len(), fps);

        ProcessedVideo {
            frames: Some(self.frames),
            video_url: None,
            metadata: VideoMetadata {
                duration,
                start_time: 0.0,
                end_time: duration,
                applied_edits: self.applied_edits,
            },
            export_actions: self.export_actions,
        }
    }
}

enum StepOutcome {
    /// New sequence plus its audit entry
    Committed { frames: Vec<Frame>, entry: String },
    /// Recorded for the export stage; frames untouched
    Deferred { entry: String },
    /// Nothing to do (empty range, no-op trim)
    Skipped,
}

impl<'a> EditPipeline<'a> {
    /// Create a pipeline whose frame edits go through `editor`
    ///
    /// An unusable `fps` (zero, negative, NaN) is replaced by the default.
    pub fn new(mut config: PipelineConfig, editor: &'a dyn FrameEditor) -> Self {
        if !config.fps.is_finite() || config.fps <= 0.0 {
            let fallback = PipelineConfig::default().fps;
            warn!("Invalid fps {}, using {}", config.fps, fallback);
            config.fps = fallback;
        }

        let deadline = Duration::from_secs(config.edit_timeout_secs.max(1));

        Self {
            config,
            editor: DeadlineEditor::new(editor, deadline),
            registry: ToolRegistry::new(),
        }
    }

    pub fn fps(&self) -> f64 {
        self.config.fps
    }

    /// Run every action over `frames` and collect the result
    pub async fn run(&self, frames: Vec<Frame>, actions: &[EditingAction]) -> ProcessedVideo {
        info!(
            "Processing video with {} frames ({}s) at {}fps, {} actions",
            frames.len(),
            sequence_duration(frames.len(), self.config.fps),
            self.config.fps,
            actions.len()
        );

        let mut state = PipelineState::new(frames);
        for action in actions {
            state = self.step(state, action).await;
        }

        let processed = state.finish(self.config.fps);
        info!(
            "Pipeline finished: {} frames ({:.1}s), {} edits applied",
            processed.frame_count(),
            processed.metadata.duration,
            processed.metadata.applied_edits.len()
        );
        processed
    }

    /// Apply a single action to the accumulated state
    pub async fn step(&self, mut state: PipelineState, action: &EditingAction) -> PipelineState {
        if state.frames.is_empty() {
            warn!("Skipping {} - no frames to process", action.tool);
            return state;
        }

        let Some(kind) = self.registry.resolve(&action.tool) else {
            debug!("Ignoring unknown tool '{}'", action.tool);
            return state;
        };

        debug!("Applying {}: {}", kind, action.description);

        match self.apply(kind, &action.params, &state.frames).await {
            Ok(StepOutcome::Committed { frames, entry }) => {
                state.frames = frames;
                state.applied_edits.push(entry);
            }
            Ok(StepOutcome::Deferred { entry }) => {
                state.applied_edits.push(entry);
                state.export_actions.push(action.clone());
            }
            Ok(StepOutcome::Skipped) => {}
            Err(e) => warn!("Error applying {}: {}", kind, e),
        }

        state
    }

    async fn apply(&self, kind: ToolKind, params: &ActionParams, frames: &[Frame]) -> Result<StepOutcome> {
        match kind {
            ToolKind::Trim => Ok(self.trim(frames, params)),
            ToolKind::TextOverlay => self.text_overlay(frames, params).await,
            ToolKind::Speed => self.speed(frames, params),
            ToolKind::Effects | ToolKind::ColorGrading => self.key_frame_edit(kind, frames, params).await,
            ToolKind::Audio | ToolKind::CropZoom | ToolKind::Transition => {
                info!("Note: {} will be applied during final video export", kind);
                Ok(StepOutcome::Deferred {
                    entry: format!("Noted for video export: {}", kind),
                })
            }
        }
    }

    fn trim(&self, frames: &[Frame], params: &ActionParams) -> StepOutcome {
        let range = TrimRange::resolve(
            frames.len(),
            params.get_f64("startTime"),
            params.get_f64("endTime"),
            self.config.fps,
        );
        let Some(range) = range else {
            return StepOutcome::Skipped;
        };

        let trimmed = range.apply(frames);
        if trimmed.is_empty() {
            warn!("Trim resulted in 0 frames, keeping original");
            return StepOutcome::Skipped;
        }

        StepOutcome::Committed {
            frames: trimmed,
            entry: format!("Trimmed to {:.1}-{:.1}s", range.start_time, range.end_time),
        }
    }

    async fn text_overlay(&self, frames: &[Frame], params: &ActionParams) -> Result<StepOutcome> {
        let text = params.get_str("text").ok_or_else(|| ToolError::InvalidParameters {
            tool: ToolKind::TextOverlay.to_string(),
            details: "missing text".to_string(),
        })?;

        // Times are relative to the current, possibly trimmed, sequence
        let total = sequence_duration(frames.len(), self.config.fps);
        let start_time = params
            .get_f64_or("startTime", 0.0)
            .min(total - self.config.tail_margin);
        let duration = params
            .get_nonzero_f64("duration")
            .unwrap_or(self.config.default_overlay_duration)
            .min(total - start_time);
        let position = params
            .get_position("position")
            .unwrap_or(self.config.default_overlay_position);

        let edited = apply_text_overlay(
            frames,
            text,
            position,
            start_time,
            duration,
            self.config.fps,
            &self.editor,
        )
        .await;

        Ok(StepOutcome::Committed {
            frames: edited,
            entry: format!("Added text: \"{}\"", text),
        })
    }

    fn speed(&self, frames: &[Frame], params: &ActionParams) -> Result<StepOutcome> {
        let total = sequence_duration(frames.len(), self.config.fps);
        let start_time = params
            .get_f64_or("startTime", 0.0)
            .min(total - self.config.tail_margin);
        let end_time = params.get_nonzero_f64("endTime").unwrap_or(total).min(total);

        if start_time >= end_time {
            debug!("Speed: empty range {}-{}s, skipping", start_time, end_time);
            return Ok(StepOutcome::Skipped);
        }

        let multiplier = params.get_f64_or("speedMultiplier", 1.0);
        let changed = apply_speed_change(frames, start_time, end_time, multiplier, self.config.fps)?;

        Ok(StepOutcome::Committed {
            frames: changed,
            entry: format!("Speed {}x at {:.1}-{:.1}s", multiplier, start_time, end_time),
        })
    }

    async fn key_frame_edit(&self, kind: ToolKind, frames: &[Frame], params: &ActionParams) -> Result<StepOutcome> {
        let prompt = Self::key_frame_prompt(kind, params)?;
        let (edited, count) = apply_key_frame_prompt(frames, &prompt, &self.editor).await?;

        debug!("{}: edited {} key frames instead of {} frames", kind, count, frames.len());

        Ok(StepOutcome::Committed {
            frames: edited,
            entry: format!("Applied {} to {} key frames: {}", kind, count, prompt),
        })
    }

    fn key_frame_prompt(kind: ToolKind, params: &ActionParams) -> Result<String> {
        let required = |key: &str| {
            params.get_str(key).ok_or_else(|| ToolError::InvalidParameters {
                tool: kind.to_string(),
                details: format!("missing {}", key),
            })
        };

        let prompt = match kind {
            ToolKind::Effects => format!("Apply {} effect", required("effect")?),
            _ => {
                let preset = required("preset")?;
                match params.get_f64("intensity") {
                    Some(intensity) => format!("Apply {} color grading with {} intensity", preset, intensity),
                    None => format!("Apply {} color grading", preset),
                }
            }
        };
        Ok(prompt)
    }
}

/// Run `actions` over `frames` at `fps` with default pipeline settings
pub async fn process_video_with_edits(
    frames: Vec<Frame>,
    actions: &[EditingAction],
    fps: f64,
    editor: &dyn FrameEditor,
) -> ProcessedVideo {
    let config = PipelineConfig {
        fps,
        ..PipelineConfig::default()
    };
    EditPipeline::new(config, editor).run(frames, actions).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::{error::FrameEditError, video::PassthroughEditor};

    fn frames(n: usize) -> Vec<Frame> {
        (0..n).map(|i| Frame::new(i, format!("f{}", i), "image/png")).collect()
    }

    fn action(tool: &str, params: ActionParams) -> EditingAction {
        EditingAction::new(tool, params)
    }

    /// Marks every edited frame's data and fails on chosen frame ids
    struct MarkingEditor {
        fail_on: Vec<usize>,
    }

    #[async_trait]
    impl FrameEditor for MarkingEditor {
        async fn edit_frame(&self, frame: &Frame, _: &str, _: Option<&Frame>, _: Option<&Frame>) -> Result<String> {
            if self.fail_on.contains(&frame.id) {
                return Err(FrameEditError::Failed {
                    index: frame.id,
                    reason: "model refused".to_string(),
                }
                .into());
            }
            Ok(format!("{}*", frame.data))
        }
    }

    #[tokio::test]
    async fn test_step_on_empty_state_is_skipped() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);

        let state = pipeline
            .step(PipelineState::new(vec![]), &action("audio", ActionParams::new()))
            .await;

        assert_eq!(state, PipelineState::default());
    }

    #[tokio::test]
    async fn test_unknown_tool_leaves_state_untouched() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);
        let before = PipelineState::new(frames(10));

        let after = pipeline.step(before.clone(), &action("sparkles", ActionParams::new())).await;

        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_deferred_tools_are_recorded_for_export() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);
        let transition = action("transition", ActionParams::new().set("type", "glitch"));

        let state = pipeline.step(PipelineState::new(frames(10)), &transition).await;

        assert_eq!(state.frames, frames(10));
        assert_eq!(state.applied_edits, vec!["Noted for video export: transition"]);
        assert_eq!(state.export_actions, vec![transition]);
    }

    #[tokio::test]
    async fn test_effects_failure_rolls_back_whole_action() {
        let editor = MarkingEditor { fail_on: vec![20] };
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);
        let before = PipelineState::new(frames(40));

        let after = pipeline
            .step(before.clone(), &action("effects", ActionParams::new().set("effect", "glitch")))
            .await;

        // frames 0 and 10 were edited before frame 20 failed; none of it is kept
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_text_overlay_tolerates_single_frame_failure() {
        let editor = MarkingEditor { fail_on: vec![10] };
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);

        let state = pipeline
            .step(
                PipelineState::new(frames(50)),
                &action("textOverlay", ActionParams::new().set("text", "Wow").set("startTime", 0)),
            )
            .await;

        // default 2s overlay covers frames 0..=20; key frames 0, 10, 20
        assert_eq!(state.frames[0].data, "f0*");
        assert_eq!(state.frames[10].data, "f10");
        assert_eq!(state.frames[20].data, "f20*");
        assert_eq!(state.frames[5].data, "f5");
        assert_eq!(state.applied_edits, vec!["Added text: \"Wow\""]);
    }

    #[tokio::test]
    async fn test_missing_required_params_fail_the_action() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);

        for tool in ["textOverlay", "effects", "colorGrading"] {
            let state = pipeline.step(PipelineState::new(frames(10)), &action(tool, ActionParams::new())).await;
            assert!(state.applied_edits.is_empty(), "{} should have failed", tool);
        }
        assert!(editor.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_trim_removing_every_frame_is_discarded() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);
        let before = PipelineState::new(frames(30));

        let after = pipeline
            .step(
                before.clone(),
                &action("trim", ActionParams::new().set("startTime", -2).set("endTime", -1)),
            )
            .await;

        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_speed_with_inverted_range_is_skipped() {
        let editor = PassthroughEditor::new();
        let pipeline = EditPipeline::new(PipelineConfig::default(), &editor);
        let before = PipelineState::new(frames(30));

        // start clamps to 2.9s, after the 1s end
        let after = pipeline
            .step(
                before.clone(),
                &action(
                    "speed",
                    ActionParams::new().set("startTime", 50).set("endTime", 1).set("speedMultiplier", 2),
                ),
            )
            .await;

        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_extreme_overlay_times_do_not_abort_the_run() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let editor = PassthroughEditor::new();
        let actions = vec![
            action(
                "textOverlay",
                ActionParams::new().set("text", "x").set("startTime", -1e300).set("duration", 1e308),
            ),
            action("audio", ActionParams::new()),
        ];

        let processed = process_video_with_edits(frames(30), &actions, 10.0, &editor).await;

        assert_eq!(processed.frame_count(), 30);
        assert_eq!(
            processed.applied_edits(),
            ["Added text: \"x\"", "Noted for video export: audio"]
        );
    }

    #[test]
    fn test_key_frame_prompts() {
        let effects = ActionParams::new().set("effect", "glitch");
        assert_eq!(
            EditPipeline::key_frame_prompt(ToolKind::Effects, &effects).unwrap(),
            "Apply glitch effect"
        );

        let grading = ActionParams::new().set("preset", "warm").set("intensity", 0.8);
        assert_eq!(
            EditPipeline::key_frame_prompt(ToolKind::ColorGrading, &grading).unwrap(),
            "Apply warm color grading with 0.8 intensity"
        );

        let preset_only = ActionParams::new().set("preset", "cinematic");
        assert_eq!(
            EditPipeline::key_frame_prompt(ToolKind::ColorGrading, &preset_only).unwrap(),
            "Apply cinematic color grading"
        );
    }

    #[tokio::test]
    async fn test_invalid_fps_falls_back_to_default() {
        let editor = PassthroughEditor::new();
        let config = PipelineConfig { fps: 0.0, ..PipelineConfig::default() };
        let pipeline = EditPipeline::new(config, &editor);

        assert_eq!(pipeline.fps(), 10.0);
    }
}
