use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use viral_clip_editor::{
    error::FrameEditError,
    process_video_with_edits,
    tools::{ActionParams, Position},
    video::{apply_speed_change, apply_text_overlay, apply_trim, PassthroughEditor},
    EditingAction, Frame, FrameEditor, Result,
};

fn frames(n: usize) -> Vec<Frame> {
    (0..n).map(|i| Frame::new(i, format!("frame-{}", i), "image/jpeg")).collect()
}

fn assert_dense_ids(frames: &[Frame]) {
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.id, i, "frame ids must be dense and zero-based");
    }
}

/// Fails every call and counts how often it was asked
#[derive(Default)]
struct BrokenEditor {
    calls: AtomicUsize,
}

#[async_trait]
impl FrameEditor for BrokenEditor {
    async fn edit_frame(&self, frame: &Frame, _: &str, _: Option<&Frame>, _: Option<&Frame>) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FrameEditError::Failed {
            index: frame.id,
            reason: "service unavailable".to_string(),
        }
        .into())
    }
}

#[tokio::test]
async fn trim_to_two_seconds_keeps_21_frames() {
    let editor = PassthroughEditor::new();
    let actions = vec![EditingAction::new(
        "trim",
        ActionParams::new().set("startTime", 0).set("endTime", 2),
    )];

    let processed = process_video_with_edits(frames(100), &actions, 10.0, &editor).await;

    let out = processed.frames.as_deref().unwrap_or_default();
    assert_eq!(out.len(), 21);
    assert_dense_ids(out);
    assert_eq!(out[20].data, "frame-20");
    assert_eq!(processed.applied_edits(), ["Trimmed to 0.0-2.0s"]);
    assert_eq!(processed.metadata.duration, 2.1);
}

#[tokio::test]
async fn failing_action_does_not_stop_later_actions() {
    let editor = BrokenEditor::default();
    let actions = vec![
        EditingAction::new("effects", ActionParams::new().set("effect", "glitch")),
        EditingAction::new("trim", ActionParams::new().set("startTime", 1).set("endTime", 3)),
        EditingAction::new("audio", ActionParams::new().set("audioType", "upbeat")),
    ];

    let processed = process_video_with_edits(frames(50), &actions, 10.0, &editor).await;

    assert_eq!(editor.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        processed.applied_edits(),
        ["Trimmed to 1.0-3.0s", "Noted for video export: audio"]
    );
    assert_eq!(processed.frame_count(), 21);
    assert_eq!(processed.export_actions.len(), 1);
}

#[tokio::test]
async fn every_action_failing_still_returns_a_result() {
    let editor = BrokenEditor::default();
    let actions = vec![
        EditingAction::new("effects", ActionParams::new().set("effect", "glitch")),
        EditingAction::new("colorGrading", ActionParams::new().set("preset", "warm")),
        EditingAction::new("speed", ActionParams::new().set("speedMultiplier", -3)),
    ];

    let processed = process_video_with_edits(frames(30), &actions, 10.0, &editor).await;

    assert!(processed.applied_edits().is_empty());
    assert_eq!(processed.frames, Some(frames(30)));
}

#[tokio::test]
async fn unknown_tool_is_ignored_without_halting() {
    let editor = PassthroughEditor::new();
    let actions = vec![
        EditingAction::new("sparkles", ActionParams::new().set("amount", 11)),
        EditingAction::new("speed", ActionParams::new().set("startTime", 0).set("endTime", 5).set("speedMultiplier", 2)),
    ];

    let processed = process_video_with_edits(frames(100), &actions, 10.0, &editor).await;

    // frames 0..=50 decimated by stride 2 keeps 26, frames 51..100 pass through
    assert_eq!(processed.frame_count(), 26 + 49);
    assert_eq!(processed.applied_edits(), ["Speed 2x at 0.0-5.0s"]);
    assert!(editor.requests().await.is_empty());
}

#[tokio::test]
async fn later_actions_see_the_trimmed_sequence() {
    let editor = PassthroughEditor::new();
    let actions = vec![
        EditingAction::new("trim", ActionParams::new().set("startTime", 2).set("endTime", 4)),
        EditingAction::new("textOverlay", ActionParams::new().set("text", "Wait for it").set("startTime", 30)),
    ];

    let processed = process_video_with_edits(frames(100), &actions, 10.0, &editor).await;

    // overlay start is clamped into the 2.1s trimmed clip
    let requests = editor.requests().await;
    assert!(!requests.is_empty());
    assert!(requests.iter().all(|r| r.frame_id < 21));
    assert_eq!(processed.applied_edits().len(), 2);
    assert_eq!(processed.applied_edits()[1], "Added text: \"Wait for it\"");
}

#[test]
fn trim_length_follows_frame_bounds() {
    let input = frames(100);

    let trimmed = apply_trim(&input, Some(1.5), Some(4.0), 10.0);
    assert_eq!(trimmed.len(), 40 - 15 + 1);
    assert_eq!(trimmed[0].data, "frame-15");
    assert_dense_ids(&trimmed);

    // end past the clip clamps to the last frame
    let tail = apply_trim(&input, Some(9.0), Some(60.0), 10.0);
    assert_eq!(tail.len(), 10);
}

#[test]
fn trim_with_inverted_range_is_a_no_op() {
    let input = frames(40);

    assert_eq!(apply_trim(&input, Some(3.0), Some(1.0), 10.0), input);
    assert_eq!(apply_trim(&input, Some(2.0), Some(2.0), 10.0), input);
}

#[test]
fn speed_change_counts() {
    let input = frames(20);

    let identity = apply_speed_change(&input, 0.0, 2.0, 1.0, 10.0).unwrap();
    assert_eq!(identity, input);

    // frames 0..=10 repeated twice, frames 11..20 pass through
    let slowed = apply_speed_change(&input, 0.0, 1.0, 0.5, 10.0).unwrap();
    assert_eq!(slowed.len(), 11 * 2 + 9);
    assert_eq!(slowed[0].data, slowed[1].data);
    assert_dense_ids(&slowed);

    // frames 0..=10 by stride 3 keeps 0, 3, 6, 9
    let sped = apply_speed_change(&input, 0.0, 1.0, 3.0, 10.0).unwrap();
    assert_eq!(sped.len(), 4 + 9);
    assert_dense_ids(&sped);

    assert!(apply_speed_change(&input, 0.0, 1.0, 0.0, 10.0).is_err());
}

#[tokio::test]
async fn text_overlay_edits_at_most_three_in_bounds_frames() {
    let editor = PassthroughEditor::new();
    let input = frames(200);

    apply_text_overlay(&input, "Huge", Position::default(), 0.0, 15.0, 10.0, &editor).await;
    assert_eq!(editor.requests().await.len(), 3);

    let editor = PassthroughEditor::new();
    let short = frames(25);
    let out = apply_text_overlay(&short, "Ending", Position::default(), 2.0, 5.0, 10.0, &editor).await;

    let ids: Vec<usize> = editor.requests().await.iter().map(|r| r.frame_id).collect();
    assert_eq!(ids, vec![20, 24]);
    assert_eq!(out.len(), 25);
}

#[tokio::test]
async fn text_overlay_failures_leave_frames_untouched() {
    let editor = BrokenEditor::default();
    let input = frames(30);

    let out = apply_text_overlay(&input, "Nope", Position::default(), 0.0, 2.0, 10.0, &editor).await;

    assert_eq!(out, input);
    assert_eq!(editor.calls.load(Ordering::SeqCst), 3);
}
