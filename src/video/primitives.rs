//! Frame-level edit primitives
//!
//! Every primitive takes the current sequence by reference and builds a new
//! one; input frames are never modified. Times are seconds relative to the
//! sequence passed in, converted to indices with the run's `fps`.

use tracing::{debug, warn};

use crate::{
    error::{Result, ToolError},
    tools::Position,
    video::{
        editor::FrameEditor,
        types::{frame_at, neighbours, reindex, sequence_duration, Frame},
    },
};

/// Slowest supported speed multiplier; each frame is repeated at most 100 times
pub const MIN_SPEED_MULTIPLIER: f64 = 0.01;

/// Resolved bounds of a trim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    pub start_time: f64,
    pub end_time: f64,
    pub start_frame: i64,
    pub end_frame: i64,
}

impl TrimRange {
    /// Clamp requested trim times against a sequence of `len` frames.
    ///
    /// A missing or NaN start becomes 0. A missing, zero, NaN or
    /// out-of-range end becomes the sequence duration. Returns `None` when the
    /// clamped time range is empty. The frame range may still select nothing
    /// (e.g. both times negative).
    pub fn resolve(len: usize, start_time: Option<f64>, end_time: Option<f64>, fps: f64) -> Option<Self> {
        let max_time = sequence_duration(len, fps);

        let start_time = match start_time {
            Some(t) if !t.is_nan() => t,
            _ => {
                warn!("Trim: missing startTime, using 0");
                0.0
            }
        };

        let end_time = match end_time {
            Some(t) if !t.is_nan() && t != 0.0 && t <= max_time => t,
            other => {
                warn!("Trim: invalid endTime ({:?}), using max duration ({})", other, max_time);
                max_time
            }
        };

        if start_time >= end_time {
            warn!("Trim: startTime ({}) >= endTime ({}), keeping original frames", start_time, end_time);
            return None;
        }

        let start_frame = frame_at(start_time, fps).max(0);
        let end_frame = frame_at(end_time, fps).min(len as i64 - 1);

        Some(Self {
            start_time,
            end_time,
            start_frame,
            end_frame,
        })
    }

    /// Keep the frames inside this range, reindexed from zero
    pub fn apply(&self, frames: &[Frame]) -> Vec<Frame> {
        debug!(
            "Trimming: {}s-{}s (frames {}-{} of {})",
            self.start_time, self.end_time, self.start_frame, self.end_frame, frames.len()
        );

        let kept = frames
            .iter()
            .enumerate()
            .filter(|(index, _)| (self.start_frame..=self.end_frame).contains(&(*index as i64)))
            .map(|(_, frame)| frame.clone())
            .collect();

        reindex(kept)
    }
}

/// Keep only the frames between `start_time` and `end_time` (inclusive)
///
/// Returns the input unchanged when the clamped range is empty.
pub fn apply_trim(frames: &[Frame], start_time: Option<f64>, end_time: Option<f64>, fps: f64) -> Vec<Frame> {
    match TrimRange::resolve(frames.len(), start_time, end_time, fps) {
        Some(range) => range.apply(frames),
        None => frames.to_vec(),
    }
}

/// Change playback speed of the frames between `start_time` and `end_time`
///
/// Speed-ups keep a frame only when its index is a multiple of
/// `floor(speed_multiplier)`; slow-downs repeat each frame
/// `floor(1 / speed_multiplier)` times. Frames outside the range pass
/// through. A multiplier of exactly 1 returns the input unchanged.
pub fn apply_speed_change(
    frames: &[Frame],
    start_time: f64,
    end_time: f64,
    speed_multiplier: f64,
    fps: f64,
) -> Result<Vec<Frame>> {
    if !speed_multiplier.is_finite() || speed_multiplier < MIN_SPEED_MULTIPLIER {
        return Err(ToolError::InvalidParameters {
            tool: "speed".to_string(),
            details: format!(
                "speedMultiplier must be a number >= {}, got {}",
                MIN_SPEED_MULTIPLIER, speed_multiplier
            ),
        }
        .into());
    }

    if speed_multiplier == 1.0 {
        return Ok(frames.to_vec());
    }

    let start_frame = frame_at(start_time, fps);
    let end_frame = frame_at(end_time, fps);
    let stride = speed_multiplier.floor() as usize;
    let repeats = (1.0 / speed_multiplier).floor() as usize;

    let mut result = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        let position = index as i64;
        if position < start_frame || position > end_frame {
            result.push(frame.clone());
        } else if speed_multiplier > 1.0 {
            if index % stride == 0 {
                result.push(frame.clone());
            }
        } else {
            for _ in 0..repeats {
                result.push(frame.clone());
            }
        }
    }

    debug!(
        "Speed {}x over frames {}-{}: {} -> {} frames",
        speed_multiplier, start_frame, end_frame, frames.len(), result.len()
    );

    Ok(reindex(result))
}

/// Key frames for a text overlay spanning `start_frame..=end_frame`: first,
/// middle and last, deduplicated and limited to `0..len`
pub fn overlay_key_frames(start_frame: i64, end_frame: i64, len: usize) -> Vec<usize> {
    let last = end_frame.min(len as i64 - 1);
    // extreme times saturate to the i64 bounds; widen before summing
    let middle = (i128::from(start_frame) + i128::from(end_frame)).div_euclid(2) as i64;
    let candidates = [start_frame, middle, last];
    dedup_in_bounds(&candidates, len)
}

/// Key frames at 0, 25, 50, 75 and 100 percent of a sequence of `len` frames
pub fn sampled_key_frames(len: usize) -> Vec<usize> {
    let len_i = len as i64;
    let candidates = [0, len_i / 4, len_i / 2, 3 * len_i / 4, len_i - 1];
    dedup_in_bounds(&candidates, len)
}

fn dedup_in_bounds(candidates: &[i64], len: usize) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        if candidate < 0 || candidate >= len as i64 {
            continue;
        }
        let index = candidate as usize;
        if !selected.contains(&index) {
            selected.push(index);
        }
    }
    selected
}

/// Instruction sent to the frame editor for a text overlay
pub fn overlay_prompt(text: &str, position: Position) -> String {
    format!(
        "Add text overlay \"{}\" at position {}%, {}% from top-left. Make it clearly visible with good contrast.",
        text, position.x, position.y
    )
}

/// Render `text` onto the overlay's key frames through `editor`
///
/// Only the first, middle and last frame of the range are edited; the other
/// frames in the range are left as they are. A failed key frame is logged
/// and skipped.
pub async fn apply_text_overlay(
    frames: &[Frame],
    text: &str,
    position: Position,
    start_time: f64,
    duration: f64,
    fps: f64,
    editor: &dyn FrameEditor,
) -> Vec<Frame> {
    let start_frame = frame_at(start_time, fps);
    let end_frame = frame_at(start_time + duration, fps);
    let key_frames = overlay_key_frames(start_frame, end_frame, frames.len());
    let span = end_frame.saturating_sub(start_frame).saturating_add(1);

    debug!(
        "Text overlay: editing {} key frames instead of {} frames",
        key_frames.len(),
        span
    );

    let prompt = overlay_prompt(text, position);
    let mut edited = frames.to_vec();

    for index in key_frames {
        let (prev, next) = neighbours(frames, index);
        debug!("Editing frame {} with text overlay", index);

        match editor.edit_frame(&frames[index], &prompt, prev, next).await {
            Ok(data) => edited[index] = frames[index].with_data(data),
            Err(e) => warn!("Error editing frame {}: {}", index, e),
        }
    }

    edited
}

/// Apply one instruction to the sampled key frames of the sequence
///
/// Unlike text overlays, a failed key frame fails the whole call. Returns
/// the new sequence and the number of key frames edited.
pub async fn apply_key_frame_prompt(
    frames: &[Frame],
    prompt: &str,
    editor: &dyn FrameEditor,
) -> Result<(Vec<Frame>, usize)> {
    let key_frames = sampled_key_frames(frames.len());
    let mut edited = frames.to_vec();

    for &index in &key_frames {
        let data = {
            let (prev, next) = neighbours(&edited, index);
            editor.edit_frame(&edited[index], prompt, prev, next).await?
        };
        edited[index] = edited[index].with_data(data);
    }

    Ok((edited, key_frames.len()))
}
