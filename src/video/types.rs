use serde::{Deserialize, Serialize};

/// A single sampled video frame
///
/// `data` is an opaque encoded image (base64 text as produced by the frame
/// loader or the external editor); nothing in this crate inspects it.
/// `id` is the frame's position in its sequence and is reassigned after any
/// operation that changes the sequence length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub id: usize,
    pub data: String,
    pub mime_type: String,
}

impl Frame {
    pub fn new<D: Into<String>, M: Into<String>>(id: usize, data: D, mime_type: M) -> Self {
        Self {
            id,
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Copy of this frame carrying new image data
    pub fn with_data(&self, data: String) -> Self {
        Self {
            id: self.id,
            data,
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Assign dense ids `0..n-1` in sequence order
pub fn reindex(frames: Vec<Frame>) -> Vec<Frame> {
    frames
        .into_iter()
        .enumerate()
        .map(|(index, mut frame)| {
            frame.id = index;
            frame
        })
        .collect()
}

/// Length of a frame sequence in seconds
pub fn sequence_duration(len: usize, fps: f64) -> f64 {
    len as f64 / fps
}

/// Frame index at `time` seconds (floored; may be negative or past the end)
pub fn frame_at(time: f64, fps: f64) -> i64 {
    (time * fps).floor() as i64
}

/// Neighbouring frames of `index`, used as continuity context for edits
pub fn neighbours(frames: &[Frame], index: usize) -> (Option<&Frame>, Option<&Frame>) {
    let prev = index.checked_sub(1).and_then(|i| frames.get(i));
    let next = frames.get(index + 1);
    (prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<Frame> {
        (0..n).map(|i| Frame::new(i * 7, format!("f{}", i), "image/png")).collect()
    }

    #[test]
    fn test_reindex_is_dense() {
        let reindexed = reindex(frames(4));
        let ids: Vec<usize> = reindexed.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(reindexed[2].data, "f2");
    }

    #[test]
    fn test_frame_at_floors() {
        assert_eq!(frame_at(2.0, 10.0), 20);
        assert_eq!(frame_at(0.15, 10.0), 1);
        assert_eq!(frame_at(-0.05, 10.0), -1);
    }

    #[test]
    fn test_neighbours_at_edges() {
        let seq = frames(3);

        let (prev, next) = neighbours(&seq, 0);
        assert!(prev.is_none());
        assert_eq!(next.map(|f| f.data.as_str()), Some("f1"));

        let (prev, next) = neighbours(&seq, 2);
        assert_eq!(prev.map(|f| f.data.as_str()), Some("f1"));
        assert!(next.is_none());
    }

    #[test]
    fn test_with_data_keeps_identity() {
        let frame = Frame::new(5, "old", "image/jpeg");
        let edited = frame.with_data("new".to_string());

        assert_eq!(edited.id, 5);
        assert_eq!(edited.mime_type, "image/jpeg");
        assert_eq!(edited.data, "new");
        assert_eq!(frame.data, "old");
    }

    #[test]
    fn test_frame_serializes_camel_case() {
        let value = serde_json::to_value(Frame::new(0, "abc", "image/png")).unwrap();
        assert_eq!(value["mimeType"], "image/png");
    }
}
