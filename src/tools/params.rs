use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely-typed parameters attached to an editing action
///
/// AI output is only validated loosely: a missing or mistyped field reads as
/// `None` and callers fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionParams(Map<String, Value>);

impl ActionParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter value
    pub fn set<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a parameter as a finite number
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
    }

    /// Get a number, treating zero as absent.
    ///
    /// Several action fields use "unset or zero means default" semantics
    /// (an overlay duration of 0, an end time of 0).
    pub fn get_nonzero_f64(&self, key: &str) -> Option<f64> {
        self.get_f64(key).filter(|value| *value != 0.0)
    }

    /// Get a parameter value with a default
    pub fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    /// Get a parameter as a non-empty string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Get an `{x, y}` position parameter
    pub fn get_position(&self, key: &str) -> Option<Position> {
        let object = self.0.get(key)?.as_object()?;
        Some(Position {
            x: object.get("x").and_then(Value::as_f64)?,
            y: object.get("y").and_then(Value::as_f64)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Screen position in percent from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> ActionParams {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_numeric_getters() {
        let p = params(json!({ "startTime": 1.5, "endTime": 0, "volume": "loud" }));

        assert_eq!(p.get_f64("startTime"), Some(1.5));
        assert_eq!(p.get_f64("endTime"), Some(0.0));
        assert_eq!(p.get_nonzero_f64("endTime"), None);
        assert_eq!(p.get_f64("volume"), None);
        assert_eq!(p.get_f64_or("missing", 2.0), 2.0);
    }

    #[test]
    fn test_string_getter() {
        let p = params(json!({ "text": "Wow", "empty": "", "count": 3 }));

        assert_eq!(p.get_str("text"), Some("Wow"));
        assert_eq!(p.get_str("empty"), None);
        assert_eq!(p.get_str("count"), None);
    }

    #[test]
    fn test_position() {
        let p = params(json!({ "position": { "x": 10, "y": 80.5 }, "bad": { "x": 1 } }));

        assert_eq!(p.get_position("position"), Some(Position { x: 10.0, y: 80.5 }));
        assert_eq!(p.get_position("bad"), None);
        assert_eq!(p.get_position("missing"), None);
    }

    #[test]
    fn test_builder() {
        let p = ActionParams::new().set("effect", "glitch").set("intensity", 0.5);
        assert_eq!(p.get_str("effect"), Some("glitch"));
        assert_eq!(p.get_f64("intensity"), Some(0.5));
        assert_eq!(serde_json::to_value(&p).unwrap(), json!({ "effect": "glitch", "intensity": 0.5 }));
    }
}
