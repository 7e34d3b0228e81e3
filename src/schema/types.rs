use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::{
    error::Result,
    tools::{ActionParams, ToolKind},
};

/// A per-moment editing idea returned by the suggestion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    /// Seconds from the start of the clip; fractional values allowed
    pub frame_index: f64,
    pub suggestion: String,
}

/// One declarative editing instruction
///
/// `tool` stays a plain string: unknown tool names are legal input and are
/// skipped by the pipeline rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingAction {
    pub tool: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: ActionParams,

    #[serde(default)]
    pub description: String,
}

impl EditingAction {
    pub fn new<S: Into<String>>(tool: S, params: ActionParams) -> Self {
        Self {
            tool: tool.into(),
            params,
            description: String::new(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// The tool this action names, if it is a known one
    pub fn kind(&self) -> Option<ToolKind> {
        ToolKind::from_name(&self.tool)
    }
}

// Models sometimes send `"params": null` for tools without parameters
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<ActionParams, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ActionParams>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViralPotential {
    Low,
    Medium,
    High,
}

impl fmt::Display for ViralPotential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViralPotential::Low => "low",
            ViralPotential::Medium => "medium",
            ViralPotential::High => "high",
        };
        f.write_str(label)
    }
}

/// A clip proposed by the AI, with the edits that should make it go viral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSuggestion {
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub reason: String,
    pub viral_potential: ViralPotential,
    pub editing_suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_actions: Option<Vec<EditingAction>>,
}

impl ClipSuggestion {
    /// Parse a clip suggestion from the AI's JSON response
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn editing_actions(&self) -> &[EditingAction] {
        self.editing_actions.as_deref().unwrap_or(&[])
    }
}

/// Accepted shapes for an action list: a bare array or a full clip suggestion
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ActionSource {
    Actions(Vec<EditingAction>),
    Clip(ClipSuggestion),
}

/// Parse an action list from JSON, accepting either an array of actions or a
/// clip suggestion whose `editingActions` are used
pub fn parse_actions(text: &str) -> Result<Vec<EditingAction>> {
    let actions = match serde_json::from_str::<ActionSource>(text)? {
        ActionSource::Actions(actions) => actions,
        ActionSource::Clip(clip) => clip.editing_actions.unwrap_or_default(),
    };
    Ok(actions)
}
