use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error::{Result, ToolError},
    schema::EditingAction,
    tools::{ActionParams, ToolKind, ToolSpec, TOOL_SPECS},
};

/// Registry of the available editing tools
///
/// Every executor here is an export hook: it echoes the parameters it was
/// given, tagged `applied: true`, and performs no media work. Frame-level
/// work happens in the edit pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ToolRegistry {
    specs: &'static [ToolSpec],
}

/// Result of running one tool through the registry
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    pub tool: ToolKind,
    pub result: Value,
}

impl ToolRegistry {
    /// Create a registry with all built-in tools
    pub fn new() -> Self {
        Self { specs: &TOOL_SPECS }
    }

    /// Get a tool by its wire name
    pub fn get(&self, name: &str) -> Option<&'static ToolSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Resolve a wire name to its tool kind
    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        self.get(name).map(|spec| spec.kind)
    }

    /// Like [`get`](Self::get), but an unknown name is an error
    pub fn require(&self, name: &str) -> Result<&'static ToolSpec> {
        self.get(name).ok_or_else(|| {
            ToolError::UnknownTool {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Check if a tool is available
    pub fn has_tool(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All tool names in declaration order
    pub fn available_tools(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.name).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Run a tool's executor
    ///
    /// Echoes the tool's declared parameters that are present in `params`.
    /// `trim` additionally reports the resulting duration.
    pub async fn execute(&self, kind: ToolKind, params: &ActionParams) -> Value {
        let mut result = serde_json::Map::new();
        result.insert("applied".to_string(), Value::Bool(true));

        for name in kind.spec().parameters {
            if let Some(value) = params.get(name) {
                result.insert(name.to_string(), value.clone());
            }
        }

        if kind == ToolKind::Trim {
            if let (Some(start), Some(end)) = (params.get_f64("startTime"), params.get_f64("endTime")) {
                result.insert("duration".to_string(), json!(end - start));
            }
        }

        debug!("Executed {} hook with {} parameters", kind, result.len() - 1);
        Value::Object(result)
    }

    /// Run each action's executor in order, skipping unknown tools
    pub async fn execute_pipeline(&self, actions: &[EditingAction]) -> Vec<ToolInvocation> {
        let mut results = Vec::with_capacity(actions.len());

        for action in actions {
            let Some(kind) = self.resolve(&action.tool) else {
                debug!("Skipping unknown tool '{}'", action.tool);
                continue;
            };

            let result = self.execute(kind, &action.params).await;
            results.push(ToolInvocation { tool: kind, result });
        }

        results
    }

    /// Render `- name: description` lines for embedding into an AI prompt
    pub fn tool_descriptions(&self) -> String {
        self.specs
            .iter()
            .map(|spec| format!("- {}: {}", spec.name, spec.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
