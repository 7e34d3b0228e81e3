use serde_json::{json, Value};

use crate::tools::TOOL_SPECS;

/// Schema for an array of per-moment editing suggestions
pub fn suggestion_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "frameIndex": {
                    "type": "NUMBER",
                    "description": "The time in seconds, relative to the start of the clip, where the suggestion applies. Can be a float."
                },
                "suggestion": {
                    "type": "STRING",
                    "description": "A creative and actionable editing suggestion for this frame. e.g., \"Add celebratory confetti\" or \"Overlay text: 'Unbelievable!'\""
                }
            },
            "required": ["frameIndex", "suggestion"]
        }
    })
}

/// Schema for a single optimized clip with its editing actions
pub fn clip_suggestion_schema() -> Value {
    let tool_names: Vec<&str> = TOOL_SPECS.iter().map(|spec| spec.name).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "startTime": {
                "type": "NUMBER",
                "description": "The starting time in seconds for the optimized clip (relative to the analyzed video segment)."
            },
            "endTime": {
                "type": "NUMBER",
                "description": "The ending time in seconds for the optimized clip (relative to the analyzed video segment)."
            },
            "duration": {
                "type": "NUMBER",
                "description": "The duration of the clip in seconds (ideally 5-10 seconds for optimal virality)."
            },
            "reason": {
                "type": "STRING",
                "description": "Explanation of why this specific sequence was chosen for viral potential."
            },
            "viralPotential": {
                "type": "STRING",
                "enum": ["low", "medium", "high"],
                "description": "Assessment of the viral potential of this clip."
            },
            "editingSuggestions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Specific editing suggestions to enhance the viral potential of this clip."
            },
            "editingActions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "tool": {
                            "type": "STRING",
                            "enum": tool_names,
                            "description": "The editing tool to use"
                        },
                        "params": action_params_schema(),
                        "description": {
                            "type": "STRING",
                            "description": "Human-readable description of what this action does"
                        }
                    },
                    "required": ["tool", "params", "description"]
                },
                "description": "Automated editing actions to apply using the available tools."
            }
        },
        "required": ["startTime", "endTime", "duration", "reason", "viralPotential", "editingSuggestions"]
    })
}

// Union of every tool's parameters; each tool reads only its own.
fn action_params_schema() -> Value {
    json!({
        "type": "OBJECT",
        "description": "Parameters specific to the tool",
        "properties": {
            "text": { "type": "STRING" },
            "startTime": { "type": "NUMBER" },
            "endTime": { "type": "NUMBER" },
            "duration": { "type": "NUMBER" },
            "position": {
                "type": "OBJECT",
                "properties": {
                    "x": { "type": "NUMBER" },
                    "y": { "type": "NUMBER" }
                }
            },
            "effect": { "type": "STRING" },
            "audioType": { "type": "STRING" },
            "volume": { "type": "NUMBER" },
            "fadeIn": { "type": "BOOLEAN" },
            "fadeOut": { "type": "BOOLEAN" },
            "cropArea": {
                "type": "OBJECT",
                "properties": {
                    "x": { "type": "NUMBER" },
                    "y": { "type": "NUMBER" },
                    "width": { "type": "NUMBER" },
                    "height": { "type": "NUMBER" }
                }
            },
            "zoomLevel": { "type": "NUMBER" },
            "panDirection": { "type": "STRING" },
            "speedMultiplier": { "type": "NUMBER" },
            "preset": { "type": "STRING" },
            "intensity": { "type": "NUMBER" },
            "type": { "type": "STRING" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_schema_shape() {
        let schema = suggestion_schema();
        assert_eq!(schema["type"], "ARRAY");
        assert_eq!(schema["items"]["required"], json!(["frameIndex", "suggestion"]));
    }

    #[test]
    fn test_clip_schema_tool_enum_matches_registry() {
        let schema = clip_suggestion_schema();
        let tool_enum = &schema["properties"]["editingActions"]["items"]["properties"]["tool"]["enum"];

        assert_eq!(
            tool_enum,
            &json!(["trim", "textOverlay", "effects", "audio", "cropZoom", "speed", "colorGrading", "transition"])
        );
    }

    #[test]
    fn test_clip_schema_actions_are_optional() {
        let schema = clip_suggestion_schema();
        let required = schema["required"].as_array().unwrap();

        assert!(required.contains(&json!("viralPotential")));
        assert!(!required.contains(&json!("editingActions")));
    }

    #[test]
    fn test_every_declared_tool_parameter_is_in_schema() {
        let schema = clip_suggestion_schema();
        let params = &schema["properties"]["editingActions"]["items"]["properties"]["params"]["properties"];

        for spec in TOOL_SPECS.iter() {
            for name in spec.parameters {
                // effects' nested `params` is free-form and not part of the union
                if *name == "params" {
                    continue;
                }
                assert!(params.get(*name).is_some(), "{} missing {}", spec.name, name);
            }
        }
    }
}
