use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of editing tools an AI suggestion may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolKind {
    Trim,
    TextOverlay,
    Effects,
    Audio,
    CropZoom,
    Speed,
    ColorGrading,
    Transition,
}

/// Static description of a tool: wire name, prompt description and the
/// parameters its executor reads
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub kind: ToolKind,
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: &'static [&'static str],
}

/// Tool table in declaration order. Prompt rendering and name lookup both go
/// through this table.
pub const TOOL_SPECS: [ToolSpec; 8] = [
    ToolSpec {
        kind: ToolKind::Trim,
        name: "trim",
        description: "Trim video to specific start and end time",
        parameters: &["startTime", "endTime"],
    },
    ToolSpec {
        kind: ToolKind::TextOverlay,
        name: "textOverlay",
        description: "Add text overlay at specific position and time",
        parameters: &["text", "position", "startTime", "duration"],
    },
    ToolSpec {
        kind: ToolKind::Effects,
        name: "effects",
        description: "Apply visual effects like filters, transitions, speed changes",
        parameters: &["effect", "params"],
    },
    ToolSpec {
        kind: ToolKind::Audio,
        name: "audio",
        description: "Add background music or sound effects",
        parameters: &["audioType", "volume", "fadeIn", "fadeOut"],
    },
    ToolSpec {
        kind: ToolKind::CropZoom,
        name: "cropZoom",
        description: "Crop video or apply zoom effects",
        parameters: &["cropArea", "zoomLevel", "panDirection"],
    },
    ToolSpec {
        kind: ToolKind::Speed,
        name: "speed",
        description: "Change video speed for dramatic effect",
        parameters: &["startTime", "endTime", "speedMultiplier"],
    },
    ToolSpec {
        kind: ToolKind::ColorGrading,
        name: "colorGrading",
        description: "Apply color grading for mood enhancement",
        parameters: &["preset", "intensity"],
    },
    ToolSpec {
        kind: ToolKind::Transition,
        name: "transition",
        description: "Add transitions between clips",
        parameters: &["type", "duration", "position"],
    },
];

impl ToolKind {
    /// All tools in declaration order
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Trim,
        ToolKind::TextOverlay,
        ToolKind::Effects,
        ToolKind::Audio,
        ToolKind::CropZoom,
        ToolKind::Speed,
        ToolKind::ColorGrading,
        ToolKind::Transition,
    ];

    /// Resolve a wire name such as `"textOverlay"`. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        TOOL_SPECS.iter().find(|spec| spec.name == name).map(|spec| spec.kind)
    }

    pub fn spec(self) -> &'static ToolSpec {
        &TOOL_SPECS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
