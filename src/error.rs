use thiserror::Error;

/// Main error type for the viral-clip-editor library
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Frame edit error: {0}")]
    FrameEdit(#[from] FrameEditError),

    #[error("Frame loading error: {0}")]
    Loader(#[from] LoaderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Tool dispatch and parameter errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Invalid parameters for {tool}: {details}")]
    InvalidParameters { tool: String, details: String },
}

/// Errors raised while editing a single frame through the external editor
#[derive(Error, Debug)]
pub enum FrameEditError {
    #[error("Editing frame {index} failed: {reason}")]
    Failed { index: usize, reason: String },

    #[error("Editing frame {index} timed out after {millis}ms")]
    Timeout { index: usize, millis: u64 },
}

/// Errors reading or writing frame images on disk
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("No frames found in directory: {path}")]
    NoFrames { path: String },

    #[error("Unsupported frame format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Failed to decode frame {path}: {reason}")]
    DecodeFailed { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using EditorError
pub type Result<T> = std::result::Result<T, EditorError>;

impl EditorError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            // The external editor is network-bound; a retry may succeed
            Self::FrameEdit(FrameEditError::Timeout { .. }) => true,
            Self::FrameEdit(FrameEditError::Failed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Tool(ToolError::UnknownTool { name }) => {
                format!(
                    "Tool '{}' not found. Available tools: trim, textOverlay, effects, audio, cropZoom, speed, colorGrading, transition",
                    name
                )
            }
            Self::Loader(LoaderError::NoFrames { path }) => {
                format!("No image frames found in '{}'. Expected PNG or JPEG files.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
