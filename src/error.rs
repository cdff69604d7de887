use thiserror::Error;

#[derive(Error, Debug)]
pub enum Vid2CaptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Could not parse probe output: {0}")]
    ProbeParse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Vid2CaptionsError {
    pub fn external<T: Into<String>, M: Into<String>>(tool: T, message: M) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Vid2CaptionsError>;
