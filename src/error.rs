use thiserror::Error;

/// Pipeline error types
///
/// Both variants are fatal: the run aborts and reports the cause. There is
/// no retry and no partial output.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input data errors: empty input, missing labels, a label
    /// distribution too skewed to split
    #[error("Input data error: {0}")]
    InputData(String),

    /// Configuration errors: invalid grid bounds or training parameters
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            PipelineError::InputData(_) => "INPUT_DATA_ERROR",
            PipelineError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PipelineError>;
