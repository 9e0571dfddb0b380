//! Error types for hook pipelines.

/// Errors that can occur when mutating a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    /// An index-based insert pointed past the end of the pipeline.
    #[error("index {index} is out of range for pipeline of length {len}")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The pipeline length at the time of the call.
        len: usize,
    },
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
