//! Error types for the composition pipeline.
//!
//! Errors carry context that chains through layers:
//! Job → Step → Toolchain operation → Diagnostic

use std::io;

use thiserror::Error;

use crate::media::MediaError;

/// Top-level pipeline error with job context.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during execution.
    #[error("Job '{job_id}' failed at step '{step_name}': {source}")]
    StepFailed {
        job_id: String,
        step_name: String,
        #[source]
        source: StepError,
    },

    /// Request validation failed before any stage ran.
    #[error("Job '{job_id}' failed validation: {message}")]
    ValidationFailed { job_id: String, message: String },

    /// Failed to set up the job (create scratch directory, etc.).
    #[error("Job '{job_id}' setup failed: {message}")]
    SetupFailed { job_id: String, message: String },

    /// Failed to move the finished file to the caller's destination.
    #[error("Job '{job_id}' could not deliver output: {message}")]
    DeliveryFailed { job_id: String, message: String },

    /// Pipeline was cancelled at a step boundary.
    #[error("Job '{job_id}' was cancelled")]
    Cancelled { job_id: String },
}

impl PipelineError {
    pub fn step_failed(
        job_id: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            job_id: job_id.into(),
            step_name: step_name.into(),
            source,
        }
    }

    pub fn validation_failed(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            job_id: job_id.into(),
            message: message.into(),
        }
    }

    pub fn setup_failed(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SetupFailed {
            job_id: job_id.into(),
            message: message.into(),
        }
    }

    pub fn delivery_failed(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DeliveryFailed {
            job_id: job_id.into(),
            message: message.into(),
        }
    }

    pub fn cancelled(job_id: impl Into<String>) -> Self {
        Self::Cancelled {
            job_id: job_id.into(),
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug)]
pub enum StepError {
    /// A media toolchain operation failed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_chains_context() {
        let media = MediaError::conform("/tmp/stock.mp4", "source duration 0 is zero or negative");
        let err = PipelineError::step_failed("job-42", "ConformVideo", media.into());

        let msg = err.to_string();
        assert!(msg.contains("job-42"));
        assert!(msg.contains("ConformVideo"));
        assert!(msg.contains("/tmp/stock.mp4"));
    }

    #[test]
    fn step_error_preserves_media_stage() {
        let err: StepError = MediaError::mux("/a.mp4", "/b.mp3", "boom").into();
        match err {
            StepError::Media(m) => assert_eq!(m.stage(), "mux"),
            other => panic!("unexpected variant: {other}"),
        }
    }
}
