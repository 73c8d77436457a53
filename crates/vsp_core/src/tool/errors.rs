//! Error types for the external tool boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from probing a source file.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The input file does not exist.
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// The probing tool could not be started (missing binary, I/O error).
    #[error("Failed to run {tool}: {message}")]
    ExecutionFailed { tool: String, message: String },

    /// The probing tool ran but exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool output could not be parsed.
    #[error("Failed to parse {what}: {message}")]
    ParseError { what: String, message: String },

    /// The tool output carries no duration field in any recognized form.
    #[error("probe output does not contain a parseable duration")]
    MissingDuration,

    /// The reported duration is not usable for planning.
    #[error("probed duration is not positive: {0}")]
    InvalidDuration(f64),
}

impl ProbeError {
    /// Create an execution failed error.
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            what: what.into(),
            message: message.into(),
        }
    }
}

/// Errors from extracting one segment.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The tool could not be started (missing binary, I/O error).
    #[error("Failed to run {tool}: {message}")]
    ExecutionFailed { tool: String, message: String },

    /// The tool ran but exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The tool exceeded the configured time limit and was killed.
    #[error("{tool} timed out after {seconds} seconds")]
    TimedOut { tool: String, seconds: u64 },
}

impl ExtractError {
    /// Create an execution failed error.
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a command failed error.
    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: i32,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// The external exit code, when the tool ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}
