//! Typed errors for container engine operations.
//!
//! The lifecycle controller needs to tell "the engine itself is gone"
//! (fatal, never retried) apart from "one command failed" (recoverable
//! through a confirmed reset), so these are distinct variants rather than
//! message strings.

/// Errors produced by [`super::Engine`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The docker binary is missing or the daemon is unreachable.
    #[error("Docker is not available: {message}")]
    Unavailable { message: String },

    /// A docker invocation exited non-zero.
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

impl EngineError {
    /// Creates an `Unavailable` error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a `CommandFailed` error.
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Returns true if the engine itself is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error() {
        let err = EngineError::unavailable("daemon not running");
        assert!(err.is_unavailable());
        assert_eq!(
            err.to_string(),
            "Docker is not available: daemon not running"
        );
    }

    #[test]
    fn test_command_failed_error() {
        let err = EngineError::command_failed("docker start sandbox", "no such container");
        assert!(!err.is_unavailable());
        assert_eq!(
            err.to_string(),
            "`docker start sandbox` failed: no such container"
        );
    }
}
