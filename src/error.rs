//! Error types for the indexing engine.
//!
//! Most of the error taxonomy is handled silently (skip-and-log) rather than
//! surfaced as a `Result` — see `indexing::core`. `IndexError` covers the
//! minority of operations with no silent-skip behavior: a workspace root
//! that cannot be read at all, and malformed facade tool calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: String,
        source: std::io::Error,
    },

    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("invalid argument for tool '{tool}': {reason}")]
    InvalidToolArgument { tool: String, reason: String },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("{0}")]
    General(String),
}

pub type IndexResult<T> = Result<T, IndexError>;

/// Helper trait for adding context to an arbitrary error on its way into
/// [`IndexError::General`].
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> IndexResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: &str) -> IndexResult<T> {
        self.map_err(|e| IndexError::General(format!("{msg}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tool_message_names_the_tool() {
        let err = IndexError::UnknownTool { name: "bogus_tool".to_string() };
        assert_eq!(err.to_string(), "unknown tool 'bogus_tool'");
    }

    #[test]
    fn invalid_argument_message_names_tool_and_reason() {
        let err = IndexError::InvalidToolArgument {
            tool: "find_symbol".to_string(),
            reason: "missing 'query'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid argument for tool 'find_symbol': missing 'query'");
    }
}
