//! Error types for wikispan

use crate::types::{Position, Span};
use thiserror::Error;

/// Error raised when a token definition is rejected by the registry.
///
/// Registration errors are fatal to the single registration that caused
/// them; the registry is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The pattern does not compile, or it can match an empty string
    #[error("invalid pattern for `{name}` ({pattern:?}): {reason}")]
    InvalidPattern {
        name: String,
        pattern: String,
        reason: String,
    },

    /// Another definition already uses the exact same pattern text
    #[error("pattern for `{name}` is identical to the pattern of `{existing}`: {pattern:?}")]
    DuplicatePattern {
        name: String,
        existing: String,
        pattern: String,
    },

    /// Another definition already uses this name
    #[error("a token definition named `{name}` is already registered")]
    DuplicateName { name: String },
}

impl RegistrationError {
    /// Name of the definition that was rejected.
    pub fn name(&self) -> &str {
        match self {
            RegistrationError::InvalidPattern { name, .. }
            | RegistrationError::DuplicatePattern { name, .. }
            | RegistrationError::DuplicateName { name } => name,
        }
    }
}

/// A match whose fields could not be extracted.
///
/// Reported per match while scanning. The matched text is kept as plain
/// text and the scan carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed `{definition}` match at {position}: {reason}")]
pub struct MalformedMatchError {
    /// Name of the definition whose constructor failed
    pub definition: String,
    /// Byte range of the rejected match
    pub span: Span,
    /// Line and column of the match start
    pub position: Position,
    /// Why the constructor gave up
    pub reason: String,
}

/// Main error type for wikispan operations
#[derive(Error, Debug)]
pub enum WikispanError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured token definition was rejected
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),
}

/// Result type alias for wikispan operations
pub type Result<T> = std::result::Result<T, WikispanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_error_name() {
        let err = RegistrationError::DuplicatePattern {
            name: "wiki_comment".into(),
            existing: "wiki_link".into(),
            pattern: r"\[\[(.+?)\]\]".into(),
        };
        assert_eq!(err.name(), "wiki_comment");
        assert!(err.to_string().contains("`wiki_link`"));
    }

    #[test]
    fn test_malformed_match_display() {
        let err = MalformedMatchError {
            definition: "wiki_link".into(),
            span: Span::new(4, 10),
            position: Position::new(1, 2, 4),
            reason: "capture group 2 did not participate".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed `wiki_link` match at 2:3: capture group 2 did not participate"
        );
    }

    #[test]
    fn test_wikispan_error_from_registration() {
        let err: WikispanError = RegistrationError::DuplicateName {
            name: "tag".into(),
        }
        .into();
        assert!(matches!(err, WikispanError::Registration(_)));
        assert!(err.to_string().starts_with("Registration error:"));
    }
}
