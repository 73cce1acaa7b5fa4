use std::fmt;

/// Errors raised while building a routing table
///
/// Every variant is a registration-time failure: once a [`crate::router::Router`]
/// holds a route, matching and dispatch cannot fail.
#[derive(Debug)]
pub enum RouterError {
    /// A `:` segment with nothing after it (e.g. `/users/:`)
    EmptyPlaceholder {
        /// The offending pattern
        pattern: String,
    },
    /// A placeholder name with characters outside `[A-Za-z0-9_-]`
    InvalidPlaceholder {
        /// The offending pattern
        pattern: String,
        /// The rejected name
        name: String,
    },
    /// The same placeholder name used twice in one pattern
    DuplicatePlaceholder {
        /// The offending pattern
        pattern: String,
        /// The repeated name
        name: String,
    },
    /// An empty verb or one containing whitespace
    InvalidVerb {
        /// The rejected verb
        verb: String,
    },
    /// The generated matcher failed to compile
    PatternCompile {
        /// The offending pattern
        pattern: String,
        /// Underlying regex error
        source: regex::Error,
    },
    /// A manifest entry names a handler that was never registered
    UnknownHandler {
        /// The missing handler name
        name: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::EmptyPlaceholder { pattern } => {
                write!(f, "Invalid path pattern '{pattern}': placeholder has no name")
            }
            RouterError::InvalidPlaceholder { pattern, name } => {
                write!(
                    f,
                    "Invalid path pattern '{pattern}': placeholder name '{name}' may only \
                    contain ASCII letters, digits, '_' and '-'"
                )
            }
            RouterError::DuplicatePlaceholder { pattern, name } => {
                write!(
                    f,
                    "Invalid path pattern '{pattern}': placeholder '{name}' is used more than once"
                )
            }
            RouterError::InvalidVerb { verb } => {
                write!(
                    f,
                    "Invalid verb '{verb}': verbs must be non-empty and contain no whitespace"
                )
            }
            RouterError::PatternCompile { pattern, source } => {
                write!(f, "Failed to compile path pattern '{pattern}': {source}")
            }
            RouterError::UnknownHandler { name } => {
                write!(f, "No handler registered under the name '{name}'")
            }
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::PatternCompile { source, .. } => Some(source),
            _ => None,
        }
    }
}
