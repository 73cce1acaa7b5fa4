//! Path pattern compilation.
//!
//! Patterns are `/`-delimited templates such as `/users/:id/posts/:post_id`.
//! Each `:name` segment captures exactly one non-empty path segment; every other
//! segment must match literally. Matching is anchored and case-insensitive.

use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

use crate::error::RouterError;
use crate::request::ParamVec;

/// Pattern text that compiles to [`PathPattern::Any`]
pub const ANY_PATH: &str = "*";

/// A compiled path pattern
#[derive(Clone)]
pub enum PathPattern {
    /// Matches every path. Used by filters registered without a path.
    Any,
    /// A concrete template compiled into an anchored regex
    Compiled {
        /// The pattern as registered
        source: Arc<str>,
        /// `^...$`, case-insensitive, one capture group per placeholder
        regex: Regex,
        /// Placeholder names in capture order
        param_names: Arc<[Arc<str>]>,
    },
}

impl PathPattern {
    /// Compile a pattern string
    ///
    /// `*` compiles to [`PathPattern::Any`].
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] for a nameless placeholder, an invalid or
    /// repeated placeholder name, or a regex that fails to build.
    pub fn compile(pattern: &str) -> Result<Self, RouterError> {
        if pattern == ANY_PATH {
            return Ok(PathPattern::Any);
        }

        let mut regex_src = String::with_capacity(pattern.len() + 8);
        regex_src.push('^');
        let mut param_names: Vec<Arc<str>> = Vec::with_capacity(pattern.matches(':').count());

        for (i, segment) in pattern.split('/').enumerate() {
            if i > 0 {
                regex_src.push('/');
            }
            match segment.strip_prefix(':') {
                Some(name) => {
                    validate_placeholder(pattern, name, &param_names)?;
                    param_names.push(Arc::from(name));
                    regex_src.push_str("([^/]+)");
                }
                None => regex_src.push_str(&regex::escape(segment)),
            }
        }
        regex_src.push('$');

        let regex = RegexBuilder::new(&regex_src)
            .case_insensitive(true)
            .build()
            .map_err(|source| RouterError::PatternCompile {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(PathPattern::Compiled {
            source: Arc::from(pattern),
            regex,
            param_names: param_names.into(),
        })
    }

    /// True when `path` matches the whole pattern
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        match self {
            PathPattern::Any => true,
            PathPattern::Compiled { regex, .. } => regex.is_match(path),
        }
    }

    /// Extract placeholder values from `path`
    ///
    /// Returns `None` when the path does not match. Values are the raw segment
    /// text in placeholder order.
    #[must_use]
    pub fn extract(&self, path: &str) -> Option<ParamVec> {
        match self {
            PathPattern::Any => Some(ParamVec::new()),
            PathPattern::Compiled {
                regex, param_names, ..
            } => {
                let captures = regex.captures(path)?;
                Some(
                    param_names
                        .iter()
                        .zip(captures.iter().skip(1))
                        .filter_map(|(name, value)| {
                            value.map(|v| (Arc::clone(name), v.as_str().to_string()))
                        })
                        .collect(),
                )
            }
        }
    }

    /// The pattern as registered, `*` for [`PathPattern::Any`]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            PathPattern::Any => ANY_PATH,
            PathPattern::Compiled { source, .. } => &**source,
        }
    }

    /// Placeholder names in the order they appear
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        match self {
            PathPattern::Any => &[],
            PathPattern::Compiled { param_names, .. } => &**param_names,
        }
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Any => f.write_str("PathPattern::Any"),
            PathPattern::Compiled { source, .. } => {
                f.debug_tuple("PathPattern::Compiled").field(source).finish()
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_placeholder(
    pattern: &str,
    name: &str,
    seen: &[Arc<str>],
) -> Result<(), RouterError> {
    if name.is_empty() {
        return Err(RouterError::EmptyPlaceholder {
            pattern: pattern.to_string(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(RouterError::InvalidPlaceholder {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    if seen.iter().any(|n| n.as_ref() == name) {
        return Err(RouterError::DuplicatePlaceholder {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}
