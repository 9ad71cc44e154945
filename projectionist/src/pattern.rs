//! Pattern compilation and matching.
//!
//! A pattern carries at most one wildcard region built from `*` (one path
//! segment) and `**` (any depth). The region splits the pattern into a
//! literal prefix, a separator and a literal suffix; matching a relative path
//! checks the literals and returns the text the region captured.
//!
//! A pattern with a single `*` and no `**`, `{` or `}` is first rewritten so
//! the star reaches any depth: `*.c` behaves like `**/*.c`.

use crate::error::{ProjectionError, Result};
use crate::paths;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

static WILDCARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*?").expect("Invalid wildcard regex"));

static LONE_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^*{}]*\*[^*{}]*$").expect("Invalid lone star regex"));

/// Rewrite a lone `*` pattern into its any-depth form.
pub fn normalize(pattern: &str) -> Cow<'_, str> {
    if LONE_STAR.is_match(pattern) {
        Cow::Owned(pattern.replacen('*', "**/*", 1))
    } else {
        Cow::Borrowed(pattern)
    }
}

/// The literal text between the wildcard tokens of a pattern.
#[derive(Debug, Clone)]
pub enum Separator {
    /// The tokens are joined by a single `/`: the capture may span directories.
    Deep,
    /// Any other literal. The capture is trimmed so the literal splits its
    /// final segment.
    Segment { literal: String, anchor: Regex },
}

/// A pattern split on its wildcard region, ready to match.
#[derive(Debug, Clone)]
pub enum CompiledPattern {
    /// No wildcard: the relative path must equal the literal.
    Exact(String),
    Wildcard {
        prefix: String,
        separator: Separator,
        suffix: String,
    },
}

impl CompiledPattern {
    /// Normalize and compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPattern` when the wildcard split does not produce
    /// exactly one or three parts. This signals corrupt registry data.
    pub fn compile(pattern: &str) -> Result<Self> {
        let normalized = normalize(pattern);
        let parts: Vec<&str> = WILDCARD.split(&normalized).collect();
        match parts.as_slice() {
            [literal] => Ok(Self::Exact((*literal).to_string())),
            [prefix, separator, suffix] => Ok(Self::Wildcard {
                prefix: (*prefix).to_string(),
                separator: Self::compile_separator(pattern, separator)?,
                suffix: (*suffix).to_string(),
            }),
            _ => Err(ProjectionError::malformed_pattern(pattern, parts.len())),
        }
    }

    fn compile_separator(pattern: &str, literal: &str) -> Result<Separator> {
        if literal == "/" {
            return Ok(Separator::Deep);
        }
        let anchor = RegexBuilder::new(&format!("{}([^/]*)$", regex::escape(literal)))
            .case_insensitive(true)
            .build()
            .map_err(|e| ProjectionError::InvalidAnchor {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Separator::Segment {
            literal: literal.to_string(),
            anchor,
        })
    }

    /// Match a path relative to a registry root.
    ///
    /// Returns the captured text on success. Exact patterns capture nothing
    /// and yield an empty string.
    pub fn captures(&self, relative: &str) -> Option<String> {
        let (prefix, separator, suffix) = match self {
            Self::Exact(literal) => return (literal == relative).then(String::new),
            Self::Wildcard {
                prefix,
                separator,
                suffix,
            } => (prefix, separator, suffix),
        };

        if relative.len() < prefix.len() + suffix.len() {
            return None;
        }
        let middle = relative.strip_prefix(prefix.as_str())?;
        let captured = middle.strip_suffix(suffix.as_str())?;

        match separator {
            Separator::Deep => Some(paths::clean(captured)),
            Separator::Segment { anchor, .. } => {
                let rooted = format!("/{captured}");
                let trimmed = anchor.replace(&rooted, "/${1}");
                let trimmed = trimmed.strip_prefix('/').unwrap_or(&trimmed);
                Some(paths::clean(trimmed))
            }
        }
    }
}

/// Compile `pattern` and match it against `relative` in one step.
pub fn matches(pattern: &str, relative: &str) -> Result<Option<String>> {
    Ok(CompiledPattern::compile(pattern)?.captures(relative))
}
