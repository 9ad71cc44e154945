//! Placeholder expansion for template values.
//!
//! A placeholder is a `{...}` region holding `|`-separated names. The first
//! name selects a base value from the [`QueryContext`] when it names a context
//! key; otherwise the captured `match` is the base value and every name is a
//! transform. Transforms run left to right. Unknown transform names are
//! skipped.
//!
//! ```
//! use projectionist::{expand_all, QueryContext};
//!
//! let ctx = QueryContext::new("/src", "/src/app/models/user.rb").with_match("app/models/user");
//! assert_eq!(expand_all("{dirname|dot}/{basename}", &ctx).unwrap(), "app.models/user");
//! assert_eq!(expand_all("{file|basename}", &ctx).unwrap(), "user.rb");
//! ```

use crate::error::PlaceholderError;
use crate::transforms;
use crate::types::QueryContext;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^{}]*\}").expect("Invalid placeholder regex"));

/// Expand a single `{...}` token.
///
/// # Errors
///
/// - `NotAPlaceholder` when `token` is not wrapped in `{` and `}`
/// - `MissingMatch` when the base value falls back to `match` and the context
///   has none
pub fn expand_one(token: &str, ctx: &QueryContext) -> Result<String, PlaceholderError> {
    let spec = token
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| PlaceholderError::NotAPlaceholder {
            token: token.to_string(),
        })?;

    let mut names = spec.split('|');
    let first = names.next().unwrap_or_default();
    let named_base = if first.is_empty() { None } else { ctx.get(first) };

    let (mut value, chain): (String, Vec<&str>) = match named_base {
        Some(base) => (base.to_string(), names.collect()),
        None => {
            let captured = ctx
                .captured()
                .ok_or_else(|| PlaceholderError::MissingMatch {
                    token: token.to_string(),
                })?;
            (captured.to_string(), spec.split('|').collect())
        }
    };

    for name in chain {
        match transforms::lookup(name) {
            Some(transform) => value = transform(&value),
            None => trace!(transform = name, token, "skipping unknown transform"),
        }
    }

    Ok(value)
}

/// Expand every placeholder in `template`, leaving other text untouched.
pub fn expand_all(template: &str, ctx: &QueryContext) -> Result<String, PlaceholderError> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for region in PLACEHOLDER.find_iter(template) {
        out.push_str(&template[last..region.start()]);
        out.push_str(&expand_one(region.as_str(), ctx)?);
        last = region.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}
