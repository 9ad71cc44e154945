//! Hierarchical lookup of property values.
//!
//! A query walks every registry whose root is an ancestor of the queried file,
//! most specific root first, and every pattern of that registry, most specific
//! pattern first. Each matching pattern that declares the key contributes one
//! candidate. Later stages expand placeholders, turn values into paths and
//! follow chains of lookups.
//!
//! A malformed pattern under an ancestor root fails the whole query. A
//! candidate whose placeholders cannot be expanded is dropped.

use crate::error::Result;
use crate::paths;
use crate::pattern::CompiledPattern;
use crate::placeholder::expand_all;
use crate::types::{Projections, QueryContext, RawResult};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Collect the unexpanded values declared for `key` that apply to `file`.
///
/// Results come in specificity order and are never deduplicated.
pub fn query_raw(key: &str, file: &str, projections: &Projections) -> Result<Vec<RawResult>> {
    let mut candidates = Vec::new();

    for root in projections.roots_by_specificity() {
        let Some(relative) = paths::strip_root(root, file) else {
            trace!(root, file, "root is not an ancestor");
            continue;
        };
        let Some(projection) = projections.get(root) else {
            continue;
        };

        for pattern in projection.patterns_by_specificity() {
            let compiled = CompiledPattern::compile(pattern)?;
            let Some(captured) = compiled.captures(relative) else {
                trace!(root, pattern, relative, "pattern does not match");
                continue;
            };
            let Some(value) = projection.get(pattern).and_then(|props| props.get(key)) else {
                continue;
            };
            trace!(root, pattern, key, value = value.as_str(), "candidate");
            candidates.push(RawResult {
                root: root.to_string(),
                value: value.clone(),
                context: QueryContext::new(root, file).with_match(captured),
            });
        }
    }

    debug!(key, file, count = candidates.len(), "raw query");
    Ok(candidates)
}

/// Expanded `(root, value)` pairs for `key`.
pub fn query(key: &str, file: &str, projections: &Projections) -> Result<Vec<(String, String)>> {
    let raw = query_raw(key, file, projections)?;
    let mut expanded = Vec::with_capacity(raw.len());
    for candidate in raw {
        match expand_all(&candidate.value, &candidate.context) {
            Ok(value) => expanded.push((candidate.root, value)),
            Err(e) => debug!(
                key,
                file,
                value = candidate.value.as_str(),
                "dropping candidate: {}",
                e
            ),
        }
    }
    Ok(expanded)
}

/// Expanded values for `key`, without their roots.
pub fn query_scalar(key: &str, file: &str, projections: &Projections) -> Result<Vec<String>> {
    Ok(query(key, file, projections)?
        .into_iter()
        .map(|(_, value)| value)
        .collect())
}

/// Expanded values for `key` joined onto their roots.
pub fn query_file(key: &str, file: &str, projections: &Projections) -> Result<Vec<String>> {
    Ok(query(key, file, projections)?
        .into_iter()
        .map(|(root, value)| paths::join([root.as_str(), value.as_str()]))
        .collect())
}

/// Follow `key` transitively from `file`, breadth first, for up to
/// `max_depth` rounds.
///
/// Every round queries the paths first discovered by the previous round. A
/// path is reported once, in discovery order. The walk stops early once a
/// round discovers nothing new.
pub fn query_file_rec(
    key: &str,
    file: &str,
    max_depth: usize,
    projections: &Projections,
) -> Result<Vec<String>> {
    let mut discovered: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier = vec![file.to_string()];

    for depth in 0..max_depth {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for current in &frontier {
            for candidate in query_file(key, current, projections)? {
                if visited.insert(candidate.clone()) {
                    discovered.push(candidate.clone());
                    next.push(candidate);
                }
            }
        }
        trace!(depth, new = next.len(), "closure round");
        frontier = next;
    }

    debug!(
        key,
        file,
        max_depth,
        count = discovered.len(),
        "recursive file query"
    );
    Ok(discovered)
}
