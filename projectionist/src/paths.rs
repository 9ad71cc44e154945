//! Lexical helpers for slash-separated paths.
//!
//! Registry roots, relative candidates and expanded values are plain strings
//! using `/` as separator. Nothing here touches the filesystem.

/// Lexically normalize a path.
///
/// Repeated separators and `.` segments are dropped, `..` consumes the
/// preceding segment when there is one, and a trailing separator is removed.
/// The empty path cleans to `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Everything but the last element, cleaned.
pub fn dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean(&path[..=idx]),
        None => ".".to_string(),
    }
}

/// The last element, ignoring trailing separators.
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }
    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Join the non-empty parts with `/` and clean the result.
///
/// Returns an empty string when every part is empty.
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let parts: Vec<&str> = parts.into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return String::new();
    }
    clean(&parts.join("/"))
}

/// Strip `root` from the front of `file` if `root` is a segment-aligned
/// ancestor of it.
///
/// The returned remainder has its single leading separator removed. A file
/// equal to its root yields an empty remainder.
pub fn strip_root<'a>(root: &str, file: &'a str) -> Option<&'a str> {
    let rest = file.strip_prefix(root)?;
    if !root.ends_with('/') && !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(rest.strip_prefix('/').unwrap_or(rest))
}
