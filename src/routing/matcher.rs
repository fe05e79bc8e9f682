//! Console path matching.
//!
//! Decides whether a request URI belongs to the console handler and splits
//! accepted paths into ordered segments for route resolution. Pure functions,
//! no side effects.

/// Top-level resources served by the console.
const RESOURCES: [&str; 6] = [
    "logs",
    "inferenceAddress",
    "upload",
    "dependency",
    "version",
    "config",
];

/// Check whether `uri` addresses one of the console resources.
///
/// The resource name must be the full first path segment, optionally
/// followed by sub-segments or a query string; a URI outside the set is
/// declined and left to the surrounding server.
pub fn accepts(uri: &str) -> bool {
    let path = uri.split('?').next().unwrap_or(uri);
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    let head = rest.split('/').next().unwrap_or(rest);
    RESOURCES.contains(&head)
}

/// Split a path into its `/`-separated segments, dropping empty segments
/// produced by the root or a trailing slash.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Match `path` against a route pattern segment by segment.
///
/// `{name}` pattern segments capture the corresponding path segment; all
/// other segments must match literally and the segment counts must agree.
/// Returns the captured parameters in pattern order.
pub fn match_pattern<'p>(pattern: &str, path: &'p str) -> Option<Vec<&'p str>> {
    let pattern_segments = segments(pattern);
    let path_segments = segments(path);
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut params = Vec::new();
    for (expected, actual) in pattern_segments.iter().zip(&path_segments) {
        if expected.starts_with('{') && expected.ends_with('}') {
            params.push(*actual);
        } else if expected != actual {
            return None;
        }
    }
    Some(params)
}
