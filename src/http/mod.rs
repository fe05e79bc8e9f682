//! Wire-format helpers shared by the console handlers.

pub mod multipart;

/// Read an integer query parameter, falling back to `default` when the
/// parameter is absent or does not parse.
pub fn query_param_usize(query: Option<&str>, name: &str, default: usize) -> usize {
    let Some(query) = query else {
        return default;
    };
    query
        .split('&')
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key == name {
                value.parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(default)
}
