//! Path-pattern matching for concrete request paths.

/// True when `concrete_path` matches the OpenAPI `pattern`.
///
/// Both sides are trimmed of leading/trailing `/` and split into segments. The
/// segment counts must be equal; a `{name}` pattern segment matches any single
/// concrete segment and every other segment must match literally. There is no
/// catch-all segment.
pub fn match_path(concrete_path: &str, pattern: &str) -> bool {
    let concrete: Vec<&str> = concrete_path.trim_matches('/').split('/').collect();
    let spec: Vec<&str> = pattern.trim_matches('/').split('/').collect();

    if concrete.len() != spec.len() {
        return false;
    }

    concrete
        .iter()
        .zip(spec.iter())
        .all(|(c, s)| is_placeholder(s) || c == s)
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}
