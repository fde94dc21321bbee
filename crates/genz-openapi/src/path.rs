//! Route path to document path translation.

/// Join `base` and `route` and rewrite `:name` segments to `{name}`.
///
/// Paths without a `:` marker pass through unchanged, so
/// `translate("/widget", "/")` keeps its trailing slash. When a marker is
/// present the path is rebuilt from its non-empty segments.
///
/// ```
/// use genz_openapi::translate;
///
/// assert_eq!(translate("/widget", "/:id"), "/widget/{id}");
/// assert_eq!(translate("/widget", "/"), "/widget/");
/// ```
pub fn translate(base: &str, route: &str) -> String {
    let joined = format!("{}{}", base, route);
    if !joined.contains(':') {
        return joined;
    }

    let mut out = String::with_capacity(joined.len() + 2);
    for segment in joined.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        match segment.strip_prefix(':') {
            Some(name) => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
            None => out.push_str(segment),
        }
    }
    out
}

/// Names of the `{param}` placeholders in a document path, in order
pub fn placeholders(path: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut current: Option<String> = None;

    for ch in path.chars() {
        match ch {
            '{' => current = Some(String::new()),
            '}' => {
                if let Some(name) = current.take() {
                    if !name.is_empty() {
                        params.push(name);
                    }
                }
            }
            _ => {
                if let Some(name) = current.as_mut() {
                    name.push(ch);
                }
            }
        }
    }

    params
}
