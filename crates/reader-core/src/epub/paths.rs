/// Directory part of an archive path, without the trailing slash.
pub(crate) fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

pub(crate) fn strip_fragment(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}

/// Resolve a manifest href against the package document directory.
///
/// Absolute hrefs (leading `/`) are archive-rooted and used as-is without
/// the slash. `.` and `..` segments are folded.
pub(crate) fn resolve_href(base_dir: &str, href: &str) -> String {
    let href = strip_fragment(href);
    let joined = if let Some(absolute) = href.strip_prefix('/') {
        absolute.to_string()
    } else if base_dir.is_empty() {
        href.to_string()
    } else {
        format!("{base_dir}/{href}")
    };
    normalize_path(&joined)
}

fn normalize_path(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
