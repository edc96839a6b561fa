//! Canonicalization of virtual absolute paths.
//!
//! Canonical paths always start with `/`, never end with `/` (except the root
//! itself) and contain no empty, `.` or `..` segments.

/// Path segments the host platform leaves behind as metadata sidecars.
const RESERVED_SEGMENTS: &[&str] = &["._", ".AppleDouble"];

/// Applies `path`'s segments on top of `resolved`.
///
/// Returns `true` if a `..` tried to pop past the root; the pop is then
/// dropped, which is what clamps `/../x` to `/x`.
fn push_segments<'a>(resolved: &mut Vec<&'a str>, path: &'a str) -> bool {
    let mut escaped = false;
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if resolved.pop().is_none() {
                    escaped = true;
                }
            }
            segment => resolved.push(segment),
        }
    }
    escaped
}

fn join(segments: &[&str]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::with_capacity(segments.iter().map(|s| s.len() + 1).sum());
    for segment in segments {
        out.push('/');
        out.push_str(segment);
    }
    out
}

fn resolve_inner(base: &str, path: &str) -> (String, bool) {
    let mut resolved = Vec::new();
    if path.is_empty() || path == "." {
        push_segments(&mut resolved, base);
        return (join(&resolved), false);
    }
    if !path.starts_with('/') {
        push_segments(&mut resolved, base);
    }
    let escaped = push_segments(&mut resolved, path);
    (join(&resolved), escaped)
}

/// Canonicalizes `path` as an absolute path.
///
/// Total and idempotent: every input yields an absolute path, and `..` at the
/// root is a no-op.
pub fn normalize(path: &str) -> String {
    let mut resolved = Vec::new();
    push_segments(&mut resolved, path);
    join(&resolved)
}

/// Resolves `path` against the directory `base`.
///
/// An empty path or `.` names `base` itself; a path starting with `/` ignores
/// `base`.
pub fn resolve(base: &str, path: &str) -> String {
    resolve_inner(base, path).0
}

/// Like [`resolve`], but returns `None` when `path` climbs above the root or
/// names a reserved sidecar entry.
pub fn resolve_guarded(base: &str, path: &str) -> Option<String> {
    let (resolved, escaped) = resolve_inner(base, path);
    if escaped || is_reserved(&resolved) {
        return None;
    }
    Some(resolved)
}

/// Whether any segment of `path` is a reserved sidecar name.
pub fn is_reserved(path: &str) -> bool {
    path.split('/')
        .any(|segment| RESERVED_SEGMENTS.contains(&segment))
}

/// The parent of a canonical path. The root is its own parent.
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// The last segment of a canonical path; empty for the root.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Whether the canonical path `path` lies strictly beneath `dir`.
pub fn is_descendant(dir: &str, path: &str) -> bool {
    if dir == "/" {
        return path != "/";
    }
    path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/'
}
