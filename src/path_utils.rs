use std::path::{Component, Path};

/// Path of `path` relative to `base`, with forward slashes.
///
/// Returns `None` when `path` is not under `base`.
#[must_use]
pub fn relative_display(path: &Path, base: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}
