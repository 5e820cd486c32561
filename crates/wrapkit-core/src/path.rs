//! Lexical path helpers for reporting source files.
//!
//! Nothing here touches the filesystem: symlinks are not resolved.
use std::path::{Component, Path, PathBuf};

/// Normalizes a path without consulting the filesystem.
///
/// `.` components are dropped and `..` cancels the preceding normal component.
/// Leading `..` is kept on relative paths; an absolute path never climbs above
/// its root. An empty result becomes `.`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use wrapkit_core::path::normalize;
///
/// assert_eq!(normalize("src/./main/../test/A.scala"), Path::new("src/test/A.scala"));
/// assert_eq!(normalize("/../tmp"), Path::new("/tmp"));
/// ```
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.as_ref().components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

/// Returns `path` relative to `base` when it lies under it, both normalized first.
///
/// Equal paths give `.`; paths outside `base` give `None`.
pub fn relativize(base: impl AsRef<Path>, path: impl AsRef<Path>) -> Option<PathBuf> {
    let base = normalize(base);
    let path = normalize(path);

    if base == Path::new(".") {
        let escapes = path.is_absolute()
            || matches!(path.components().next(), Some(Component::ParentDir));
        return (!escapes).then_some(path);
    }

    let rest = path.strip_prefix(&base).ok()?;
    if rest.as_os_str().is_empty() {
        Some(PathBuf::from("."))
    } else {
        Some(rest.to_path_buf())
    }
}

/// Renders a path with `/` separators on every platform.
pub fn to_slash(path: impl AsRef<Path>) -> String {
    let text = path.as_ref().to_string_lossy();
    if cfg!(windows) {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}
