//! Lexical path resolution against a root.

use std::path::{Component, Path, PathBuf};

/// Join `relative` onto `root` without touching the filesystem.
///
/// `.` is dropped, `..` pops one component (and may climb above `root`),
/// and root or prefix components in `relative` are ignored so an absolute
/// input cannot replace `root`.
pub fn resolve_under(root: &Path, relative: impl AsRef<Path>) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for component in relative.as_ref().components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved
}
