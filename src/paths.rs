use crate::errors::ClipwriteError;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// How a block's relative path may be resolved against the workspace root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathPolicy {
    /// Writes must land strictly below the root.
    #[default]
    Confined,
    /// Plain `root.join(relative)`, absolute paths and `..` included.
    Permissive,
}

/// Resolves `relative` against `root` without touching the filesystem.
///
/// Under [`PathPolicy::Confined`] the path is normalized lexically: `.` is
/// dropped and `..` removes the previous segment. Absolute paths, drive
/// prefixes, paths that climb above the root and paths that normalize to the
/// root itself are rejected. Symlinks are not followed.
pub fn resolve_target(
    root: &Path,
    relative: &str,
    policy: PathPolicy,
) -> Result<PathBuf, ClipwriteError> {
    if policy == PathPolicy::Permissive {
        let full_path = root.join(relative);
        trace!("Resolved {} to {:?} without confinement", relative, full_path);
        return Ok(full_path);
    }

    let mut segments: Vec<&std::ffi::OsStr> = Vec::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(segment) => segments.push(segment),
            Component::CurDir => {}
            Component::ParentDir => {
                if segments.pop().is_none() {
                    debug!("Rejecting {}: climbs above the workspace root", relative);
                    return Err(ClipwriteError::PathOutsideRoot(relative.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                debug!("Rejecting {}: absolute path", relative);
                return Err(ClipwriteError::PathOutsideRoot(relative.to_string()));
            }
        }
    }

    if segments.is_empty() {
        return Err(ClipwriteError::PathOutsideRoot(relative.to_string()));
    }

    let full_path = segments
        .into_iter()
        .fold(root.to_path_buf(), |path, segment| path.join(segment));
    trace!("Resolved {} to {:?}", relative, full_path);
    Ok(full_path)
}
