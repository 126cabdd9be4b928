//! Scoped per-request workspace.
//!
//! Every composition call owns one workspace for its downloaded assets and
//! the encoded output. The backing directory is removed when the handle
//! drops, on every exit path.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::MediaResult;

/// Handle to an isolated temporary directory.
///
/// Passed by reference into every operation that touches the filesystem,
/// rather than held on a long-lived processor.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace directory.
    pub fn new() -> MediaResult<Self> {
        let dir = tempfile::Builder::new().prefix("promocast-").tempdir()?;
        Ok(Self { dir })
    }

    /// Root path of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_cleanup_on_drop() {
        let ws = Workspace::new().unwrap();
        let root = ws.path().to_path_buf();
        std::fs::write(ws.file("asset.bin"), b"data").unwrap();
        assert!(root.exists());

        drop(ws);
        assert!(!root.exists(), "workspace should be removed on drop");
    }

    #[test]
    fn test_file_paths_are_scoped() {
        let ws = Workspace::new().unwrap();
        let path = ws.file("narration.mp3");
        assert!(path.starts_with(ws.path()));
    }
}
