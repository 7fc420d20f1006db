//! Writing generated files under the package directory

use crate::error::ScaffoldError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes files relative to a package root, remembering what it wrote.
///
/// Existing files are overwritten; writing the same path twice records it once.
#[derive(Debug)]
pub struct ScaffoldWriter {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl ScaffoldWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the package root and any missing parents
    pub async fn create_root(&self) -> Result<(), ScaffoldError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ScaffoldError::fs("create directory", &self.root, e))
    }

    /// Write `contents` to `relative`, creating parent directories as needed
    pub async fn write(
        &mut self,
        relative: impl AsRef<Path>,
        contents: impl AsRef<[u8]>,
    ) -> Result<PathBuf, ScaffoldError> {
        let relative = relative.as_ref();
        let target_path = self.root.join(relative);

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScaffoldError::fs("create directory", parent, e))?;
        }

        fs::write(&target_path, contents)
            .await
            .map_err(|e| ScaffoldError::fs("write", &target_path, e))?;

        self.record(relative);
        Ok(target_path)
    }

    /// Note a file written by someone else (e.g. the manifest)
    pub fn record(&mut self, relative: impl AsRef<Path>) {
        let relative = relative.as_ref().to_path_buf();
        if !self.written.contains(&relative) {
            self.written.push(relative);
        }
    }

    /// Relative paths written so far, in write order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_written(self) -> Vec<PathBuf> {
        self.written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parents_and_records_once() {
        let tmp = tempfile::tempdir().unwrap();
        let mut writer = ScaffoldWriter::new(tmp.path().join("pkg"));
        writer.create_root().await.unwrap();

        writer.write(".github/workflows/ci.yml", "a").await.unwrap();
        writer.write(".github/workflows/ci.yml", "b").await.unwrap();
        writer.write("README.md", "# x\n").await.unwrap();

        let ci = tmp.path().join("pkg/.github/workflows/ci.yml");
        assert_eq!(std::fs::read_to_string(ci).unwrap(), "b");
        assert_eq!(
            writer.written(),
            [
                PathBuf::from(".github/workflows/ci.yml"),
                PathBuf::from("README.md")
            ]
        );
    }

    #[tokio::test]
    async fn test_write_into_a_file_fails_loudly() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut writer = ScaffoldWriter::new(&blocker);
        let err = writer.write("src/index.ts", "").await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
        assert!(writer.written().is_empty());
    }
}
