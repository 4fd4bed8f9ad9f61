//! Workspace file persistence.
//!
//! All relative paths resolve against a single workspace root. Writes use
//! UTF-8 with a byte-order mark for compatibility with previously persisted
//! documents; reads strip a leading BOM so a write/read round-trip returns
//! the payload unchanged.

use std::path::{Path, PathBuf};
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// File store rooted at the workspace directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a directory against the workspace root, passing absolute
    /// paths through untouched.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// Read a file from `{directory}/{file_name}`.
    ///
    /// Soft failure: a missing file or unreadable content comes back as a
    /// descriptive message, never an error.
    pub fn read(&self, directory: &str, file_name: &str) -> String {
        let dir = self.resolve(directory);
        let file = dir.join(file_name);
        debug!("read_file: {}", file.display());

        if !file.exists() {
            return format!(
                "Error: File not found at {} / {}. Please check if the path is correct.",
                dir.display(),
                file_name
            );
        }

        match std::fs::read(&file) {
            Ok(bytes) => {
                let bytes = if bytes.starts_with(UTF8_BOM) {
                    bytes[UTF8_BOM.len()..].to_vec()
                } else {
                    bytes
                };
                match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(e) => format!("Error reading file: {}", e),
                }
            }
            Err(e) => format!("Error reading file: {}", e),
        }
    }

    /// Write content to a path, creating parent directories and overwriting
    /// unconditionally. Returns a confirmation or error message.
    pub fn write(&self, path: &str, content: &str) -> String {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return format!("Error creating directory {}: {}", parent.display(), e);
            }
        }

        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + content.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(content.as_bytes());

        match std::fs::write(&full_path, bytes) {
            Ok(()) => format!("Successfully wrote to {}", full_path.display()),
            Err(e) => format!("Error writing file: {}", e),
        }
    }

    /// Create a directory (and parents) under the workspace.
    pub fn ensure_dir(&self, path: &str) -> std::io::Result<PathBuf> {
        let dir = self.resolve(path);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_read_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let payload = "# Summary\n\nKey takeaways with unicode: 한국어 텍스트.";
        let msg = store.write("2026-08-27_09-00/abc_summary.md", payload);
        assert!(msg.starts_with("Successfully wrote to"));

        let back = store.read("2026-08-27_09-00", "abc_summary.md");
        assert_eq!(back, payload);
    }

    #[test]
    fn test_write_emits_bom() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.write("note.md", "hello");

        let raw = std::fs::read(dir.path().join("note.md")).unwrap();
        assert_eq!(&raw[..3], UTF8_BOM);
        assert_eq!(&raw[3..], b"hello");
    }

    #[test]
    fn test_read_missing_file_is_soft() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let msg = store.read("nowhere", "missing.md");
        assert!(msg.starts_with("Error: File not found"));
    }

    #[test]
    fn test_absolute_path_passthrough() {
        let dir = tempdir().unwrap();
        let store = FileStore::new("/srv/irrelevant-root");

        let abs = dir.path().join("report.md");
        let msg = store.write(abs.to_str().unwrap(), "content");
        assert!(msg.starts_with("Successfully wrote to"));
        assert!(abs.exists());
    }
}
