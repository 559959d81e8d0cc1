//! Document stores that feed the pipeline.
//!
//! A store lists identifiers and returns raw text for each. Two stores ship
//! with the crate:
//! - [`DirectoryStore`] reads `*.md` / `*.mdx` files from a content folder
//! - [`MemoryStore`] serves documents held in memory

use std::collections::BTreeMap;
use std::fs as std_fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use memchr::memchr;
use walkdir::WalkDir;

use crate::config::StoreSettings;
use crate::error::StoreError;

/// Upstream source of raw documents.
pub trait DocumentStore: Sync {
    /// List every identifier the store can serve, in a stable order.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` or `StoreError::Unavailable` when the
    /// listing itself cannot be produced.
    fn list_identifiers(&self) -> Result<Vec<String>, StoreError>;

    /// Read the raw text of one document.
    ///
    /// # Errors
    /// Returns a `StoreError` when the document cannot be read.
    fn read_content(&self, identifier: &str) -> Result<String, StoreError>;
}

/// Leading bytes inspected for a NUL when deciding a document is not text.
const TEXT_SNIFF_LEN: usize = 8 * 1024;

fn has_nul_prefix(bytes: &[u8]) -> bool {
    let head = bytes.get(..TEXT_SNIFF_LEN).unwrap_or(bytes);
    memchr(0, head).is_some()
}

/// Read text from a file with size and binary checks.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
///
/// # Errors
/// Returns `StoreError::NotFound`, `StoreError::TooLarge`,
/// `StoreError::BinaryContent` or `StoreError::Io`.
pub fn read_text_safe<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<String, StoreError> {
    let path = path.as_ref();

    let metadata = std_fs::metadata(path)
        .map_err(|_| StoreError::NotFound(path.to_string_lossy().to_string()))?;

    if metadata.len() > max_bytes {
        return Err(StoreError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = std_fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or_default());
    file.read_to_end(&mut buffer)?;

    if has_nul_prefix(&buffer) {
        return Err(StoreError::BinaryContent(path.to_string_lossy().to_string()));
    }
    Ok(match String::from_utf8(buffer) {
        Ok(text) => text,
        Err(error) => String::from_utf8_lossy(&error.into_bytes()).into_owned(),
    })
}

/// Store over a content folder on disk.
///
/// Identifiers are paths relative to the folder using `/` separators, e.g.
/// `paper-a.md` or `2024/talk.mdx`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    settings: StoreSettings,
}

impl DirectoryStore {
    /// Create a store over `root` with default settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_settings(root, StoreSettings::default())
    }

    /// Create a store over `root` with explicit settings.
    #[must_use]
    pub fn with_settings(root: impl Into<PathBuf>, settings: StoreSettings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    /// Content folder this store reads.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn accepts(&self, name: &str) -> bool {
        self.settings
            .suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}

impl DocumentStore for DirectoryStore {
    fn list_identifiers(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::NotFound(self.root.display().to_string()));
        }

        let mut identifiers = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .max_depth(self.settings.max_depth.max(1))
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Only the root itself failing makes the listing unavailable.
                Err(error) if error.depth() == 0 => {
                    return Err(StoreError::Unavailable(error.to_string()));
                }
                Err(error) => {
                    tracing::warn!(
                        root = %self.root.display(),
                        path = ?error.path(),
                        error = %error,
                        "skipping unreadable content entry"
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let identifier = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            if self.accepts(&identifier) {
                identifiers.push(identifier);
            }
        }

        tracing::debug!(
            root = %self.root.display(),
            count = identifiers.len(),
            "listed content identifiers"
        );
        Ok(identifiers)
    }

    fn read_content(&self, identifier: &str) -> Result<String, StoreError> {
        // Identifiers never escape the content folder.
        if identifier.split('/').any(|part| part == "..") {
            return Err(StoreError::NotFound(identifier.to_string()));
        }
        read_text_safe(self.root.join(identifier), self.settings.max_bytes)
    }
}

/// Store over documents held in memory, listed in identifier order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any previous content for `identifier`.
    #[must_use]
    pub fn with_document(
        mut self,
        identifier: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.insert(identifier, content);
        self
    }

    /// Add a document, replacing any previous content for `identifier`.
    pub fn insert(&mut self, identifier: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(identifier.into(), content.into());
    }
}

impl DocumentStore for MemoryStore {
    fn list_identifiers(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn read_content(&self, identifier: &str) -> Result<String, StoreError> {
        self.documents
            .get(identifier)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_safe() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("doc.md");
        std_fs::write(&p, "---\ntitle: A\n---\nbody").unwrap();
        assert_eq!(
            read_text_safe(&p, 1024).unwrap(),
            "---\ntitle: A\n---\nbody"
        );
    }

    #[test]
    fn test_read_binary() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("binary.md");
        let mut file = std_fs::File::create(&p).unwrap();
        file.write_all(b"\x00\x01\x02\x03").unwrap();
        assert!(matches!(
            read_text_safe(&p, 1024),
            Err(StoreError::BinaryContent(_))
        ));
    }

    #[test]
    fn test_file_too_large() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("large.md");
        std_fs::write(&p, "12345678901234567890").unwrap();
        assert!(matches!(
            read_text_safe(&p, 10),
            Err(StoreError::TooLarge(_, _))
        ));
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("latin1.md");
        std_fs::write(&p, b"caf\xe9").unwrap();
        assert_eq!(read_text_safe(&p, 1024).unwrap(), "caf\u{fffd}");
    }

    #[test]
    fn test_directory_listing_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.md", "a.mdx", "c.txt", "image.png"] {
            std_fs::write(dir.path().join(name), "x").unwrap();
        }
        std_fs::create_dir(dir.path().join("nested")).unwrap();
        std_fs::write(dir.path().join("nested/deep.md"), "x").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.list_identifiers().unwrap(), vec!["a.mdx", "b.md"]);

        let deep = DirectoryStore::with_settings(
            dir.path(),
            StoreSettings {
                max_depth: 2,
                ..StoreSettings::default()
            },
        );
        assert_eq!(
            deep.list_identifiers().unwrap(),
            vec!["a.mdx", "b.md", "nested/deep.md"]
        );
    }

    #[test]
    fn test_nul_after_sniff_window_is_text() {
        let mut bytes = vec![b'a'; TEXT_SNIFF_LEN];
        bytes.push(0);
        assert!(!has_nul_prefix(&bytes));
        assert!(has_nul_prefix(b"ab\x00"));
        assert!(!has_nul_prefix(b""));
    }

    /// A nested directory whose path exceeds `PATH_MAX` fails to open with
    /// `ENAMETOOLONG`; its siblings must still be listed.
    #[cfg(target_os = "linux")]
    #[test]
    fn test_unreadable_nested_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        let staging = dir.path().join("staging");
        std_fs::create_dir_all(staging.join("n".repeat(250))).unwrap();
        std_fs::write(staging.join("a.md"), "---\ntitle: A\n---\nbody").unwrap();

        // Grow the root until it sits just under PATH_MAX (4096).
        let mut deep = dir.path().to_path_buf();
        while deep.as_os_str().len() < 3850 {
            deep.push("d".repeat(50));
        }
        std_fs::create_dir_all(&deep).unwrap();
        let root = deep.join("content");
        std_fs::rename(&staging, &root).unwrap();

        let store = DirectoryStore::with_settings(
            &root,
            StoreSettings {
                max_depth: 2,
                ..StoreSettings::default()
            },
        );
        assert_eq!(store.list_identifiers().unwrap(), vec!["a.md"]);
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let store = DirectoryStore::new("/nonexistent/content/folder");
        assert!(matches!(
            store.list_identifiers(),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_rejects_parent_components() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());
        assert!(matches!(
            store.read_content("../etc/passwd"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new()
            .with_document("b.md", "B")
            .with_document("a.md", "A");
        assert_eq!(store.list_identifiers().unwrap(), vec!["a.md", "b.md"]);
        assert_eq!(store.read_content("a.md").unwrap(), "A");
        assert!(matches!(
            store.read_content("zzz.md"),
            Err(StoreError::NotFound(_))
        ));
    }
}
