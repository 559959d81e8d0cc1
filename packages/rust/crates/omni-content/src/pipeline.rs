//! Content Pipeline - turns a store's raw documents into ranked buckets.
//!
//! One run reads every document, then splits, normalizes and derives each
//! record independently (in parallel), and finally ranks the full set.
//!
//! # Example
//!
//! ```ignore
//! use omni_content::{ContentPipeline, DirectoryStore};
//!
//! let pipeline = ContentPipeline::new();
//! let ranked = pipeline.run(&DirectoryStore::new("content/publications"));
//!
//! for record in ranked.published() {
//!     println!("{} - {}", record.date, record.title);
//! }
//! ```

use std::path::Path;

use rayon::prelude::*;

use crate::config::ContentSettings;
use crate::derive::fill_derived;
use crate::frontmatter::split;
use crate::normalize::normalize;
use crate::rank::rank;
use crate::store::{DirectoryStore, DocumentStore};
use crate::types::{NormalizedRecord, RankedCollection, RawDocument};

/// Content Pipeline - normalizes and ranks content documents.
///
/// Holds only the settings; every run recomputes from raw input.
#[derive(Debug, Clone, Default)]
pub struct ContentPipeline {
    settings: ContentSettings,
}

impl ContentPipeline {
    /// Create a pipeline with built-in default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pipeline with explicit settings.
    #[must_use]
    pub fn with_settings(settings: ContentSettings) -> Self {
        Self { settings }
    }

    /// Settings used by this pipeline.
    #[must_use]
    pub fn settings(&self) -> &ContentSettings {
        &self.settings
    }

    /// Build the complete record for one document. Total: never fails.
    #[must_use]
    pub fn process_document(&self, document: &RawDocument) -> NormalizedRecord {
        let block = split(&document.content);
        let mut record = normalize(&document.identifier, &block, &self.settings.defaults);
        fill_derived(&mut record, &self.settings.slug, &self.settings.excerpt);
        tracing::debug!(
            identifier = %document.identifier,
            status = %record.status,
            has_metadata = !block.is_bare(),
            "normalized document"
        );
        record
    }

    /// Read and normalize every document in `store`, in listing order.
    ///
    /// A failed listing yields no records. A document that cannot be read is
    /// skipped; the rest of the feed is unaffected.
    pub fn load_records<S: DocumentStore + ?Sized>(&self, store: &S) -> Vec<NormalizedRecord> {
        let identifiers = match store.list_identifiers() {
            Ok(identifiers) => identifiers,
            Err(error) => {
                tracing::warn!(error = %error, "content listing unavailable; treating as empty");
                return Vec::new();
            }
        };

        identifiers
            .par_iter()
            .filter_map(|identifier| match store.read_content(identifier) {
                Ok(content) => Some(self.process_document(&RawDocument::new(
                    identifier.as_str(),
                    content,
                ))),
                Err(error) => {
                    tracing::warn!(
                        identifier = %identifier,
                        error = %error,
                        "skipping unreadable document"
                    );
                    None
                }
            })
            .collect()
    }

    /// Run the full pipeline over `store`.
    pub fn run<S: DocumentStore + ?Sized>(&self, store: &S) -> RankedCollection {
        let records = self.load_records(store);
        let ranked = rank(records);
        tracing::info!(
            records = ranked.len(),
            buckets = ranked.bucket_count(),
            "ranked content collection"
        );
        ranked
    }

    /// Run the pipeline over documents already in memory, in the given order.
    #[must_use]
    pub fn run_documents(&self, documents: &[RawDocument]) -> RankedCollection {
        let records: Vec<NormalizedRecord> = documents
            .par_iter()
            .map(|document| self.process_document(document))
            .collect();
        rank(records)
    }

    /// Run the pipeline over a content folder using the configured store settings.
    pub fn run_directory(&self, root: &Path) -> RankedCollection {
        let store = DirectoryStore::with_settings(root, self.settings.store.clone());
        self.run(&store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use tempfile::TempDir;

    struct FailingStore;

    impl DocumentStore for FailingStore {
        fn list_identifiers(&self) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("backend offline".to_string()))
        }

        fn read_content(&self, identifier: &str) -> Result<String, StoreError> {
            Err(StoreError::NotFound(identifier.to_string()))
        }
    }

    /// Lists one identifier it cannot read.
    struct FlakyStore(MemoryStore);

    impl DocumentStore for FlakyStore {
        fn list_identifiers(&self) -> Result<Vec<String>, StoreError> {
            let mut ids = self.0.list_identifiers()?;
            ids.push("ghost.md".to_string());
            Ok(ids)
        }

        fn read_content(&self, identifier: &str) -> Result<String, StoreError> {
            self.0.read_content(identifier)
        }
    }

    #[test]
    fn test_process_document_example() {
        let pipeline = ContentPipeline::new();
        let record = pipeline.process_document(&RawDocument::new(
            "paper-a.md",
            "---\ntitle: Paper A\nfeatured: true\ndate: 2024-05-01\n---\nAbstract text",
        ));
        assert_eq!(record.title, "Paper A");
        assert!(record.featured);
        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.body, "Abstract text");
        assert_eq!(record.status, "published");
        assert_eq!(record.slug, "paper-a");
        assert_eq!(record.excerpt, "Abstract text…");
    }

    #[test]
    fn test_unavailable_listing_is_empty() {
        let ranked = ContentPipeline::new().run(&FailingStore);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_unreadable_document_is_skipped() {
        let store = FlakyStore(MemoryStore::new().with_document("a.md", "A"));
        let ranked = ContentPipeline::new().run(&store);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.published()[0].identifier, "a.md");
    }

    #[test]
    fn test_run_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("one.md"),
            "---\ntitle: One\ndate: 2023-01-01\n---\nFirst",
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("two.md"),
            "---\ntitle: Two\ndate: 2024-01-01\nstatus: in-progress\n---\nSecond",
        )
        .unwrap();

        let ranked = ContentPipeline::new().run_directory(temp_dir.path());
        assert_eq!(ranked.published().len(), 1);
        assert_eq!(ranked.in_progress()[0].title, "Two");
    }

    #[test]
    fn test_run_documents_preserves_input_order_for_ties() {
        let docs: Vec<RawDocument> = (0..20)
            .map(|i| RawDocument::new(format!("doc{i:02}.md"), "no header"))
            .collect();
        let ranked = ContentPipeline::new().run_documents(&docs);
        let ids: Vec<&str> = ranked
            .published()
            .iter()
            .map(|r| r.identifier.as_str())
            .collect();
        let expected: Vec<String> = (0..20).map(|i| format!("doc{i:02}.md")).collect();
        assert_eq!(ids, expected);
    }
}
