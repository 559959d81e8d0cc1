//! Content Types
//!
//! Defines the value records that flow through one pipeline run:
//! raw documents from a store, split metadata blocks, normalized records,
//! and the status-bucketed collection handed to the renderer.

use std::collections::{BTreeMap, HashMap};

use schemars::JsonSchema as SchemarsJsonSchema;
use serde::{Deserialize, Serialize};

/// Status bucket the presentation layer renders as finished work.
pub const STATUS_PUBLISHED: &str = "published";

/// Status bucket the presentation layer renders as ongoing work.
pub const STATUS_IN_PROGRESS: &str = "in-progress";

/// One source item as yielded by a document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Store-level identifier (usually the file name).
    pub identifier: String,
    /// Full raw text, metadata block included.
    pub content: String,
}

impl RawDocument {
    /// Create a new `RawDocument`.
    #[must_use]
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

/// Output of the metadata splitter.
///
/// When no well-formed block is found `fields` is empty and `body` holds the
/// whole (trimmed) content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Raw `key: value` pairs, values already quote-stripped.
    pub fields: HashMap<String, String>,
    /// Prose following the closing delimiter.
    pub body: String,
}

impl MetadataBlock {
    /// Raw value for `key`, if the block carried it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Raw value for `key` when present and non-empty.
    #[must_use]
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// True when the splitter found no metadata fields.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A fully populated record ready for display.
///
/// Every field is always present; absent or malformed metadata resolves to
/// the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize, SchemarsJsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    /// Store identifier this record was built from
    pub identifier: String,
    /// Display title
    pub title: String,
    /// Status bucket key
    pub status: String,
    /// Sorts ahead of non-featured records in its bucket
    pub featured: bool,
    /// Lexicographically sortable date (`YYYY-MM-DD`) or empty
    #[serde(default)]
    pub date: String,
    /// External link, possibly empty
    #[serde(default)]
    pub url: String,
    /// Publication venue, possibly empty
    #[serde(default)]
    pub journal: String,
    /// Preview text
    #[serde(default)]
    pub excerpt: String,
    /// Addressing key
    pub slug: String,
    /// Remaining prose
    #[serde(default)]
    pub body: String,
}

impl NormalizedRecord {
    /// Create a record with the given identifier and title and empty fields elsewhere.
    #[must_use]
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            status: STATUS_PUBLISHED.to_string(),
            featured: false,
            date: String::new(),
            url: String::new(),
            journal: String::new(),
            excerpt: String::new(),
            slug: String::new(),
            body: String::new(),
        }
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the date.
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the featured flag.
    #[must_use]
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// True when the record belongs to the published bucket.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLISHED
    }
}

/// Records grouped by status, each bucket in rank order.
///
/// Bucket keys iterate in lexical order; only the contents of each bucket
/// carry a contractual order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RankedCollection {
    buckets: BTreeMap<String, Vec<NormalizedRecord>>,
}

impl RankedCollection {
    pub(crate) fn from_buckets(buckets: BTreeMap<String, Vec<NormalizedRecord>>) -> Self {
        Self { buckets }
    }

    /// Ordered records for `status`, empty when no record carries it.
    #[must_use]
    pub fn bucket(&self, status: &str) -> &[NormalizedRecord] {
        self.buckets.get(status).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ordered published records.
    #[must_use]
    pub fn published(&self) -> &[NormalizedRecord] {
        self.bucket(STATUS_PUBLISHED)
    }

    /// Ordered in-progress records.
    #[must_use]
    pub fn in_progress(&self) -> &[NormalizedRecord] {
        self.bucket(STATUS_IN_PROGRESS)
    }

    /// Status keys that have at least one record.
    pub fn statuses(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Iterate `(status, records)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NormalizedRecord])> {
        self.buckets
            .iter()
            .map(|(status, records)| (status.as_str(), records.as_slice()))
    }

    /// Number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of records across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True when there are no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Flatten into all records, bucket by bucket.
    #[must_use]
    pub fn into_records(self) -> Vec<NormalizedRecord> {
        self.buckets.into_values().flatten().collect()
    }
}
