//! Omni-Content - Frontmatter content feed for the portfolio site.
//!
//! Turns loosely structured text documents (a metadata block followed by
//! prose) into typed records, buckets them by status and ranks each bucket.
//!
//! # Architecture
//!
//! ```text
//! omni-content/src/
//! ├── lib.rs           # Main module and exports
//! ├── frontmatter.rs   # Metadata block splitter
//! ├── coerce.rs        # Scalar coercion (true/false/null)
//! ├── types.rs         # RawDocument, MetadataBlock, NormalizedRecord, RankedCollection
//! ├── config.rs        # Field defaults and content settings loader
//! ├── normalize.rs     # MetadataBlock -> NormalizedRecord
//! ├── derive.rs        # Slug and excerpt derivation
//! ├── rank.rs          # Status buckets and rank order
//! ├── store.rs         # DocumentStore trait, directory and memory stores
//! ├── error.rs         # StoreError enum
//! └── pipeline.rs      # ContentPipeline (store -> ranked buckets)
//! ```
//!
//! # Document Format
//!
//! ```text
//! ---
//! title: "Phishing URL Detection with Lightweight NLP"
//! journal: IEEE Access
//! date: 2024-05-01
//! status: published
//! featured: true
//! url: https://doi.org/10.1109/example
//! ---
//! Abstract text...
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod coerce;
pub mod config;
pub mod derive;
pub mod error;
pub mod frontmatter;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod store;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use coerce::{FieldValue, coerce};
pub use config::{
    ContentSettings, ExcerptSettings, FieldDefaults, SlugSettings, StoreSettings,
    content_settings_paths, load_content_settings, load_content_settings_from_paths,
    parse_content_settings,
};
pub use derive::{derive_excerpt, derive_slug};
pub use error::StoreError;
pub use frontmatter::{extract_frontmatter, split};
pub use normalize::normalize;
pub use pipeline::ContentPipeline;
pub use rank::{compare_records, rank};
pub use store::{DirectoryStore, DocumentStore, MemoryStore, read_text_safe};
pub use types::{
    MetadataBlock, NormalizedRecord, RankedCollection, RawDocument, STATUS_IN_PROGRESS,
    STATUS_PUBLISHED,
};

// ============================================================================
// JSON Schema Generation
// ============================================================================

/// Generate JSON Schema for `NormalizedRecord`.
#[must_use]
pub fn normalized_record_schema() -> String {
    let schema = schemars::schema_for!(NormalizedRecord);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

// ============================================================================
// Version
// ============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
