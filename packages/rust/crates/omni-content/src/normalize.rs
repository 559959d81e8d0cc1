//! Record normalization.
//!
//! Maps a split [`MetadataBlock`] onto a fully typed [`NormalizedRecord`]
//! field by field. A missing or malformed field only ever falls back to its
//! entry in [`FieldDefaults`]; it never invalidates the rest of the record.

use crate::coerce::{FieldValue, coerce, coerce_bool};
use crate::config::FieldDefaults;
use crate::types::{MetadataBlock, NormalizedRecord};

/// Metadata keys read by the normalizer.
pub mod keys {
    /// Display title.
    pub const TITLE: &str = "title";
    /// Status bucket.
    pub const STATUS: &str = "status";
    /// Featured flag.
    pub const FEATURED: &str = "featured";
    /// Sortable date.
    pub const DATE: &str = "date";
    /// External link.
    pub const URL: &str = "url";
    /// Publication venue.
    pub const JOURNAL: &str = "journal";
    /// Explicit excerpt.
    pub const EXCERPT: &str = "excerpt";
    /// Alternate key for an explicit excerpt.
    pub const ABSTRACT: &str = "abstract";
    /// Explicit slug.
    pub const SLUG: &str = "slug";
}

/// Normalize one document's metadata.
///
/// `slug` and `excerpt` carry only the explicit metadata values here (empty
/// when absent); [`crate::derive::fill_derived`] completes them.
#[must_use]
pub fn normalize(
    identifier: &str,
    block: &MetadataBlock,
    defaults: &FieldDefaults,
) -> NormalizedRecord {
    NormalizedRecord {
        identifier: identifier.to_string(),
        title: resolve_title(identifier, block, defaults),
        status: text_or(block, keys::STATUS, &defaults.status),
        featured: coerce_bool(block.get(keys::FEATURED), defaults.featured),
        date: text_or(block, keys::DATE, &defaults.date),
        url: text_or(block, keys::URL, &defaults.url),
        journal: text_or(block, keys::JOURNAL, &defaults.journal),
        excerpt: explicit_excerpt(block).to_string(),
        slug: block.non_empty(keys::SLUG).unwrap_or_default().to_string(),
        body: block.body.clone(),
    }
}

fn resolve_title(identifier: &str, block: &MetadataBlock, defaults: &FieldDefaults) -> String {
    block
        .non_empty(keys::TITLE)
        .or_else(|| Some(identifier).filter(|id| !id.is_empty()))
        .unwrap_or(&defaults.untitled_title)
        .to_string()
}

fn text_or(block: &MetadataBlock, key: &str, default: &str) -> String {
    block.non_empty(key).unwrap_or(default).to_string()
}

/// Explicit excerpt from `excerpt`, else `abstract`. A literal `null` counts as absent.
fn explicit_excerpt(block: &MetadataBlock) -> &str {
    [keys::EXCERPT, keys::ABSTRACT]
        .into_iter()
        .filter_map(|key| block.non_empty(key))
        .find(|raw| coerce(raw) != FieldValue::Empty)
        .unwrap_or_default()
}
