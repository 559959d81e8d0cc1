//! Slug and excerpt derivation for records that do not supply them.

use crate::config::{ExcerptSettings, SlugSettings};
use crate::types::NormalizedRecord;

/// Strip the first matching known suffix from `identifier`.
///
/// Two identifiers may map to the same slug; callers that need unique slugs
/// must deduplicate themselves.
#[must_use]
pub fn derive_slug<'a>(identifier: &'a str, settings: &SlugSettings) -> &'a str {
    settings
        .suffixes
        .iter()
        .find_map(|suffix| identifier.strip_suffix(suffix.as_str()))
        .unwrap_or(identifier)
}

/// Return `explicit` when non-empty, else the first `max_chars` characters of
/// `body` followed by the ellipsis.
///
/// `max_chars` counts `char`s (Unicode scalar values), not UTF-16 code units:
/// an emoji outside the Basic Multilingual Plane counts once, so a body of
/// emoji keeps 140 of them where a UTF-16 cut would keep 70. The cut never
/// splits a code point.
///
/// The ellipsis is appended even when `body` is shorter than `max_chars`.
#[must_use]
pub fn derive_excerpt(body: &str, explicit: Option<&str>, settings: &ExcerptSettings) -> String {
    if let Some(explicit) = explicit.filter(|e| !e.is_empty()) {
        return explicit.to_string();
    }
    let mut excerpt: String = body.chars().take(settings.max_chars).collect();
    excerpt.push_str(&settings.ellipsis);
    excerpt
}

/// Fill `slug` and `excerpt` on a normalized record where they are empty.
pub fn fill_derived(
    record: &mut NormalizedRecord,
    slug: &SlugSettings,
    excerpt: &ExcerptSettings,
) {
    if record.slug.is_empty() {
        record.slug = derive_slug(&record.identifier, slug).to_string();
    }
    record.excerpt = derive_excerpt(&record.body, Some(record.excerpt.as_str()), excerpt);
}
