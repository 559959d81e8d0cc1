//! Frontmatter Splitting
//!
//! Separates a leading `---` delimited metadata block from the document body
//! and reads its `key: value` lines. The splitter is total: malformed or
//! missing blocks degrade to "no metadata, whole content is body".
//!
//! ```text
//! ---
//! title: "Paper A"
//! featured: true
//! ---
//! Abstract text
//! ```

use std::collections::HashMap;

use crate::types::MetadataBlock;

/// Delimiter that opens and closes a metadata block.
pub const DELIMITER: &str = "---";

const CLOSING_MARKER: &str = "\n---";

/// Extract the raw metadata text and the body from `content`.
///
/// Returns `(metadata_text, body)`, both trimmed. `metadata_text` is empty
/// when the content does not open with the delimiter or never closes it.
#[must_use]
pub fn extract_frontmatter(content: &str) -> (&str, &str) {
    if !content.starts_with(DELIMITER) {
        return ("", content.trim());
    }

    // Closing marker is searched strictly after the opening delimiter.
    let Some(offset) = content[DELIMITER.len()..].find(CLOSING_MARKER) else {
        return ("", content.trim());
    };
    let end = DELIMITER.len() + offset;

    let metadata = content[DELIMITER.len()..=end].trim();
    let body = content[end + CLOSING_MARKER.len()..].trim();
    (metadata, body)
}

/// Parse raw metadata text into `key -> value` pairs.
///
/// The first `:` on a line separates key from value. Lines without a colon
/// are skipped, and the last occurrence of a duplicate key wins.
#[must_use]
pub fn parse_fields(metadata: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in metadata.lines() {
        let Some((key, raw)) = line.split_once(':') else {
            continue;
        };
        fields.insert(key.trim().to_string(), strip_quotes(raw.trim()).to_string());
    }
    fields
}

/// Strip one leading and one trailing double quote, each if present.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    raw.strip_suffix('"').unwrap_or(raw)
}

/// Split `content` into a [`MetadataBlock`]. Never fails.
#[must_use]
pub fn split(content: &str) -> MetadataBlock {
    let (metadata, body) = extract_frontmatter(content);
    let fields = if metadata.is_empty() {
        HashMap::new()
    } else {
        parse_fields(metadata)
    };
    MetadataBlock {
        fields,
        body: body.to_string(),
    }
}
