//! Tests for normalize and derive modules - typed records with defaults.

use omni_content::{
    ContentPipeline, ExcerptSettings, FieldDefaults, RawDocument, SlugSettings, derive_excerpt,
    derive_slug, normalize, split,
};

fn process(identifier: &str, content: &str) -> omni_content::NormalizedRecord {
    ContentPipeline::new().process_document(&RawDocument::new(identifier, content))
}

#[test]
fn test_paper_with_metadata() {
    let record = process(
        "paper-a.md",
        "---\ntitle: Paper A\nfeatured: true\ndate: 2024-05-01\n---\nAbstract text",
    );
    assert_eq!(record.title, "Paper A");
    assert!(record.featured);
    assert_eq!(record.date, "2024-05-01");
    assert_eq!(record.body, "Abstract text");
    assert_eq!(record.status, "published");
}

#[test]
fn test_prose_without_header() {
    let record = process("notes.md", "Just some prose, no header.");
    assert_eq!(record.title, "notes.md");
    assert_eq!(record.status, "published");
    assert!(!record.featured);
    assert_eq!(record.date, "");
    assert_eq!(record.url, "");
    assert_eq!(record.body, "Just some prose, no header.");
    assert_eq!(record.slug, "notes");
    assert_eq!(record.excerpt, "Just some prose, no header.…");
}

#[test]
fn test_degenerate_inputs_are_fully_populated() {
    for (identifier, content) in [
        ("", ""),
        ("x.md", "---"),
        ("x.md", "---\n:\n---\n"),
        ("x.md", "---\nfeatured: 1\nstatus:\ntitle: \"\"\n---\n"),
        ("x.md", "\u{0}\u{1}\u{2}binary-looking"),
    ] {
        let record = process(identifier, content);
        assert!(!record.title.is_empty(), "{content:?}");
        assert!(!record.status.is_empty(), "{content:?}");
        assert!(!record.excerpt.is_empty(), "{content:?}");
        assert!(!record.featured, "{content:?}");
    }
    assert_eq!(process("", "").title, "Untitled");
    assert_eq!(process("", "").slug, "");
}

#[test]
fn test_normalize_twice_is_identical() {
    let block = split("---\ntitle: Twice\njournal: ACM\nurl: https://x\n---\nbody");
    let defaults = FieldDefaults::default();
    let first = normalize("twice.md", &block, &defaults);
    let second = normalize("twice.md", &block, &defaults);
    assert_eq!(first, second);
}

#[test]
fn test_explicit_slug_and_excerpt_are_kept() {
    let record = process(
        "2024-talk.md",
        "---\nslug: keynote\nexcerpt: \"A short teaser\"\n---\nA much longer body",
    );
    assert_eq!(record.slug, "keynote");
    assert_eq!(record.excerpt, "A short teaser");
}

#[test]
fn test_excerpt_truncates_long_body() {
    let body = "a".repeat(300);
    let record = process("long.md", &body);
    assert_eq!(record.excerpt, format!("{}…", "a".repeat(140)));
}

// Short bodies also end in an ellipsis; this mirrors the published site.
#[test]
fn test_short_body_excerpt_keeps_ellipsis() {
    let excerpt = derive_excerpt("tiny", None, &ExcerptSettings::default());
    assert_eq!(excerpt, "tiny…");
}

#[test]
fn test_custom_excerpt_settings() {
    let settings = ExcerptSettings {
        max_chars: 3,
        ellipsis: "...".to_string(),
    };
    assert_eq!(derive_excerpt("abcdef", None, &settings), "abc...");
}

#[test]
fn test_slug_suffixes_are_configurable() {
    let settings = SlugSettings {
        suffixes: vec![".txt".to_string()],
    };
    assert_eq!(derive_slug("notes.txt", &settings), "notes");
    assert_eq!(derive_slug("notes.md", &settings), "notes.md");
}
