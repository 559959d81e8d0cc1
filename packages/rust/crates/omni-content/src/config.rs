//! Content settings loader for omni-content.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/content.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-content/content.yaml`
//!
//! Merge precedence is user over system, then built-in defaults fill any
//! field neither file sets. Loading never fails: unreadable or invalid files
//! are logged and ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::STATUS_PUBLISHED;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/content.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-content/content.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";

/// Title used when neither metadata nor identifier supply one.
pub const DEFAULT_UNTITLED_TITLE: &str = "Untitled";
/// Excerpt truncation length in characters.
pub const DEFAULT_EXCERPT_MAX_CHARS: usize = 140;
/// Marker appended to every derived excerpt.
pub const DEFAULT_EXCERPT_ELLIPSIS: &str = "\u{2026}";
/// Size limit for a single document read by the directory store.
pub const DEFAULT_STORE_MAX_BYTES: u64 = 1024 * 1024;

/// Per-field defaults applied by the normalizer, one entry per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefaults {
    /// Title when metadata and identifier are both empty.
    pub untitled_title: String,
    /// Status when metadata has none.
    pub status: String,
    /// Featured flag when metadata has none.
    pub featured: bool,
    /// Date when metadata has none.
    pub date: String,
    /// URL when metadata has none.
    pub url: String,
    /// Journal when metadata has none.
    pub journal: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            untitled_title: DEFAULT_UNTITLED_TITLE.to_string(),
            status: STATUS_PUBLISHED.to_string(),
            featured: false,
            date: String::new(),
            url: String::new(),
            journal: String::new(),
        }
    }
}

/// Excerpt derivation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcerptSettings {
    /// Number of leading body characters kept.
    pub max_chars: usize,
    /// Appended after the truncated body, always.
    pub ellipsis: String,
}

impl Default for ExcerptSettings {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_EXCERPT_MAX_CHARS,
            ellipsis: DEFAULT_EXCERPT_ELLIPSIS.to_string(),
        }
    }
}

/// Slug derivation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugSettings {
    /// Known file-type suffixes stripped from identifiers, first match wins.
    pub suffixes: Vec<String>,
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            suffixes: vec![".mdx".to_string(), ".md".to_string()],
        }
    }
}

/// Directory store limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// File suffixes the store lists.
    pub suffixes: Vec<String>,
    /// Per-file size limit in bytes.
    pub max_bytes: u64,
    /// Directory depth walked; `1` lists only the folder itself.
    pub max_depth: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            suffixes: vec![".md".to_string(), ".mdx".to_string()],
            max_bytes: DEFAULT_STORE_MAX_BYTES,
            max_depth: 1,
        }
    }
}

/// Resolved settings for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSettings {
    /// Normalizer defaults.
    pub defaults: FieldDefaults,
    /// Excerpt rules.
    pub excerpt: ExcerptSettings,
    /// Slug rules.
    pub slug: SlugSettings,
    /// Directory store limits.
    pub store: StoreSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ContentSettingsFile {
    #[serde(default)]
    defaults: DefaultsFile,
    #[serde(default)]
    excerpt: ExcerptFile,
    #[serde(default)]
    slug: SlugFile,
    #[serde(default)]
    store: StoreFile,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DefaultsFile {
    untitled_title: Option<String>,
    status: Option<String>,
    featured: Option<bool>,
    date: Option<String>,
    url: Option<String>,
    journal: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ExcerptFile {
    max_chars: Option<usize>,
    ellipsis: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SlugFile {
    suffixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoreFile {
    suffixes: Option<Vec<String>>,
    max_bytes: Option<u64>,
    max_depth: Option<usize>,
}

impl ContentSettingsFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            defaults: self.defaults.merge(overlay.defaults),
            excerpt: self.excerpt.merge(overlay.excerpt),
            slug: self.slug.merge(overlay.slug),
            store: self.store.merge(overlay.store),
        }
    }

    fn resolve(self) -> ContentSettings {
        let base = ContentSettings::default();
        ContentSettings {
            defaults: FieldDefaults {
                untitled_title: self
                    .defaults
                    .untitled_title
                    .unwrap_or(base.defaults.untitled_title),
                status: self.defaults.status.unwrap_or(base.defaults.status),
                featured: self.defaults.featured.unwrap_or(base.defaults.featured),
                date: self.defaults.date.unwrap_or(base.defaults.date),
                url: self.defaults.url.unwrap_or(base.defaults.url),
                journal: self.defaults.journal.unwrap_or(base.defaults.journal),
            },
            excerpt: ExcerptSettings {
                max_chars: self.excerpt.max_chars.unwrap_or(base.excerpt.max_chars),
                ellipsis: self.excerpt.ellipsis.unwrap_or(base.excerpt.ellipsis),
            },
            slug: SlugSettings {
                suffixes: self.slug.suffixes.unwrap_or(base.slug.suffixes),
            },
            store: StoreSettings {
                suffixes: self.store.suffixes.unwrap_or(base.store.suffixes),
                max_bytes: self.store.max_bytes.unwrap_or(base.store.max_bytes),
                max_depth: self.store.max_depth.unwrap_or(base.store.max_depth),
            },
        }
    }
}

impl DefaultsFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            untitled_title: overlay.untitled_title.or(self.untitled_title),
            status: overlay.status.or(self.status),
            featured: overlay.featured.or(self.featured),
            date: overlay.date.or(self.date),
            url: overlay.url.or(self.url),
            journal: overlay.journal.or(self.journal),
        }
    }
}

impl ExcerptFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            max_chars: overlay.max_chars.or(self.max_chars),
            ellipsis: overlay.ellipsis.or(self.ellipsis),
        }
    }
}

impl SlugFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            suffixes: overlay.suffixes.or(self.suffixes),
        }
    }
}

impl StoreFile {
    fn merge(self, overlay: Self) -> Self {
        Self {
            suffixes: overlay.suffixes.or(self.suffixes),
            max_bytes: overlay.max_bytes.or(self.max_bytes),
            max_depth: overlay.max_depth.or(self.max_depth),
        }
    }
}

/// Load merged content settings (user overrides system).
///
/// `conf_home` replaces `PRJ_CONFIG_HOME` as the user config directory
/// (CLI `--conf`); a relative path resolves against the project root.
#[must_use]
pub fn load_content_settings(conf_home: Option<&Path>) -> ContentSettings {
    let (system_path, user_path) = content_settings_paths(conf_home);
    load_content_settings_from_paths(&system_path, &user_path)
}

/// System and user settings file locations.
#[must_use]
pub fn content_settings_paths(conf_home: Option<&Path>) -> (PathBuf, PathBuf) {
    let root = env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let conf_home = conf_home
        .filter(|path| !path.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    // `join` keeps an absolute `conf_home` as is.
    (
        root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH),
        root.join(conf_home).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH),
    )
}

/// Load settings from explicit system and user paths.
#[must_use]
pub fn load_content_settings_from_paths(system: &Path, user: &Path) -> ContentSettings {
    load_one(system).merge(load_one(user)).resolve()
}

/// Parse settings from a YAML string, falling back to defaults on error.
#[must_use]
pub fn parse_content_settings(raw: &str) -> ContentSettings {
    if raw.trim().is_empty() {
        return ContentSettings::default();
    }
    match serde_yaml::from_str::<ContentSettingsFile>(raw) {
        Ok(file) => file.resolve(),
        Err(error) => {
            tracing::warn!(error = %error, "failed to parse content settings; using defaults");
            ContentSettings::default()
        }
    }
}

fn load_one(path: &Path) -> ContentSettingsFile {
    if !path.exists() {
        return ContentSettingsFile::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read content settings file; ignoring"
            );
            return ContentSettingsFile::default();
        }
    };
    // An empty file deserializes as YAML null.
    if raw.trim().is_empty() {
        return ContentSettingsFile::default();
    }
    match serde_yaml::from_str::<ContentSettingsFile>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse content settings yaml; ignoring file"
            );
            ContentSettingsFile::default()
        }
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
