//! Catalog of secret codes and achievement definitions.
//!
//! The catalog is the game's reference data: authored once as a TOML file,
//! loaded at startup, and never mutated afterwards. Each entry maps a code
//! key to exactly one content payload plus an optional hint.
//!
//! ## Catalog format (`codes.toml`)
//!
//! ```toml
//! [[codes]]
//! key = "Te Amo"
//! category = "Mensajes"
//! text = "Un mensaje muy especial..."
//! hint = "Dos palabras que te digo todos los días."
//!
//! [[codes]]
//! key = "sofia"
//! image = "assets/img/sofia.jpg"
//!
//! [[achievements]]
//! id = "first-code"
//! required = 1
//! message = "Primer código desbloqueado"
//! ```
//!
//! Entries keep their authored order; lookups go through the normalized form
//! of the key, so authored keys may carry spaces, casing, and accents.
//!
//! Two loading modes exist for duplicate normalized keys and entries with
//! several payload fields: strict loading rejects them with a
//! [`CatalogError`], permissive loading keeps the first occurrence (resp.
//! picks one payload by display precedence) and logs a warning.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use super::normalize::normalize;

/// Result type for catalog loading operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading a catalog.
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// Catalog file could not be read.
    Io(PathBuf, String),
    /// Catalog file could not be parsed as TOML.
    Parse(String),
    /// An entry's key normalizes to the empty string.
    EmptyKey(String),
    /// Two entries normalize to the same key.
    DuplicateKey {
        /// Key of the entry seen first.
        first: String,
        /// Key of the conflicting entry.
        second: String,
        /// The shared normalized form.
        normalized: String,
    },
    /// An entry has no content payload.
    NoContent(String),
    /// An entry has more than one content payload.
    AmbiguousContent(String),
    /// An achievement definition is unusable (empty id, duplicate id, or a
    /// zero threshold).
    BadAchievement(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(path, err) => {
                write!(f, "Failed to read '{}': {}", path.display(), err)
            }
            CatalogError::Parse(err) => write!(f, "Failed to parse catalog: {}", err),
            CatalogError::EmptyKey(key) => {
                write!(f, "Code key '{}' normalizes to the empty string", key)
            }
            CatalogError::DuplicateKey {
                first,
                second,
                normalized,
            } => write!(
                f,
                "Code keys '{}' and '{}' both normalize to '{}'",
                first, second, normalized
            ),
            CatalogError::NoContent(key) => write!(f, "Code '{}' has no content payload", key),
            CatalogError::AmbiguousContent(key) => {
                write!(f, "Code '{}' has more than one content payload", key)
            }
            CatalogError::BadAchievement(msg) => write!(f, "Bad achievement definition: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Raw catalog file as authored (the `codes.toml` schema).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    /// Code entries, in authored order.
    #[serde(default)]
    pub codes: Vec<EntryDef>,

    /// Achievement definitions.
    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
}

/// One authored code entry. Exactly one of the payload fields should be set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryDef {
    /// The code the player must type (any casing/accents/spacing).
    pub key: String,

    /// Display category; defaults to `"General"`.
    #[serde(default)]
    pub category: Option<String>,

    /// Plain text payload.
    #[serde(default)]
    pub text: Option<String>,

    /// Image reference payload.
    #[serde(default)]
    pub image: Option<String>,

    /// Audio reference payload.
    #[serde(default)]
    pub audio: Option<String>,

    /// Video embed payload.
    #[serde(default)]
    pub video: Option<String>,

    /// External link payload.
    #[serde(default)]
    pub link: Option<String>,

    /// Downloadable file payload.
    #[serde(default)]
    pub download: Option<DownloadDef>,

    /// Hint shown after repeated failed attempts.
    #[serde(default)]
    pub hint: Option<String>,
}

/// Downloadable file descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadDef {
    /// Location of the file.
    pub url: String,
    /// Suggested file name.
    pub name: String,
}

/// Achievement definition: awarded once the unlock count reaches `required`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AchievementDef {
    /// Stable identifier persisted in the achievement set.
    pub id: String,
    /// Number of unlocked codes required.
    pub required: usize,
    /// Message shown when the achievement is earned.
    pub message: String,
}

/// Content payload of a code entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text message.
    Text(String),
    /// Image reference.
    Image(String),
    /// Audio reference.
    Audio(String),
    /// Video embed reference.
    Video(String),
    /// External link.
    Link(String),
    /// Downloadable file.
    Download {
        /// Location of the file.
        url: String,
        /// Suggested file name.
        name: String,
    },
}

/// A loaded, validated code entry.
#[derive(Debug, Clone)]
pub struct CodeEntry {
    /// The key as authored, used for display and persistence.
    pub key: String,
    /// Display category.
    pub category: String,
    /// The content revealed on unlock.
    pub content: Content,
    /// Optional hint; never `Some("")`.
    pub hint: Option<String>,
    norm: String,
}

impl CodeEntry {
    /// The normalized form of the key, used for all comparisons.
    pub fn normalized_key(&self) -> &str {
        &self.norm
    }
}

impl EntryDef {
    /// Collect the payloads present on this entry, in display precedence
    /// order (the order the original game checked them in).
    fn payloads(&self) -> Vec<Content> {
        let mut found = Vec::new();
        if let Some(v) = &self.video {
            found.push(Content::Video(v.clone()));
        }
        if let Some(v) = &self.image {
            found.push(Content::Image(v.clone()));
        }
        if let Some(v) = &self.audio {
            found.push(Content::Audio(v.clone()));
        }
        if let Some(v) = &self.link {
            found.push(Content::Link(v.clone()));
        }
        if let Some(d) = &self.download {
            found.push(Content::Download {
                url: d.url.clone(),
                name: d.name.clone(),
            });
        }
        if let Some(v) = &self.text {
            found.push(Content::Text(v.clone()));
        }
        found
    }
}

/// The loaded reference dictionary. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CodeEntry>,
    /// Normalized key -> index into `entries`.
    index: HashMap<String, usize>,
    achievements: Vec<AchievementDef>,
}

impl Catalog {
    /// Parse a catalog file from TOML content.
    pub fn parse_toml(content: &str) -> Result<CatalogFile, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load and strictly validate a catalog from a TOML file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Io(path.to_path_buf(), e.to_string()))?;
        let file = Self::parse_toml(&content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_defs(file)
    }

    /// Build a catalog, rejecting duplicate normalized keys, payload-less or
    /// multi-payload entries, and unusable achievement definitions.
    pub fn from_defs(file: CatalogFile) -> CatalogResult<Self> {
        let mut catalog = Catalog::default();

        for def in file.codes {
            let norm = normalize(&def.key);
            if norm.is_empty() {
                return Err(CatalogError::EmptyKey(def.key));
            }
            if let Some(&existing) = catalog.index.get(&norm) {
                return Err(CatalogError::DuplicateKey {
                    first: catalog.entries[existing].key.clone(),
                    second: def.key,
                    normalized: norm,
                });
            }
            let mut payloads = def.payloads();
            let content = match payloads.len() {
                0 => return Err(CatalogError::NoContent(def.key)),
                1 => payloads.remove(0),
                _ => return Err(CatalogError::AmbiguousContent(def.key)),
            };
            catalog.push_entry(def.key, def.category, content, def.hint, norm);
        }

        let mut seen_ids = HashSet::new();
        for def in &file.achievements {
            if def.id.is_empty() {
                return Err(CatalogError::BadAchievement(
                    "achievement with empty id".to_string(),
                ));
            }
            if def.required == 0 {
                return Err(CatalogError::BadAchievement(format!(
                    "achievement '{}' requires zero codes",
                    def.id
                )));
            }
            if !seen_ids.insert(def.id.as_str()) {
                return Err(CatalogError::BadAchievement(format!(
                    "duplicate achievement id '{}'",
                    def.id
                )));
            }
        }
        catalog.achievements = file.achievements;

        Ok(catalog)
    }

    /// Build a catalog in permissive mode, mirroring the original game's
    /// tolerance: on duplicate normalized keys the first entry wins, entries
    /// with several payloads keep the highest-precedence one, and broken
    /// entries are skipped. Every concession is logged.
    pub fn from_defs_permissive(file: CatalogFile) -> Self {
        let mut catalog = Catalog::default();

        for def in file.codes {
            let norm = normalize(&def.key);
            if norm.is_empty() {
                warn!(key = %def.key, "skipping code whose key normalizes to nothing");
                continue;
            }
            if let Some(&existing) = catalog.index.get(&norm) {
                warn!(
                    first = %catalog.entries[existing].key,
                    second = %def.key,
                    normalized = %norm,
                    "duplicate normalized code key, keeping the first entry"
                );
                continue;
            }
            let mut payloads = def.payloads();
            if payloads.len() > 1 {
                warn!(key = %def.key, "code has several payloads, keeping the first by precedence");
            }
            let content = if payloads.is_empty() {
                warn!(key = %def.key, "skipping code with no content payload");
                continue;
            } else {
                payloads.remove(0)
            };
            catalog.push_entry(def.key, def.category, content, def.hint, norm);
        }

        let mut seen_ids = HashSet::new();
        for def in file.achievements {
            if def.id.is_empty() || def.required == 0 {
                warn!(id = %def.id, "skipping unusable achievement definition");
                continue;
            }
            if !seen_ids.insert(def.id.clone()) {
                warn!(id = %def.id, "duplicate achievement id, keeping the first definition");
                continue;
            }
            catalog.achievements.push(def);
        }

        catalog
    }

    fn push_entry(
        &mut self,
        key: String,
        category: Option<String>,
        content: Content,
        hint: Option<String>,
        norm: String,
    ) {
        let entry = CodeEntry {
            key,
            category: category.unwrap_or_else(|| "General".to_string()),
            content,
            hint: hint.filter(|h| !h.trim().is_empty()),
            norm: norm.clone(),
        };
        self.index.insert(norm, self.entries.len());
        self.entries.push(entry);
    }

    /// Look up an entry by its normalized key.
    pub fn get(&self, normalized: &str) -> Option<&CodeEntry> {
        self.index.get(normalized).map(|&i| &self.entries[i])
    }

    /// Look up an entry by any spelling of its key.
    pub fn get_by_key(&self, key: &str) -> Option<&CodeEntry> {
        self.get(&normalize(key))
    }

    /// Iterate entries in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &CodeEntry> {
        self.entries.iter()
    }

    /// Iterate normalized keys in authored order.
    pub fn normalized_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.norm.as_str())
    }

    /// Achievement definitions, in authored order.
    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    /// Number of code entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no codes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs(toml: &str) -> CatalogFile {
        Catalog::parse_toml(toml).expect("test TOML should parse")
    }

    const BASIC: &str = r#"
        [[codes]]
        key = "Te Amo"
        text = "mensaje"
        hint = "dos palabras"

        [[codes]]
        key = "sofia"
        category = "Fotos"
        image = "img/sofia.jpg"
    "#;

    #[test]
    fn test_lookup_is_normalized() {
        let catalog = Catalog::from_defs(defs(BASIC)).unwrap();
        assert_eq!(catalog.len(), 2);

        let entry = catalog.get("teamo").unwrap();
        assert_eq!(entry.key, "Te Amo");
        assert_eq!(entry.category, "General");
        assert_eq!(entry.content, Content::Text("mensaje".to_string()));

        let entry = catalog.get_by_key("SOFÍA").unwrap();
        assert_eq!(entry.category, "Fotos");
        assert_eq!(entry.content, Content::Image("img/sofia.jpg".to_string()));
    }

    #[test]
    fn test_authored_order_preserved() {
        let catalog = Catalog::from_defs(defs(BASIC)).unwrap();
        let keys: Vec<_> = catalog.normalized_keys().collect();
        assert_eq!(keys, vec!["teamo", "sofia"]);
    }

    #[test]
    fn test_strict_rejects_duplicate_normalized_keys() {
        let toml = r#"
            [[codes]]
            key = "te amo"
            text = "a"

            [[codes]]
            key = "TE-AMO"
            text = "b"
        "#;
        let err = Catalog::from_defs(defs(toml)).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateKey { .. }));
    }

    #[test]
    fn test_permissive_keeps_first_duplicate() {
        let toml = r#"
            [[codes]]
            key = "te amo"
            text = "a"

            [[codes]]
            key = "TE-AMO"
            text = "b"
        "#;
        let catalog = Catalog::from_defs_permissive(defs(toml));
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("teamo").unwrap().content,
            Content::Text("a".to_string())
        );
    }

    #[test]
    fn test_strict_rejects_multiple_payloads() {
        let toml = r#"
            [[codes]]
            key = "doble"
            text = "a"
            image = "b.jpg"
        "#;
        let err = Catalog::from_defs(defs(toml)).unwrap_err();
        assert!(matches!(err, CatalogError::AmbiguousContent(_)));
    }

    #[test]
    fn test_permissive_payload_precedence() {
        // Video outranks text, as in the original display order.
        let toml = r#"
            [[codes]]
            key = "doble"
            text = "caption"
            video = "https://example.com/embed"
        "#;
        let catalog = Catalog::from_defs_permissive(defs(toml));
        assert_eq!(
            catalog.get("doble").unwrap().content,
            Content::Video("https://example.com/embed".to_string())
        );
    }

    #[test]
    fn test_strict_rejects_missing_payload() {
        let toml = r#"
            [[codes]]
            key = "vacio"
            hint = "no content here"
        "#;
        let err = Catalog::from_defs(defs(toml)).unwrap_err();
        assert!(matches!(err, CatalogError::NoContent(_)));
    }

    #[test]
    fn test_blank_hint_becomes_none() {
        let toml = r#"
            [[codes]]
            key = "uno"
            text = "a"
            hint = "  "
        "#;
        let catalog = Catalog::from_defs(defs(toml)).unwrap();
        assert_eq!(catalog.get("uno").unwrap().hint, None);
    }

    #[test]
    fn test_download_payload() {
        let toml = r#"
            [[codes]]
            key = "regalo"
            download = { url = "files/carta.pdf", name = "carta.pdf" }
        "#;
        let catalog = Catalog::from_defs(defs(toml)).unwrap();
        assert_eq!(
            catalog.get("regalo").unwrap().content,
            Content::Download {
                url: "files/carta.pdf".to_string(),
                name: "carta.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_achievement_validation() {
        let toml = r#"
            [[codes]]
            key = "uno"
            text = "a"

            [[achievements]]
            id = "first"
            required = 0
            message = "nope"
        "#;
        let err = Catalog::from_defs(defs(toml)).unwrap_err();
        assert!(matches!(err, CatalogError::BadAchievement(_)));
    }

    #[test]
    fn test_empty_catalog_parses() {
        let catalog = Catalog::from_defs(defs("")).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.achievements().is_empty());
    }
}
