//! Vocabulary configuration for the pipeline
//!
//! Everything the pipeline knows about the shelter's wording lives here:
//! the label list, the rename map, and the translation tables. These are
//! versioned data, loaded once per run and passed explicitly into each
//! component.

use crate::delimiters::canonical_label;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A literal multi-word phrase in the table block rewritten to one token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRewrite {
    /// Phrase as it appears in the table (matched case-insensitively)
    pub phrase: String,

    /// Single-token label that replaces it
    pub token: String,
}

impl PhraseRewrite {
    /// Create a new rewrite rule
    pub fn new(phrase: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            token: token.into(),
        }
    }
}

/// Static vocabulary driving extraction and normalization
///
/// # Examples
///
/// ```
/// use tappancs_extractor::Vocabulary;
///
/// let vocabulary = Vocabulary::default();
/// assert!(vocabulary.validate().is_ok());
/// assert_eq!(vocabulary.rename.get("kora").map(String::as_str), Some("age"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Field labels that may appear embedded in free text, native casing
    pub delimiters: Vec<String>,

    /// Free-text blocks scanned for labels, in overwrite order
    pub free_text_fields: Vec<String>,

    /// Fields copied verbatim from the raw record
    pub passthrough_fields: Vec<String>,

    /// Marker meaning "anytime after"; the adoptable date is cut before it
    pub adoptable_date_marker: String,

    /// Token meaning "months old"; ages containing it are divided by 12
    pub months_token: String,

    /// Cell values meaning "not available", normalized to null
    ///
    /// Matched in canonical (trimmed, lowercase) form, like rename and
    /// translation keys.
    #[serde(default)]
    pub null_markers: Vec<String>,

    /// Multi-word table labels rewritten to single tokens before splitting
    #[serde(default)]
    pub table_phrases: Vec<PhraseRewrite>,

    /// Source label → canonical field name
    ///
    /// Keys may use the same casing as `delimiters`; they are looked up in
    /// canonical form.
    pub rename: BTreeMap<String, String>,

    /// Source value → target value, applied to every text cell
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Vocabulary {
    /// Validate the vocabulary
    pub fn validate(&self) -> Result<(), String> {
        if self.delimiters.iter().all(|d| d.trim().is_empty()) {
            return Err("delimiters must contain at least one non-empty label".to_string());
        }
        if self.adoptable_date_marker.trim().is_empty() {
            return Err("adoptable_date_marker must not be empty".to_string());
        }
        if self.months_token.trim().is_empty() {
            return Err("months_token must not be empty".to_string());
        }
        for rewrite in &self.table_phrases {
            if rewrite.phrase.is_empty() {
                return Err("table phrase must not be empty".to_string());
            }
            if rewrite.token.is_empty() || rewrite.token.contains(char::is_whitespace) {
                return Err(format!(
                    "table token '{}' must be a single non-empty word",
                    rewrite.token
                ));
            }
        }
        canonical_keys("rename", &self.rename)?;
        let translation_keys = canonical_keys("translation", &self.translations)?;
        let null_markers: HashSet<String> =
            self.null_markers.iter().map(|m| canonical_label(m)).collect();

        // Translated values are matched as-is on a second pass; one that hits a
        // translation key or a null marker would be rewritten again
        for (source, target) in &self.translations {
            if translation_keys.contains_key(target.as_str()) {
                return Err(format!(
                    "translation '{}' -> '{}' chains into another translation",
                    source, target
                ));
            }
            if null_markers.contains(target.as_str()) {
                return Err(format!(
                    "translation '{}' -> '{}' produces a null marker",
                    source, target
                ));
            }
        }
        for marker in &null_markers {
            if translation_keys.contains_key(marker.as_str()) {
                return Err(format!(
                    "'{}' is both a null marker and a translation key",
                    marker
                ));
            }
        }
        Ok(())
    }

    /// Set of canonical field names (rename targets plus pass-through names)
    pub fn canonical_names(&self) -> HashSet<&str> {
        self.rename
            .values()
            .map(String::as_str)
            .chain(self.passthrough_fields.iter().map(String::as_str))
            .collect()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

/// Canonicalize the keys of a lookup map
///
/// Two keys that only differ in case or surrounding whitespace must agree on
/// their target.
fn canonical_keys<'a>(
    what: &str,
    map: &'a BTreeMap<String, String>,
) -> Result<HashMap<String, &'a str>, String> {
    let mut keys = HashMap::with_capacity(map.len());
    for (key, target) in map {
        let canonical = canonical_label(key);
        if let Some(previous) = keys.insert(canonical.clone(), target.as_str()) {
            if previous != target.as_str() {
                return Err(format!(
                    "{} keys collide on '{}' with different targets",
                    what, canonical
                ));
            }
        }
    }
    Ok(keys)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Vocabulary {
    /// Built-in vocabulary for the Tappancs shelter profile pages
    fn default() -> Self {
        Self {
            delimiters: strings(&[
                "Státusz",
                "Befogadás dátuma",
                "Elvihető (előreláthatóan)",
                "Kutya fajtája",
                "Kora",
                "Ivar",
                "Méret",
                "Szín",
                "Szőr",
                "Javasolt tartás",
                "Embereket szereti",
                "Szívféregteszt",
            ]),
            free_text_fields: strings(&["data", "trait", "behavior"]),
            passthrough_fields: strings(&["uid", "page_url", "downloaded_urls", "description"]),
            adoptable_date_marker: "után bármikor".to_string(),
            months_token: "hónapos".to_string(),
            null_markers: strings(&["nincs adat", "ismeretlen", "not available"]),
            table_phrases: vec![
                PhraseRewrite::new("Gazdit keres", "looking_for_owner"),
                PhraseRewrite::new("Gazdira talált", "found_owner"),
            ],
            rename: pairs(&[
                ("státusz", "status"),
                ("befogadás dátuma", "admission_date"),
                ("elvihető (előreláthatóan)", "adoptable_date"),
                ("kutya fajtája", "breed"),
                ("kora", "age"),
                ("ivar", "gender"),
                ("szín", "color"),
                ("szőr", "coat"),
                ("javasolt tartás", "recommended_environment"),
                ("embereket szereti", "people_friendly"),
                ("looking_for_owner", "looking_for_owner"),
                ("found_owner", "found_owner"),
                ("méret", "size"),
                ("szívféregteszt", "heartworm_test"),
            ]),
            translations: pairs(&[
                // yes/no
                ("igen", "yes"),
                ("nem", "no"),
                // gender
                ("kan", "male"),
                ("szuka", "female"),
                ("ivartalanított kan", "neutered male"),
                ("ivartalanított szuka", "spayed female"),
                // adoption status
                ("gazdit keres", "available"),
                ("gazdira talált", "adopted"),
                ("örökbe fogadva", "adopted"),
                ("foglalt", "reserved"),
                ("ideiglenes befogadónál", "in foster care"),
                // breed mixes
                ("keverék", "mixed breed"),
                ("németjuhász keverék", "german shepherd mix"),
                ("labrador keverék", "labrador mix"),
                ("husky keverék", "husky mix"),
                ("tacskó keverék", "dachshund mix"),
                ("terrier keverék", "terrier mix"),
                ("vizsla keverék", "vizsla mix"),
                ("puli keverék", "puli mix"),
                ("pumi keverék", "pumi mix"),
                ("beagle keverék", "beagle mix"),
                ("border collie keverék", "border collie mix"),
                // color
                ("fekete", "black"),
                ("fehér", "white"),
                ("barna", "brown"),
                ("vörös", "red"),
                ("szürke", "grey"),
                ("cirmos", "brindle"),
                ("zsemle", "fawn"),
                ("tarka", "spotted"),
                ("trikolor", "tricolor"),
                ("fekete-fehér", "black and white"),
                ("fekete-cser", "black and tan"),
                ("barna-fehér", "brown and white"),
                // coat
                ("rövid", "short"),
                ("félhosszú", "medium length"),
                ("hosszú", "long"),
                ("drótszőrű", "wire-haired"),
                ("göndör", "curly"),
                // size
                ("kicsi", "small"),
                ("kistestű", "small"),
                ("közepes", "medium"),
                ("közepes testű", "medium"),
                ("nagy", "large"),
                ("nagytestű", "large"),
                ("óriás", "giant"),
                // recommended environment
                ("lakás", "apartment"),
                ("kert", "garden"),
                ("lakás vagy kert", "apartment or garden"),
                ("kertes ház", "house with garden"),
                ("udvar", "yard"),
                // heartworm test
                ("negatív", "negative"),
                ("pozitív", "positive"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_is_valid() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.validate().is_ok());
    }

    #[test]
    fn test_default_rename_keys_are_canonical_labels() {
        // Rename keys must match what the tokenizer produces: trimmed, lowercase
        let vocabulary = Vocabulary::default();
        for key in vocabulary.rename.keys() {
            assert_eq!(key, &key.trim().to_lowercase());
        }
    }

    #[test]
    fn test_empty_delimiters_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.delimiters = vec!["  ".to_string()];
        assert!(vocabulary.validate().is_err());
    }

    #[test]
    fn test_multi_word_table_token_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.table_phrases.push(PhraseRewrite::new("Elvitték", "went home"));
        assert!(vocabulary.validate().is_err());
    }

    #[test]
    fn test_translation_chain_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.translations.insert("hím".to_string(), "kan".to_string());
        let err = vocabulary.validate().unwrap_err();
        assert!(err.contains("chains"));
    }

    #[test]
    fn test_translation_into_null_marker_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary
            .translations
            .insert("n/a".to_string(), "not available".to_string());
        let err = vocabulary.validate().unwrap_err();
        assert!(err.contains("null marker"));
    }

    #[test]
    fn test_mixed_case_null_marker_overlap_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.null_markers.push("Igen".to_string());
        assert!(vocabulary.validate().is_err());
    }

    #[test]
    fn test_colliding_rename_keys_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.rename.insert("Kora".to_string(), "age_text".to_string());
        let err = vocabulary.validate().unwrap_err();
        assert!(err.contains("collide"));

        // Same target is harmless
        vocabulary.rename.insert("Kora".to_string(), "age".to_string());
        assert!(vocabulary.validate().is_ok());
    }

    #[test]
    fn test_null_marker_overlap_rejected() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.null_markers.push("igen".to_string());
        assert!(vocabulary.validate().is_err());
    }

    #[test]
    fn test_canonical_names() {
        let vocabulary = Vocabulary::default();
        let names = vocabulary.canonical_names();
        assert!(names.contains("age"));
        assert!(names.contains("downloaded_urls"));
        assert!(!names.contains("kora"));
    }

    #[test]
    fn test_toml_round_trip() {
        let vocabulary = Vocabulary::default();
        let toml_str = vocabulary.to_toml().unwrap();
        let parsed = Vocabulary::from_toml(&toml_str).unwrap();

        assert_eq!(vocabulary, parsed);
    }

    #[test]
    fn test_minimal_toml() {
        let toml_str = r#"
            delimiters = ["Kora", "Ivar"]
            free_text_fields = ["data"]
            passthrough_fields = ["uid"]
            adoptable_date_marker = "után bármikor"
            months_token = "hónapos"

            [rename]
            kora = "age"
            ivar = "gender"

            [translations]
            kan = "male"
        "#;
        let vocabulary = Vocabulary::from_toml(toml_str).unwrap();

        assert!(vocabulary.validate().is_ok());
        assert!(vocabulary.table_phrases.is_empty());
        assert!(vocabulary.null_markers.is_empty());
        assert_eq!(vocabulary.translations.get("kan").map(String::as_str), Some("male"));
    }
}
