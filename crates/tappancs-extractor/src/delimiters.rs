//! Canonical form of the field-label list

/// Canonicalize labels for matching: trim and lowercase each one
///
/// No deduplication; matching is against the set of strings, so repeats
/// are harmless.
pub fn canonicalize<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| canonical_label(label.as_ref()))
        .collect()
}

/// Canonical form of a single label or lookup key
///
/// The tokenizer and the table parser only ever emit this form, so every
/// vocabulary key they are looked up against goes through it too.
pub fn canonical_label(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_lowercase() {
        let labels = canonicalize(&["  Kora ", "Elvihető (előreláthatóan)", "SZŐR"]);
        assert_eq!(labels, vec!["kora", "elvihető (előreláthatóan)", "szőr"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let labels = canonicalize(&["Ivar", "ivar"]);
        assert_eq!(labels, vec!["ivar", "ivar"]);
    }

    #[test]
    fn test_canonical_label() {
        assert_eq!(canonical_label(" Kutya Fajtája "), "kutya fajtája");
        assert_eq!(canonical_label("looking_for_owner"), "looking_for_owner");
    }

    #[test]
    fn test_empty_input() {
        let labels: Vec<String> = canonicalize::<&str>(&[]);
        assert!(labels.is_empty());
    }
}
