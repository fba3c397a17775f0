use serde::Deserialize;

/// Words that carry no topical signal in inspection headings.
pub const DEFAULT_STOP_WORDS: [&str; 9] = [
    "the", "and", "for", "with", "this", "that", "from", "have", "has",
];

/// Scoring constants for the relevance ranker.
///
/// `Default` reproduces the canonical weights. Every field can be overridden
/// from configuration; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Added per heading token found in the display name.
    pub name_match: u32,
    /// Added per heading token found in the description.
    pub description_match: u32,
    /// Added per tag that appears verbatim in the heading.
    pub exact_tag: u32,
    /// Added per (tag, token) pair where either contains the other.
    pub partial_tag: u32,
    /// Tokens shorter than this (in chars) are ignored.
    pub min_token_len: usize,
    pub stop_words: Vec<String>,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            name_match: 2,
            description_match: 1,
            exact_tag: 5,
            partial_tag: 3,
            min_token_len: 3,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RelevanceWeights {
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.iter().any(|w| w == token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let w = RelevanceWeights::default();
        assert_eq!(
            (w.name_match, w.description_match, w.exact_tag, w.partial_tag),
            (2, 1, 5, 3)
        );
        assert_eq!(w.min_token_len, 3);
        assert!(w.is_stop_word("the"));
        assert!(!w.is_stop_word("roof"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let w: RelevanceWeights = serde_json::from_str(r#"{"exact_tag": 8}"#).unwrap();
        assert_eq!(w.exact_tag, 8);
        assert_eq!(w.partial_tag, 3);
        assert_eq!(w.stop_words.len(), DEFAULT_STOP_WORDS.len());
    }
}
