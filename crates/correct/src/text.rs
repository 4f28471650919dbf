use crate::config::KeywordRule;

/// Lower-cased message text with keyword lookups.
///
/// A term matches when it occurs at the start of a word: `"malfunction"` hits
/// "malfunctioning" but `"car"` does not hit "scar". Multi-word terms such as
/// `"running low"` match as a phrase.
#[derive(Debug, Clone)]
pub(crate) struct MessageText {
    lower: String,
}

impl MessageText {
    pub(crate) fn new(raw: &str) -> Self {
        Self {
            lower: raw.to_lowercase(),
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.lower
    }

    pub(crate) fn mentions(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return false;
        }
        self.lower.match_indices(term.as_str()).any(|(idx, _)| {
            self.lower[..idx]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
    }

    pub(crate) fn mentions_any(&self, terms: &[String]) -> bool {
        terms.iter().any(|t| self.mentions(t))
    }

    pub(crate) fn first_rule<'a>(&self, rules: &'a [KeywordRule]) -> Option<&'a str> {
        rules
            .iter()
            .find(|r| self.mentions_any(&r.terms))
            .map(|r| r.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_at_word_start_only() {
        let text = MessageText::new("Air compressor MALFUNCTIONING near the scar");
        assert!(text.mentions("malfunction"));
        assert!(text.mentions("compressor"));
        assert!(!text.mentions("car"));
        assert!(!text.mentions("pressor"));
    }

    #[test]
    fn phrase_terms() {
        let text = MessageText::new("Fuel supply running low, please order");
        assert!(text.mentions("running low"));
        assert!(!text.mentions("running high"));
    }

    #[test]
    fn blank_term_never_matches() {
        assert!(!MessageText::new("anything").mentions("  "));
    }

    #[test]
    fn first_rule_respects_order() {
        let rules = vec![
            KeywordRule {
                value: "Equipment".into(),
                terms: vec!["generator".into()],
            },
            KeywordRule {
                value: "Supply".into(),
                terms: vec!["fuel".into()],
            },
        ];
        let text = MessageText::new("Generator fuel line cracked");
        assert_eq!(text.first_rule(&rules), Some("Equipment"));
        assert_eq!(MessageText::new("nothing here").first_rule(&rules), None);
    }
}
