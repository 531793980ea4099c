//! Regex-backed sub-extractors for clock times, integers and timezones.
//!
//! They only locate mentions; nothing is resolved to a value.

use periodo_core::{ExtractResult, Extractor};
use regex::Regex;
use tracing::trace;

use crate::error::{ConfigError, Result};
use crate::overlap::keep_longest;

/// Tags every match of any of its patterns, longest match winning overlaps.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    kind: String,
    patterns: Vec<Regex>,
}

impl RegexExtractor {
    /// Compile `patterns` for an extractor tagging spans with `kind`.
    ///
    /// Patterns are compiled as written; put `(?i)` in a pattern that should
    /// ignore case.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] for the first pattern that
    /// does not compile.
    pub fn new<S: AsRef<str>>(kind: &str, patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|source| ConfigError::InvalidPattern {
                    name: format!("{kind} extractor"),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind: kind.to_string(),
            patterns,
        })
    }
}

impl Extractor for RegexExtractor {
    fn extract(&self, text: &str) -> Vec<ExtractResult> {
        let found: Vec<_> = self
            .patterns
            .iter()
            .flat_map(|re| re.find_iter(text))
            .filter_map(|m| ExtractResult::from_source(text, m.start(), m.end(), &self.kind))
            .collect();

        let mut spans = keep_longest(found, |s| (s.start, s.end()), |_| 0);
        spans.sort_by_key(|s| s.start);
        trace!("{} extractor found {} span(s)", self.kind, spans.len());
        spans
    }

    fn kind(&self) -> &str {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_match_wins() {
        let Ok(extractor) = RegexExtractor::new("time", &[r"\d+:\d\d", r"\d+"]) else {
            panic!("patterns should compile");
        };
        let spans = extractor.extract("at 10:30 or 7");
        let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["10:30", "7"]);
        assert!(spans.iter().all(|s| s.kind == "time"));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = RegexExtractor::new("number", &["[0-9"]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_no_match_is_empty() {
        let Ok(extractor) = RegexExtractor::new("timezone", &[r"\bGMT\b"]) else {
            panic!("patterns should compile");
        };
        assert!(extractor.extract("nada por aquí").is_empty());
        assert_eq!(extractor.kind(), "timezone");
    }
}
