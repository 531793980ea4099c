//! Locale-supplied exclusion of known false positives.

use periodo_core::ExtractResult;
use tracing::debug;

/// Drops candidates whose text is exactly one of a list of ambiguous terms.
///
/// Spanish "mañana" means both "tomorrow" and "morning"; on its own it is far
/// more often the former, so an isolated "mañana" is not a time period. The
/// comparison is ordinal and on the whole candidate text: "mañana a las 3"
/// survives.
#[derive(Debug, Clone, Default)]
pub struct AmbiguityFilter {
    terms: Vec<String>,
}

impl AmbiguityFilter {
    #[must_use]
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        filter.extend(terms);
        filter
    }

    /// Add more terms, skipping blanks and duplicates.
    pub fn extend<I, S>(&mut self, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for term in terms {
            let term = term.into();
            if !term.is_empty() && !self.terms.contains(&term) {
                self.terms.push(term);
            }
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Remove matching candidates, preserving the order of the rest.
    #[must_use]
    pub fn apply(&self, candidates: Vec<ExtractResult>) -> Vec<ExtractResult> {
        let before = candidates.len();
        let kept: Vec<_> = candidates
            .into_iter()
            .filter(|c| !self.terms.iter().any(|t| *t == c.text))
            .collect();
        if kept.len() != before {
            debug!("Ambiguity filter removed {} candidate(s)", before - kept.len());
        }
        kept
    }
}
