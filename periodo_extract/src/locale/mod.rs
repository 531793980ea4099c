//! The per-locale configuration contract.
//!
//! [`LocaleConfiguration`] is everything the time-period extractor knows
//! about a language. [`PatternLocale`] is the data-driven implementation:
//! a compiled [`PatternCatalog`], three sub-extractors and an
//! [`AmbiguityFilter`].

use std::sync::Arc;

use periodo_core::{ExtractResult, Extractor, Meridiem, TimeOfDay};
use regex::Regex;
use tracing::info;

use crate::catalog::{CategorizedPattern, PatternCatalog, PatternSet};
use crate::error::{ConfigError, Result};
use crate::filter::AmbiguityFilter;

pub mod spanish;

/// Capabilities a locale must supply to the time-period extractor.
///
/// Most operations have defaults that delegate to [`Self::catalog`]; a
/// locale only has to provide its catalog, its sub-extractors and the
/// ambiguity filter.
pub trait LocaleConfiguration: Send + Sync {
    /// Short locale identifier, e.g. `"es"`.
    fn name(&self) -> &str;

    fn catalog(&self) -> &PatternCatalog;

    /// Whether AM/PM hints are searched before a candidate as well as after.
    fn check_both_sides(&self) -> bool;

    fn single_time_extractor(&self) -> &dyn Extractor;

    fn integer_extractor(&self) -> &dyn Extractor;

    fn timezone_extractor(&self) -> &dyn Extractor;

    /// Remove known false positives. May drop candidates, never adds or
    /// reorders them.
    fn apply_ambiguity_filter(&self, text: &str, candidates: Vec<ExtractResult>)
    -> Vec<ExtractResult>;

    fn simple_cases_patterns(&self) -> &[CategorizedPattern] {
        self.catalog().simple_cases()
    }

    fn pure_number_patterns(&self) -> &[CategorizedPattern] {
        self.catalog().pure_number()
    }

    fn find_from_token(&self, text: &str) -> Option<usize> {
        self.catalog().find_from_token(text)
    }

    fn find_between_token(&self, text: &str) -> Option<usize> {
        self.catalog().find_between_token(text)
    }

    fn is_connector_token(&self, text: &str) -> bool {
        self.catalog().is_connector_token(text)
    }

    fn is_till_token(&self, text: &str) -> bool {
        self.catalog().is_till_token(text)
    }

    fn is_day_part_anchor(&self, text: &str) -> bool {
        self.catalog().is_day_part_anchor(text)
    }

    fn time_of_day_pattern(&self) -> &Regex {
        self.catalog().time_of_day()
    }

    fn trailing_ending_pattern(&self) -> &Regex {
        self.catalog().general_ending()
    }

    fn till_pattern(&self) -> &Regex {
        self.catalog().till()
    }

    fn day_part_anchor_pattern(&self) -> Option<&Regex> {
        self.catalog().day_part_anchor()
    }

    fn resolve_meridiem(&self, text: &str) -> (Option<Meridiem>, Option<TimeOfDay>) {
        self.catalog().classify_meridiem(text)
    }
}

impl<T: LocaleConfiguration + ?Sized> LocaleConfiguration for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn catalog(&self) -> &PatternCatalog {
        (**self).catalog()
    }

    fn check_both_sides(&self) -> bool {
        (**self).check_both_sides()
    }

    fn single_time_extractor(&self) -> &dyn Extractor {
        (**self).single_time_extractor()
    }

    fn integer_extractor(&self) -> &dyn Extractor {
        (**self).integer_extractor()
    }

    fn timezone_extractor(&self) -> &dyn Extractor {
        (**self).timezone_extractor()
    }

    fn apply_ambiguity_filter(
        &self,
        text: &str,
        candidates: Vec<ExtractResult>,
    ) -> Vec<ExtractResult> {
        (**self).apply_ambiguity_filter(text, candidates)
    }

    fn simple_cases_patterns(&self) -> &[CategorizedPattern] {
        (**self).simple_cases_patterns()
    }

    fn pure_number_patterns(&self) -> &[CategorizedPattern] {
        (**self).pure_number_patterns()
    }

    fn find_from_token(&self, text: &str) -> Option<usize> {
        (**self).find_from_token(text)
    }

    fn find_between_token(&self, text: &str) -> Option<usize> {
        (**self).find_between_token(text)
    }

    fn is_connector_token(&self, text: &str) -> bool {
        (**self).is_connector_token(text)
    }

    fn is_till_token(&self, text: &str) -> bool {
        (**self).is_till_token(text)
    }

    fn is_day_part_anchor(&self, text: &str) -> bool {
        (**self).is_day_part_anchor(text)
    }

    fn time_of_day_pattern(&self) -> &Regex {
        (**self).time_of_day_pattern()
    }

    fn trailing_ending_pattern(&self) -> &Regex {
        (**self).trailing_ending_pattern()
    }

    fn till_pattern(&self) -> &Regex {
        (**self).till_pattern()
    }

    fn day_part_anchor_pattern(&self) -> Option<&Regex> {
        (**self).day_part_anchor_pattern()
    }

    fn resolve_meridiem(&self, text: &str) -> (Option<Meridiem>, Option<TimeOfDay>) {
        (**self).resolve_meridiem(text)
    }
}

/// A locale described entirely by data.
pub struct PatternLocale {
    name: String,
    catalog: PatternCatalog,
    check_both_sides: bool,
    single_time: Arc<dyn Extractor>,
    integer: Arc<dyn Extractor>,
    timezone: Arc<dyn Extractor>,
    filter: AmbiguityFilter,
}

impl std::fmt::Debug for PatternLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternLocale")
            .field("name", &self.name)
            .field("check_both_sides", &self.check_both_sides)
            .field("simple_cases", &self.catalog.simple_cases().len())
            .field("ambiguous_terms", &self.filter.terms())
            .finish_non_exhaustive()
    }
}

impl PatternLocale {
    #[must_use]
    pub fn builder(name: impl Into<String>, patterns: PatternSet) -> PatternLocaleBuilder {
        PatternLocaleBuilder::new(name, patterns)
    }

    #[must_use]
    pub fn ambiguous_terms(&self) -> &[String] {
        self.filter.terms()
    }
}

impl LocaleConfiguration for PatternLocale {
    fn name(&self) -> &str {
        &self.name
    }

    fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    fn check_both_sides(&self) -> bool {
        self.check_both_sides
    }

    fn single_time_extractor(&self) -> &dyn Extractor {
        self.single_time.as_ref()
    }

    fn integer_extractor(&self) -> &dyn Extractor {
        self.integer.as_ref()
    }

    fn timezone_extractor(&self) -> &dyn Extractor {
        self.timezone.as_ref()
    }

    fn apply_ambiguity_filter(
        &self,
        _text: &str,
        candidates: Vec<ExtractResult>,
    ) -> Vec<ExtractResult> {
        self.filter.apply(candidates)
    }
}

/// Assembles a [`PatternLocale`]; nothing is compiled until [`Self::build`].
pub struct PatternLocaleBuilder {
    name: String,
    patterns: PatternSet,
    check_both_sides: bool,
    single_time: Option<Arc<dyn Extractor>>,
    integer: Option<Arc<dyn Extractor>>,
    timezone: Option<Arc<dyn Extractor>>,
    ambiguous_terms: Vec<String>,
}

impl PatternLocaleBuilder {
    #[must_use]
    pub fn new(name: impl Into<String>, patterns: PatternSet) -> Self {
        Self {
            name: name.into(),
            patterns,
            check_both_sides: false,
            single_time: None,
            integer: None,
            timezone: None,
            ambiguous_terms: Vec::new(),
        }
    }

    /// Replace the pattern strings, keeping everything else.
    #[must_use]
    pub fn patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    #[must_use]
    pub const fn check_both_sides(mut self, enabled: bool) -> Self {
        self.check_both_sides = enabled;
        self
    }

    #[must_use]
    pub fn single_time_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.single_time = Some(extractor);
        self
    }

    #[must_use]
    pub fn integer_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.integer = Some(extractor);
        self
    }

    #[must_use]
    pub fn timezone_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.timezone = Some(extractor);
        self
    }

    #[must_use]
    pub fn ambiguous_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ambiguous_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    /// Compile the catalog and check every sub-extractor is present.
    ///
    /// # Errors
    /// Any [`ConfigError`]; no partially built locale is ever returned.
    pub fn build(self) -> Result<PatternLocale> {
        let single_time = self
            .single_time
            .ok_or(ConfigError::MissingExtractor("single_time"))?;
        let integer = self
            .integer
            .ok_or(ConfigError::MissingExtractor("integer"))?;
        let timezone = self
            .timezone
            .ok_or(ConfigError::MissingExtractor("timezone"))?;

        let catalog = PatternCatalog::new(&self.patterns)?;
        let filter = AmbiguityFilter::new(self.ambiguous_terms);

        info!(
            "Built locale '{}' (check_both_sides={}, {} ambiguous term(s))",
            self.name,
            self.check_both_sides,
            filter.terms().len()
        );

        Ok(PatternLocale {
            name: self.name,
            catalog,
            check_both_sides: self.check_both_sides,
            single_time,
            integer,
            timezone,
            filter,
        })
    }
}

/// Look up the builder for a locale identifier.
///
/// # Errors
/// [`ConfigError::UnknownLocale`] for identifiers with no shipped locale, or
/// any error building the locale's sub-extractors.
pub fn builder_for(name: &str) -> Result<PatternLocaleBuilder> {
    match name.to_lowercase().as_str() {
        "es" | "es-es" | "es-mx" | "spanish" | "español" => spanish::builder(),
        other => Err(ConfigError::UnknownLocale(other.to_string())),
    }
}
