//! Compiled, categorized pattern tables.
//!
//! A locale describes its vocabulary as a [`PatternSet`] of plain strings so
//! it can be shipped in code or loaded from a JSON file. [`PatternCatalog`]
//! compiles that set once; after construction nothing is ever recompiled or
//! revalidated.

use periodo_core::{Meridiem, PeriodCategory, TimeOfDay};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, Result};

/// A day-part word and the part of the day it names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPartDef {
    pub pattern: String,
    pub part: TimeOfDay,
}

impl DayPartDef {
    #[must_use]
    pub fn new(pattern: impl Into<String>, part: TimeOfDay) -> Self {
        Self {
            pattern: pattern.into(),
            part,
        }
    }
}

/// Uncompiled pattern strings for one locale.
///
/// Simple-case patterns may be left blank when a locale has no such
/// construction; every other pattern is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternSet {
    #[serde(default)]
    pub pure_number_from_to: String,
    #[serde(default)]
    pub pure_number_between_and: String,
    #[serde(default)]
    pub specific_time_from_to: String,
    #[serde(default)]
    pub specific_time_between_and: String,

    /// Day-part hint: "por la tarde", "mañana".
    pub time_of_day: String,
    /// Must match the whole remainder of the text when nothing meaningful
    /// follows ("", ".", "!").
    pub general_ending: String,
    /// Range-closing token: "a", "hasta", "-".
    pub till: String,
    /// Range-opening token, matched at the end of the preceding text.
    pub from: String,
    /// "between"-style opener, matched at the end of the preceding text.
    pub between: String,
    /// Connector joining two endpoints: "y", "y las".
    pub range_connector: String,
    /// Word joining a day part to a following clock time: "a", "hacia".
    #[serde(default)]
    pub day_part_anchor: String,

    pub am: String,
    pub pm: String,
    #[serde(default)]
    pub day_parts: Vec<DayPartDef>,
}

/// A compiled simple-case rule.
#[derive(Debug, Clone)]
pub struct CategorizedPattern {
    pub category: PeriodCategory,
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct PatternCatalog {
    /// Pure-number rules first, then specific-time rules.
    simple_cases: Vec<CategorizedPattern>,
    pure_number_len: usize,

    time_of_day: Regex,
    general_ending: Regex,
    till: Regex,
    till_exact: Regex,
    from_trailing: Regex,
    between_trailing: Regex,
    connector_exact: Regex,
    anchor_exact: Option<Regex>,

    am: Regex,
    pm: Regex,
    day_parts: Vec<(Regex, TimeOfDay)>,
}

fn compile(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            name: name.to_string(),
            source,
        })
}

/// Whole-input match, ignoring surrounding whitespace.
fn compile_exact(name: &str, pattern: &str) -> Result<Regex> {
    compile(name, &format!(r"^\s*(?:{pattern})\s*$"))
}

/// Match that must reach the end of the input.
fn compile_trailing(name: &str, pattern: &str) -> Result<Regex> {
    compile(name, &format!(r"(?:{pattern})\s*$"))
}

impl PatternCatalog {
    /// Compile every pattern in `set`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] naming the first pattern that
    /// fails to compile, or [`ConfigError::EmptyCatalog`] when all four
    /// simple-case patterns are blank.
    pub fn new(set: &PatternSet) -> Result<Self> {
        let pure = [
            (PeriodCategory::PureNumberFromTo, &set.pure_number_from_to),
            (
                PeriodCategory::PureNumberBetweenAnd,
                &set.pure_number_between_and,
            ),
        ];
        let specific = [
            (
                PeriodCategory::SpecificTimeFromTo,
                &set.specific_time_from_to,
            ),
            (
                PeriodCategory::SpecificTimeBetweenAnd,
                &set.specific_time_between_and,
            ),
        ];

        let mut simple_cases = Vec::with_capacity(4);
        for (category, pattern) in pure {
            if !pattern.trim().is_empty() {
                simple_cases.push(CategorizedPattern {
                    category,
                    regex: compile(category.as_str(), pattern)?,
                });
            }
        }
        let pure_number_len = simple_cases.len();
        for (category, pattern) in specific {
            if !pattern.trim().is_empty() {
                simple_cases.push(CategorizedPattern {
                    category,
                    regex: compile(category.as_str(), pattern)?,
                });
            }
        }
        if simple_cases.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let anchor_exact = if set.day_part_anchor.trim().is_empty() {
            None
        } else {
            Some(compile_exact("day_part_anchor", &set.day_part_anchor)?)
        };

        let day_parts = set
            .day_parts
            .iter()
            .map(|def| Ok((compile("day_parts", &def.pattern)?, def.part)))
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self {
            simple_cases,
            pure_number_len,
            time_of_day: compile("time_of_day", &set.time_of_day)?,
            general_ending: compile("general_ending", &set.general_ending)?,
            till: compile("till", &set.till)?,
            till_exact: compile_exact("till", &set.till)?,
            from_trailing: compile_trailing("from", &set.from)?,
            between_trailing: compile_trailing("between", &set.between)?,
            connector_exact: compile_exact("range_connector", &set.range_connector)?,
            anchor_exact,
            am: compile("am", &set.am)?,
            pm: compile("pm", &set.pm)?,
            day_parts,
        };

        info!(
            "Compiled pattern catalog: {} simple-case ({} pure-number), {} day parts",
            catalog.simple_cases.len(),
            catalog.pure_number_len,
            catalog.day_parts.len()
        );

        Ok(catalog)
    }

    /// All simple-case rules, pure-number rules first.
    #[must_use]
    pub fn simple_cases(&self) -> &[CategorizedPattern] {
        &self.simple_cases
    }

    /// The pure-number subset of [`Self::simple_cases`].
    #[must_use]
    pub fn pure_number(&self) -> &[CategorizedPattern] {
        &self.simple_cases[..self.pure_number_len]
    }

    #[must_use]
    pub const fn time_of_day(&self) -> &Regex {
        &self.time_of_day
    }

    #[must_use]
    pub const fn general_ending(&self) -> &Regex {
        &self.general_ending
    }

    #[must_use]
    pub const fn till(&self) -> &Regex {
        &self.till
    }

    #[must_use]
    pub fn is_till_token(&self, text: &str) -> bool {
        self.till_exact.is_match(text)
    }

    #[must_use]
    pub fn is_connector_token(&self, text: &str) -> bool {
        self.connector_exact.is_match(text)
    }

    #[must_use]
    pub fn is_day_part_anchor(&self, text: &str) -> bool {
        self.anchor_exact
            .as_ref()
            .is_some_and(|re| re.is_match(text))
    }

    /// Start of a "from" token that closes `text`.
    #[must_use]
    pub fn find_from_token(&self, text: &str) -> Option<usize> {
        self.from_trailing.find(text).map(|m| m.start())
    }

    /// Start of a "between" token that closes `text`.
    #[must_use]
    pub fn find_between_token(&self, text: &str) -> Option<usize> {
        self.between_trailing.find(text).map(|m| m.start())
    }

    /// Whole-token day-part anchor, if the locale has one.
    #[must_use]
    pub const fn day_part_anchor(&self) -> Option<&Regex> {
        self.anchor_exact.as_ref()
    }

    /// First day part named in `text`, in declaration order.
    #[must_use]
    pub fn classify_day_part(&self, text: &str) -> Option<TimeOfDay> {
        self.day_parts
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, part)| *part)
    }

    /// Read the meridiem and day part named anywhere in `text`.
    ///
    /// An explicit am/pm marker decides the meridiem; a day part alone
    /// implies its own.
    #[must_use]
    pub fn classify_meridiem(&self, text: &str) -> (Option<Meridiem>, Option<TimeOfDay>) {
        let part = self.classify_day_part(text);

        let marker = if self.pm.is_match(text) {
            Some(Meridiem::Pm)
        } else if self.am.is_match(text) {
            Some(Meridiem::Am)
        } else {
            None
        };

        match (marker, part) {
            (Some(meridiem), part) => (Some(meridiem), part),
            (None, Some(part)) => (Some(part.meridiem()), Some(part)),
            (None, None) => (None, None),
        }
    }
}
