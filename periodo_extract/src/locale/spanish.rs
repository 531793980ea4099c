//! Spanish vocabulary for the time-period extractor.
//!
//! Endpoints come in two flavours. Bare hours ("3", "las tres") carry no
//! meridiem; specific times ("10:30", "5pm", "5 de la tarde") do, or carry
//! minutes and don't need one.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use periodo_core::{NUMBER, TIME, TIMEZONE, TimeOfDay};

use crate::catalog::{DayPartDef, PatternSet};
use crate::error::Result;
use crate::locale::{PatternLocale, PatternLocaleBuilder};
use crate::subextract::RegexExtractor;

pub const NAME: &str = "es";

/// Spanish hints are only looked for after a candidate.
pub const CHECK_BOTH_SIDES: bool = false;

/// Isolated "mañana" is read as "tomorrow", not "morning".
pub const AMBIGUOUS_TERMS: &[&str] = &["mañana"];

const HOUR_WORDS: &str = "cero|una|uno|dos|tres|cuatro|cinco|seis|siete|ocho|nueve|diez|once|doce|\
trece|catorce|quince|diecis[eé]is|diecisiete|dieciocho|diecinueve|veinte|veintiuno|veintid[oó]s|\
veintitr[eé]s|veinticuatro";

const CLOCK: &str = r"(?:2[0-4]|[01]?[0-9]):[0-5][0-9]";

const AMPM: &str = r"\s*(?:[ap]\.\s?m\.|[ap]m\b)";

const DAY_PART_SUFFIX: &str =
    r"\s+(?:(?:de|en|por)\s+la\s+(?:madrugada|mañana|tarde|noche)|del\s+mediod[ií]a)";

const ARTICLE: &str = r"(?:las?\s+)?";

const FROM_PREFIX: &str = r"\b(?:desde|de)\s+";

const TILL_SEP: &str = r"\s*(?:-|–|\b(?:a|hasta)\b)\s*";

const BETWEEN_PREFIX: &str = r"\bentre\s+";

const AND_SEP: &str = r"\s+y\s+";

fn hour() -> String {
    format!("(?:2[0-4]|[01]?[0-9]|{HOUR_WORDS})")
}

/// "3", "las 3", "la una".
fn bare_endpoint() -> String {
    format!(r"\b{ARTICLE}{}\b", hour())
}

/// "10:30", "las 5pm", "5 de la tarde".
fn specific_endpoint() -> String {
    format!(
        r"\b{ARTICLE}(?:{CLOCK}(?:{AMPM}|{DAY_PART_SUFFIX}|\b)|{}(?:{AMPM}|{DAY_PART_SUFFIX}))",
        hour()
    )
}

/// Pattern strings for Spanish.
#[must_use]
pub fn patterns() -> PatternSet {
    let bare = bare_endpoint();
    let specific = specific_endpoint();

    PatternSet {
        pure_number_from_to: format!("{FROM_PREFIX}{bare}{TILL_SEP}{bare}"),
        pure_number_between_and: format!("{BETWEEN_PREFIX}{bare}{AND_SEP}{bare}"),
        specific_time_from_to: format!(
            "(?:{FROM_PREFIX})?(?:{specific}{TILL_SEP}(?:{specific}|{bare})|{bare}{TILL_SEP}{specific})"
        ),
        specific_time_between_and: format!(
            "{BETWEEN_PREFIX}(?:{specific}{AND_SEP}(?:{specific}|{bare})|{bare}{AND_SEP}{specific})"
        ),
        time_of_day: r"\b(?:(?:(?:en|por|de|a)\s+)?(?:la|esta)\s+)?(?:madrugada|mañana|tarde|noche)\b|\b(?:(?:al|del|el)\s+)?mediod[ií]a\b"
            .to_string(),
        general_ending: r"^\s*(?:\.,|[.,;:!?])?\s*$".to_string(),
        till: r"\b(?:a|hasta)\b(?:\s+las?)?|-|–|—|~".to_string(),
        from: r"\b(?:desde|de)(?:\s+las?)?".to_string(),
        between: r"\bentre(?:\s+las?)?".to_string(),
        range_connector: r"\by\b(?:\s+las?)?|-|–|—|~".to_string(),
        day_part_anchor: r"\b(?:a|hacia|sobre|como\s+a)\b".to_string(),
        am: r"(?:\d|\b)\s*a(?:\.\s?m\.|m\b)".to_string(),
        pm: r"(?:\d|\b)\s*p(?:\.\s?m\.|m\b)".to_string(),
        day_parts: vec![
            DayPartDef::new(r"\bmadrugada\b", TimeOfDay::EarlyMorning),
            DayPartDef::new(r"\bmañana\b", TimeOfDay::Morning),
            DayPartDef::new(r"\bmediod[ií]a\b", TimeOfDay::Midday),
            DayPartDef::new(r"\btarde\b", TimeOfDay::Afternoon),
            DayPartDef::new(r"\bnoche\b", TimeOfDay::Night),
        ],
    }
}

/// Standalone clock times: "15:00", "las 3", "5pm", "5 de la tarde".
///
/// # Errors
/// Only if the built-in patterns fail to compile.
pub fn time_extractor() -> Result<RegexExtractor> {
    let hour = hour();
    RegexExtractor::new(
        TIME,
        &[
            format!(r"(?i)\b{ARTICLE}{CLOCK}(?:{AMPM}|{DAY_PART_SUFFIX}|\b)"),
            format!(r"(?i)\b{ARTICLE}{hour}(?:{AMPM}|{DAY_PART_SUFFIX})"),
            format!(r"(?i)\blas?\s+{hour}\b"),
        ],
    )
}

/// Digit runs and Spanish number words.
///
/// # Errors
/// Only if the built-in patterns fail to compile.
pub fn integer_extractor() -> Result<RegexExtractor> {
    RegexExtractor::new(
        NUMBER,
        &[
            r"\b[0-9]+\b".to_string(),
            format!(r"(?i)\b(?:{HOUR_WORDS}|treinta|cuarenta|cincuenta)\b"),
        ],
    )
}

/// Timezone abbreviations and UTC/GMT offsets. Case-sensitive so that
/// ordinary words are not mistaken for abbreviations.
///
/// # Errors
/// Only if the built-in patterns fail to compile.
pub fn timezone_extractor() -> Result<RegexExtractor> {
    RegexExtractor::new(
        TIMEZONE,
        &[
            r"\b(?:UTC|GMT)\s?[+-]\s?[0-9]{1,2}(?::?[0-5][0-9])?",
            r"\b(?:UTC|GMT|CET|CEST|WET|WEST|EST|EDT|CST|CDT|MST|MDT|PST|PDT|BST|ART|COT|CLT|PET|VET)\b",
            r"(?i)\bhora\s+(?:de\s+)?(?:españa|madrid|canarias|m[eé]xico|argentina|colombia|chile|per[uú])\b",
        ],
    )
}

/// A builder preloaded with the Spanish patterns and sub-extractors.
///
/// # Errors
/// Only if the built-in sub-extractor patterns fail to compile.
pub fn builder() -> Result<PatternLocaleBuilder> {
    Ok(PatternLocale::builder(NAME, patterns())
        .check_both_sides(CHECK_BOTH_SIDES)
        .single_time_extractor(Arc::new(time_extractor()?))
        .integer_extractor(Arc::new(integer_extractor()?))
        .timezone_extractor(Arc::new(timezone_extractor()?))
        .ambiguous_terms(AMBIGUOUS_TERMS.iter().copied()))
}

/// The Spanish configuration with default settings.
///
/// # Errors
/// Only if the built-in patterns fail to compile.
pub fn configuration() -> Result<PatternLocale> {
    builder()?.build()
}

static SHARED: OnceCell<PatternLocale> = OnceCell::new();

/// Process-wide Spanish configuration, built on first use.
///
/// # Errors
/// Only if the built-in patterns fail to compile; a failed build is retried
/// on the next call.
pub fn shared() -> Result<&'static PatternLocale> {
    SHARED.get_or_try_init(configuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleConfiguration;
    use periodo_core::{Extractor, Meridiem};

    fn texts(extractor: &dyn Extractor, text: &str) -> Vec<String> {
        extractor
            .extract(text)
            .into_iter()
            .map(|s| s.text)
            .collect()
    }

    #[test]
    fn test_builtin_patterns_compile() {
        assert!(configuration().is_ok());
        assert!(shared().is_ok());
    }

    #[test]
    fn test_shared_is_built_once() {
        let (Ok(a), Ok(b)) = (shared(), shared()) else {
            panic!("shared locale should build");
        };
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_connector_tokens() {
        let Ok(locale) = shared() else {
            panic!("shared locale should build");
        };
        assert!(locale.is_connector_token("y"));
        assert!(locale.is_connector_token("y las"));
        assert!(locale.is_connector_token(" - "));
        assert!(!locale.is_connector_token("xyz"));
        assert!(!locale.is_connector_token("y luego"));
    }

    #[test]
    fn test_from_and_between_tokens() {
        let Ok(locale) = shared() else {
            panic!("shared locale should build");
        };
        assert_eq!(locale.find_from_token("abierto de las"), Some(8));
        assert_eq!(locale.find_from_token("desde"), Some(0));
        assert_eq!(locale.find_between_token("quedamos entre"), Some(9));
        assert_eq!(locale.find_between_token("entre nosotros"), None);
    }

    #[test]
    fn test_vocabulary_patterns() {
        let Ok(locale) = shared() else {
            panic!("shared locale should build");
        };
        assert!(locale.till_pattern().is_match("de 3 hasta las 5"));
        assert!(locale.time_of_day_pattern().is_match("por la noche"));
        assert!(locale.trailing_ending_pattern().is_match(" ."));
        assert!(!locale.trailing_ending_pattern().is_match(" y luego"));
        assert!(
            locale
                .day_part_anchor_pattern()
                .is_some_and(|re| re.is_match(" hacia "))
        );
        assert_eq!(locale.simple_cases_patterns().len(), 4);
        assert_eq!(locale.pure_number_patterns().len(), 2);
    }

    #[test]
    fn test_resolve_meridiem() {
        let Ok(locale) = shared() else {
            panic!("shared locale should build");
        };
        assert_eq!(
            locale.resolve_meridiem("de la tarde"),
            (Some(Meridiem::Pm), Some(TimeOfDay::Afternoon))
        );
        assert_eq!(
            locale.resolve_meridiem("de la madrugada"),
            (Some(Meridiem::Am), Some(TimeOfDay::EarlyMorning))
        );
        assert_eq!(locale.resolve_meridiem("de 3 a 5pm"), (Some(Meridiem::Pm), None));
        assert_eq!(locale.resolve_meridiem("de 3 a 5"), (None, None));
    }

    #[test]
    fn test_time_extractor() {
        let Ok(extractor) = time_extractor() else {
            panic!("time extractor should build");
        };
        assert_eq!(
            texts(&extractor, "quedamos a las 3 o a las 17:30"),
            vec!["las 3", "las 17:30"]
        );
        assert_eq!(texts(&extractor, "llego a las 5 de la tarde"), vec!["las 5 de la tarde"]);
        assert_eq!(texts(&extractor, "a las 5pm"), vec!["las 5pm"]);
        assert!(texts(&extractor, "tengo 3 perros").is_empty());
    }

    #[test]
    fn test_integer_extractor() {
        let Ok(extractor) = integer_extractor() else {
            panic!("integer extractor should build");
        };
        assert_eq!(texts(&extractor, "de tres a 15"), vec!["tres", "15"]);
        assert!(texts(&extractor, "a las 5pm").is_empty());
    }

    #[test]
    fn test_timezone_extractor() {
        let Ok(extractor) = timezone_extractor() else {
            panic!("timezone extractor should build");
        };
        assert_eq!(texts(&extractor, "5pm GMT"), vec!["GMT"]);
        assert_eq!(texts(&extractor, "a las 3 UTC+2"), vec!["UTC+2"]);
        assert_eq!(texts(&extractor, "hora de España"), vec!["hora de España"]);
        assert!(texts(&extractor, "est muy bien").is_empty());
    }
}
