//! Locale-agnostic time-period extraction.
//!
//! # Algorithm
//! 1. Simple cases: every simple-case pattern, left to right.
//! 2. Implicit ranges: consecutive time mentions joined by a till or
//!    connector token, widened to a from/between token right before them.
//! 3. Day parts: "por la tarde", optionally anchored at a following clock
//!    time ("mañana a las 3").
//! 4. Pure-number candidates pick up a meridiem from a neighbouring day part.
//! 5. A timezone right after a candidate is absorbed into it.
//! 6. Overlaps: longer span wins, then the earlier step.
//! 7. The locale's ambiguity filter, then sort by start.

use std::sync::Arc;

use periodo_core::{ExtractResult, Extractor, PeriodCategory, RangeKind, SpanData, TIMEPERIOD};
use regex::Regex;
use tracing::{debug, trace};

use crate::locale::LocaleConfiguration;
use crate::overlap::keep_longest;

/// Pipeline step a candidate came from. Earlier steps win length ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Step {
    SimpleCase = 0,
    ImplicitRange = 1,
    TimeOfDay = 2,
}

#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    end: usize,
    step: Step,
    /// Matched by a pure-number rule and still missing a meridiem.
    needs_meridiem: bool,
    data: SpanData,
}

impl Candidate {
    fn into_result(self, text: &str) -> Option<ExtractResult> {
        ExtractResult::from_source(text, self.start, self.end, TIMEPERIOD)
            .map(|r| r.with_data(self.data))
    }
}

/// Finds time-period spans using a [`LocaleConfiguration`].
///
/// The extractor holds no mutable state, so one instance can serve any
/// number of threads.
pub struct TimePeriodExtractor<C> {
    config: Arc<C>,
}

impl<C> Clone for TimePeriodExtractor<C> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
        }
    }
}

impl<C: LocaleConfiguration> TimePeriodExtractor<C> {
    #[must_use]
    pub fn new(config: C) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub const fn from_shared(config: Arc<C>) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Extract time-period spans from `text`, sorted by start.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<ExtractResult> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let singles = self.config.single_time_extractor().extract(text);

        let mut candidates = self.match_simple_cases(text);
        candidates.extend(self.merge_two_time_points(text, &singles));
        candidates.extend(self.match_time_of_day(text, &singles));

        self.resolve_meridiem_from_context(text, &mut candidates);
        self.attach_timezones(text, &mut candidates);

        let kept = keep_longest(candidates, |c| (c.start, c.end), |c| c.step as u8);
        let results: Vec<_> = kept
            .into_iter()
            .filter_map(|c| c.into_result(text))
            .collect();

        let mut results = self.config.apply_ambiguity_filter(text, results);
        results.sort_by_key(|r| r.start);

        debug!(
            "Extracted {} time period(s) [{}]",
            results.len(),
            self.config.name()
        );
        results
    }

    fn match_simple_cases(&self, text: &str) -> Vec<Candidate> {
        let pure_number = self.config.pure_number_patterns();
        let mut found = Vec::new();

        for rule in self.config.simple_cases_patterns() {
            let is_pure = pure_number.iter().any(|p| p.category == rule.category);
            for m in rule.regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                let mut data = SpanData::default().with_category(rule.category);
                if let Some(kind) = rule.category.range_kind() {
                    data = data.with_range_kind(kind);
                }
                let (meridiem, part) = self.config.resolve_meridiem(m.as_str());
                if let Some(meridiem) = meridiem {
                    data = data.with_meridiem(meridiem, part);
                }
                trace!("simple case {:?}: '{}'", rule.category, m.as_str());
                found.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    step: Step::SimpleCase,
                    needs_meridiem: is_pure && meridiem.is_none(),
                    data,
                });
            }
        }

        debug!("Simple-case scan: {} candidate(s)", found.len());
        found
    }

    /// Integers that behave like time points: the last number when nothing
    /// meaningful follows it, and numbers followed by a till/connector token
    /// and then a time mention ("3 a las 5pm").
    fn numbers_as_time_points(
        &self,
        text: &str,
        singles: &[ExtractResult],
        numbers: &[ExtractResult],
    ) -> Vec<ExtractResult> {
        let mut picked: Vec<ExtractResult> = Vec::new();
        let Some(last) = numbers.last() else {
            return picked;
        };

        if self
            .config
            .trailing_ending_pattern()
            .is_match(&text[last.end()..])
        {
            picked.push(last.clone());
        }

        let mut j = 0;
        for num in numbers {
            while j < singles.len() && singles[j].start <= num.end() {
                j += 1;
            }
            let Some(next) = singles.get(j) else {
                break;
            };
            let gap = &text[num.end()..next.start];
            let joins = self.config.is_till_token(gap) || self.config.is_connector_token(gap);
            if joins && !picked.iter().any(|p| p.start == num.start) {
                picked.push(num.clone());
            }
        }

        picked
    }

    fn merge_two_time_points(&self, text: &str, singles: &[ExtractResult]) -> Vec<Candidate> {
        let numbers = self.config.integer_extractor().extract(text);

        let mut points = singles.to_vec();
        for num in self.numbers_as_time_points(text, singles, &numbers) {
            if !points.iter().any(|p| p.overlaps(&num)) {
                points.push(num);
            }
        }
        points.sort_by_key(|p| p.start);

        let mut merged = Vec::new();
        let mut idx = 0;
        while idx + 1 < points.len() {
            let (left, right) = (&points[idx], &points[idx + 1]);
            if left.end() >= right.start {
                idx += 1;
                continue;
            }

            let gap = &text[left.end()..right.start];
            let before = text[..left.start].trim_end();
            let between = self.config.find_between_token(before);

            let (start, range_kind) = if self.config.is_till_token(gap) {
                match (between, self.config.find_from_token(before)) {
                    (Some(i), _) => (i, RangeKind::BetweenAnd),
                    (None, Some(i)) => (i, RangeKind::FromTo),
                    (None, None) => (left.start, RangeKind::FromTo),
                }
            } else if self.config.is_connector_token(gap) {
                between.map_or((left.start, RangeKind::Connector), |i| {
                    (i, RangeKind::BetweenAnd)
                })
            } else {
                idx += 1;
                continue;
            };

            let end = right.end();
            let mut data = SpanData::default()
                .with_category(PeriodCategory::ImplicitRange)
                .with_range_kind(range_kind);
            if let (Some(meridiem), part) = self.config.resolve_meridiem(&text[start..end]) {
                data = data.with_meridiem(meridiem, part);
            }
            trace!("implicit range: '{}'", &text[start..end]);
            merged.push(Candidate {
                start,
                end,
                step: Step::ImplicitRange,
                needs_meridiem: false,
                data,
            });
            idx += 2;
        }

        debug!("Implicit-range merge: {} candidate(s)", merged.len());
        merged
    }

    fn match_time_of_day(&self, text: &str, singles: &[ExtractResult]) -> Vec<Candidate> {
        let mut found = Vec::new();

        for m in self.config.time_of_day_pattern().find_iter(text) {
            // Part of a clock time such as "las 5 de la tarde".
            if singles
                .iter()
                .any(|s| s.start <= m.start() && m.end() <= s.end())
            {
                continue;
            }

            let mut end = m.end();
            if let Some(next) = singles.iter().find(|s| s.start >= m.end()) {
                let gap = &text[m.end()..next.start];
                if gap.trim().is_empty() || self.config.is_day_part_anchor(gap) {
                    end = next.end();
                }
            }

            let mut data = SpanData::default()
                .with_category(PeriodCategory::TimeOfDay)
                .with_range_kind(RangeKind::DayPart);
            if let (Some(meridiem), part) = self.config.resolve_meridiem(&text[m.start()..end]) {
                data = data.with_meridiem(meridiem, part);
            }
            found.push(Candidate {
                start: m.start(),
                end,
                step: Step::TimeOfDay,
                needs_meridiem: false,
                data,
            });
        }

        debug!("Time-of-day scan: {} candidate(s)", found.len());
        found
    }

    /// Resolve bare numeric endpoints from a day part next to the candidate.
    /// The following side wins when both sides carry a hint.
    fn resolve_meridiem_from_context(&self, text: &str, candidates: &mut [Candidate]) {
        let hints = self.config.time_of_day_pattern();

        for candidate in candidates.iter_mut().filter(|c| c.needs_meridiem) {
            let hint = leading_hint(hints, &text[candidate.end..]).or_else(|| {
                if self.config.check_both_sides() {
                    trailing_hint(hints, &text[..candidate.start])
                } else {
                    None
                }
            });

            let Some(hint) = hint else {
                continue;
            };
            if let (Some(meridiem), part) = self.config.resolve_meridiem(hint) {
                trace!("meridiem {meridiem:?} from hint '{hint}'");
                candidate.data.meridiem = Some(meridiem);
                candidate.data.time_of_day = part;
                candidate.needs_meridiem = false;
            }
        }
    }

    fn attach_timezones(&self, text: &str, candidates: &mut [Candidate]) {
        let zones = self.config.timezone_extractor().extract(text);
        if zones.is_empty() {
            return;
        }

        for candidate in candidates.iter_mut() {
            let zone = zones
                .iter()
                .find(|z| z.start >= candidate.end && text[candidate.end..z.start].trim().is_empty());
            if let Some(zone) = zone {
                candidate.end = zone.end();
                candidate.data.timezone = Some(zone.text.clone());
            }
        }
    }
}

/// A hint that opens `text`, ignoring leading whitespace.
fn leading_hint<'t>(hints: &Regex, text: &'t str) -> Option<&'t str> {
    let trimmed = text.trim_start();
    hints
        .find(trimmed)
        .filter(|m| m.start() == 0)
        .map(|m| m.as_str())
}

/// A hint that closes `text`, ignoring trailing whitespace.
fn trailing_hint<'t>(hints: &Regex, text: &'t str) -> Option<&'t str> {
    let trimmed = text.trim_end();
    hints
        .find_iter(trimmed)
        .last()
        .filter(|m| m.end() == trimmed.len())
        .map(|m| m.as_str())
}

impl<C: LocaleConfiguration> Extractor for TimePeriodExtractor<C> {
    fn extract(&self, text: &str) -> Vec<ExtractResult> {
        Self::extract(self, text)
    }

    fn kind(&self) -> &str {
        TIMEPERIOD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PatternCatalog;
    use crate::locale::spanish;
    use crate::locale::PatternLocale;
    use periodo_core::{Meridiem, TimeOfDay};

    fn extractor() -> TimePeriodExtractor<PatternLocale> {
        match spanish::configuration() {
            Ok(config) => TimePeriodExtractor::new(config),
            Err(e) => panic!("spanish locale should build: {e}"),
        }
    }

    /// Spanish, plus "o" as a connector; undecided spans read as night.
    struct EveningLocale(PatternLocale);

    impl LocaleConfiguration for EveningLocale {
        fn name(&self) -> &str {
            "es-evening"
        }

        fn catalog(&self) -> &PatternCatalog {
            self.0.catalog()
        }

        fn check_both_sides(&self) -> bool {
            self.0.check_both_sides()
        }

        fn single_time_extractor(&self) -> &dyn Extractor {
            self.0.single_time_extractor()
        }

        fn integer_extractor(&self) -> &dyn Extractor {
            self.0.integer_extractor()
        }

        fn timezone_extractor(&self) -> &dyn Extractor {
            self.0.timezone_extractor()
        }

        fn apply_ambiguity_filter(
            &self,
            text: &str,
            candidates: Vec<ExtractResult>,
        ) -> Vec<ExtractResult> {
            self.0.apply_ambiguity_filter(text, candidates)
        }

        fn is_connector_token(&self, text: &str) -> bool {
            text.trim() == "o" || self.0.is_connector_token(text)
        }

        fn resolve_meridiem(&self, text: &str) -> (Option<Meridiem>, Option<TimeOfDay>) {
            match self.0.resolve_meridiem(text) {
                (None, _) => (Some(Meridiem::Pm), Some(TimeOfDay::Night)),
                resolved => resolved,
            }
        }
    }

    fn evening_extractor() -> TimePeriodExtractor<EveningLocale> {
        match spanish::configuration() {
            Ok(config) => TimePeriodExtractor::new(EveningLocale(config)),
            Err(e) => panic!("spanish locale should build: {e}"),
        }
    }

    fn both_sides_extractor() -> TimePeriodExtractor<PatternLocale> {
        match spanish::builder().and_then(|b| b.check_both_sides(true).build()) {
            Ok(config) => TimePeriodExtractor::new(config),
            Err(e) => panic!("spanish locale should build: {e}"),
        }
    }

    #[test]
    fn test_pure_number_following_hint() {
        let spans = extractor().extract("de 3 a 5 de la tarde");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "de 3 a 5 de la tarde");
        assert_eq!(spans[0].category(), Some(PeriodCategory::SpecificTimeFromTo));
        assert_eq!(spans[0].meridiem(), Some(Meridiem::Pm));
    }

    #[test]
    fn test_pure_number_without_hint_stays_ambiguous() {
        let spans = extractor().extract("abrimos de 9 a 11");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "de 9 a 11");
        assert_eq!(spans[0].category(), Some(PeriodCategory::PureNumberFromTo));
        assert_eq!(spans[0].meridiem(), None);
    }

    #[test]
    fn test_preceding_hint_needs_both_sides() {
        let text = "por la mañana de 9 a 11";

        let spans = extractor().extract(text);
        let range = spans.iter().find(|s| s.text == "de 9 a 11");
        assert_eq!(range.and_then(ExtractResult::meridiem), None);

        let spans = both_sides_extractor().extract(text);
        let range = spans.iter().find(|s| s.text == "de 9 a 11");
        assert_eq!(range.and_then(ExtractResult::meridiem), Some(Meridiem::Am));
        assert_eq!(
            range.and_then(|s| s.data.as_ref()).and_then(|d| d.time_of_day),
            Some(TimeOfDay::Morning)
        );
    }

    #[test]
    fn test_following_hint_wins_tie() {
        let spans = both_sides_extractor().extract("por la mañana de 9 a 11 esta noche");
        let range = spans.iter().find(|s| s.text == "de 9 a 11");
        assert_eq!(range.and_then(ExtractResult::meridiem), Some(Meridiem::Pm));
        assert_eq!(
            range.and_then(|s| s.data.as_ref()).and_then(|d| d.time_of_day),
            Some(TimeOfDay::Night)
        );
    }

    #[test]
    fn test_clock_times_from_to() {
        let spans = extractor().extract("desde las 10:00 hasta las 12:30");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "desde las 10:00 hasta las 12:30");
        assert_eq!(spans[0].category(), Some(PeriodCategory::SpecificTimeFromTo));
        assert_eq!(
            spans[0].data.as_ref().and_then(|d| d.range_kind),
            Some(RangeKind::FromTo)
        );
    }

    #[test]
    fn test_from_token_widens_implicit_range() {
        let extractor = extractor();
        let text = "desde las 10:00 hasta las 12:30";
        let singles = extractor.config().single_time_extractor().extract(text);
        assert_eq!(singles.len(), 2);

        let merged = extractor.merge_two_time_points(text, &singles);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 0);
        assert_eq!(merged[0].end, text.len());
        assert_eq!(merged[0].data.range_kind, Some(RangeKind::FromTo));
    }

    #[test]
    fn test_between_token_widens_connector_range() {
        let extractor = extractor();
        let text = "entre las 3pm y las 5pm";
        let singles = extractor.config().single_time_extractor().extract(text);

        let merged = extractor.merge_two_time_points(text, &singles);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].start, 0);
        assert_eq!(merged[0].data.range_kind, Some(RangeKind::BetweenAnd));
        assert_eq!(merged[0].data.meridiem, Some(Meridiem::Pm));
    }

    #[test]
    fn test_trailing_number_joins_time_point() {
        let extractor = extractor();
        let text = "las 15:00 a 17";
        let singles = extractor.config().single_time_extractor().extract(text);
        let merged = extractor.merge_two_time_points(text, &singles);
        assert_eq!(merged.len(), 1);
        assert_eq!(&text[merged[0].start..merged[0].end], "las 15:00 a 17");
    }

    #[test]
    fn test_time_of_day_inside_clock_time_is_not_a_period() {
        let spans = extractor().extract("llego a las 5 de la tarde");
        assert!(spans.is_empty());
    }

    #[test]
    fn test_overridden_connector_is_used() {
        assert!(extractor().extract("15:00 o 17:00").is_empty());

        let spans = evening_extractor().extract("15:00 o 17:00");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "15:00 o 17:00");
        assert_eq!(
            spans[0].data.as_ref().and_then(|d| d.range_kind),
            Some(RangeKind::Connector)
        );
    }

    #[test]
    fn test_overridden_meridiem_is_used() {
        let spans = evening_extractor().extract("abrimos de 9 a 11");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].meridiem(), Some(Meridiem::Pm));
        assert_eq!(
            spans[0].data.as_ref().and_then(|d| d.time_of_day),
            Some(TimeOfDay::Night)
        );

        let spans = evening_extractor().extract("de 3 a 5 de la mañana");
        assert_eq!(spans[0].meridiem(), Some(Meridiem::Am));
    }

    #[test]
    fn test_shared_custom_locale_keeps_overrides() {
        let Ok(config) = spanish::configuration() else {
            panic!("spanish locale should build");
        };
        let shared = Arc::new(EveningLocale(config));
        assert!(shared.is_connector_token(" o "));

        let extractor = TimePeriodExtractor::from_shared(Arc::clone(&shared));
        assert_eq!(extractor.extract("15:00 o 17:00").len(), 1);
        assert_eq!(extractor.config().name(), "es-evening");
    }

    #[test]
    fn test_empty_input() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("   ").is_empty());
    }

    #[test]
    fn test_extractor_trait() {
        let extractor = extractor();
        let dynamic: &dyn Extractor = &extractor;
        assert_eq!(dynamic.kind(), TIMEPERIOD);
        assert_eq!(dynamic.extract("entre las 3 y las 5").len(), 1);
    }

    #[test]
    fn test_leading_and_trailing_hint() {
        let Ok(re) = Regex::new(r"\btarde\b") else {
            panic!("regex should compile");
        };
        assert_eq!(leading_hint(&re, "  tarde y algo"), Some("tarde"));
        assert_eq!(leading_hint(&re, "muy tarde"), None);
        assert_eq!(trailing_hint(&re, "por la tarde "), Some("tarde"));
        assert_eq!(trailing_hint(&re, "tarde y"), None);
    }
}
