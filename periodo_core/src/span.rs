//! Span and metadata types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which rule produced a time-period candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PeriodCategory {
    /// "de 3 a 5"
    PureNumberFromTo,
    /// "entre las 3 y las 5"
    PureNumberBetweenAnd,
    /// "de 10:30 a 11", "de 3 a 5 de la tarde"
    SpecificTimeFromTo,
    /// "entre las 3pm y las 5pm"
    SpecificTimeBetweenAnd,
    /// Two standalone time mentions merged across a connector.
    ImplicitRange,
    /// A day part on its own: "por la tarde".
    TimeOfDay,
}

impl PeriodCategory {
    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::PureNumberFromTo => "pure_number_from_to",
            Self::PureNumberBetweenAnd => "pure_number_between_and",
            Self::SpecificTimeFromTo => "specific_time_from_to",
            Self::SpecificTimeBetweenAnd => "specific_time_between_and",
            Self::ImplicitRange => "implicit_range",
            Self::TimeOfDay => "time_of_day",
        }
    }

    /// Bare numeric endpoints with no explicit meridiem marking.
    #[must_use]
    pub const fn is_pure_number(&self) -> bool {
        matches!(self, Self::PureNumberFromTo | Self::PureNumberBetweenAnd)
    }

    /// Range shape implied by a simple-case category.
    #[must_use]
    pub const fn range_kind(&self) -> Option<RangeKind> {
        match self {
            Self::PureNumberFromTo | Self::SpecificTimeFromTo => Some(RangeKind::FromTo),
            Self::PureNumberBetweenAnd | Self::SpecificTimeBetweenAnd => {
                Some(RangeKind::BetweenAnd)
            }
            Self::ImplicitRange => None,
            Self::TimeOfDay => Some(RangeKind::DayPart),
        }
    }
}

impl FromStr for PeriodCategory {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pure_number_from_to" => Ok(Self::PureNumberFromTo),
            "pure_number_between_and" => Ok(Self::PureNumberBetweenAnd),
            "specific_time_from_to" => Ok(Self::SpecificTimeFromTo),
            "specific_time_between_and" => Ok(Self::SpecificTimeBetweenAnd),
            "implicit_range" => Ok(Self::ImplicitRange),
            "time_of_day" => Ok(Self::TimeOfDay),
            _ => Err("unknown period category"),
        }
    }
}

/// How the two ends of a period are joined in the text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    FromTo,
    BetweenAnd,
    /// Endpoints joined only by a connector word ("15:00 y 17:00").
    Connector,
    /// A day part, optionally anchored at a clock time ("mañana a las 3").
    DayPart,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }
}

/// Coarse part of the day named by a time-of-day hint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub const fn meridiem(&self) -> Meridiem {
        match self {
            Self::EarlyMorning | Self::Morning => Meridiem::Am,
            Self::Midday | Self::Afternoon | Self::Night => Meridiem::Pm,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::EarlyMorning => "early_morning",
            Self::Morning => "morning",
            Self::Midday => "midday",
            Self::Afternoon => "afternoon",
            Self::Night => "night",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "early_morning" => Ok(Self::EarlyMorning),
            "morning" => Ok(Self::Morning),
            "midday" => Ok(Self::Midday),
            "afternoon" => Ok(Self::Afternoon),
            "night" => Ok(Self::Night),
            _ => Err("unknown time of day"),
        }
    }
}

/// Structured metadata attached to a span.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpanData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PeriodCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_kind: Option<RangeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meridiem: Option<Meridiem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl SpanData {
    #[must_use]
    pub const fn with_category(mut self, category: PeriodCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn with_range_kind(mut self, range_kind: RangeKind) -> Self {
        self.range_kind = Some(range_kind);
        self
    }

    /// Record a resolved meridiem, keeping the day part when one was named.
    #[must_use]
    pub const fn with_meridiem(mut self, meridiem: Meridiem, time_of_day: Option<TimeOfDay>) -> Self {
        self.meridiem = Some(meridiem);
        self.time_of_day = time_of_day;
        self
    }
}

/// A tagged region of source text.
///
/// `start` and `length` are byte offsets into the UTF-8 source and always
/// fall on character boundaries; `text` is exactly the covered substring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractResult {
    pub start: usize,
    pub length: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SpanData>,
}

impl ExtractResult {
    /// Build a span covering `source[start..end]`.
    ///
    /// Returns `None` for empty or out-of-range spans, or when the bounds do
    /// not sit on character boundaries.
    #[must_use]
    pub fn from_source(source: &str, start: usize, end: usize, kind: &str) -> Option<Self> {
        if start >= end {
            return None;
        }
        let text = source.get(start..end)?;
        Some(Self {
            start,
            length: end - start,
            text: text.to_string(),
            kind: kind.to_string(),
            data: None,
        })
    }

    #[must_use]
    pub fn with_data(mut self, data: SpanData) -> Self {
        self.data = Some(data);
        self
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.length
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    #[must_use]
    pub fn category(&self) -> Option<PeriodCategory> {
        self.data.as_ref().and_then(|d| d.category)
    }

    #[must_use]
    pub fn meridiem(&self) -> Option<Meridiem> {
        self.data.as_ref().and_then(|d| d.meridiem)
    }

    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.timezone.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_slices_text() {
        let source = "de 3 a 5 de la tarde";
        let span = ExtractResult::from_source(source, 3, 8, "timeperiod");
        assert!(span.is_some());
        if let Some(span) = span {
            assert_eq!(span.text, "3 a 5");
            assert_eq!(span.end(), 8);
        }
    }

    #[test]
    fn test_from_source_rejects_bad_bounds() {
        let source = "mañana";
        assert!(ExtractResult::from_source(source, 0, 0, "x").is_none());
        assert!(ExtractResult::from_source(source, 0, 99, "x").is_none());
        // 'ñ' is two bytes; offset 3 is inside it.
        assert!(ExtractResult::from_source(source, 0, 3, "x").is_none());
    }

    #[test]
    fn test_overlap() {
        let source = "0123456789";
        let a = ExtractResult::from_source(source, 0, 5, "x");
        let b = ExtractResult::from_source(source, 4, 8, "x");
        let c = ExtractResult::from_source(source, 5, 8, "x");
        if let (Some(a), Some(b), Some(c)) = (a, b, c) {
            assert!(a.overlaps(&b));
            assert!(!a.overlaps(&c));
        } else {
            panic!("spans should build");
        }
    }

    #[test]
    fn test_time_of_day_meridiem() {
        assert_eq!(TimeOfDay::Morning.meridiem(), Meridiem::Am);
        assert_eq!(TimeOfDay::Afternoon.meridiem(), Meridiem::Pm);
        assert_eq!("afternoon".parse::<TimeOfDay>(), Ok(TimeOfDay::Afternoon));
    }

    #[test]
    fn test_serialize_uses_type_field_and_skips_empty_data() {
        let span = ExtractResult::from_source("15:00", 0, 5, "time");
        let json = span.map(|s| serde_json::to_value(&s)).and_then(Result::ok);
        let Some(json) = json else {
            panic!("span should serialize");
        };
        assert_eq!(json["type"], "time");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_span_data_field_names() {
        let data = SpanData::default()
            .with_category(PeriodCategory::PureNumberFromTo)
            .with_range_kind(RangeKind::FromTo)
            .with_meridiem(Meridiem::Pm, Some(TimeOfDay::Afternoon));
        let Ok(json) = serde_json::to_value(&data) else {
            panic!("data should serialize");
        };
        assert_eq!(json["rangeKind"], "from_to");
        assert_eq!(json["timeOfDay"], "afternoon");
        assert_eq!(json["meridiem"], "pm");
        assert!(json.get("range_kind").is_none());
        assert!(json.get("timezone").is_none());
    }

    #[test]
    fn test_category_properties() {
        assert!(PeriodCategory::PureNumberFromTo.is_pure_number());
        assert!(!PeriodCategory::SpecificTimeFromTo.is_pure_number());
        assert_eq!(
            PeriodCategory::PureNumberBetweenAnd.range_kind(),
            Some(RangeKind::BetweenAnd)
        );
        assert_eq!(
            "specific_time_from_to".parse::<PeriodCategory>(),
            Ok(PeriodCategory::SpecificTimeFromTo)
        );
    }
}
