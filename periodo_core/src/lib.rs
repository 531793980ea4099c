#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Shared span model for the time-period recognizer.
//!
//! Every extractor in the workspace, from the small regex-backed
//! sub-extractors to the time-period extractor itself, produces
//! [`ExtractResult`] values and is reachable through the [`Extractor`] trait.

use serde::{Deserialize, Serialize};

pub mod span;

pub use span::{ExtractResult, Meridiem, PeriodCategory, RangeKind, SpanData, TimeOfDay};

/// Tag carried by time-period spans.
pub const TIMEPERIOD: &str = "timeperiod";

/// Tag carried by standalone clock-time spans.
pub const TIME: &str = "time";

/// Tag carried by integer spans.
pub const NUMBER: &str = "number";

/// Tag carried by timezone spans.
pub const TIMEZONE: &str = "timezone";

/// Anything that turns text into tagged spans.
///
/// Implementations must be total: "nothing found" is an empty vector, never
/// an error. Returned spans are sorted by `start` and do not overlap.
pub trait Extractor: Send + Sync {
    /// Extract spans from `text`.
    fn extract(&self, text: &str) -> Vec<ExtractResult>;

    /// The tag this extractor stamps on its spans.
    fn kind(&self) -> &str;
}

impl<T: Extractor + ?Sized> Extractor for std::sync::Arc<T> {
    fn extract(&self, text: &str) -> Vec<ExtractResult> {
        (**self).extract(text)
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }
}

impl<T: Extractor + ?Sized> Extractor for Box<T> {
    fn extract(&self, text: &str) -> Vec<ExtractResult> {
        (**self).extract(text)
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }
}

/// Output wrapper used when a whole batch of texts is serialized at once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub spans: Vec<ExtractResult>,
}
