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
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Time-period extraction driven by per-locale pattern configuration.
//!
//! ```no_run
//! use periodo_extract::{TimePeriodExtractor, locale::spanish};
//!
//! let extractor = TimePeriodExtractor::new(spanish::configuration()?);
//! for span in extractor.extract("nos vemos de 3 a 5 de la tarde") {
//!     println!("{} @ {}", span.text, span.start);
//! }
//! # Ok::<(), periodo_extract::ConfigError>(())
//! ```

pub mod catalog;
mod error;
pub mod extractor;
pub mod filter;
pub mod locale;
mod overlap;
pub mod subextract;

pub use catalog::{CategorizedPattern, DayPartDef, PatternCatalog, PatternSet};
pub use error::{ConfigError, Result};
pub use extractor::TimePeriodExtractor;
pub use filter::AmbiguityFilter;
pub use locale::{LocaleConfiguration, PatternLocale, PatternLocaleBuilder};
pub use subextract::RegexExtractor;
