use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures while building a locale configuration.
///
/// These only ever surface at construction time; a configuration that built
/// successfully never fails during extraction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid pattern `{name}`: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern catalog has no simple-case patterns")]
    EmptyCatalog,

    #[error("missing sub-extractor: {0}")]
    MissingExtractor(&'static str),

    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}
