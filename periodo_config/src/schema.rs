use anyhow::Context;
use periodo_extract::locale::builder_for;
use periodo_extract::{PatternLocale, PatternSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Overrides applied on top of the locale's built-in settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ExtractionConfig {
    /// Look for AM/PM hints before a candidate too. Unset keeps the locale's choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_both_sides: Option<bool>,
    /// Added to the locale's own ambiguous terms.
    #[serde(default)]
    pub ambiguous_terms: Vec<String>,
    /// JSON pattern set replacing the locale's patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub json: bool,
}

impl Config {
    fn default_locale() -> String {
        "es".to_string()
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("periodo"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'periodo init' to create config.",
                config_path.display()
            );
        }

        Self::from_path(&config_path)
    }

    /// Like [`Self::load`], but a missing file yields the defaults.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::from_path(&config_path)
        } else {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "locale": "es",
  "extraction": {
    "check_both_sides": false,
    "ambiguous_terms": []
  },
  "output": {
    "json": false
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("🔧 Configuration options:");
        println!("   - locale: language of the input text (es)");
        println!("   - extraction.check_both_sides: also read AM/PM hints before a range");
        println!("   - extraction.ambiguous_terms: extra spans to drop when found alone");
        println!("   - extraction.patterns_file: JSON file replacing the built-in patterns");
        println!("   - output.json: print results as JSON");
        println!();
        Ok(())
    }

    /// Build the locale configuration with these overrides applied.
    pub fn locale_configuration(&self) -> anyhow::Result<PatternLocale> {
        let mut builder = builder_for(&self.locale)?;

        if let Some(path) = &self.extraction.patterns_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read patterns file {}", path.display()))?;
            let patterns: PatternSet = serde_json::from_str(&content)
                .with_context(|| format!("Invalid patterns file {}", path.display()))?;
            info!("Using patterns from {}", path.display());
            builder = builder.patterns(patterns);
        }

        if let Some(enabled) = self.extraction.check_both_sides {
            builder = builder.check_both_sides(enabled);
        }

        let locale = builder
            .ambiguous_terms(self.extraction.ambiguous_terms.iter().cloned())
            .build()?;
        Ok(locale)
    }
}
