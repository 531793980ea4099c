use periodo_config::Config;
use periodo_extract::LocaleConfiguration;

/// Prints the effective configuration and a summary of the compiled locale.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;
        let locale = config.locale_configuration()?;

        println!("=== periodo Configuration ===\n");

        println!("Config File:");
        if config_path.exists() {
            println!("  Path: {}", config_path.display());
        } else {
            println!("  Path: {} (not found, using defaults)", config_path.display());
        }
        println!();

        println!("Locale:");
        println!("  Name: {}", locale.name());
        println!("  Check Both Sides: {}", locale.check_both_sides());
        match &config.extraction.patterns_file {
            Some(path) => println!("  Patterns: {}", path.display()),
            None => println!("  Patterns: built-in"),
        }
        println!();

        println!("Catalog:");
        let catalog = locale.catalog();
        println!("  Simple Cases: {}", catalog.simple_cases().len());
        println!("  Pure Number: {}", catalog.pure_number().len());
        println!();

        println!("Ambiguity Filter:");
        println!("  Terms: {}", locale.ambiguous_terms().join(", "));
        println!();

        println!("Output:");
        println!("  JSON: {}", config.output.json);

        Ok(())
    }
}
