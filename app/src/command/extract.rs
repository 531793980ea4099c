use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use periodo_config::Config;
use periodo_core::{ExtractResult, Extraction, PeriodCategory, TimeOfDay};
use periodo_extract::TimePeriodExtractor;
use rayon::prelude::*;
use tracing::info;

pub struct ExtractInput {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub json: bool,
    pub category: Option<PeriodCategory>,
    pub part: Option<TimeOfDay>,
}

/// Runs the time-period extractor over an argument, a file or stdin.
///
/// Files and stdin are read one text per line; lines are processed in
/// parallel and printed in input order.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let extractor = TimePeriodExtractor::new(config.locale_configuration()?);
        let json = input.json || config.output.json;
        let (category, part) = (input.category, input.part);

        let texts = match (input.text, input.file) {
            (Some(text), _) => vec![text],
            (None, Some(path)) => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                content.lines().map(str::to_string).collect()
            }
            (None, None) => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read stdin")?;
                content.lines().map(str::to_string).collect()
            }
        };

        let extractions: Vec<Extraction> = texts
            .into_par_iter()
            .map(|text| {
                let mut spans = extractor.extract(&text);
                spans.retain(|span| keep(span, category, part));
                Extraction { text, spans }
            })
            .collect();

        info!(
            "Processed {} text(s), {} time period(s)",
            extractions.len(),
            extractions.iter().map(|e| e.spans.len()).sum::<usize>()
        );

        let multi = extractions.len() > 1;
        for (line, extraction) in extractions.iter().enumerate() {
            if json {
                println!("{}", serde_json::to_string(extraction)?);
                continue;
            }
            for span in &extraction.spans {
                if multi {
                    println!("{}:{}", line + 1, describe(span));
                } else {
                    println!("{}", describe(span));
                }
            }
        }

        Ok(())
    }
}

/// Whether `span` passes the `--category` and `--part` filters.
fn keep(span: &ExtractResult, category: Option<PeriodCategory>, part: Option<TimeOfDay>) -> bool {
    let time_of_day = span.data.as_ref().and_then(|d| d.time_of_day);
    category.is_none_or(|c| span.category() == Some(c))
        && part.is_none_or(|p| time_of_day == Some(p))
}

/// `start-end<TAB>text<TAB>category[,meridiem][,timezone]`
fn describe(span: &ExtractResult) -> String {
    let mut details = vec![
        span.category()
            .map_or_else(|| span.kind.clone(), |c| c.as_str().to_string()),
    ];
    if let Some(meridiem) = span.meridiem() {
        details.push(meridiem.as_str().to_string());
    }
    if let Some(zone) = span.timezone() {
        details.push(zone.to_string());
    }
    format!(
        "{}-{}\t{}\t{}",
        span.start,
        span.end(),
        span.text,
        details.join(",")
    )
}
