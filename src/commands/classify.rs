use crate::cli::OutputFormat;
use crate::core::CategoryScores;
use crate::formatting::{tier_badge, OutputFormatter};
use crate::scoring::{classify, summarize, ScoreSummary};
use anyhow::Result;
use std::io::Write;

/// Score block shown after classification or submission.
pub fn render_summary(formatter: &dyn OutputFormatter, summary: &ScoreSummary) -> String {
    let critical = if summary.has_critical_item {
        formatter.warning(" (item crítico)")
    } else {
        String::new()
    };
    format!(
        "{} {}{}\n{} {}\n{} {}",
        formatter.bold("Pontuação total:"),
        summary.total_score,
        critical,
        formatter.bold("Classificação:"),
        tier_badge(formatter, summary.tier()),
        formatter.bold("Intervenção:"),
        summary.classification.intervention,
    )
}

fn summary_from_input(
    total: Option<u32>,
    critical: bool,
    scores: Option<&[u8]>,
) -> Result<ScoreSummary> {
    match (total, scores) {
        (_, Some(values)) => Ok(summarize(&CategoryScores::from_values(values)?)),
        (Some(total), None) => Ok(ScoreSummary {
            total_score: total,
            has_critical_item: critical,
            classification: classify(total, critical),
        }),
        (None, None) => anyhow::bail!("Either --total or --scores is required"),
    }
}

pub fn run_classify<W: Write>(
    out: &mut W,
    formatter: &dyn OutputFormatter,
    total: Option<u32>,
    critical: bool,
    scores: Option<&[u8]>,
    format: OutputFormat,
) -> Result<()> {
    let summary = summary_from_input(total, critical, scores)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?,
        OutputFormat::Terminal => writeln!(out, "{}", render_summary(formatter, &summary))?,
    }
    Ok(())
}
