use crate::formatting::OutputFormatter;
use crate::recorder::Recorder;
use crate::store::TabularStore;
use anyhow::Result;
use std::io::Write;

/// Print the header comparison. Returns `true` when the header matches.
pub fn run_verify_headers<W: Write, S: TabularStore>(
    out: &mut W,
    formatter: &dyn OutputFormatter,
    recorder: &Recorder<S>,
) -> Result<bool> {
    let report = recorder.verify_headers()?;

    if report.is_match() {
        writeln!(
            out,
            "{} {}",
            formatter.emoji("✓", "[OK]"),
            formatter.success(&format!(
                "Cabeçalho de '{}' confere com o layout {:?}.",
                recorder.worksheet(),
                recorder.layout()
            ))
        )?;
        return Ok(true);
    }

    writeln!(
        out,
        "{} {}",
        formatter.emoji("✗", "[FAIL]"),
        formatter.error(&format!(
            "Cabeçalho de '{}' não confere.",
            recorder.worksheet()
        ))
    )?;
    if !report.missing.is_empty() {
        writeln!(out, "  {} {}", formatter.bold("Faltando:"), report.missing.join(", "))?;
    }
    if !report.extra.is_empty() {
        writeln!(out, "  {} {}", formatter.bold("Extras:"), report.extra.join(", "))?;
    }
    Ok(false)
}
