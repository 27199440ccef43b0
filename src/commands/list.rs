use crate::cli::OutputFormat;
use crate::record::columns;
use crate::recorder::Recorder;
use crate::scoring::{RiskTier, TierColor};
use crate::store::{Cell, Dataset, TabularStore};
use anyhow::Result;
use comfy_table::{presets, Color, ContentArrangement, Table};
use std::io::Write;

const SUMMARY_COLUMNS: [&str; 5] = [
    columns::TIMESTAMP,
    columns::RESIDENT_NAME,
    columns::ADDRESS,
    columns::TOTAL_SCORE,
    columns::RISK_TIER,
];

fn table_color(color: TierColor) -> Color {
    match color {
        TierColor::Green => Color::Green,
        TierColor::Yellow => Color::Yellow,
        TierColor::Orange => Color::Rgb {
            r: 255,
            g: 140,
            b: 0,
        },
        TierColor::Red => Color::Red,
    }
}

/// Row indices for the last `tail` rows, or every row.
fn visible_rows(dataset: &Dataset, tail: Option<usize>) -> std::ops::Range<usize> {
    let shown = tail.map_or(dataset.len(), |n| dataset.tail(n).len());
    dataset.len() - shown..dataset.len()
}

pub fn render_table(dataset: &Dataset, tail: Option<usize>, use_color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(if use_color {
            presets::UTF8_FULL
        } else {
            presets::ASCII_FULL
        })
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(SUMMARY_COLUMNS);

    for row in visible_rows(dataset, tail) {
        let cells = SUMMARY_COLUMNS.iter().map(|column| {
            let cell = dataset.cell(row, column).cloned().unwrap_or_default();
            let mut rendered = comfy_table::Cell::new(cell.to_string());
            if use_color && *column == columns::RISK_TIER {
                if let Some(tier) = cell.as_text().and_then(RiskTier::from_label) {
                    rendered = rendered.fg(table_color(tier.color()));
                }
            }
            rendered
        });
        table.add_row(cells);
    }
    table
}

/// Rows as JSON objects keyed by column name.
pub fn render_json(dataset: &Dataset, tail: Option<usize>) -> Result<String> {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = visible_rows(dataset, tail)
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|column| {
                    let cell = dataset.cell(row, column).cloned().unwrap_or(Cell::Empty);
                    Ok((column.clone(), serde_json::to_value(cell)?))
                })
                .collect::<Result<_, serde_json::Error>>()
        })
        .collect::<Result<_, _>>()?;
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn run_list<W: Write, S: TabularStore>(
    out: &mut W,
    recorder: &Recorder<S>,
    tail: Option<usize>,
    format: OutputFormat,
    use_color: bool,
) -> Result<()> {
    let dataset = recorder.dataset()?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", render_json(&dataset, tail)?)?,
        OutputFormat::Terminal if dataset.is_empty() => {
            writeln!(out, "Nenhuma avaliação registrada em '{}'.", recorder.worksheet())?
        }
        OutputFormat::Terminal => {
            writeln!(out, "{}", render_table(&dataset, tail, use_color))?;
            writeln!(out, "{} de {} avaliações", visible_rows(&dataset, tail).len(), dataset.len())?;
        }
    }
    Ok(())
}
