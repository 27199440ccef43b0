use super::classify::render_summary;
use crate::cli::{AssessArgs, DetailArgs};
use crate::config::HoardriskConfig;
use crate::core::{CategoryKey, CategoryScore, CategoryScores};
use crate::form::prompt::{confirm, fill_form};
use crate::form::{submit, AssessmentForm, Notice, NoticeLevel, SubmissionOutcome};
use crate::formatting::OutputFormatter;
use crate::record::{Clock, SheetLayout, VectorDetails};
use crate::recorder::Recorder;
use crate::store::TabularStore;
use anyhow::Result;
use std::io::{self, BufRead, Write};

impl From<&DetailArgs> for VectorDetails {
    fn from(args: &DetailArgs) -> Self {
        Self {
            animal_count: args.animal_count,
            species: args.species.clone(),
            cockroaches: args.cockroaches,
            rats: args.rats,
            scorpions: args.scorpions,
            flies: args.flies,
            other_vectors: args.other_vectors.clone(),
            animal_condition: args.animal_condition.clone(),
            unusable_rooms: args.unusable_rooms,
            lives_alone: args.lives_alone,
            health_follow_up: args.health_follow_up,
            observations: args.observations.clone(),
        }
    }
}

/// Build the form described by command-line flags.
pub fn form_from_args(args: &AssessArgs, layout: SheetLayout) -> Result<AssessmentForm> {
    let values = [
        (CategoryKey::Structural, args.structural),
        (CategoryKey::Sanitary, args.sanitary),
        (CategoryKey::Animals, args.animals),
        (CategoryKey::Obstruction, args.obstruction),
        (CategoryKey::Psychosocial, args.psychosocial),
    ];
    let mut scores = CategoryScores::default();
    for (key, value) in values {
        scores.set(key, CategoryScore::new(key, value)?);
    }

    let mut form = AssessmentForm::new(
        args.name.clone().unwrap_or_default(),
        args.address.clone().unwrap_or_default(),
    )
    .with_scores(scores);
    if layout == SheetLayout::Detailed {
        form = form.with_details(VectorDetails::from(&args.details));
    }
    Ok(form)
}

fn render_notice(formatter: &dyn OutputFormatter, notice: &Notice) -> String {
    match notice.level {
        NoticeLevel::Success => format!(
            "{} {}",
            formatter.emoji("✓", "[OK]"),
            formatter.success(&notice.message)
        ),
        NoticeLevel::Warning => format!(
            "{} {}",
            formatter.emoji("⚠", "[WARN]"),
            formatter.warning(&notice.message)
        ),
        NoticeLevel::Error => format!(
            "{} {}",
            formatter.emoji("✗", "[FAIL]"),
            formatter.error(&notice.message)
        ),
    }
}

fn report<W: Write>(
    out: &mut W,
    formatter: &dyn OutputFormatter,
    outcome: &SubmissionOutcome,
) -> io::Result<()> {
    writeln!(out, "{}", render_notice(formatter, &outcome.notice()))?;
    writeln!(out, "{}", render_summary(formatter, &outcome.summary()))?;
    if let SubmissionOutcome::Saved { receipt, .. } = outcome {
        writeln!(
            out,
            "{}",
            formatter.dim(&format!(
                "Linha {} de {}",
                receipt.row_index + 1,
                receipt.total_rows
            ))
        )?;
    }
    Ok(())
}

/// End of input ends an interactive session instead of failing it.
fn until_eof<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

fn run_interactive<R: BufRead, W: Write, S: TabularStore>(
    input: &mut R,
    out: &mut W,
    formatter: &dyn OutputFormatter,
    config: &HoardriskConfig,
    recorder: &Recorder<S>,
    clock: &dyn Clock,
    mut form: AssessmentForm,
) -> Result<usize> {
    let mut saved = 0;

    loop {
        writeln!(out, "{}", formatter.header("Avaliação de Risco - Acumulação"))?;
        let Some(filled) = until_eof(fill_form(input, out, &form, config.form.layout))? else {
            break;
        };
        form = filled;

        writeln!(out, "\n{}", render_summary(formatter, &form.preview()))?;
        match until_eof(confirm(input, out, "Salvar avaliação", true))? {
            Some(true) => {
                let outcome = submit(
                    form.clone(),
                    recorder,
                    clock,
                    &config.form.timestamp_format,
                );
                report(out, formatter, &outcome)?;
                if outcome.is_saved() {
                    saved += 1;
                    if config.form.clear_after_save {
                        form.reset();
                    }
                }
            }
            Some(false) => {}
            None => break,
        }

        match until_eof(confirm(input, out, "Registrar outra avaliação", false))? {
            Some(true) => continue,
            _ => break,
        }
    }

    Ok(saved)
}

/// Record assessments. Returns how many rows were saved.
///
/// A one-shot submission that is rejected or fails to persist is an error so
/// the process exits non-zero.
#[allow(clippy::too_many_arguments)]
pub fn run_assess<R: BufRead, W: Write, S: TabularStore>(
    input: &mut R,
    out: &mut W,
    formatter: &dyn OutputFormatter,
    config: &HoardriskConfig,
    recorder: &Recorder<S>,
    clock: &dyn Clock,
    args: &AssessArgs,
) -> Result<usize> {
    let form = form_from_args(args, config.form.layout)?;

    if args.interactive {
        return run_interactive(input, out, formatter, config, recorder, clock, form);
    }

    let outcome = submit(form, recorder, clock, &config.form.timestamp_format);
    report(out, formatter, &outcome)?;
    match outcome {
        SubmissionOutcome::Saved { .. } => Ok(1),
        SubmissionOutcome::Rejected { reason, .. } => Err(reason.into()),
        SubmissionOutcome::Failed { error, .. } => Err(error.into()),
    }
}
