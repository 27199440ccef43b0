//! Line-oriented prompts for filling in the form from a terminal.
//!
//! Generic over `BufRead`/`Write` so sessions can be scripted in tests.
//! An empty answer keeps the value already in the form, which is how a
//! session without post-save reset carries answers into the next household.
//! A single `-` clears a text field.

/// Answer that blanks a text field instead of keeping its current value.
pub const CLEAR_ANSWER: &str = "-";

use super::AssessmentForm;
use crate::catalog::{self, CATALOG};
use crate::core::CategoryScore;
use crate::record::{SheetLayout, VectorDetails};
use std::io::{self, BufRead, Write};

fn read_answer<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the form was complete",
        ));
    }
    Ok(line.trim().to_string())
}

fn ask_text<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: &str,
) -> io::Result<String> {
    if current.is_empty() {
        write!(output, "{label}: ")?;
    } else {
        write!(output, "{label} [{current}] ('{CLEAR_ANSWER}' apaga): ")?;
    }
    output.flush()?;
    let answer = read_answer(input)?;
    Ok(match answer.as_str() {
        "" => current.to_string(),
        CLEAR_ANSWER => String::new(),
        _ => answer,
    })
}

fn ask_number<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: u32,
) -> io::Result<u32> {
    loop {
        write!(output, "{label} [{current}]: ")?;
        output.flush()?;
        let answer = read_answer(input)?;
        if answer.is_empty() {
            return Ok(current);
        }
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "Informe um número inteiro.")?,
        }
    }
}

/// Yes/no question. Accepts s/sim/y/yes and n/não/nao/no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    current: bool,
) -> io::Result<bool> {
    let hint = if current { "S/n" } else { "s/N" };
    loop {
        write!(output, "{question} ({hint}): ")?;
        output.flush()?;
        let answer = read_answer(input)?.to_lowercase();
        match answer.as_str() {
            "" => return Ok(current),
            "s" | "sim" | "y" | "yes" => return Ok(true),
            "n" | "não" | "nao" | "no" => return Ok(false),
            _ => writeln!(output, "Responda 's' ou 'n'.")?,
        }
    }
}

fn ask_details<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: &VectorDetails,
) -> io::Result<VectorDetails> {
    writeln!(output, "\nDetalhamento de vetores e animais")?;
    Ok(VectorDetails {
        animal_count: ask_number(input, output, "Quantidade de animais", current.animal_count)?,
        species: ask_text(input, output, "Espécies", &current.species)?,
        cockroaches: confirm(input, output, "Baratas", current.cockroaches)?,
        rats: confirm(input, output, "Ratos", current.rats)?,
        scorpions: confirm(input, output, "Escorpiões", current.scorpions)?,
        flies: confirm(input, output, "Moscas", current.flies)?,
        other_vectors: ask_text(input, output, "Outros vetores", &current.other_vectors)?,
        animal_condition: ask_text(
            input,
            output,
            "Condição dos animais",
            &current.animal_condition,
        )?,
        unusable_rooms: ask_number(
            input,
            output,
            "Cômodos inutilizados",
            current.unusable_rooms,
        )?,
        lives_alone: confirm(input, output, "Mora sozinho(a)", current.lives_alone)?,
        health_follow_up: confirm(
            input,
            output,
            "Possui acompanhamento de saúde",
            current.health_follow_up,
        )?,
        observations: ask_text(input, output, "Observações", &current.observations)?,
    })
}

/// Walk through every field of the form, starting from `current`.
pub fn fill_form<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    current: &AssessmentForm,
    layout: SheetLayout,
) -> io::Result<AssessmentForm> {
    let mut form = current.clone();

    writeln!(output, "Identificação do Morador")?;
    form.resident_name = ask_text(input, output, "Nome do(a) morador(a)", &current.resident_name)?;
    form.address = ask_text(input, output, "Endereço", &current.address)?;

    for entry in CATALOG.iter() {
        writeln!(output, "\n{}", entry.title)?;
        for option in entry.options {
            writeln!(output, "  {option}")?;
        }
        let selected = current.scores.get(entry.key);
        loop {
            write!(
                output,
                "Selecione uma opção [{}]: ",
                catalog::option_label(entry.key, selected)
            )?;
            output.flush()?;
            let answer = read_answer(input)?;
            if answer.is_empty() {
                break;
            }
            match answer
                .parse::<u8>()
                .ok()
                .and_then(|v| CategoryScore::new(entry.key, v).ok())
            {
                Some(score) => {
                    form.scores.set(entry.key, score);
                    break;
                }
                None => writeln!(output, "Escolha um valor entre 0 e 4.")?,
            }
        }
    }

    if layout == SheetLayout::Detailed {
        let details = current.details.clone().unwrap_or_default();
        form.details = Some(ask_details(input, output, &details)?);
    }

    Ok(form)
}
