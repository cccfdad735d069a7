//! Karyotype Parser
//!
//! Turns an ISCN karyotype string into a [`KaryotypeTree`]. Parsing is
//! all-or-nothing: any field that does not match its grammar aborts with a
//! [`SyntaxError`] and no partial tree is returned.

pub mod abnormality;
pub mod ast;
pub mod breakpoint;
pub mod error;
pub mod lexer;

use once_cell::sync::Lazy;
use regex::Regex;

pub use abnormality::{classify, parse_abnormality, PRECEDENCE};
pub use ast::{
    Abnormality, AbnormalityKind, Arity, Arm, ArmRelation, Breakpoint, CellLine, ChromosomeCount,
    Inheritance, KaryotypeTree, Labels, Modifiers, Shape,
};
pub use error::SyntaxError;
pub use lexer::{Annotation, Envelope, Segment};

static SEX_CHROMOSOMES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[XYU]+$").expect("sex chromosome pattern compiles"));

/// One parsed lineage: count, sex chromosomes, abnormalities
type Lineage = (ChromosomeCount, String, Vec<Abnormality>);

/// Parse a karyotype string into a tree
///
/// This is the main entry point for parsing. Mosaic and chimeric inputs
/// ("45,X[10]/46,XX[20]") produce one [`CellLine`] per segment and the
/// top-level fields mirror the first line.
pub fn parse(input: &str) -> Result<KaryotypeTree, SyntaxError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let envelope = lexer::split_envelope(input);
    let mut modifiers = Modifiers {
        mosaic: envelope.mosaic,
        chimera: envelope.chimera,
        ..Modifiers::default()
    };
    for annotation in &envelope.annotations {
        match annotation {
            Annotation::Fish(text) => append_annotation(&mut modifiers.fish, text),
            Annotation::Array(text) => append_annotation(&mut modifiers.array, text),
        }
    }

    let mut tree = if envelope.body.is_empty() {
        if envelope.annotations.is_empty() {
            return Err(SyntaxError::Empty);
        }
        KaryotypeTree::new(ChromosomeCount::Absent, "", Vec::new())
    } else if envelope.body.contains('/') || envelope.body.ends_with(']') {
        parse_cell_lines(envelope.body)?
    } else {
        let (count, sex, abnormalities) = parse_lineage(envelope.body)?;
        KaryotypeTree::new(count, sex, abnormalities)
    };

    let all_abnormalities = || {
        tree.cell_lines
            .iter()
            .flatten()
            .flat_map(|line| line.abnormalities.iter())
            .chain(tree.abnormalities.iter())
    };
    modifiers.constitutional = all_abnormalities().any(|a| a.constitutional);
    modifiers.incomplete = all_abnormalities().any(|a| a.kind == AbnormalityKind::Incomplete);

    log::trace!(
        "parsed '{}' into {} abnormalities",
        input,
        tree.abnormalities.len()
    );

    tree.modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(tree)
}

/// Parse "/"-separated cell lines; the tree mirrors the first one
fn parse_cell_lines(body: &str) -> Result<KaryotypeTree, SyntaxError> {
    let mut cell_lines = Vec::new();

    for segment in lexer::split_cell_lines(body)? {
        let (chromosome_count, sex_chromosomes, abnormalities) = parse_lineage(segment.text)?;
        cell_lines.push(CellLine {
            chromosome_count,
            sex_chromosomes,
            abnormalities,
            cell_count: segment.cell_count.unwrap_or(0),
            is_donor: segment.is_donor,
        });
    }

    let first = cell_lines
        .first()
        .cloned()
        .ok_or_else(|| SyntaxError::EmptyCellLine(1, body.to_string()))?;

    Ok(KaryotypeTree {
        chromosome_count: first.chromosome_count,
        sex_chromosomes: first.sex_chromosomes,
        abnormalities: first.abnormalities,
        cell_lines: Some(cell_lines),
        modifiers: None,
    })
}

/// Parse one single-lineage karyotype like "46,XX,del(5)(q13)"
fn parse_lineage(text: &str) -> Result<Lineage, SyntaxError> {
    let fields = lexer::split_fields(text);
    if fields.len() < 2 {
        return Err(SyntaxError::MissingSeparator(text.to_string()));
    }

    let count = parse_chromosome_count(fields[0])?;
    let sex = parse_sex_chromosomes(fields[1])?;
    let abnormalities = fields[2..]
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| abnormality::parse_abnormality(field))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((count, sex, abnormalities))
}

/// A bare number, or range notation containing "~" kept verbatim
fn parse_chromosome_count(text: &str) -> Result<ChromosomeCount, SyntaxError> {
    if text.contains('~') {
        return Ok(ChromosomeCount::Range(text.to_string()));
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SyntaxError::InvalidCount(text.to_string()));
    }

    // Digits only, so the parse can only fail by overflowing
    Ok(ChromosomeCount::Exact(text.parse().unwrap_or(u32::MAX)))
}

fn parse_sex_chromosomes(text: &str) -> Result<String, SyntaxError> {
    if !SEX_CHROMOSOMES_RE.is_match(text) {
        return Err(SyntaxError::InvalidSexChromosomes(text.to_string()));
    }
    Ok(text.to_string())
}

fn append_annotation(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => {
            existing.push('.');
            existing.push_str(text);
        }
        None => *slot = Some(text.to_string()),
    }
}
