//! Karyotype Segmentation
//!
//! Cuts a raw karyotype string into the pieces the grammar works on:
//! modifier prefixes, FISH/array annotations, cell lines, cell counts and
//! comma-separated fields. Nothing here interprets abnormality notation.

use crate::parser::error::SyntaxError;

/// Annotation appended after the karyotype proper
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Annotation<'a> {
    /// In situ hybridization ("ish ..." or "nuc ish ...")
    Fish(&'a str),
    /// Chromosomal microarray ("arr ...")
    Array(&'a str),
}

/// Result of stripping the whole-karyotype decorations
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<'a> {
    pub mosaic: bool,
    pub chimera: bool,
    /// Karyotype text with prefixes and annotations removed
    pub body: &'a str,
    pub annotations: Vec<Annotation<'a>>,
}

/// One "/"-separated cell line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub cell_count: Option<u32>,
    pub is_donor: bool,
}

const MOSAIC_PREFIX: &str = "mos ";
const CHIMERA_PREFIX: &str = "chi ";

/// Annotation markers in the order they must be searched for
const ANNOTATION_MARKERS: [&str; 3] = ["nuc ish", "ish", "arr"];

/// Strip prefixes and annotations from a trimmed karyotype
pub fn split_envelope(input: &str) -> Envelope<'_> {
    let mut rest = input;
    let mut mosaic = false;
    let mut chimera = false;

    if let Some(stripped) = rest.strip_prefix(MOSAIC_PREFIX) {
        mosaic = true;
        rest = stripped.trim_start();
    } else if let Some(stripped) = rest.strip_prefix(CHIMERA_PREFIX) {
        chimera = true;
        rest = stripped.trim_start();
    }

    let (body, tail) = match annotation_start(rest) {
        Some(idx) => (rest[..idx].trim_end(), &rest[idx..]),
        None => (rest, ""),
    };

    Envelope {
        mosaic,
        chimera,
        body: body.trim_end_matches('.'),
        annotations: split_annotations(tail),
    }
}

/// Byte offset where annotation text begins, if any
///
/// An annotation either opens the string (FISH-only result) or follows a
/// dot, as in "46,XX.ish del(22)(q11.2q11.2)".
fn annotation_start(text: &str) -> Option<usize> {
    if ANNOTATION_MARKERS.iter().any(|m| text.starts_with(m)) {
        return Some(0);
    }

    ANNOTATION_MARKERS
        .iter()
        .filter_map(|marker| text.find(&format!(".{}", marker)))
        .min()
        .map(|idx| idx + 1)
}

/// Split annotation text at each ".ish"/".arr" boundary
fn split_annotations(text: &str) -> Vec<Annotation<'_>> {
    let mut annotations = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let next = ANNOTATION_MARKERS
            .iter()
            .filter_map(|marker| rest[1..].find(&format!(".{}", marker)))
            .min()
            .map(|idx| idx + 1);

        let (current, remaining) = match next {
            Some(idx) => (&rest[..idx], &rest[idx + 1..]),
            None => (rest, ""),
        };

        let current = current.trim();
        if current.starts_with("arr") {
            annotations.push(Annotation::Array(current));
        } else {
            annotations.push(Annotation::Fish(current));
        }
        rest = remaining.trim();
    }

    annotations
}

/// Split a karyotype body into cell lines
///
/// "//" separates recipient from donor lines in a chimera; a single "/"
/// separates cell lines within either side.
pub fn split_cell_lines(body: &str) -> Result<Vec<Segment<'_>>, SyntaxError> {
    let mut segments = Vec::new();

    for (side, part) in body.split("//").enumerate() {
        for text in part.split('/') {
            let position = segments.len() + 1;
            let text = text.trim();
            if text.is_empty() {
                return Err(SyntaxError::EmptyCellLine(position, body.to_string()));
            }
            let (text, cell_count) = split_cell_count(text)?;
            segments.push(Segment {
                text,
                cell_count,
                is_donor: side > 0,
            });
        }
    }

    Ok(segments)
}

/// Strip a trailing "[n]" cell count
pub fn split_cell_count(text: &str) -> Result<(&str, Option<u32>), SyntaxError> {
    let text = text.trim();
    if !text.ends_with(']') {
        return Ok((text, None));
    }

    let Some(open) = text.rfind('[') else {
        return Err(SyntaxError::InvalidCellCount(text.to_string()));
    };
    let inner = &text[open + 1..text.len() - 1];
    let count = inner
        .trim()
        .parse::<u32>()
        .map_err(|_| SyntaxError::InvalidCellCount(inner.to_string()))?;

    Ok((text[..open].trim_end(), Some(count)))
}

/// Split a single-lineage karyotype into trimmed comma-separated fields
pub fn split_fields(text: &str) -> Vec<&str> {
    text.split(',').map(str::trim).collect()
}
