//! Tree-level rules: chromosome count and sex chromosomes

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Category, Check, Rule};
use crate::parser::{ChromosomeCount, KaryotypeTree};

/// Smallest and largest plausible total counts
pub const COUNT_RANGE: (u32, u32) = (23, 92);

/// Sex chromosome string meaning "not disclosed"
const UNDISCLOSED: &str = "U";

static COUNT_RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+~\d+$").expect("count range pattern compiles"));

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "CHR_COUNT_NUMERIC",
            category: Category::ChromosomeCount,
            description: "Chromosome count must be numeric or valid range notation",
            check: Check::Tree(count_numeric),
        },
        Rule {
            id: "CHR_COUNT_RANGE",
            category: Category::ChromosomeCount,
            description: "Chromosome count must be between 23 and 92",
            check: Check::Tree(count_range),
        },
        Rule {
            id: "SEX_CHR_VALID",
            category: Category::SexChromosomes,
            description: "Sex chromosomes must contain at least one X",
            check: Check::Tree(sex_chromosomes_valid),
        },
        Rule {
            id: "SEX_CHR_COHERENCE",
            category: Category::Coherence,
            description: "Chromosome count must be coherent with sex chromosome count",
            check: Check::Tree(sex_chromosomes_coherence),
        },
    ]
}

fn count_numeric(tree: &KaryotypeTree) -> Vec<String> {
    match &tree.chromosome_count {
        ChromosomeCount::Range(range) if !COUNT_RANGE_RE.is_match(range) => {
            vec![format!("Chromosome count '{}' is not numeric", range)]
        }
        _ => Vec::new(),
    }
}

fn count_range(tree: &KaryotypeTree) -> Vec<String> {
    let (min, max) = COUNT_RANGE;
    match tree.chromosome_count {
        ChromosomeCount::Exact(count) if count < min || count > max => vec![format!(
            "Chromosome count {} is outside valid range (must be between {} and {})",
            count, min, max
        )],
        _ => Vec::new(),
    }
}

fn sex_chromosomes_valid(tree: &KaryotypeTree) -> Vec<String> {
    let sex = tree.sex_chromosomes.as_str();
    if tree.chromosome_count == ChromosomeCount::Absent || sex == UNDISCLOSED {
        return Vec::new();
    }

    if !sex.contains('X') {
        return vec![format!(
            "Sex chromosomes '{}' must contain at least one X chromosome",
            sex
        )];
    }
    Vec::new()
}

/// Only 45 and 46 have an unambiguous sex chromosome count, and only when
/// no abnormality could explain a difference.
fn sex_chromosomes_coherence(tree: &KaryotypeTree) -> Vec<String> {
    let ChromosomeCount::Exact(count) = tree.chromosome_count else {
        return Vec::new();
    };
    let sex = tree.sex_chromosomes.as_str();
    if sex == UNDISCLOSED || !tree.abnormalities.is_empty() {
        return Vec::new();
    }

    let found = sex.chars().count();
    match count {
        46 if found != 2 => vec![format!(
            "Chromosome count 46 requires 2 sex chromosomes, but found {} ('{}')",
            found, sex
        )],
        45 if found != 1 => vec![format!(
            "Chromosome count 45 requires 1 sex chromosome, but found {} ('{}')",
            found, sex
        )],
        _ => Vec::new(),
    }
}
