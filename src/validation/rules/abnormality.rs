//! Abnormality-level rules
//!
//! Each rule is scoped to the kinds whose [`Shape`] gives it something to
//! check.

use super::{Category, Check, Rule};
use crate::parser::{
    Abnormality, AbnormalityKind, Arm, ArmRelation, Arity, KaryotypeTree, Shape,
};

/// Chromosome names a gain or loss may reference
const VALID_CHROMOSOMES: [&str; 24] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y",
];

const EXACT_COUNTS: [&[usize]; 4] = [&[0], &[1], &[2], &[3]];

pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "ABN_RECOGNIZED",
            category: Category::Abnormality,
            description: "Abnormality notation must be recognized",
            check: Check::Abnormality {
                scope: |kind| kind == AbnormalityKind::Unknown,
                check: recognized,
            },
        },
        Rule {
            id: "ABN_NUM_CHR_VALID",
            category: Category::Abnormality,
            description: "Numerical abnormality chromosome must be 1-22, X, or Y",
            check: Check::Abnormality {
                scope: |kind| matches!(kind, AbnormalityKind::Gain | AbnormalityKind::Loss),
                check: numerical_chromosome,
            },
        },
        Rule {
            id: "ABN_BP_ARM_VALID",
            category: Category::Abnormality,
            description: "Breakpoint arm must be 'p' or 'q'",
            check: Check::Abnormality {
                scope: |kind| kind.shape().is_some_and(|shape| shape.arity != Arity::Exactly(0)),
                check: breakpoint_arm,
            },
        },
        Rule {
            id: "ABN_BP_COUNT",
            category: Category::Abnormality,
            description: "Breakpoint count must match the abnormality type",
            check: Check::Abnormality {
                scope: |kind| fixed_counts(kind).is_some(),
                check: breakpoint_count,
            },
        },
        Rule {
            id: "ABN_BP_ARMS",
            category: Category::Abnormality,
            description: "Paired breakpoints must lie on the arms the abnormality type requires",
            check: Check::Abnormality {
                scope: |kind| {
                    kind.shape()
                        .is_some_and(|shape| shape.arms != ArmRelation::Unconstrained)
                },
                check: breakpoint_arms,
            },
        },
        Rule {
            id: "ABN_CHR_BP_MATCH",
            category: Category::Abnormality,
            description: "Multi-chromosome rearrangements need one breakpoint per chromosome",
            check: Check::Abnormality {
                scope: |kind| kind.shape().is_some_and(|shape| shape.is_multi_chromosome()),
                check: chromosome_breakpoint_match,
            },
        },
        Rule {
            id: "ABN_DER_SOURCE",
            category: Category::Abnormality,
            description: "Derivative chromosome must name the rearrangement it derives from",
            check: Check::Abnormality {
                scope: |kind| kind == AbnormalityKind::Derivative,
                check: derivative_source,
            },
        },
    ]
}

fn recognized(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    vec![format!("Unrecognized abnormality notation '{}'", abn.raw)]
}

/// A gained or lost rearranged chromosome is checked through its component.
fn numerical_chromosome(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    if !abn.components.is_empty() || VALID_CHROMOSOMES.contains(&abn.chromosome.as_str()) {
        return Vec::new();
    }
    vec![format!(
        "Invalid chromosome '{}' in {}. Must be 1-22, X, or Y",
        abn.chromosome, abn.raw
    )]
}

/// [`Arm`] only holds p or q, so a tree that got this far always passes.
/// Arm letters are rejected when the band text is parsed.
fn breakpoint_arm(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    abn.breakpoints
        .iter()
        .filter(|bp| !matches!(bp.arm, Arm::P | Arm::Q))
        .map(|bp| format!("Invalid breakpoint arm '{}' in {}. Must be 'p' or 'q'", bp.arm, abn.raw))
        .collect()
}

/// Allowed breakpoint counts when they do not depend on the labels
fn fixed_counts(kind: AbnormalityKind) -> Option<&'static [usize]> {
    match kind.shape()?.arity {
        Arity::Exactly(n) => EXACT_COUNTS.iter().copied().find(|counts| counts[0] == n),
        Arity::OneOf(counts) => Some(counts),
        Arity::PerChromosome | Arity::PerChromosomeIfGiven => None,
    }
}

fn breakpoint_count(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    let Some(counts) = fixed_counts(abn.kind) else {
        return Vec::new();
    };
    let found = abn.breakpoints.len();
    if counts.contains(&found) {
        return Vec::new();
    }

    let plural = counts.iter().any(|&n| n > 1);
    let expected = if counts == [0] {
        "no breakpoints".to_string()
    } else {
        format!(
            "{} {}",
            counts
                .iter()
                .map(|&n| number_word(n))
                .collect::<Vec<_>>()
                .join(" or "),
            if plural { "breakpoints" } else { "breakpoint" }
        )
    };

    vec![format!(
        "{} requires {}, found {} in {}",
        abn.kind.display_name(),
        expected,
        found,
        abn.raw
    )]
}

fn breakpoint_arms(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    let Some(Shape { arms, .. }) = abn.kind.shape() else {
        return Vec::new();
    };
    let [first, second] = abn.breakpoints.as_slice() else {
        return Vec::new();
    };

    let (violated, relation) = match arms {
        ArmRelation::Unconstrained => return Vec::new(),
        ArmRelation::SameArm => (first.arm != second.arm, "same arm"),
        ArmRelation::DifferentArms => (first.arm == second.arm, "different arms"),
    };
    if !violated {
        return Vec::new();
    }

    let subject = match abn.kind {
        AbnormalityKind::Deletion => "Interstitial deletion",
        kind => kind.display_name(),
    };
    vec![format!(
        "{} breakpoints must be on {}, found {} and {} in {}",
        subject, relation, first.arm, second.arm, abn.raw
    )]
}

/// Compares counts only; a three-way rearrangement sharing a breakpoint is
/// not modelled.
fn chromosome_breakpoint_match(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    let Some(shape) = abn.kind.shape() else {
        return Vec::new();
    };
    if shape.arity == Arity::PerChromosomeIfGiven && abn.breakpoints.is_empty() {
        return Vec::new();
    }

    let chromosomes = abn.chromosomes().count();
    let breakpoints = abn.breakpoints.len();
    if chromosomes == breakpoints {
        return Vec::new();
    }
    vec![format!(
        "{} has {} chromosomes but {} breakpoints in {}",
        abn.kind.display_name(),
        chromosomes,
        breakpoints,
        abn.raw
    )]
}

fn derivative_source(_: &KaryotypeTree, abn: &Abnormality) -> Vec<String> {
    if !abn.components.is_empty() || !abn.breakpoints.is_empty() {
        return Vec::new();
    }
    vec![format!(
        "Derivative chromosome {} does not name the rearrangement it derives from",
        abn.raw
    )]
}

fn number_word(n: usize) -> String {
    match n {
        0 => "zero".to_string(),
        1 => "one".to_string(),
        2 => "two".to_string(),
        3 => "three".to_string(),
        n => n.to_string(),
    }
}
