//! Abnormality Recognizer
//!
//! Turns one comma-delimited field ("?del(5)(q13q33)mat") into an
//! [`Abnormality`]. Classification is by literal prefix; the order of
//! [`PRECEDENCE`] matters because several keywords are prefixes of others.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::ast::{Abnormality, AbnormalityKind, Breakpoint, Inheritance, Labels};
use crate::parser::breakpoint;
use crate::parser::error::SyntaxError;

/// Literal prefixes, checked top to bottom
///
/// | prefix    | kind                 | must precede |
/// |-----------|----------------------|--------------|
/// | `+`       | Gain                 |              |
/// | `-`       | Loss                 |              |
/// | `psu dic` | PseudoDicentric      |              |
/// | `idic`    | Isodicentric         | `i(`, `dic`  |
/// | `inc`     | Incomplete           | `i(`         |
/// | `ins`     | Insertion            | `i(`         |
/// | `inv`     | Inversion            | `i(`         |
/// | `i(`      | Isochromosome        |              |
/// | `del`     | Deletion             |              |
/// | `der`     | Derivative           |              |
/// | `dic`     | Dicentric            |              |
/// | `dup`     | Duplication          |              |
/// | `tas`     | TelomericAssociation | `t(`         |
/// | `trp`     | Triplication         | `t(`         |
/// | `t(`      | Translocation        |              |
/// | `rob`     | Robertsonian         | `r(`         |
/// | `r(`      | Ring                 |              |
/// | `add`     | Addition             |              |
/// | `qdp`     | Quadruplication      |              |
/// | `fra`     | FragileSite          |              |
/// | `fis`     | Fission              |              |
/// | `hsr`     | Hsr                  |              |
/// | `neo`     | Neocentromere        |              |
///
/// Counted keywords (`+2mar`, `4dmin`, `ace`) are recognized before this
/// table because their digit prefix would otherwise read as a gain.
pub const PRECEDENCE: [(&str, AbnormalityKind); 23] = [
    ("+", AbnormalityKind::Gain),
    ("-", AbnormalityKind::Loss),
    ("psu dic", AbnormalityKind::PseudoDicentric),
    ("idic", AbnormalityKind::Isodicentric),
    ("inc", AbnormalityKind::Incomplete),
    ("ins", AbnormalityKind::Insertion),
    ("inv", AbnormalityKind::Inversion),
    ("i(", AbnormalityKind::Isochromosome),
    ("del", AbnormalityKind::Deletion),
    ("der", AbnormalityKind::Derivative),
    ("dic", AbnormalityKind::Dicentric),
    ("dup", AbnormalityKind::Duplication),
    ("tas", AbnormalityKind::TelomericAssociation),
    ("trp", AbnormalityKind::Triplication),
    ("t(", AbnormalityKind::Translocation),
    ("rob", AbnormalityKind::Robertsonian),
    ("r(", AbnormalityKind::Ring),
    ("add", AbnormalityKind::Addition),
    ("qdp", AbnormalityKind::Quadruplication),
    ("fra", AbnormalityKind::FragileSite),
    ("fis", AbnormalityKind::Fission),
    ("hsr", AbnormalityKind::Hsr),
    ("neo", AbnormalityKind::Neocentromere),
];

const CHROMOSOME: &str = r"(?:\d{1,2}|[XY])";

static NUMERICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-](\d+|[XY])(c)?$").expect("numerical pattern compiles"));

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+(\d+)?(mar\d*)$").expect("marker pattern compiles"));

static COUNTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?(\d+)?(dmin|ace)$").expect("counted pattern compiles"));

/// keyword(chromosomes)(breakpoints), the breakpoint group optional
static STRUCTURAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+(?: [a-z]+)?)\(([^()]+)\)(?:\(([^()]*)\))?$")
        .expect("structural pattern compiles")
});

/// Short isochromosome form: i(17q)
static ISO_SHORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^i\(({})([pq])\)$", CHROMOSOME)).expect("isochromosome pattern compiles")
});

static DERIVATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^der\(([^()]+)\)(.*)$").expect("derivative pattern compiles"));

/// One rearrangement inside a derivative: t(9;22)(q34;q11.2)
static COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]+(?: [a-z]+)?\([^()]+\)(?:\([^()]*\))?").expect("component pattern compiles")
});

static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([^()]*)\)$").expect("group pattern compiles"));

static SINGLE_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{}$", CHROMOSOME)).expect("single label pattern compiles")
});

static MULTI_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^{0}(?:;{0})+$", CHROMOSOME)).expect("multi label pattern compiles")
});

/// Pieces a sub-grammar extracts from a field body
#[derive(Debug, Default)]
struct Parts {
    chromosome: String,
    breakpoints: Vec<Breakpoint>,
    copy_count: Option<u32>,
    constitutional: bool,
    components: Vec<Abnormality>,
}

/// Parse one trimmed, non-empty abnormality field
pub fn parse_abnormality(field: &str) -> Result<Abnormality, SyntaxError> {
    let raw = field.trim();

    let (uncertain, body) = match raw.strip_prefix('?') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, raw),
    };
    let (body, inheritance) = strip_inheritance(body);

    let mut abnormality = parse_body(body)?;
    abnormality.uncertain = uncertain;
    abnormality.inheritance = inheritance;
    abnormality.raw = raw.to_string();

    Ok(abnormality)
}

/// Classify and parse a field body with decorations already removed
fn parse_body(body: &str) -> Result<Abnormality, SyntaxError> {
    let kind = classify(body).unwrap_or(AbnormalityKind::Unknown);
    if kind == AbnormalityKind::Unknown {
        log::debug!("no sub-grammar claims '{}', keeping it as unknown", body);
    }

    let parts = recognize(kind, body)?;

    Ok(Abnormality {
        kind,
        chromosome: parts.chromosome,
        breakpoints: parts.breakpoints,
        inheritance: None,
        uncertain: false,
        copy_count: parts.copy_count,
        constitutional: parts.constitutional,
        components: parts.components,
        raw: body.to_string(),
    })
}

/// Remove a trailing inheritance suffix such as "mat" or "dn"
fn strip_inheritance(body: &str) -> (&str, Option<Inheritance>) {
    for (suffix, inheritance) in Inheritance::SUFFIXES {
        if let Some(rest) = body.strip_suffix(suffix) {
            if !rest.is_empty() {
                return (rest.trim_end(), Some(inheritance));
            }
        }
    }
    (body, None)
}

/// Pick the sub-grammar for a field body by its literal prefix
pub fn classify(body: &str) -> Option<AbnormalityKind> {
    let counted = body
        .trim_start_matches('+')
        .trim_start_matches(|c: char| c.is_ascii_digit());

    if body.starts_with('+') && counted.starts_with("mar") {
        return Some(AbnormalityKind::Marker);
    }
    if counted.starts_with("dmin") {
        return Some(AbnormalityKind::DoubleMinute);
    }
    if counted.starts_with("ace") {
        return Some(AbnormalityKind::AcentricFragment);
    }

    PRECEDENCE
        .iter()
        .find(|(prefix, _)| body.starts_with(prefix))
        .map(|(_, kind)| *kind)
}

/// Run the sub-grammar of `kind` against `body`
fn recognize(kind: AbnormalityKind, body: &str) -> Result<Parts, SyntaxError> {
    use AbnormalityKind::*;

    match kind {
        Gain | Loss => numerical(kind, body),
        Marker => marker(body),
        DoubleMinute | AcentricFragment => counted(kind, body),
        Incomplete => {
            if body == "inc" {
                Ok(Parts::default())
            } else {
                Err(malformed(kind, body))
            }
        }
        Hsr if body == "hsr" => Ok(Parts::default()),
        Isochromosome if ISO_SHORT_RE.is_match(body) => isochromosome_short(body),
        Derivative => derivative(body),
        Deletion | Duplication | Inversion | Translocation | Isochromosome | Ring | Insertion
        | Addition | Triplication | Dicentric | Isodicentric | FragileSite | Robertsonian
        | Quadruplication | Hsr | PseudoDicentric | TelomericAssociation | Fission
        | Neocentromere => banded(kind, body),
        Unknown => Ok(Parts::default()),
    }
}

/// +21, -7, +X, +8c, or a whole structural chromosome as in +i(17q)
fn numerical(kind: AbnormalityKind, body: &str) -> Result<Parts, SyntaxError> {
    if let Some(caps) = NUMERICAL_RE.captures(body) {
        return Ok(Parts {
            chromosome: caps[1].to_string(),
            constitutional: caps.get(2).is_some(),
            ..Parts::default()
        });
    }

    // Sign is a single ASCII byte
    let copied = &body[1..];
    let rearranged = classify(copied)
        .and_then(AbnormalityKind::shape)
        .is_some_and(|shape| shape.labels != Labels::None);
    if !rearranged {
        return Err(malformed(kind, body));
    }

    let structure = parse_body(copied)?;
    Ok(Parts {
        chromosome: structure.chromosome.clone(),
        components: vec![structure],
        ..Parts::default()
    })
}

/// +mar, +2mar, +mar1
fn marker(body: &str) -> Result<Parts, SyntaxError> {
    let caps = MARKER_RE
        .captures(body)
        .ok_or_else(|| malformed(AbnormalityKind::Marker, body))?;

    Ok(Parts {
        chromosome: caps[2].to_string(),
        copy_count: parse_count(caps.get(1).map(|m| m.as_str())),
        ..Parts::default()
    })
}

/// dmin, 4dmin, ace, +ace
fn counted(kind: AbnormalityKind, body: &str) -> Result<Parts, SyntaxError> {
    let caps = COUNTED_RE
        .captures(body)
        .filter(|caps| &caps[2] == kind.symbol())
        .ok_or_else(|| malformed(kind, body))?;

    Ok(Parts {
        copy_count: parse_count(caps.get(1).map(|m| m.as_str())),
        ..Parts::default()
    })
}

/// i(17q): whole-arm isochromosome, breakpoint at the centromere
fn isochromosome_short(body: &str) -> Result<Parts, SyntaxError> {
    let caps = ISO_SHORT_RE
        .captures(body)
        .ok_or_else(|| malformed(AbnormalityKind::Isochromosome, body))?;
    let centromere = breakpoint::parse_single(&format!("{}10", &caps[2]), body)?;

    Ok(Parts {
        chromosome: caps[1].to_string(),
        breakpoints: vec![centromere],
        ..Parts::default()
    })
}

/// keyword(chromosomes)(breakpoints) for every banded kind
fn banded(kind: AbnormalityKind, body: &str) -> Result<Parts, SyntaxError> {
    let Some(shape) = kind.shape() else {
        return Err(malformed(kind, body));
    };

    let caps = STRUCTURAL_RE
        .captures(body)
        .filter(|caps| &caps[1] == kind.symbol())
        .ok_or_else(|| malformed(kind, body))?;

    let chromosome = &caps[2];
    if !label_matches(shape.labels, chromosome) {
        return Err(malformed(kind, body));
    }

    let breakpoints = match caps.get(3) {
        Some(group) => parse_breakpoint_group(group.as_str(), chromosome, body)?,
        None if shape.arity.admits_none() => Vec::new(),
        // r(X) is kept so the breakpoint count rule can report it
        None if kind == AbnormalityKind::Ring => Vec::new(),
        None => return Err(malformed(kind, body)),
    };

    if let Some(max) = shape.arity.max() {
        if breakpoints.len() > max {
            return Err(SyntaxError::TooManyBreakpoints {
                keyword: kind.symbol(),
                fragment: body.to_string(),
                max,
                found: breakpoints.len(),
            });
        }
    }

    Ok(Parts {
        chromosome: chromosome.to_string(),
        breakpoints,
        ..Parts::default()
    })
}

/// der(22)t(9;22)(q34;q11.2), der(1;7)(q10;p10) or a bare der(X)
fn derivative(body: &str) -> Result<Parts, SyntaxError> {
    let kind = AbnormalityKind::Derivative;
    let caps = DERIVATIVE_RE
        .captures(body)
        .ok_or_else(|| malformed(kind, body))?;

    let chromosome = &caps[1];
    if !label_matches(Labels::SingleOrMultiple, chromosome) {
        return Err(malformed(kind, body));
    }

    let rest = caps.get(2).map_or("", |m| m.as_str());
    let mut parts = Parts {
        chromosome: chromosome.to_string(),
        ..Parts::default()
    };

    if let Some(group) = GROUP_RE.captures(rest) {
        parts.breakpoints = parse_breakpoint_group(&group[1], chromosome, body)?;
        return Ok(parts);
    }

    let mut remaining = rest;
    while !remaining.is_empty() {
        let component = COMPONENT_RE
            .find(remaining)
            .ok_or_else(|| malformed(kind, body))?
            .as_str();
        let parsed = parse_body(component)?;
        if parsed.kind == AbnormalityKind::Unknown {
            return Err(malformed(kind, body));
        }
        parts.components.push(parsed);
        remaining = &remaining[component.len()..];
    }

    Ok(parts)
}

/// "q13q33" or "q34;q11.2", flattened in written order
///
/// Semicolons are only meaningful when the chromosome label has them too.
fn parse_breakpoint_group(
    group: &str,
    chromosome: &str,
    fragment: &str,
) -> Result<Vec<Breakpoint>, SyntaxError> {
    if chromosome.contains(';') {
        let groups = breakpoint::parse_groups(group, fragment)?;
        Ok(groups.into_iter().flatten().collect())
    } else {
        breakpoint::parse_run(group, fragment)
    }
}

fn label_matches(labels: Labels, chromosome: &str) -> bool {
    match labels {
        Labels::None => false,
        Labels::Single => SINGLE_LABEL_RE.is_match(chromosome),
        Labels::Multiple => MULTI_LABEL_RE.is_match(chromosome),
        Labels::SingleOrMultiple => {
            SINGLE_LABEL_RE.is_match(chromosome) || MULTI_LABEL_RE.is_match(chromosome)
        }
    }
}

fn parse_count(digits: Option<&str>) -> Option<u32> {
    digits.and_then(|d| d.parse().ok())
}

fn malformed(kind: AbnormalityKind, fragment: &str) -> SyntaxError {
    SyntaxError::Malformed {
        keyword: kind.symbol(),
        fragment: fragment.to_string(),
        expected: expected_shape(kind),
    }
}

/// Shape of each sub-grammar, quoted in syntax errors
fn expected_shape(kind: AbnormalityKind) -> &'static str {
    use AbnormalityKind::*;

    match kind {
        Gain => "+<chromosome> or +<rearranged chromosome>, such as +21, +X or +i(17q)",
        Loss => "-<chromosome> or -<rearranged chromosome>, such as -7, -Y or -der(9)t(9;22)(q34;q11.2)",
        Marker => "+[count]mar[number], such as +mar, +2mar or +mar1",
        DoubleMinute => "[count]dmin, such as dmin or 4dmin",
        AcentricFragment => "[count]ace, such as ace or 2ace",
        Incomplete => "inc",
        Deletion => "del(<chromosome>)(<band>[<band>]), such as del(5)(q13q33)",
        Duplication => "dup(<chromosome>)(<band>[<band>]), such as dup(1)(p31p22)",
        Inversion => "inv(<chromosome>)(<band><band>), such as inv(9)(p12q13)",
        Triplication => "trp(<chromosome>)(<band><band>), such as trp(1)(q21q32)",
        Quadruplication => "qdp(<chromosome>)(<band><band>), such as qdp(1)(q23q32)",
        Fission => "fis(<chromosome>)(<band><band>), such as fis(10)(p10q10)",
        Ring => "r(<chromosome>)(<band><band>), such as r(1)(p36q42)",
        Isochromosome => "i(<chromosome><arm>) or i(<chromosome>)(<band>), such as i(17q)",
        Isodicentric => "idic(<chromosome>)(<band>), such as idic(X)(q13)",
        Addition => "add(<chromosome>)(<band>), such as add(19)(p13.3)",
        FragileSite => "fra(<chromosome>)(<band>), such as fra(X)(q27.3)",
        Neocentromere => "neo(<chromosome>)(<band>), such as neo(3)(q24)",
        Hsr => "hsr or hsr(<chromosome>)(<band>), such as hsr(1)(p22)",
        Insertion => "ins(<chromosomes>)(<bands>), such as ins(2)(p13q21q31)",
        Translocation => "t(<chromosome>;<chromosome>)(<band>;<band>), such as t(9;22)(q34;q11.2)",
        Dicentric => "dic(<chromosome>;<chromosome>)(<band>;<band>), such as dic(13;15)(q22;q24)",
        Robertsonian => "rob(<chromosome>;<chromosome>)(<band>;<band>), such as rob(13;14)(q10;q10)",
        PseudoDicentric => {
            "psu dic(<chromosome>;<chromosome>)(<band>;<band>), such as psu dic(15;13)(q12;q12)"
        }
        TelomericAssociation => {
            "tas(<chromosome>;<chromosome>)(<band>;<band>), such as tas(12;13)(q24.3;q34)"
        }
        Derivative => {
            "der(<chromosome>) followed by its rearrangements, such as der(22)t(9;22)(q34;q11.2)"
        }
        Unknown => "a recognized abnormality",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Arm;

    #[test]
    fn test_precedence_shadows_shorter_prefixes() {
        assert_eq!(classify("idic(X)(q13)"), Some(AbnormalityKind::Isodicentric));
        assert_eq!(classify("ins(2)(p13q21q31)"), Some(AbnormalityKind::Insertion));
        assert_eq!(classify("inv(9)(p12q13)"), Some(AbnormalityKind::Inversion));
        assert_eq!(classify("inc"), Some(AbnormalityKind::Incomplete));
        assert_eq!(classify("i(17q)"), Some(AbnormalityKind::Isochromosome));
        assert_eq!(classify("tas(12;13)(q24.3;q34)"), Some(AbnormalityKind::TelomericAssociation));
        assert_eq!(classify("trp(1)(q21q32)"), Some(AbnormalityKind::Triplication));
        assert_eq!(classify("t(9;22)(q34;q11.2)"), Some(AbnormalityKind::Translocation));
        assert_eq!(classify("rob(13;14)(q10;q10)"), Some(AbnormalityKind::Robertsonian));
        assert_eq!(classify("r(1)"), Some(AbnormalityKind::Ring));
        assert_eq!(classify("psu dic(15;13)(q12;q12)"), Some(AbnormalityKind::PseudoDicentric));
        assert_eq!(classify("dic(13;15)(q22;q24)"), Some(AbnormalityKind::Dicentric));
    }

    #[test]
    fn test_counted_keywords_before_gain() {
        assert_eq!(classify("+mar"), Some(AbnormalityKind::Marker));
        assert_eq!(classify("+2mar"), Some(AbnormalityKind::Marker));
        assert_eq!(classify("+21"), Some(AbnormalityKind::Gain));
        assert_eq!(classify("4dmin"), Some(AbnormalityKind::DoubleMinute));
        assert_eq!(classify("+ace"), Some(AbnormalityKind::AcentricFragment));
    }

    #[test]
    fn test_unclaimed_prefix() {
        assert_eq!(classify("21"), None);
        assert_eq!(classify("idem"), None);
        assert_eq!(classify("foo(1)(q21)"), None);
    }

    #[test]
    fn test_unknown_is_kept() {
        let abn = parse_abnormality("21").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::Unknown);
        assert_eq!(abn.raw, "21");
        assert!(abn.breakpoints.is_empty());
    }

    #[test]
    fn test_gain_and_loss() {
        let gain = parse_abnormality("+21").unwrap();
        assert_eq!(gain.kind, AbnormalityKind::Gain);
        assert_eq!(gain.chromosome, "21");

        let loss = parse_abnormality("-Y").unwrap();
        assert_eq!(loss.kind, AbnormalityKind::Loss);
        assert_eq!(loss.chromosome, "Y");
    }

    #[test]
    fn test_constitutional_gain() {
        let abn = parse_abnormality("+21c").unwrap();
        assert!(abn.constitutional);
        assert_eq!(abn.chromosome, "21");
    }

    #[test]
    fn test_bare_plus_is_malformed() {
        let err = parse_abnormality("+").unwrap_err();
        assert!(matches!(err, SyntaxError::Malformed { keyword: "+", .. }));
    }

    #[test]
    fn test_uncertain_with_inheritance() {
        let abn = parse_abnormality("?del(5)(q13q33)mat").unwrap();
        assert!(abn.uncertain);
        assert_eq!(abn.inheritance, Some(Inheritance::Maternal));
        assert_eq!(abn.kind, AbnormalityKind::Deletion);
        assert_eq!(abn.raw, "?del(5)(q13q33)mat");
    }

    #[test]
    fn test_longest_inheritance_suffix_wins() {
        let abn = parse_abnormality("t(1;2)(q21;p13)dpat").unwrap();
        assert_eq!(abn.inheritance, Some(Inheritance::DerivedPaternal));
        let abn = parse_abnormality("inv(9)(p12q13)dn").unwrap();
        assert_eq!(abn.inheritance, Some(Inheritance::DeNovo));
    }

    #[test]
    fn test_marker_counts() {
        let abn = parse_abnormality("+2mar").unwrap();
        assert_eq!(abn.copy_count, Some(2));
        assert_eq!(abn.chromosome, "mar");

        let abn = parse_abnormality("+mar1").unwrap();
        assert_eq!(abn.copy_count, None);
        assert_eq!(abn.chromosome, "mar1");
    }

    #[test]
    fn test_double_minutes() {
        let abn = parse_abnormality("12dmin").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::DoubleMinute);
        assert_eq!(abn.copy_count, Some(12));
    }

    #[test]
    fn test_isochromosome_forms() {
        let short = parse_abnormality("i(17q)").unwrap();
        assert_eq!(short.chromosome, "17");
        assert_eq!(short.breakpoints[0].arm, Arm::Q);
        assert_eq!(short.breakpoints[0].region, 1);
        assert_eq!(short.breakpoints[0].band, 0);

        let long = parse_abnormality("i(17)(q10)").unwrap();
        assert_eq!(long.breakpoints, short.breakpoints);
    }

    #[test]
    fn test_translocation_breakpoints_flattened() {
        let abn = parse_abnormality("t(1;3;5)(p32;q21;q31)").unwrap();
        assert_eq!(abn.chromosome, "1;3;5");
        assert_eq!(abn.breakpoints.len(), 3);
    }

    #[test]
    fn test_translocation_needs_two_labels() {
        let err = parse_abnormality("t(9)(q34)").unwrap_err();
        assert!(matches!(err, SyntaxError::Malformed { keyword: "t", .. }));
    }

    #[test]
    fn test_too_many_breakpoints() {
        let err = parse_abnormality("inv(9)(p12q13q21)").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::TooManyBreakpoints {
                keyword: "inv",
                fragment: "inv(9)(p12q13q21)".to_string(),
                max: 2,
                found: 3,
            }
        );
    }

    #[test]
    fn test_fewer_breakpoints_left_to_rules() {
        let abn = parse_abnormality("inv(9)(p12)").unwrap();
        assert_eq!(abn.breakpoints.len(), 1);
    }

    #[test]
    fn test_semicolon_needs_multiple_chromosomes() {
        let err = parse_abnormality("del(5)(q13;q33)").unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidBreakpoint { .. }));
    }

    #[test]
    fn test_missing_breakpoint_group() {
        assert!(parse_abnormality("del(5)q13").is_err());
        assert!(parse_abnormality("del(5)").is_err());
    }

    #[test]
    fn test_ring_without_breakpoints_is_parsed() {
        let abn = parse_abnormality("r(X)").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::Ring);
        assert!(abn.breakpoints.is_empty());
    }

    #[test]
    fn test_gained_derivative() {
        let abn = parse_abnormality("+der(22)t(11;22)(q23;q11.2)").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::Gain);
        assert_eq!(abn.chromosome, "22");
        assert!(abn.breakpoints.is_empty());
        assert_eq!(abn.raw, "+der(22)t(11;22)(q23;q11.2)");

        let [copied] = abn.components.as_slice() else {
            panic!("expected one copied chromosome, got {:?}", abn.components);
        };
        assert_eq!(copied.kind, AbnormalityKind::Derivative);
        assert_eq!(copied.raw, "der(22)t(11;22)(q23;q11.2)");
        assert_eq!(copied.components[0].kind, AbnormalityKind::Translocation);
    }

    #[test]
    fn test_gained_isochromosome_and_ring() {
        let iso = parse_abnormality("+i(17q)").unwrap();
        assert_eq!(iso.kind, AbnormalityKind::Gain);
        assert_eq!(iso.chromosome, "17");
        assert_eq!(iso.components[0].kind, AbnormalityKind::Isochromosome);
        assert_eq!(iso.components[0].breakpoints.len(), 1);

        let ring = parse_abnormality("+r(1)(p36q42)").unwrap();
        assert_eq!(ring.components[0].kind, AbnormalityKind::Ring);
        assert_eq!(ring.components[0].breakpoints.len(), 2);
    }

    #[test]
    fn test_lost_derivative() {
        let abn = parse_abnormality("-der(9)t(9;22)(q34;q11.2)").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::Loss);
        assert_eq!(abn.components[0].kind, AbnormalityKind::Derivative);
    }

    #[test]
    fn test_gain_of_unstructured_field_is_malformed() {
        assert!(matches!(
            parse_abnormality("+foo(1)").unwrap_err(),
            SyntaxError::Malformed { keyword: "+", .. }
        ));
        assert!(matches!(
            parse_abnormality("++21").unwrap_err(),
            SyntaxError::Malformed { keyword: "+", .. }
        ));
        assert!(matches!(
            parse_abnormality("+inc").unwrap_err(),
            SyntaxError::Malformed { keyword: "+", .. }
        ));
    }

    #[test]
    fn test_gained_structure_keeps_its_own_errors() {
        let err = parse_abnormality("+inv(9)(p12q13q21)").unwrap_err();
        assert!(matches!(err, SyntaxError::TooManyBreakpoints { keyword: "inv", .. }));
    }

    #[test]
    fn test_insertion_across_chromosomes() {
        let abn = parse_abnormality("ins(5;2)(p14;q22q32)").unwrap();
        assert_eq!(abn.chromosome, "5;2");
        assert_eq!(abn.breakpoints.len(), 3);
    }

    #[test]
    fn test_pseudodicentric_keyword_with_space() {
        let abn = parse_abnormality("psu dic(15;13)(q12;q12)").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::PseudoDicentric);
        assert_eq!(abn.breakpoints.len(), 2);
    }

    #[test]
    fn test_derivative_components() {
        let abn = parse_abnormality("der(1)t(1;3)(p32;q21)t(1;5)(q21;q31)").unwrap();
        assert_eq!(abn.kind, AbnormalityKind::Derivative);
        assert_eq!(abn.chromosome, "1");
        assert!(abn.breakpoints.is_empty());
        assert_eq!(abn.components.len(), 2);
        assert_eq!(abn.components[1].raw, "t(1;5)(q21;q31)");
    }

    #[test]
    fn test_derivative_whole_arm_form() {
        let abn = parse_abnormality("der(1;7)(q10;p10)").unwrap();
        assert_eq!(abn.chromosome, "1;7");
        assert_eq!(abn.breakpoints.len(), 2);
        assert!(abn.components.is_empty());
    }

    #[test]
    fn test_derivative_with_unknown_component() {
        assert!(parse_abnormality("der(1)foo(1)(p31)").is_err());
    }

    #[test]
    fn test_hsr_forms() {
        assert!(parse_abnormality("hsr").unwrap().breakpoints.is_empty());
        let located = parse_abnormality("hsr(1)(p22)").unwrap();
        assert_eq!(located.chromosome, "1");
        assert_eq!(located.breakpoints.len(), 1);
    }
}
