//! Karyotype Syntax Tree
//!
//! Plain data types produced by the parser. No validation logic lives here:
//! the rule catalog reads these types, it never mutates them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chromosome arm of a breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// Short arm
    #[serde(rename = "p")]
    P,
    /// Long arm
    #[serde(rename = "q")]
    Q,
}

impl Arm {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Arm::P),
            'q' => Some(Arm::Q),
            _ => None,
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::P => f.write_str("p"),
            Arm::Q => f.write_str("q"),
        }
    }
}

/// A cytogenetic band location like "q11.2"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub arm: Arm,
    /// First digit of the band designation
    pub region: u8,
    /// Remaining digits of the band designation (0 when there are none)
    pub band: u8,
    /// Digits after the dot, kept as text so "11" and "1" stay distinct
    pub subband: Option<String>,
    /// The designation carried a "?"
    pub uncertain: bool,
}

/// Every abnormality the recognizer knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbnormalityKind {
    Gain,
    Loss,
    Deletion,
    Duplication,
    Inversion,
    Translocation,
    Isochromosome,
    Ring,
    Insertion,
    Addition,
    Triplication,
    Dicentric,
    Isodicentric,
    FragileSite,
    Robertsonian,
    Quadruplication,
    Marker,
    Derivative,
    DoubleMinute,
    Hsr,
    PseudoDicentric,
    AcentricFragment,
    TelomericAssociation,
    Fission,
    Neocentromere,
    Incomplete,
    /// Well-delimited field no sub-grammar claimed
    Unknown,
}

impl AbnormalityKind {
    /// All kinds, in declaration order
    pub const ALL: [AbnormalityKind; 27] = [
        AbnormalityKind::Gain,
        AbnormalityKind::Loss,
        AbnormalityKind::Deletion,
        AbnormalityKind::Duplication,
        AbnormalityKind::Inversion,
        AbnormalityKind::Translocation,
        AbnormalityKind::Isochromosome,
        AbnormalityKind::Ring,
        AbnormalityKind::Insertion,
        AbnormalityKind::Addition,
        AbnormalityKind::Triplication,
        AbnormalityKind::Dicentric,
        AbnormalityKind::Isodicentric,
        AbnormalityKind::FragileSite,
        AbnormalityKind::Robertsonian,
        AbnormalityKind::Quadruplication,
        AbnormalityKind::Marker,
        AbnormalityKind::Derivative,
        AbnormalityKind::DoubleMinute,
        AbnormalityKind::Hsr,
        AbnormalityKind::PseudoDicentric,
        AbnormalityKind::AcentricFragment,
        AbnormalityKind::TelomericAssociation,
        AbnormalityKind::Fission,
        AbnormalityKind::Neocentromere,
        AbnormalityKind::Incomplete,
        AbnormalityKind::Unknown,
    ];

    /// ISCN keyword of this kind ("del", "t", "+mar", ...)
    pub fn symbol(self) -> &'static str {
        match self {
            AbnormalityKind::Gain => "+",
            AbnormalityKind::Loss => "-",
            AbnormalityKind::Deletion => "del",
            AbnormalityKind::Duplication => "dup",
            AbnormalityKind::Inversion => "inv",
            AbnormalityKind::Translocation => "t",
            AbnormalityKind::Isochromosome => "i",
            AbnormalityKind::Ring => "r",
            AbnormalityKind::Insertion => "ins",
            AbnormalityKind::Addition => "add",
            AbnormalityKind::Triplication => "trp",
            AbnormalityKind::Dicentric => "dic",
            AbnormalityKind::Isodicentric => "idic",
            AbnormalityKind::FragileSite => "fra",
            AbnormalityKind::Robertsonian => "rob",
            AbnormalityKind::Quadruplication => "qdp",
            AbnormalityKind::Marker => "+mar",
            AbnormalityKind::Derivative => "der",
            AbnormalityKind::DoubleMinute => "dmin",
            AbnormalityKind::Hsr => "hsr",
            AbnormalityKind::PseudoDicentric => "psu dic",
            AbnormalityKind::AcentricFragment => "ace",
            AbnormalityKind::TelomericAssociation => "tas",
            AbnormalityKind::Fission => "fis",
            AbnormalityKind::Neocentromere => "neo",
            AbnormalityKind::Incomplete => "inc",
            AbnormalityKind::Unknown => "?",
        }
    }

    /// Human readable name used in diagnostics
    pub fn display_name(self) -> &'static str {
        match self {
            AbnormalityKind::Gain => "Chromosome gain",
            AbnormalityKind::Loss => "Chromosome loss",
            AbnormalityKind::Deletion => "Deletion",
            AbnormalityKind::Duplication => "Duplication",
            AbnormalityKind::Inversion => "Inversion",
            AbnormalityKind::Translocation => "Translocation",
            AbnormalityKind::Isochromosome => "Isochromosome",
            AbnormalityKind::Ring => "Ring chromosome",
            AbnormalityKind::Insertion => "Insertion",
            AbnormalityKind::Addition => "Additional material",
            AbnormalityKind::Triplication => "Triplication",
            AbnormalityKind::Dicentric => "Dicentric chromosome",
            AbnormalityKind::Isodicentric => "Isodicentric chromosome",
            AbnormalityKind::FragileSite => "Fragile site",
            AbnormalityKind::Robertsonian => "Robertsonian translocation",
            AbnormalityKind::Quadruplication => "Quadruplication",
            AbnormalityKind::Marker => "Marker chromosome",
            AbnormalityKind::Derivative => "Derivative chromosome",
            AbnormalityKind::DoubleMinute => "Double minute",
            AbnormalityKind::Hsr => "Homogeneously staining region",
            AbnormalityKind::PseudoDicentric => "Pseudodicentric chromosome",
            AbnormalityKind::AcentricFragment => "Acentric fragment",
            AbnormalityKind::TelomericAssociation => "Telomeric association",
            AbnormalityKind::Fission => "Fission",
            AbnormalityKind::Neocentromere => "Neocentromere",
            AbnormalityKind::Incomplete => "Incomplete karyotype",
            AbnormalityKind::Unknown => "Unrecognized abnormality",
        }
    }
}

impl fmt::Display for AbnormalityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How many breakpoints a kind carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    OneOf(&'static [usize]),
    /// One breakpoint per chromosome label
    PerChromosome,
    /// One per chromosome label when breakpoints are written at all
    PerChromosomeIfGiven,
}

impl Arity {
    /// Largest count the grammar accepts, `None` when bounded by the labels
    pub fn max(self) -> Option<usize> {
        match self {
            Arity::Exactly(n) => Some(n),
            Arity::OneOf(counts) => counts.iter().copied().max(),
            Arity::PerChromosome | Arity::PerChromosomeIfGiven => None,
        }
    }

    pub fn admits_none(self) -> bool {
        match self {
            Arity::Exactly(n) => n == 0,
            Arity::OneOf(counts) => counts.contains(&0),
            Arity::PerChromosome => false,
            Arity::PerChromosomeIfGiven => true,
        }
    }
}

/// Required relation between the arms of a kind's breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmRelation {
    Unconstrained,
    /// All breakpoints on one arm (when there are two)
    SameArm,
    /// Breakpoints on opposite arms (when there are two)
    DifferentArms,
}

/// Which chromosome labels a kind's grammar accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Labels {
    /// No parenthesized chromosome at all
    None,
    Single,
    Multiple,
    SingleOrMultiple,
}

/// Structural expectations for one abnormality kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub arity: Arity,
    pub arms: ArmRelation,
    pub labels: Labels,
}

impl Shape {
    const fn new(arity: Arity, arms: ArmRelation, labels: Labels) -> Self {
        Self {
            arity,
            arms,
            labels,
        }
    }

    pub fn is_multi_chromosome(&self) -> bool {
        matches!(
            self.arity,
            Arity::PerChromosome | Arity::PerChromosomeIfGiven
        )
    }
}

impl AbnormalityKind {
    /// Breakpoint arity, arm relation and label form; `None` for `Unknown`
    pub fn shape(self) -> Option<Shape> {
        use AbnormalityKind::*;
        use ArmRelation::*;

        let shape = match self {
            Gain | Loss => Shape::new(Arity::Exactly(0), Unconstrained, Labels::None),
            Marker | DoubleMinute | AcentricFragment | Incomplete => {
                Shape::new(Arity::Exactly(0), Unconstrained, Labels::None)
            }
            Deletion | Duplication => Shape::new(Arity::OneOf(&[1, 2]), SameArm, Labels::Single),
            Inversion | Fission => Shape::new(Arity::Exactly(2), Unconstrained, Labels::Single),
            Triplication | Quadruplication => {
                Shape::new(Arity::Exactly(2), SameArm, Labels::Single)
            }
            Ring => Shape::new(Arity::Exactly(2), DifferentArms, Labels::Single),
            Isochromosome | Isodicentric | Addition | FragileSite | Neocentromere => {
                Shape::new(Arity::Exactly(1), Unconstrained, Labels::Single)
            }
            Hsr => Shape::new(Arity::OneOf(&[0, 1]), Unconstrained, Labels::Single),
            Insertion => Shape::new(Arity::Exactly(3), Unconstrained, Labels::SingleOrMultiple),
            Translocation | Dicentric | Robertsonian | PseudoDicentric | TelomericAssociation => {
                Shape::new(Arity::PerChromosome, Unconstrained, Labels::Multiple)
            }
            Derivative => Shape::new(
                Arity::PerChromosomeIfGiven,
                Unconstrained,
                Labels::SingleOrMultiple,
            ),
            Unknown => return None,
        };

        Some(shape)
    }
}

/// Origin of an abnormality ("mat", "pat", "dn", ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inheritance {
    Maternal,
    Paternal,
    DeNovo,
    Inherited,
    DerivedMaternal,
    DerivedPaternal,
}

impl Inheritance {
    /// Suffixes in the order they must be tried, longest first
    pub const SUFFIXES: [(&'static str, Inheritance); 6] = [
        ("dmat", Inheritance::DerivedMaternal),
        ("dpat", Inheritance::DerivedPaternal),
        ("mat", Inheritance::Maternal),
        ("pat", Inheritance::Paternal),
        ("inh", Inheritance::Inherited),
        ("dn", Inheritance::DeNovo),
    ];
}

/// One coded deviation from a normal chromosome complement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Abnormality {
    pub kind: AbnormalityKind,
    /// Chromosome label, ";"-joined for multi-chromosome events ("9;22")
    pub chromosome: String,
    pub breakpoints: Vec<Breakpoint>,
    pub inheritance: Option<Inheritance>,
    /// Field started with "?"
    pub uncertain: bool,
    /// Leading multiplier as in "+2mar" or "4dmin"
    pub copy_count: Option<u32>,
    /// Trailing "c" on a numerical change ("+21c")
    #[serde(default)]
    pub constitutional: bool,
    /// Rearrangements a derivative chromosome is built from, or the single
    /// structural chromosome a gain or loss copies ("+i(17q)")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Abnormality>,
    /// The field exactly as written
    pub raw: String,
}

impl Abnormality {
    /// Individual chromosome labels of this abnormality
    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chromosome.split(';').filter(|c| !c.is_empty())
    }
}

/// Total chromosome count field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChromosomeCount {
    Exact(u32),
    /// Range notation like "45~48", kept verbatim
    Range(String),
    /// FISH or array result with no count
    Absent,
}

impl fmt::Display for ChromosomeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromosomeCount::Exact(n) => write!(f, "{}", n),
            ChromosomeCount::Range(r) => f.write_str(r),
            ChromosomeCount::Absent => f.write_str("(none)"),
        }
    }
}

/// One clonal population of a mosaic or chimera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLine {
    pub chromosome_count: ChromosomeCount,
    pub sex_chromosomes: String,
    pub abnormalities: Vec<Abnormality>,
    /// Number in brackets, 0 when not given
    pub cell_count: u32,
    /// Listed after "//" in a chimera
    pub is_donor: bool,
}

/// Karyotype-level flags and annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub mosaic: bool,
    pub chimera: bool,
    pub constitutional: bool,
    pub incomplete: bool,
    /// In situ hybridization text following ".ish"
    pub fish: Option<String>,
    /// Microarray text following ".arr"
    pub array: Option<String>,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        *self == Modifiers::default()
    }
}

/// Top-level parse result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaryotypeTree {
    pub chromosome_count: ChromosomeCount,
    pub sex_chromosomes: String,
    pub abnormalities: Vec<Abnormality>,
    pub cell_lines: Option<Vec<CellLine>>,
    pub modifiers: Option<Modifiers>,
}

impl KaryotypeTree {
    /// Tree for a single lineage with no modifiers
    pub fn new(
        chromosome_count: ChromosomeCount,
        sex_chromosomes: impl Into<String>,
        abnormalities: Vec<Abnormality>,
    ) -> Self {
        Self {
            chromosome_count,
            sex_chromosomes: sex_chromosomes.into(),
            abnormalities,
            cell_lines: None,
            modifiers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_from_char() {
        assert_eq!(Arm::from_char('p'), Some(Arm::P));
        assert_eq!(Arm::from_char('q'), Some(Arm::Q));
        assert_eq!(Arm::from_char('x'), None);
    }

    #[test]
    fn test_chromosomes_split() {
        let abn = Abnormality {
            kind: AbnormalityKind::Translocation,
            chromosome: "9;22".to_string(),
            breakpoints: Vec::new(),
            inheritance: None,
            uncertain: false,
            copy_count: None,
            constitutional: false,
            components: Vec::new(),
            raw: "t(9;22)".to_string(),
        };
        assert_eq!(abn.chromosomes().collect::<Vec<_>>(), vec!["9", "22"]);
    }

    #[test]
    fn test_every_known_kind_has_a_shape() {
        for kind in AbnormalityKind::ALL {
            assert_eq!(kind.shape().is_none(), kind == AbnormalityKind::Unknown);
        }
    }

    #[test]
    fn test_arity_bounds() {
        assert_eq!(Arity::OneOf(&[1, 2]).max(), Some(2));
        assert_eq!(Arity::Exactly(3).max(), Some(3));
        assert_eq!(Arity::PerChromosome.max(), None);
        assert!(Arity::OneOf(&[0, 2]).admits_none());
        assert!(!Arity::Exactly(1).admits_none());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&AbnormalityKind::TelomericAssociation).unwrap();
        assert_eq!(json, "\"telomeric_association\"");
        let json = serde_json::to_string(&AbnormalityKind::Gain).unwrap();
        assert_eq!(json, "\"gain\"");
    }

    #[test]
    fn test_count_serializes_untagged() {
        assert_eq!(serde_json::to_string(&ChromosomeCount::Exact(46)).unwrap(), "46");
        assert_eq!(
            serde_json::to_string(&ChromosomeCount::Range("45~48".to_string())).unwrap(),
            "\"45~48\""
        );
        assert_eq!(serde_json::to_string(&ChromosomeCount::Absent).unwrap(), "null");
    }

    #[test]
    fn test_arm_rejects_unknown_letter_on_deserialize() {
        assert!(serde_json::from_str::<Arm>("\"q\"").is_ok());
        assert!(serde_json::from_str::<Arm>("\"x\"").is_err());
    }
}
