//! Karyotype Check
//!
//! Parser and validator for karyotype strings written in ISCN notation.
//!
//! This library provides:
//! - A grammar parser producing a typed [`KaryotypeTree`]
//! - A catalog of tree-level and abnormality-level rules
//! - A rule engine aggregating every violation into a [`ValidationVerdict`]
//! - Configuration for the `karyotype-check` command-line tool
//!
//! ```
//! let verdict = karyotype_check::validate_karyotype("46,XX,del(5)(q13q33)");
//! assert!(verdict.valid);
//! ```

pub mod config;
pub mod parser;
pub mod validation;

pub use config::Config;
pub use parser::{
    parse, Abnormality, AbnormalityKind, Arm, Breakpoint, CellLine, ChromosomeCount, KaryotypeTree,
    Modifiers, SyntaxError,
};
pub use validation::{validate, validate_karyotype, RuleCatalog, RuleEngine, ValidationVerdict};
