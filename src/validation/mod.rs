//! Validation
//!
//! Rule catalog and the engine that applies it to parsed karyotypes.

pub mod engine;
pub mod rules;

pub use engine::{validate, validate_karyotype, RuleEngine, ValidationVerdict};
pub use rules::{CatalogError, Category, Check, Rule, RuleCatalog};
