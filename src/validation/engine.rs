//! Validation Engine
//!
//! Applies a [`RuleCatalog`] to a parsed tree. Tree rules run first in
//! catalog order, then every abnormality in source order against the rules
//! indexed for its kind. Components (of a derivative, or the rearranged
//! chromosome in "+i(17q)") are checked right after the abnormality that
//! contains them. No rule short-circuits another.

use serde::{Deserialize, Serialize};

use crate::parser::{self, Abnormality, KaryotypeTree, SyntaxError};
use crate::validation::rules::{Check, RuleCatalog};

/// Outcome of validating one karyotype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
    /// The parsed tree, absent when parsing failed
    #[serde(rename = "parsed")]
    pub tree: Option<KaryotypeTree>,
}

impl ValidationVerdict {
    pub fn new(errors: Vec<String>, tree: Option<KaryotypeTree>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            tree,
        }
    }

    /// Verdict for input that did not parse
    pub fn from_syntax_error(err: &SyntaxError) -> Self {
        Self::new(vec![err.to_string()], None)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Applies a catalog of rules to parsed trees
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    catalog: RuleCatalog,
}

impl RuleEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Validate a parsed tree
    pub fn validate(&self, tree: &KaryotypeTree) -> ValidationVerdict {
        let mut errors = Vec::new();

        for rule in self.catalog.tree_rules() {
            if let Check::Tree(check) = rule.check {
                let found = check(tree);
                if !found.is_empty() {
                    log::debug!("{} reported {} error(s)", rule.id, found.len());
                }
                errors.extend(found);
            }
        }

        // Top-level fields mirror the first cell line; later lines of a
        // mosaic or chimera are parsed but not rule-checked.
        for abnormality in &tree.abnormalities {
            self.validate_abnormality(tree, abnormality, &mut errors);
        }

        log::trace!("validation finished with {} error(s)", errors.len());
        ValidationVerdict::new(errors, Some(tree.clone()))
    }

    /// Parse then validate; a syntax error becomes the only message
    pub fn validate_str(&self, raw: &str) -> ValidationVerdict {
        match parser::parse(raw) {
            Ok(tree) => self.validate(&tree),
            Err(err) => {
                log::debug!("'{}' did not parse: {}", raw, err);
                ValidationVerdict::from_syntax_error(&err)
            }
        }
    }

    fn validate_abnormality(
        &self,
        tree: &KaryotypeTree,
        abnormality: &Abnormality,
        errors: &mut Vec<String>,
    ) {
        for rule in self.catalog.rules_for(abnormality.kind) {
            if let Check::Abnormality { check, .. } = rule.check {
                let found = check(tree, abnormality);
                if !found.is_empty() {
                    log::debug!("{} rejected '{}'", rule.id, abnormality.raw);
                }
                errors.extend(found);
            }
        }

        for component in &abnormality.components {
            self.validate_abnormality(tree, component, errors);
        }
    }
}

/// Validate a tree against the standard catalog
pub fn validate(tree: &KaryotypeTree) -> ValidationVerdict {
    RuleEngine::new(RuleCatalog::standard()).validate(tree)
}

/// Parse and validate against the standard catalog
pub fn validate_karyotype(raw: &str) -> ValidationVerdict {
    RuleEngine::new(RuleCatalog::standard()).validate_str(raw)
}
