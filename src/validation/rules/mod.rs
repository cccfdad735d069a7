//! Rule Catalog
//!
//! Rules are plain values: an id, a category, a description and a check
//! function. A [`RuleCatalog`] owns an ordered list of them and an index from
//! [`AbnormalityKind`] to the abnormality rules that apply to it, so the
//! engine never tests a rule against a kind outside its scope.

pub mod abnormality;
pub mod chromosome;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::parser::{Abnormality, AbnormalityKind, KaryotypeTree};

/// Check over the whole tree; returns one message per violation
pub type TreeCheck = fn(&KaryotypeTree) -> Vec<String>;

/// Check over one abnormality, with the tree for context
pub type AbnormalityCheck = fn(&KaryotypeTree, &Abnormality) -> Vec<String>;

/// What a rule inspects
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Tree(TreeCheck),
    Abnormality {
        /// Kinds the rule applies to
        scope: fn(AbnormalityKind) -> bool,
        check: AbnormalityCheck,
    },
}

/// Grouping used when listing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ChromosomeCount,
    SexChromosomes,
    Coherence,
    Abnormality,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::ChromosomeCount => "chromosome_count",
            Category::SexChromosomes => "sex_chromosomes",
            Category::Coherence => "coherence",
            Category::Abnormality => "abnormality",
        };
        f.write_str(name)
    }
}

/// A single validation rule
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub check: Check,
}

impl Rule {
    pub fn is_tree_rule(&self) -> bool {
        matches!(self.check, Check::Tree(_))
    }

    /// Whether this rule inspects abnormalities of `kind`
    pub fn applies_to(&self, kind: AbnormalityKind) -> bool {
        match self.check {
            Check::Tree(_) => false,
            Check::Abnormality { scope, .. } => scope(kind),
        }
    }
}

/// Catalog manipulation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown rule '{id}' (known rules: {known})")]
    UnknownRule { id: String, known: String },
}

/// Ordered set of rules plus a kind -> rule index
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
    by_kind: HashMap<AbnormalityKind, Vec<usize>>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleCatalog {
    /// Build a catalog from rules in evaluation order
    pub fn new(rules: Vec<Rule>) -> Self {
        let mut by_kind: HashMap<AbnormalityKind, Vec<usize>> = HashMap::new();

        for kind in AbnormalityKind::ALL {
            let applicable: Vec<usize> = rules
                .iter()
                .enumerate()
                .filter(|(_, rule)| rule.applies_to(kind))
                .map(|(idx, _)| idx)
                .collect();
            if !applicable.is_empty() {
                by_kind.insert(kind, applicable);
            }
        }

        Self { rules, by_kind }
    }

    /// Every tree-level and abnormality-level rule
    pub fn standard() -> Self {
        let mut rules = chromosome::rules();
        rules.extend(abnormality::rules());
        Self::new(rules)
    }

    /// Copy of this catalog with the named rules removed
    pub fn without<S: AsRef<str>>(&self, ids: &[S]) -> Result<Self, CatalogError> {
        for id in ids {
            let id = id.as_ref();
            if self.get(id).is_none() {
                return Err(CatalogError::UnknownRule {
                    id: id.to_string(),
                    known: self.ids().collect::<Vec<_>>().join(", "),
                });
            }
        }

        let rules = self
            .rules
            .iter()
            .filter(|rule| !ids.iter().any(|id| id.as_ref() == rule.id))
            .copied()
            .collect();

        Ok(Self::new(rules))
    }

    /// All rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.id)
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn tree_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.is_tree_rule())
    }

    /// Abnormality rules that apply to `kind`, in catalog order
    pub fn rules_for(&self, kind: AbnormalityKind) -> impl Iterator<Item = &Rule> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&idx| &self.rules[idx])
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
