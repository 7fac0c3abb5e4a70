//! Structural analysis
//!
//! Three variants, picked by [`StructureProfile`]:
//! - [`python`] walks a tree-sitter syntax tree
//! - [`javascript`] counts regex patterns for JavaScript and TypeScript
//! - [`generic`] counts keywords and delimiters for everything else
//!
//! Each variant fills the [`StructuralCounts`] it knows about and leaves the
//! rest at zero. The complexity score is derived from whatever was counted.

pub mod generic;
pub mod javascript;
pub mod python;

use super::{Feature, FeatureEntries};
use crate::models::{Language, StructureProfile};
use thiserror::Error;
use tracing::warn;

/// Weights of the complexity score.
///
/// A design weighting, not a calibrated complexity metric.
pub mod weights {
    pub const CONDITIONAL: f64 = 1.0;
    pub const LOOP: f64 = 2.0;
    pub const EXCEPTION_HANDLER: f64 = 1.0;
    pub const FUNCTION: f64 = 1.0;
    pub const CLASS: f64 = 2.0;
    pub const LAMBDA: f64 = 1.0;
}

#[derive(Error, Debug)]
pub enum StructureError {
    #[error("failed to load grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("parser produced no tree")]
    NoTree,

    #[error("syntax error near line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Raw structural counts. Variants leave unknown counts at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralCounts {
    pub functions: usize,
    pub classes: usize,
    pub imports: usize,
    pub ifs: usize,
    pub fors: usize,
    pub whiles: usize,
    pub tries: usize,
    pub lambdas: usize,
    pub arrow_functions: usize,
    pub consts: usize,
    pub lets: usize,
    pub vars: usize,
    pub elses: usize,
    pub switches: usize,
    pub cases: usize,
    pub breaks: usize,
    pub continues: usize,
    pub returns: usize,
    pub braces: usize,
    pub parens: usize,
    pub brackets: usize,
}

impl StructuralCounts {
    pub fn loops(&self) -> usize {
        self.fors + self.whiles
    }

    pub fn complexity(&self) -> f64 {
        self.ifs as f64 * weights::CONDITIONAL
            + self.loops() as f64 * weights::LOOP
            + self.tries as f64 * weights::EXCEPTION_HANDLER
            + self.functions as f64 * weights::FUNCTION
            + self.classes as f64 * weights::CLASS
            + self.lambdas as f64 * weights::LAMBDA
    }
}

/// Identifiers collected for the naming analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierPool {
    pub functions: Vec<String>,
    pub variables: Vec<String>,
    pub classes: Vec<String>,
}

impl IdentifierPool {
    /// Functions, then variables, then classes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.functions
            .iter()
            .chain(self.variables.iter())
            .chain(self.classes.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len() + self.variables.len() + self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureReport {
    pub counts: StructuralCounts,
    pub names: IdentifierPool,
}

impl StructureReport {
    pub fn entries(&self) -> FeatureEntries {
        let c = &self.counts;
        vec![
            (Feature::FunctionCount, c.functions as f64),
            (Feature::ClassCount, c.classes as f64),
            (Feature::ImportCount, c.imports as f64),
            (Feature::LoopCount, c.loops() as f64),
            (Feature::IfCount, c.ifs as f64),
            (Feature::TryCount, c.tries as f64),
            (Feature::ComplexityScore, c.complexity()),
            (Feature::ArrowFunctionCount, c.arrow_functions as f64),
            (Feature::ConstCount, c.consts as f64),
            (Feature::LetCount, c.lets as f64),
            (Feature::VarCount, c.vars as f64),
            (Feature::ForCount, c.fors as f64),
            (Feature::WhileCount, c.whiles as f64),
            (Feature::ElseCount, c.elses as f64),
            (Feature::SwitchCount, c.switches as f64),
            (Feature::CaseCount, c.cases as f64),
            (Feature::BreakCount, c.breaks as f64),
            (Feature::ContinueCount, c.continues as f64),
            (Feature::ReturnCount, c.returns as f64),
            (Feature::BraceCount, c.braces as f64),
            (Feature::ParenCount, c.parens as f64),
            (Feature::BracketCount, c.brackets as f64),
        ]
    }
}

/// Run the structural variant for `language`.
///
/// A parse failure is logged and yields an all-zero report.
pub fn analyze(text: &str, language: Language) -> StructureReport {
    match language.structure_profile() {
        StructureProfile::Parsed => python::analyze(text).unwrap_or_else(|e| {
            warn!("Structural analysis skipped for {}: {}", language, e);
            StructureReport::default()
        }),
        StructureProfile::Pattern => javascript::analyze(text),
        StructureProfile::Generic => generic::analyze(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_weights() {
        let counts = StructuralCounts {
            ifs: 2,
            fors: 1,
            whiles: 1,
            tries: 1,
            functions: 3,
            classes: 1,
            lambdas: 1,
            ..Default::default()
        };
        assert_eq!(counts.complexity(), 2.0 + 4.0 + 1.0 + 3.0 + 2.0 + 1.0);
    }

    #[test]
    fn test_invalid_python_degrades_to_zero() {
        let report = analyze("def invalid_syntax(", Language::Python);
        assert_eq!(report, StructureReport::default());
    }

    #[test]
    fn test_dispatch_by_profile() {
        let code = "function go() { if (x) { return 1; } }";
        assert_eq!(analyze(code, Language::JavaScript).counts.functions, 1);
        assert_eq!(analyze(code, Language::Java).counts.functions, 0);
        assert_eq!(analyze(code, Language::Java).counts.ifs, 1);
    }
}
