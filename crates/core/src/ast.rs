//! Raw AST for the knowledge-base language.
//!
//! Produced by the parser and consumed by indexing, validation and the
//! build step. Labels are still raw words here; normalization into
//! [`crate::Label`] happens when the knowledge base is built.

#[derive(Debug, Clone)]
pub struct Provenance {
    pub file: String,
    pub line: u32,
}

/// A label occurrence with the line it was written on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLabel {
    pub name: String,
    pub line: u32,
}

/// One preparation step. `gate` names the label that must be present
/// for the step to be included.
#[derive(Debug, Clone)]
pub struct RawStep {
    pub text: String,
    pub gate: Option<RawLabel>,
    pub line: u32,
}

/// One disjunct of a relation.
#[derive(Debug, Clone)]
pub struct RawAlternative {
    pub output: String,
    pub requires: Vec<RawLabel>,
    pub steps: Vec<RawStep>,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub enum RawConstruct {
    Wizard {
        id: String,
        title: String,
        relation: RawLabel,
        found: Option<String>,
        not_found: Option<String>,
        prov: Provenance,
    },
    Question {
        id: String,
        prompt: String,
        prov: Provenance,
    },
    Catalog {
        id: String,
        items: Vec<RawLabel>,
        prov: Provenance,
    },
    Effect {
        id: String,
        text: String,
        prov: Provenance,
    },
    Relation {
        id: String,
        alternatives: Vec<RawAlternative>,
        prov: Provenance,
    },
}

impl RawConstruct {
    pub fn id(&self) -> &str {
        match self {
            RawConstruct::Wizard { id, .. }
            | RawConstruct::Question { id, .. }
            | RawConstruct::Catalog { id, .. }
            | RawConstruct::Effect { id, .. }
            | RawConstruct::Relation { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawConstruct::Wizard { .. } => "Wizard",
            RawConstruct::Question { .. } => "Question",
            RawConstruct::Catalog { .. } => "Catalog",
            RawConstruct::Effect { .. } => "Effect",
            RawConstruct::Relation { .. } => "Relation",
        }
    }

    pub fn prov(&self) -> &Provenance {
        match self {
            RawConstruct::Wizard { prov, .. }
            | RawConstruct::Question { prov, .. }
            | RawConstruct::Catalog { prov, .. }
            | RawConstruct::Effect { prov, .. }
            | RawConstruct::Relation { prov, .. } => prov,
        }
    }
}
