//! The loaded, immutable knowledge base.
//!
//! A [`KnowledgeBase`] is built once from a validated construct list and
//! never mutated afterwards. Evaluation borrows it; only fact sets change
//! during a session.

use crate::label::Label;
use serde::Serialize;

/// Presentation settings for the interactive wizard of a knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wizard {
    pub id: String,
    pub title: String,
    pub relation: String,
    pub found: String,
    pub not_found: String,
}

/// A yes/no question asserting `label` when answered "yes".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub label: Label,
    pub prompt: String,
}

/// A named, ordered, read-only list of labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub name: String,
    pub items: Vec<Label>,
}

/// A step template. Steps with a `gate` are only kept when the gate
/// label is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepTemplate {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<Label>,
}

/// One disjunct of a relation: `output` holds when every label in
/// `requires` is asserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub output: Label,
    pub requires: Vec<Label>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    pub name: String,
    pub alternatives: Vec<Alternative>,
}

impl Relation {
    /// Output labels in declared order.
    pub fn outputs(&self) -> Vec<&Label> {
        self.alternatives.iter().map(|a| &a.output).collect()
    }

    pub fn alternative(&self, output: &Label) -> Option<&Alternative> {
        self.alternatives.iter().find(|a| &a.output == output)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effect {
    pub label: Label,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBase {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wizard: Option<Wizard>,
    pub questions: Vec<Question>,
    pub catalogs: Vec<Catalog>,
    pub effects: Vec<Effect>,
    pub relations: Vec<Relation>,
}

impl KnowledgeBase {
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    pub fn catalog(&self, name: &str) -> Option<&Catalog> {
        self.catalogs.iter().find(|c| c.name == name)
    }

    /// Catalog items, or an empty slice when the catalog is not declared.
    pub fn catalog_items(&self, name: &str) -> &[Label] {
        self.catalog(name).map(|c| c.items.as_slice()).unwrap_or(&[])
    }

    pub fn effect(&self, label: &Label) -> Option<&str> {
        self.effects
            .iter()
            .find(|e| &e.label == label)
            .map(|e| e.text.as_str())
    }

    /// Serialize the knowledge base to JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
