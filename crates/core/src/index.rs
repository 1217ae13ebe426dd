//! Construct indexing: lookup by (kind, id), duplicate detection, and the
//! set of labels the knowledge base declares.

use crate::ast::*;
use crate::error::{LoadError, STAGE_INDEX};
use crate::label::Label;
use std::collections::HashMap;

/// A lookup index over the construct list.
pub struct Index {
    pub wizards: HashMap<String, Provenance>,
    pub questions: HashMap<Label, Provenance>,
    pub catalogs: HashMap<String, Provenance>,
    pub effects: HashMap<Label, Provenance>,
    pub relations: HashMap<String, Provenance>,
    /// Every label introduced by a question or a catalog entry, with the
    /// line it was first declared on.
    pub known_labels: HashMap<Label, u32>,
}

impl Index {
    /// Whether the file declares any vocabulary at all. Files without
    /// questions or catalogs accept any label.
    pub fn has_vocabulary(&self) -> bool {
        !self.known_labels.is_empty()
    }

    pub fn is_known(&self, label: &Label) -> bool {
        !self.has_vocabulary() || self.known_labels.contains_key(label)
    }
}

fn duplicate(kind: &str, id: &str, prov: &Provenance, first: &Provenance) -> LoadError {
    LoadError::new(
        STAGE_INDEX,
        Some(kind),
        Some(id),
        Some("id"),
        &prov.file,
        prov.line,
        format!(
            "duplicate {} id '{}': first declared at line {}",
            kind, id, first.line
        ),
    )
}

pub fn build_index(constructs: &[RawConstruct]) -> Result<Index, LoadError> {
    let mut idx = Index {
        wizards: HashMap::new(),
        questions: HashMap::new(),
        catalogs: HashMap::new(),
        effects: HashMap::new(),
        relations: HashMap::new(),
        known_labels: HashMap::new(),
    };

    for c in constructs {
        match c {
            RawConstruct::Wizard { id, prov, .. } => {
                if let Some((first_id, first)) = idx.wizards.iter().next() {
                    return Err(LoadError::new(
                        STAGE_INDEX,
                        Some("Wizard"),
                        Some(id),
                        None,
                        &prov.file,
                        prov.line,
                        format!(
                            "only one wizard per knowledge base; '{}' already declared at line {}",
                            first_id, first.line
                        ),
                    ));
                }
                idx.wizards.insert(id.clone(), prov.clone());
            }
            RawConstruct::Question { id, prov, .. } => {
                let label = Label::new(id);
                if let Some(first) = idx.questions.get(&label) {
                    return Err(duplicate("Question", id, prov, first));
                }
                idx.known_labels.entry(label.clone()).or_insert(prov.line);
                idx.questions.insert(label, prov.clone());
            }
            RawConstruct::Catalog { id, items, prov } => {
                if let Some(first) = idx.catalogs.get(id) {
                    return Err(duplicate("Catalog", id, prov, first));
                }
                for item in items {
                    idx.known_labels
                        .entry(Label::new(&item.name))
                        .or_insert(item.line);
                }
                idx.catalogs.insert(id.clone(), prov.clone());
            }
            RawConstruct::Effect { id, prov, .. } => {
                let label = Label::new(id);
                if let Some(first) = idx.effects.get(&label) {
                    return Err(duplicate("Effect", id, prov, first));
                }
                idx.effects.insert(label, prov.clone());
            }
            RawConstruct::Relation { id, prov, .. } => {
                if let Some(first) = idx.relations.get(id) {
                    return Err(duplicate("Relation", id, prov, first));
                }
                idx.relations.insert(id.clone(), prov.clone());
            }
        }
    }

    Ok(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer, parser};

    fn index_src(src: &str) -> Result<Index, LoadError> {
        let tokens = lexer::lex(src, "idx.kb")?;
        let constructs = parser::parse(&tokens, "idx.kb")?;
        build_index(&constructs)
    }

    #[test]
    fn duplicate_relation_is_rejected() {
        let src = "relation r { a { requires: [x] } }\nrelation r { b { requires: [y] } }";
        let err = index_src(src).err().expect("duplicate must fail");
        assert_eq!(err.stage, STAGE_INDEX);
        assert_eq!(err.line, 2);
        assert!(err.message.contains("first declared at line 1"));
    }

    #[test]
    fn question_ids_compare_after_normalization() {
        let src = "question Fever { prompt: \"a\" }\nquestion fever { prompt: \"b\" }";
        assert!(index_src(src).is_err());
    }

    #[test]
    fn second_wizard_is_rejected() {
        let src = r#"
wizard a { title: "A" relation: r }
wizard b { title: "B" relation: r }
"#;
        let err = index_src(src).err().expect("two wizards must fail");
        assert!(err.message.contains("only one wizard"));
    }

    #[test]
    fn known_labels_gather_questions_and_catalog_items() {
        let src = r#"
question fever { prompt: "Fever?" }
catalog topping { items: [Pepperoni, olive] }
"#;
        let idx = index_src(src).unwrap();
        assert!(idx.is_known(&Label::new("fever")));
        assert!(idx.is_known(&Label::new("pepperoni")));
        assert!(!idx.is_known(&Label::new("basil")));
    }

    #[test]
    fn without_vocabulary_every_label_is_known() {
        let idx = index_src("relation r { a { requires: [x] } }").unwrap();
        assert!(!idx.has_vocabulary());
        assert!(idx.is_known(&Label::new("anything")));
    }
}
