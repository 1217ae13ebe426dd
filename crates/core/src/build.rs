//! Build the immutable [`KnowledgeBase`] from validated constructs.

use crate::ast::*;
use crate::kb::*;
use crate::label::Label;

const DEFAULT_FOUND: &str = "Result:";
const DEFAULT_NOT_FOUND: &str = "No match found.";

/// Convert the construct list into a [`KnowledgeBase`], keeping the
/// declaration order of every list.
pub fn build(constructs: &[RawConstruct], kb_id: &str) -> KnowledgeBase {
    let mut kb = KnowledgeBase {
        id: kb_id.to_owned(),
        wizard: None,
        questions: Vec::new(),
        catalogs: Vec::new(),
        effects: Vec::new(),
        relations: Vec::new(),
    };

    for c in constructs {
        match c {
            RawConstruct::Wizard {
                id,
                title,
                relation,
                found,
                not_found,
                ..
            } => {
                kb.wizard = Some(Wizard {
                    id: id.clone(),
                    title: title.clone(),
                    relation: relation.name.clone(),
                    found: found.clone().unwrap_or_else(|| DEFAULT_FOUND.to_owned()),
                    not_found: not_found
                        .clone()
                        .unwrap_or_else(|| DEFAULT_NOT_FOUND.to_owned()),
                });
            }
            RawConstruct::Question { id, prompt, .. } => kb.questions.push(Question {
                label: Label::new(id),
                prompt: prompt.clone(),
            }),
            RawConstruct::Catalog { id, items, .. } => kb.catalogs.push(Catalog {
                name: id.clone(),
                items: items.iter().map(|i| Label::new(&i.name)).collect(),
            }),
            RawConstruct::Effect { id, text, .. } => kb.effects.push(Effect {
                label: Label::new(id),
                text: text.clone(),
            }),
            RawConstruct::Relation {
                id, alternatives, ..
            } => kb.relations.push(Relation {
                name: id.clone(),
                alternatives: alternatives.iter().map(build_alternative).collect(),
            }),
        }
    }

    kb
}

fn build_alternative(alt: &RawAlternative) -> Alternative {
    Alternative {
        output: Label::new(&alt.output),
        requires: alt.requires.iter().map(|r| Label::new(&r.name)).collect(),
        steps: alt
            .steps
            .iter()
            .map(|s| StepTemplate {
                text: s.text.clone(),
                gate: s.gate.as_ref().map(|g| Label::new(&g.name)),
            })
            .collect(),
    }
}
