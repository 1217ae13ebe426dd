//! Cross-reference validation over the indexed constructs.

use crate::ast::*;
use crate::error::{LoadError, STAGE_VALIDATE};
use crate::index::Index;
use crate::label::Label;
use std::collections::HashSet;

pub fn validate(constructs: &[RawConstruct], index: &Index) -> Result<(), LoadError> {
    for c in constructs {
        match c {
            RawConstruct::Wizard {
                id, relation, prov, ..
            } => {
                if !index.relations.contains_key(&relation.name) {
                    return Err(LoadError::new(
                        STAGE_VALIDATE,
                        Some("Wizard"),
                        Some(id),
                        Some("relation"),
                        &prov.file,
                        relation.line,
                        format!("relation '{}' is not declared", relation.name),
                    ));
                }
            }
            RawConstruct::Catalog { id, items, prov } => {
                no_duplicate_labels(items, "Catalog", id, "items", prov)?;
            }
            RawConstruct::Effect { id, prov, .. } => {
                let label = RawLabel {
                    name: id.clone(),
                    line: prov.line,
                };
                known_label(&label, index, "Effect", id, "id", prov)?;
            }
            RawConstruct::Relation {
                id,
                alternatives,
                prov,
            } => validate_relation(id, alternatives, prov, index)?,
            RawConstruct::Question { .. } => {}
        }
    }
    Ok(())
}

fn validate_relation(
    id: &str,
    alternatives: &[RawAlternative],
    prov: &Provenance,
    index: &Index,
) -> Result<(), LoadError> {
    let mut outputs: HashSet<Label> = HashSet::new();
    for alt in alternatives {
        if !outputs.insert(Label::new(&alt.output)) {
            return Err(LoadError::new(
                STAGE_VALIDATE,
                Some("Relation"),
                Some(id),
                Some("alternatives"),
                &prov.file,
                alt.line,
                format!("duplicate alternative '{}'", alt.output),
            ));
        }
        if alt.requires.is_empty() {
            return Err(LoadError::new(
                STAGE_VALIDATE,
                Some("Relation"),
                Some(id),
                Some("requires"),
                &prov.file,
                alt.line,
                format!("alternative '{}' must require at least one label", alt.output),
            ));
        }
        no_duplicate_labels(&alt.requires, "Relation", id, "requires", prov)?;
        for label in &alt.requires {
            known_label(label, index, "Relation", id, "requires", prov)?;
        }
        for step in &alt.steps {
            if let Some(gate) = &step.gate {
                known_label(gate, index, "Relation", id, "steps", prov)?;
            }
        }
    }
    Ok(())
}

fn no_duplicate_labels(
    labels: &[RawLabel],
    kind: &str,
    id: &str,
    field: &str,
    prov: &Provenance,
) -> Result<(), LoadError> {
    let mut seen: HashSet<Label> = HashSet::new();
    for label in labels {
        if !seen.insert(Label::new(&label.name)) {
            return Err(LoadError::new(
                STAGE_VALIDATE,
                Some(kind),
                Some(id),
                Some(field),
                &prov.file,
                label.line,
                format!("label '{}' listed more than once", label.name),
            ));
        }
    }
    Ok(())
}

fn known_label(
    label: &RawLabel,
    index: &Index,
    kind: &str,
    id: &str,
    field: &str,
    prov: &Provenance,
) -> Result<(), LoadError> {
    if index.is_known(&Label::new(&label.name)) {
        return Ok(());
    }
    Err(LoadError::new(
        STAGE_VALIDATE,
        Some(kind),
        Some(id),
        Some(field),
        &prov.file,
        label.line,
        format!(
            "unknown label '{}': not declared by any question or catalog",
            label.name
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index, lexer, parser};

    fn validate_src(src: &str) -> Result<(), LoadError> {
        let tokens = lexer::lex(src, "v.kb")?;
        let constructs = parser::parse(&tokens, "v.kb")?;
        let idx = index::build_index(&constructs)?;
        validate(&constructs, &idx)
    }

    const VOCAB: &str = r#"
question fever { prompt: "Fever?" }
question cough { prompt: "Cough?" }
catalog extra_base { items: [olive_oil] }
"#;

    #[test]
    fn valid_relation_passes() {
        let src = format!(
            "{}relation disease {{ flu {{ requires: [fever, cough] steps: [when olive_oil \"x\"] }} }}",
            VOCAB
        );
        validate_src(&src).unwrap();
    }

    #[test]
    fn unknown_required_label_is_rejected() {
        let src = format!(
            "{}relation disease {{\n flu {{ requires: [fever, sneeze] }}\n}}",
            VOCAB
        );
        let err = validate_src(&src).unwrap_err();
        assert_eq!(err.stage, STAGE_VALIDATE);
        assert_eq!(err.field.as_deref(), Some("requires"));
        assert!(err.message.contains("'sneeze'"));
    }

    #[test]
    fn unknown_gate_label_is_rejected() {
        let src = format!(
            "{}relation r {{ a {{ requires: [fever] steps: [when garlic \"x\"] }} }}",
            VOCAB
        );
        let err = validate_src(&src).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("steps"));
    }

    #[test]
    fn wizard_must_name_declared_relation() {
        let src = format!("{}wizard w {{ title: \"W\" relation: illness }}", VOCAB);
        let err = validate_src(&src).unwrap_err();
        assert!(err.message.contains("relation 'illness' is not declared"));
    }

    #[test]
    fn empty_requires_is_rejected() {
        let err = validate_src("relation r { a { requires: [] } }").unwrap_err();
        assert!(err.message.contains("at least one label"));
    }

    #[test]
    fn duplicate_alternative_is_rejected() {
        let err = validate_src("relation r { a { requires: [x] } A { requires: [y] } }")
            .unwrap_err();
        assert!(err.message.contains("duplicate alternative"));
    }

    #[test]
    fn duplicate_label_in_requires_is_rejected() {
        let err = validate_src("relation r { a { requires: [x, X] } }").unwrap_err();
        assert!(err.message.contains("more than once"));
    }

    #[test]
    fn effect_for_unknown_label_is_rejected() {
        let src = format!("{}effect salt {{ text: \"Bland.\" }}", VOCAB);
        let err = validate_src(&src).unwrap_err();
        assert_eq!(err.construct_kind.as_deref(), Some("Effect"));
    }
}
