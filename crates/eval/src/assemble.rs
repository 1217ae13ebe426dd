//! Preparation-step assembly.
//!
//! Each alternative carries an ordered list of step templates. A step gated
//! on an extra ingredient is kept at its declared position when that extra
//! is present and dropped otherwise; ungated steps are always kept.

use crate::error::EvalError;
use crate::fact::FactSet;
use crate::rules;
use advisor_core::{Alternative, KnowledgeBase, Label};
use serde::Serialize;

/// One assembled step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub text: String,
    /// The extra that caused this step to be included, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<Label>,
}

/// Filter the step templates of `alt` against `extras`.
pub fn assemble_for(alt: &Alternative, extras: &FactSet) -> Vec<Step> {
    alt.steps
        .iter()
        .filter(|tpl| tpl.gate.as_ref().map_or(true, |g| extras.contains(g)))
        .map(|tpl| Step {
            text: tpl.text.clone(),
            gate: tpl.gate.clone(),
        })
        .collect()
}

/// Look up `output` in `relation_name` and assemble its steps.
pub fn assemble_steps(
    kb: &KnowledgeBase,
    relation_name: &str,
    output: &Label,
    extras: &FactSet,
) -> Result<Vec<Step>, EvalError> {
    let alt = rules::alternative(kb, relation_name, output)?;
    let steps = assemble_for(alt, extras);
    tracing::debug!(
        output = %output,
        extras = extras.len(),
        steps = steps.len(),
        "steps assembled"
    );
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::load_str;

    const KB: &str = r#"
catalog extra_base { items: [x, olive_oil] }
catalog topping { items: [cheese] }
relation makeable_pizza {
    plain {
        requires: [cheese]
        steps: ["A", when x "C", "B"]
    }
    fancy {
        requires: [cheese]
        steps: [when olive_oil "Brush with oil", "Bake", when x "Rest"]
    }
}
"#;

    fn texts(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.text.as_str()).collect()
    }

    fn extras(names: &[&str]) -> FactSet {
        names.iter().map(|n| Label::new(n)).collect()
    }

    #[test]
    fn gated_step_sits_at_its_declared_position() {
        let kb = load_str(KB, "p.kb", "p").unwrap();
        let steps =
            assemble_steps(&kb, "makeable_pizza", &Label::new("plain"), &extras(&["x"])).unwrap();
        assert_eq!(texts(&steps), vec!["A", "C", "B"]);
        assert_eq!(steps[1].gate, Some(Label::new("x")));
    }

    #[test]
    fn absent_extra_drops_its_step() {
        let kb = load_str(KB, "p.kb", "p").unwrap();
        let steps =
            assemble_steps(&kb, "makeable_pizza", &Label::new("plain"), &FactSet::new()).unwrap();
        assert_eq!(texts(&steps), vec!["A", "B"]);
    }

    #[test]
    fn only_present_extras_contribute() {
        let kb = load_str(KB, "p.kb", "p").unwrap();
        let steps = assemble_steps(
            &kb,
            "makeable_pizza",
            &Label::new("fancy"),
            &extras(&["olive_oil"]),
        )
        .unwrap();
        assert_eq!(texts(&steps), vec!["Brush with oil", "Bake"]);
    }

    #[test]
    fn unknown_output_is_rejected() {
        let kb = load_str(KB, "p.kb", "p").unwrap();
        let err = assemble_steps(&kb, "makeable_pizza", &Label::new("calzone"), &FactSet::new())
            .unwrap_err();
        assert!(matches!(err, EvalError::UnknownAlternative { .. }));
    }
}
