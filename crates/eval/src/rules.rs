//! Relation queries over a fact set.
//!
//! A relation is a disjunction of alternatives; an alternative holds when
//! its whole `requires` set is asserted. Matching is a subset test, so the
//! order in which facts were asserted never changes the answer. Results
//! come back in declared order.

use crate::error::EvalError;
use crate::fact::FactSet;
use crate::missing::{missing, satisfies};
use advisor_core::{Alternative, KnowledgeBase, Label, Relation};

/// Look up `name`, or fail with [`EvalError::UnknownRelation`].
pub fn relation<'kb>(kb: &'kb KnowledgeBase, name: &str) -> Result<&'kb Relation, EvalError> {
    kb.relation(name).ok_or_else(|| EvalError::UnknownRelation {
        relation: name.to_owned(),
    })
}

/// Every alternative of `relation_name` whose required set is a subset of
/// `facts`, in declared order. An empty result is a normal outcome.
pub fn query<'kb>(
    kb: &'kb KnowledgeBase,
    relation_name: &str,
    facts: &FactSet,
) -> Result<Vec<&'kb Alternative>, EvalError> {
    let rel = relation(kb, relation_name)?;
    let matches: Vec<&Alternative> = rel
        .alternatives
        .iter()
        .filter(|alt| satisfies(&alt.requires, facts))
        .collect();
    tracing::debug!(
        relation = relation_name,
        facts = facts.len(),
        matches = matches.len(),
        "query evaluated"
    );
    Ok(matches)
}

/// Output labels of [`query`].
pub fn query_outputs(
    kb: &KnowledgeBase,
    relation_name: &str,
    facts: &FactSet,
) -> Result<Vec<Label>, EvalError> {
    Ok(query(kb, relation_name, facts)?
        .into_iter()
        .map(|alt| alt.output.clone())
        .collect())
}

/// All output labels of a relation, in declared order.
pub fn outputs(kb: &KnowledgeBase, relation_name: &str) -> Result<Vec<Label>, EvalError> {
    Ok(relation(kb, relation_name)?
        .outputs()
        .into_iter()
        .cloned()
        .collect())
}

/// The alternative producing `output`, or [`EvalError::UnknownAlternative`].
pub fn alternative<'kb>(
    kb: &'kb KnowledgeBase,
    relation_name: &str,
    output: &Label,
) -> Result<&'kb Alternative, EvalError> {
    relation(kb, relation_name)?
        .alternative(output)
        .ok_or_else(|| EvalError::UnknownAlternative {
            relation: relation_name.to_owned(),
            output: output.to_string(),
        })
}

/// Items of `catalog` that are asserted in `facts`, in catalog order.
pub fn present(
    kb: &KnowledgeBase,
    catalog: &str,
    facts: &FactSet,
) -> Result<Vec<Label>, EvalError> {
    let cat = kb.catalog(catalog).ok_or_else(|| EvalError::UnknownCatalog {
        catalog: catalog.to_owned(),
    })?;
    Ok(cat
        .items
        .iter()
        .filter(|item| facts.contains(item))
        .cloned()
        .collect())
}

/// Items of `catalog` that are not asserted in `facts`, in catalog order.
pub fn missing_from_catalog(
    kb: &KnowledgeBase,
    catalog: &str,
    facts: &FactSet,
) -> Result<Vec<Label>, EvalError> {
    let cat = kb.catalog(catalog).ok_or_else(|| EvalError::UnknownCatalog {
        catalog: catalog.to_owned(),
    })?;
    Ok(missing(&cat.items, facts))
}

/// Full ingredient list of one output: the items of each base catalog in
/// the order given, followed by the output's own required labels.
pub fn ingredients(
    kb: &KnowledgeBase,
    relation_name: &str,
    output: &Label,
    base_catalogs: &[&str],
) -> Result<Vec<Label>, EvalError> {
    let alt = alternative(kb, relation_name, output)?;
    let mut list: Vec<Label> = Vec::new();
    for name in base_catalogs {
        let cat = kb.catalog(name).ok_or_else(|| EvalError::UnknownCatalog {
            catalog: (*name).to_owned(),
        })?;
        list.extend(cat.items.iter().cloned());
    }
    for label in &alt.requires {
        if !list.contains(label) {
            list.push(label.clone());
        }
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::load_str;

    const KB: &str = r#"
question fever { prompt: "Fever?" }
question cough { prompt: "Cough?" }
question headache { prompt: "Headache?" }
question tiredness { prompt: "Tired?" }
relation disease {
    flu { requires: [fever, cough] }
    common_cold { requires: [cough, headache] }
    covid { requires: [fever, cough, tiredness] }
}
"#;

    const PIZZA: &str = r#"
catalog essential_base { items: [dough] }
catalog topping { items: [sauce, cheese, pepperoni] }
relation makeable_pizza {
    pepperoni { requires: [pepperoni] }
    cheese_pizza { requires: [sauce, cheese] }
}
"#;

    fn facts(names: &[&str]) -> FactSet {
        names.iter().map(|n| Label::new(n)).collect()
    }

    fn names(labels: Vec<Label>) -> Vec<String> {
        labels.into_iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn fever_and_cough_yield_flu() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        let out = query_outputs(&kb, "disease", &facts(&["fever", "cough"])).unwrap();
        assert_eq!(names(out), vec!["flu"]);
    }

    #[test]
    fn matches_come_back_in_declared_order() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        let all = facts(&["tiredness", "headache", "cough", "fever"]);
        let out = query_outputs(&kb, "disease", &all).unwrap();
        assert_eq!(names(out), vec!["flu", "common_cold", "covid"]);
    }

    #[test]
    fn assertion_order_does_not_matter() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        let a = query_outputs(&kb, "disease", &facts(&["cough", "fever"])).unwrap();
        let b = query_outputs(&kb, "disease", &facts(&["fever", "cough"])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_query_gives_the_same_answer_and_leaves_facts_alone() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        let asserted = facts(&["fever", "cough", "tiredness"]);
        let before = asserted.clone();
        let first = query(&kb, "disease", &asserted).unwrap();
        let second = query(&kb, "disease", &asserted).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            query_outputs(&kb, "disease", &asserted).unwrap(),
            query_outputs(&kb, "disease", &asserted).unwrap()
        );
        assert_eq!(asserted, before);
    }

    #[test]
    fn empty_facts_match_nothing() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        assert!(query(&kb, "disease", &FactSet::new()).unwrap().is_empty());
        assert!(query(&kb, "disease", &facts(&["headache"])).unwrap().is_empty());
    }

    #[test]
    fn unknown_relation_is_an_error_not_an_empty_result() {
        let kb = load_str(KB, "h.kb", "h").unwrap();
        let err = query(&kb, "illness", &FactSet::new()).unwrap_err();
        assert_eq!(
            err,
            EvalError::UnknownRelation {
                relation: "illness".into()
            }
        );
    }

    #[test]
    fn single_topping_pizza_matches_on_its_own() {
        let kb = load_str(PIZZA, "p.kb", "p").unwrap();
        let out = query_outputs(&kb, "makeable_pizza", &facts(&["pepperoni"])).unwrap();
        assert_eq!(names(out), vec!["pepperoni"]);
        let out = query_outputs(&kb, "makeable_pizza", &facts(&["cheese"])).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn present_filters_catalog_in_catalog_order() {
        let kb = load_str(PIZZA, "p.kb", "p").unwrap();
        let out = present(&kb, "topping", &facts(&["pepperoni", "sauce", "dough"])).unwrap();
        assert_eq!(names(out), vec!["sauce", "pepperoni"]);
        let gap = missing_from_catalog(&kb, "topping", &facts(&["sauce"])).unwrap();
        assert_eq!(names(gap), vec!["cheese", "pepperoni"]);
        assert!(matches!(
            present(&kb, "crust", &FactSet::new()),
            Err(EvalError::UnknownCatalog { .. })
        ));
    }

    #[test]
    fn ingredients_prepend_base_catalogs() {
        let kb = load_str(PIZZA, "p.kb", "p").unwrap();
        let list = ingredients(
            &kb,
            "makeable_pizza",
            &Label::new("cheese_pizza"),
            &["essential_base"],
        )
        .unwrap();
        assert_eq!(names(list), vec!["dough", "sauce", "cheese"]);
    }

    #[test]
    fn outputs_and_alternative_lookup() {
        let kb = load_str(PIZZA, "p.kb", "p").unwrap();
        assert_eq!(
            names(outputs(&kb, "makeable_pizza").unwrap()),
            vec!["pepperoni", "cheese_pizza"]
        );
        let err = alternative(&kb, "makeable_pizza", &Label::new("calzone")).unwrap_err();
        assert!(matches!(err, EvalError::UnknownAlternative { .. }));
    }
}
