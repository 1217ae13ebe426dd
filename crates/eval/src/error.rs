use thiserror::Error;

/// Evaluation errors.
///
/// An empty query result is not an error; these are raised only for
/// names the knowledge base does not declare and for session events
/// fired in the wrong state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown relation: {relation}")]
    UnknownRelation { relation: String },

    #[error("relation '{relation}' has no alternative '{output}'")]
    UnknownAlternative { relation: String, output: String },

    #[error("unknown catalog: {catalog}")]
    UnknownCatalog { catalog: String },

    #[error("knowledge base '{kb}' declares no wizard")]
    NoWizard { kb: String },

    #[error("cannot {event} while {state}")]
    InvalidTransition { state: String, event: &'static str },
}

impl EvalError {
    pub fn to_json_value(&self) -> serde_json::Value {
        let kind = match self {
            EvalError::UnknownRelation { .. } => "unknown_relation",
            EvalError::UnknownAlternative { .. } => "unknown_alternative",
            EvalError::UnknownCatalog { .. } => "unknown_catalog",
            EvalError::NoWizard { .. } => "no_wizard",
            EvalError::InvalidTransition { .. } => "invalid_transition",
        };
        serde_json::json!({ "error": kind, "message": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_thing() {
        let err = EvalError::UnknownAlternative {
            relation: "makeable_pizza".into(),
            output: "calzone".into(),
        };
        assert_eq!(
            err.to_string(),
            "relation 'makeable_pizza' has no alternative 'calzone'"
        );
        assert_eq!(err.to_json_value()["error"], "unknown_alternative");
    }
}
