//! Advisor rule evaluator: borrows an immutable knowledge base, holds
//! the mutable fact store, and answers relation queries against it.
//!
//! Evaluation is set containment: an alternative holds when every label
//! it requires is asserted. Derived lists (missing ingredients,
//! preparation steps) are computed from the same fact sets.

pub mod assemble;
pub mod error;
pub mod fact;
pub mod missing;
pub mod rules;
pub mod session;

pub use assemble::{assemble_for, assemble_steps, Step};
pub use error::EvalError;
pub use fact::FactSet;
pub use missing::{missing, satisfies};
pub use rules::{
    alternative, ingredients, missing_from_catalog, outputs, present, query, query_outputs,
};
pub use session::{Outcome, Session, SessionState};

use advisor_core::KnowledgeBase;

/// Evaluate `relation` against `facts` and classify the result.
///
/// This is the one-shot form of what a [`Session`] does on its
/// `evaluate` event.
pub fn evaluate(
    kb: &KnowledgeBase,
    relation: &str,
    facts: &FactSet,
) -> Result<Outcome, EvalError> {
    let outputs = query_outputs(kb, relation, facts)?;
    if outputs.is_empty() {
        Ok(Outcome::NotFound)
    } else {
        Ok(Outcome::Success(outputs))
    }
}
