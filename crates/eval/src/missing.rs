//! Ordered set difference.

use crate::fact::FactSet;
use advisor_core::Label;

/// `required` minus `present`, keeping the order of `required`.
///
/// An empty result means `required` is fully satisfied.
pub fn missing(required: &[Label], present: &FactSet) -> Vec<Label> {
    required
        .iter()
        .filter(|label| !present.contains(label))
        .cloned()
        .collect()
}

/// True when every label in `required` is present.
pub fn satisfies(required: &[Label], present: &FactSet) -> bool {
    required.iter().all(|label| present.contains(label))
}
