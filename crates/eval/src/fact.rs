//! The mutable fact store.

use advisor_core::Label;
use serde::Serialize;

/// Labels currently asserted true, in assertion order.
///
/// A label is either present or absent; asserting twice is a no-op.
/// There is no single-label removal, only [`FactSet::retract_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FactSet(Vec<Label>);

impl FactSet {
    pub fn new() -> Self {
        FactSet(Vec::new())
    }

    /// Assert `label`. Returns `true` when it was not already present.
    pub fn assert(&mut self, label: Label) -> bool {
        if self.0.contains(&label) {
            return false;
        }
        tracing::trace!(label = %label, "fact asserted");
        self.0.push(label);
        true
    }

    pub fn retract_all(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, label: &Label) -> bool {
        self.0.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Label> for FactSet {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        let mut facts = FactSet::new();
        facts.extend(iter);
        facts
    }
}

impl Extend<Label> for FactSet {
    fn extend<I: IntoIterator<Item = Label>>(&mut self, iter: I) {
        for label in iter {
            self.assert(label);
        }
    }
}

impl<'a> IntoIterator for &'a FactSet {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
