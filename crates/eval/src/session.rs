//! Wizard session state machine.
//!
//! A [`Session`] owns the fact store of one wizard run and moves through
//! `Start -> Collecting -> Evaluating -> Result -> (Start | Terminal)` on
//! explicit events. An event fired in the wrong state fails with
//! [`EvalError::InvalidTransition`] and leaves the session untouched.

use crate::error::EvalError;
use crate::fact::FactSet;
use crate::rules;
use advisor_core::{KnowledgeBase, Label};
use serde::Serialize;

/// Result of evaluating the session's relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "outputs", rename_all = "snake_case")]
pub enum Outcome {
    /// Matching outputs, in declared order. Never empty.
    Success(Vec<Label>),
    NotFound,
}

impl Outcome {
    pub fn outputs(&self) -> &[Label] {
        match self {
            Outcome::Success(outputs) => outputs,
            Outcome::NotFound => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Start,
    /// `answered` counts the answer events received so far.
    Collecting { answered: usize },
    Evaluating,
    Result { outcome: Outcome },
    Terminal,
}

impl SessionState {
    fn describe(&self) -> &'static str {
        match self {
            SessionState::Start => "at start",
            SessionState::Collecting { .. } => "collecting answers",
            SessionState::Evaluating => "evaluating",
            SessionState::Result { .. } => "showing a result",
            SessionState::Terminal => "finished",
        }
    }
}

pub struct Session<'kb> {
    kb: &'kb KnowledgeBase,
    relation: String,
    facts: FactSet,
    state: SessionState,
}

impl<'kb> Session<'kb> {
    /// A session evaluating `relation`. Fails when the relation is not
    /// declared, so evaluation itself cannot hit an unknown name later.
    pub fn new(kb: &'kb KnowledgeBase, relation: &str) -> Result<Self, EvalError> {
        rules::relation(kb, relation)?;
        Ok(Session {
            kb,
            relation: relation.to_owned(),
            facts: FactSet::new(),
            state: SessionState::Start,
        })
    }

    /// A session over the relation named by the knowledge base's wizard.
    pub fn for_wizard(kb: &'kb KnowledgeBase) -> Result<Self, EvalError> {
        let wizard = kb.wizard.as_ref().ok_or_else(|| EvalError::NoWizard {
            kb: kb.id.clone(),
        })?;
        Session::new(kb, &wizard.relation)
    }

    pub fn facts(&self) -> &FactSet {
        &self.facts
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state == SessionState::Terminal
    }

    /// The outcome, once the session has reached a result.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.state {
            SessionState::Result { outcome } => Some(outcome),
            _ => None,
        }
    }

    fn invalid(&self, event: &'static str) -> EvalError {
        EvalError::InvalidTransition {
            state: self.state.describe().to_owned(),
            event,
        }
    }

    fn move_to(&mut self, next: SessionState) {
        tracing::debug!(
            relation = %self.relation,
            from = self.state.describe(),
            to = next.describe(),
            "session transition"
        );
        self.state = next;
    }

    /// Start collecting answers.
    pub fn begin(&mut self) -> Result<(), EvalError> {
        if self.state != SessionState::Start {
            return Err(self.invalid("begin"));
        }
        self.move_to(SessionState::Collecting { answered: 0 });
        Ok(())
    }

    /// Record a yes/no answer for `label`; "yes" asserts it.
    /// Returns whether the fact store changed.
    pub fn answer(&mut self, label: Label, yes: bool) -> Result<bool, EvalError> {
        let SessionState::Collecting { answered } = self.state else {
            return Err(self.invalid("answer"));
        };
        let changed = yes && self.facts.assert(label);
        self.state = SessionState::Collecting {
            answered: answered + 1,
        };
        Ok(changed)
    }

    /// Record a multi-select answer, asserting every label in it.
    pub fn select<I>(&mut self, labels: I) -> Result<(), EvalError>
    where
        I: IntoIterator<Item = Label>,
    {
        let SessionState::Collecting { answered } = self.state else {
            return Err(self.invalid("select"));
        };
        self.facts.extend(labels);
        self.state = SessionState::Collecting {
            answered: answered + 1,
        };
        Ok(())
    }

    /// Evaluate the relation against the collected facts.
    pub fn evaluate(&mut self) -> Result<Outcome, EvalError> {
        if !matches!(self.state, SessionState::Collecting { .. }) {
            return Err(self.invalid("evaluate"));
        }
        let previous = std::mem::replace(&mut self.state, SessionState::Evaluating);
        let outcome = match crate::evaluate(self.kb, &self.relation, &self.facts) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = previous;
                return Err(e);
            }
        };
        self.move_to(SessionState::Result {
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Discard every fact and go back to the start. Allowed mid-collection
    /// (the user navigated back) and after a result.
    pub fn restart(&mut self) -> Result<(), EvalError> {
        match self.state {
            SessionState::Collecting { .. } | SessionState::Result { .. } => {
                self.facts.retract_all();
                self.move_to(SessionState::Start);
                Ok(())
            }
            _ => Err(self.invalid("restart")),
        }
    }

    pub fn quit(&mut self) -> Result<(), EvalError> {
        if self.is_terminal() {
            return Err(self.invalid("quit"));
        }
        self.move_to(SessionState::Terminal);
        Ok(())
    }
}
