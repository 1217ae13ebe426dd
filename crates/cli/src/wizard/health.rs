//! Symptom checker: one yes/no question per symptom, then every matching
//! disease.

use std::io::{BufRead, Write};

use advisor_core::KnowledgeBase;
use advisor_eval::{EvalError, Outcome, Session};

use super::{Console, WizardError};

pub(crate) fn run<R: BufRead, W: Write>(
    kb: &KnowledgeBase,
    console: &mut Console<R, W>,
) -> Result<(), WizardError> {
    let wizard = kb.wizard.as_ref().ok_or_else(|| EvalError::NoWizard {
        kb: kb.id.clone(),
    })?;
    let mut session = Session::for_wizard(kb)?;

    console.say(&wizard.title)?;
    console.say(&"=".repeat(wizard.title.chars().count()))?;

    loop {
        session.begin()?;
        for question in &kb.questions {
            match console.yes_no(&question.prompt)? {
                Some(yes) => {
                    session.answer(question.label.clone(), yes)?;
                }
                None => return finish(&mut session, console),
            }
        }

        console.blank()?;
        match session.evaluate()? {
            Outcome::Success(diseases) => {
                for disease in &diseases {
                    console.say(&format!("{} {}.", wizard.found, disease.display_name()))?;
                }
            }
            Outcome::NotFound => console.say(&wizard.not_found)?,
        }
        console.blank()?;

        match console.choose(&["Restart", "Quit"])? {
            Some(0) => session.restart()?,
            _ => return finish(&mut session, console),
        }
    }
}

fn finish<R: BufRead, W: Write>(
    session: &mut Session<'_>,
    console: &mut Console<R, W>,
) -> Result<(), WizardError> {
    session.quit()?;
    console.say("Goodbye!")?;
    Ok(())
}
