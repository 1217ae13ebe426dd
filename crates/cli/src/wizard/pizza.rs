//! Pizza maker: base check, topping match, preparation steps.
//!
//! The base ingredients and the toppings share one session fact store.
//! Going back to an earlier screen rebuilds the store from the selections
//! that are still in force.

use std::io::{BufRead, Write};

use advisor_core::{KnowledgeBase, Label, Wizard};
use advisor_eval::{
    assemble_steps, ingredients, missing_from_catalog, outputs, present, EvalError, FactSet,
    Outcome, Session, SessionState,
};
use serde::Serialize;

use super::{display_list, Console, WizardError};

pub(crate) const ESSENTIAL_BASE: &str = "essential_base";
pub(crate) const EXTRA_BASE: &str = "extra_base";
pub(crate) const TOPPINGS: &str = "topping";

const SELECT_INGREDIENT: &str = "Please select at least one ingredient!";
const SELECT_TOPPING: &str = "Please select at least one topping!";

/// Every catalog the flow reads must be declared, and the two checklists
/// must offer at least one item.
fn check_catalogs(kb: &KnowledgeBase) -> Result<(), WizardError> {
    for name in [ESSENTIAL_BASE, EXTRA_BASE, TOPPINGS] {
        if kb.catalog(name).is_none() {
            return Err(EvalError::UnknownCatalog {
                catalog: name.to_owned(),
            }
            .into());
        }
    }
    if kb.catalog_items(ESSENTIAL_BASE).is_empty() && kb.catalog_items(EXTRA_BASE).is_empty() {
        return Err(WizardError::EmptyCatalog {
            catalog: ESSENTIAL_BASE.to_owned(),
        });
    }
    if kb.catalog_items(TOPPINGS).is_empty() {
        return Err(WizardError::EmptyCatalog {
            catalog: TOPPINGS.to_owned(),
        });
    }
    Ok(())
}

/// Everything that goes into one pizza, split the way the wizard shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct IngredientSheet {
    pub pizza: Label,
    pub essential_base: Vec<Label>,
    pub extra_base: Vec<Label>,
    pub toppings: Vec<Label>,
}

pub(crate) fn ingredient_sheet(
    kb: &KnowledgeBase,
    relation: &str,
    pizza: &Label,
) -> Result<IngredientSheet, EvalError> {
    let catalog = |name: &str| {
        kb.catalog(name)
            .map(|c| c.items.clone())
            .ok_or_else(|| EvalError::UnknownCatalog {
                catalog: name.to_owned(),
            })
    };
    Ok(IngredientSheet {
        pizza: pizza.clone(),
        essential_base: catalog(ESSENTIAL_BASE)?,
        extra_base: catalog(EXTRA_BASE)?,
        toppings: ingredients(kb, relation, pizza, &[])?,
    })
}

enum Screen {
    Welcome,
    Ingredients { back: Box<Screen> },
    Base,
    MissingEssentials { missing: Vec<Label> },
    BaseResult,
    Toppings,
    NoPizza,
    Choose { pizzas: Vec<Label> },
    Steps { pizza: Label, pizzas: Vec<Label> },
    Quit,
}

struct PizzaWizard<'kb, 'c, R, W> {
    kb: &'kb KnowledgeBase,
    wizard: &'kb Wizard,
    session: Session<'kb>,
    console: &'c mut Console<R, W>,
    base: Vec<Label>,
    toppings: Vec<Label>,
}

pub(crate) fn run<R: BufRead, W: Write>(
    kb: &KnowledgeBase,
    console: &mut Console<R, W>,
) -> Result<(), WizardError> {
    let wizard = kb.wizard.as_ref().ok_or_else(|| EvalError::NoWizard {
        kb: kb.id.clone(),
    })?;
    let session = Session::for_wizard(kb)?;
    check_catalogs(kb)?;
    let mut w = PizzaWizard {
        kb,
        wizard,
        session,
        console,
        base: Vec::new(),
        toppings: Vec::new(),
    };

    let mut screen = Screen::Welcome;
    loop {
        screen = match screen {
            Screen::Welcome => w.welcome()?,
            Screen::Ingredients { back } => w.ingredients(*back)?,
            Screen::Base => w.select_base()?,
            Screen::MissingEssentials { missing } => w.missing_essentials(missing)?,
            Screen::BaseResult => w.base_result()?,
            Screen::Toppings => w.select_toppings()?,
            Screen::NoPizza => w.no_pizza()?,
            Screen::Choose { pizzas } => w.choose(pizzas)?,
            Screen::Steps { pizza, pizzas } => w.steps(pizza, pizzas)?,
            Screen::Quit => {
                if !w.session.is_terminal() {
                    w.session.quit()?;
                }
                w.console.say("Goodbye!")?;
                return Ok(());
            }
        };
    }
}

impl<'kb, R: BufRead, W: Write> PizzaWizard<'kb, '_, R, W> {
    fn relation(&self) -> &'kb str {
        &self.wizard.relation
    }

    /// Clear the session and assert `selections` as the only facts.
    fn rebuild(&mut self, selections: &[&[Label]]) -> Result<(), EvalError> {
        if self.session.state() != &SessionState::Start {
            self.session.restart()?;
        }
        self.session.begin()?;
        for labels in selections {
            self.session.select(labels.iter().cloned())?;
        }
        Ok(())
    }

    fn welcome(&mut self) -> Result<Screen, WizardError> {
        self.console.blank()?;
        self.console.say(&self.wizard.title)?;
        self.console
            .say(&"=".repeat(self.wizard.title.chars().count()))?;
        Ok(
            match self
                .console
                .choose(&["Start making pizza", "Show ingredients", "Quit"])?
            {
                Some(0) => Screen::Base,
                Some(1) => Screen::Ingredients {
                    back: Box::new(Screen::Welcome),
                },
                _ => Screen::Quit,
            },
        )
    }

    fn ingredients(&mut self, back: Screen) -> Result<Screen, WizardError> {
        let pizzas = outputs(self.kb, self.relation())?;
        let mut options: Vec<String> = pizzas.iter().map(Label::display_name).collect();
        options.push("Back".to_owned());
        let options: Vec<&str> = options.iter().map(String::as_str).collect();

        self.console.blank()?;
        self.console.say("Which pizza would you like to know about?")?;
        match self.console.choose(&options)? {
            Some(i) if i < pizzas.len() => {
                let sheet = ingredient_sheet(self.kb, self.relation(), &pizzas[i])?;
                self.console.blank()?;
                self.console.say(&sheet.pizza.display_name())?;
                self.console
                    .say(&format!("  Essential base: {}", display_list(&sheet.essential_base)))?;
                self.console.say(&format!(
                    "  Extra base (optional): {}",
                    display_list(&sheet.extra_base)
                ))?;
                self.console
                    .say(&format!("  Toppings: {}", display_list(&sheet.toppings)))?;
                Ok(Screen::Ingredients {
                    back: Box::new(back),
                })
            }
            Some(_) => Ok(back),
            None => Ok(Screen::Quit),
        }
    }

    fn select_base(&mut self) -> Result<Screen, WizardError> {
        let mut items = self.kb.catalog_items(ESSENTIAL_BASE).to_vec();
        items.extend(self.kb.catalog_items(EXTRA_BASE).iter().cloned());

        self.console.blank()?;
        self.console
            .say("Step 1: select the base ingredients you have.")?;
        let Some(base) = self.console.multi_select(&items, SELECT_INGREDIENT)? else {
            return Ok(Screen::Quit);
        };
        self.base = base;
        self.toppings.clear();
        let base = self.base.clone();
        self.rebuild(&[base.as_slice()])?;

        let missing = missing_from_catalog(self.kb, ESSENTIAL_BASE, self.session.facts())?;
        if missing.is_empty() {
            Ok(Screen::BaseResult)
        } else {
            Ok(Screen::MissingEssentials { missing })
        }
    }

    fn missing_essentials(&mut self, missing: Vec<Label>) -> Result<Screen, WizardError> {
        self.console.blank()?;
        self.console.say(&format!(
            "You are missing essential ingredients: {}.",
            display_list(&missing)
        ))?;
        self.console.say(&format!(
            "A pizza base needs all of: {}.",
            display_list(self.kb.catalog_items(ESSENTIAL_BASE))
        ))?;
        Ok(
            match self
                .console
                .choose(&["See ingredients", "Start over", "Quit"])?
            {
                Some(0) => Screen::Ingredients {
                    back: Box::new(Screen::MissingEssentials { missing }),
                },
                Some(1) => Screen::Base,
                _ => Screen::Quit,
            },
        )
    }

    fn base_result(&mut self) -> Result<Screen, WizardError> {
        let missing_extras = missing_from_catalog(self.kb, EXTRA_BASE, self.session.facts())?;
        self.console.blank()?;
        self.console.say("A basic pizza base is fine.")?;
        for extra in &missing_extras {
            match self.kb.effect(extra) {
                Some(effect) => self
                    .console
                    .say(&format!("  Without {}: {}", extra.display_name(), effect))?,
                None => self
                    .console
                    .say(&format!("  Without {}.", extra.display_name()))?,
            }
        }
        Ok(match self.console.choose(&["Back", "Next"])? {
            Some(0) => Screen::Base,
            Some(_) => Screen::Toppings,
            None => Screen::Quit,
        })
    }

    fn select_toppings(&mut self) -> Result<Screen, WizardError> {
        let items = self.kb.catalog_items(TOPPINGS).to_vec();
        self.console.blank()?;
        self.console.say("Step 2: select your toppings.")?;
        let Some(toppings) = self.console.multi_select(&items, SELECT_TOPPING)? else {
            return Ok(Screen::Quit);
        };
        self.toppings = toppings;
        let (base, toppings) = (self.base.clone(), self.toppings.clone());
        self.rebuild(&[base.as_slice(), toppings.as_slice()])?;

        Ok(match self.session.evaluate()? {
            Outcome::Success(pizzas) => Screen::Choose { pizzas },
            Outcome::NotFound => Screen::NoPizza,
        })
    }

    fn no_pizza(&mut self) -> Result<Screen, WizardError> {
        self.console.blank()?;
        self.console.say(&self.wizard.not_found)?;
        self.console.say(&format!(
            "Selected toppings: {}.",
            display_list(&self.toppings)
        ))?;
        Ok(
            match self
                .console
                .choose(&["See ingredients", "Start over", "Quit"])?
            {
                Some(0) => Screen::Ingredients {
                    back: Box::new(Screen::NoPizza),
                },
                Some(1) => Screen::Base,
                _ => Screen::Quit,
            },
        )
    }

    fn choose(&mut self, pizzas: Vec<Label>) -> Result<Screen, WizardError> {
        let mut options: Vec<String> = pizzas.iter().map(Label::display_name).collect();
        options.push("Back".to_owned());
        let options: Vec<&str> = options.iter().map(String::as_str).collect();

        self.console.blank()?;
        self.console
            .say(&format!("Step 3: {}:", self.wizard.found))?;
        Ok(match self.console.choose(&options)? {
            Some(i) if i < pizzas.len() => Screen::Steps {
                pizza: pizzas[i].clone(),
                pizzas,
            },
            Some(_) => Screen::Toppings,
            None => Screen::Quit,
        })
    }

    fn steps(&mut self, pizza: Label, pizzas: Vec<Label>) -> Result<Screen, WizardError> {
        let extras: FactSet = present(self.kb, EXTRA_BASE, self.session.facts())?
            .into_iter()
            .collect();
        let steps = assemble_steps(self.kb, self.relation(), &pizza, &extras)?;

        self.console.blank()?;
        self.console
            .say(&format!("Step 4: how to make {}", pizza.display_name()))?;
        for (i, step) in steps.iter().enumerate() {
            self.console.say(&format!("  {}. {}", i + 1, step.text))?;
        }
        Ok(
            match self.console.choose(&["Back", "Start over", "Quit"])? {
                Some(0) => Screen::Choose { pizzas },
                Some(1) => Screen::Base,
                _ => Screen::Quit,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::builtin;

    fn run_script(script: &str) -> String {
        let kb = builtin("pizza").unwrap().unwrap();
        run_on(&kb, script).unwrap()
    }

    fn run_on(kb: &KnowledgeBase, script: &str) -> Result<String, WizardError> {
        let mut out = Vec::new();
        let mut console = Console::new(script.as_bytes(), &mut out);
        run(kb, &mut console)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn full_flow_prints_margherita_steps_without_extras() {
        // start, full essential base, next, margherita toppings, pick it, quit
        let out = run_script("1\n1,2,3,4\n2\ntomato_sauce mozzarella basil\n1\n3\n");
        assert!(out.contains("A basic pizza base is fine."));
        assert!(out.contains("Without Olive Oil: The crust will be drier"));
        assert!(out.contains("Step 4: how to make Margherita"));
        assert!(out.contains("Finish with fresh basil leaves."));
        assert!(!out.contains("Knead a spoonful of olive oil"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn present_extras_add_their_steps() {
        let out = run_script("start making pizza\n1 2 3 4 5 7\nnext\n1,2,4\n1\nquit\n");
        assert!(out.contains("Step 4: how to make Pepperoni"));
        assert!(out.contains("Knead a spoonful of olive oil into the dough."));
        assert!(out.contains("Dust the peel with semolina"));
        assert!(!out.contains("Dissolve the sugar"));
        assert!(!out.contains("Without Olive Oil"));
        assert!(out.contains("Without Sugar"));
    }

    #[test]
    fn missing_essentials_are_listed() {
        let out = run_script("1\nflour, water\n3\n");
        assert!(out.contains("You are missing essential ingredients: Yeast, Salt."));
        assert!(out.contains("A pizza base needs all of: Flour, Water, Yeast, Salt."));
    }

    #[test]
    fn empty_selection_reprompts() {
        let out = run_script("1\n\n1,2,3,4\n2\n4\n3\n");
        assert!(out.contains("Please select at least one ingredient!"));
        assert!(!out.contains("Please select at least one topping!"));
        assert!(out.contains("Cannot make any pizza with the toppings you have selected."));
        assert!(out.contains("Selected toppings: Pepperoni."));
    }

    #[test]
    fn empty_topping_selection_asks_for_a_topping() {
        let out = run_script("1\n1,2,3,4\n2\n\n4\n3\n");
        assert_eq!(out.matches("Please select at least one topping!").count(), 1);
        assert!(!out.contains("Please select at least one ingredient!"));
    }

    #[test]
    fn kb_without_base_catalogs_is_rejected_before_the_menu() {
        let src = "wizard p { title: \"P\" relation: makeable_pizza }\n\
                   catalog pantry { items: [cheese] }\n\
                   relation makeable_pizza { plain { requires: [cheese] } }\n";
        let kb = advisor_core::load_str(src, "p.kb", "p").unwrap();
        let err = run_on(&kb, "1\n1\ncheese\nflour\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            WizardError::Eval(EvalError::UnknownCatalog { ref catalog }) if catalog == ESSENTIAL_BASE
        ));
    }

    #[test]
    fn empty_topping_catalog_is_rejected() {
        let src = "wizard p { title: \"P\" relation: makeable_pizza }\n\
                   catalog essential_base { items: [flour] }\n\
                   catalog extra_base { items: [] }\n\
                   catalog topping { items: [] }\n\
                   relation makeable_pizza { plain { requires: [flour] } }\n";
        let kb = advisor_core::load_str(src, "p.kb", "p").unwrap();
        let err = run_on(&kb, "1\n").unwrap_err();
        assert!(matches!(err, WizardError::EmptyCatalog { ref catalog } if catalog == TOPPINGS));
    }

    #[test]
    fn going_back_replaces_the_toppings() {
        // margherita toppings, back from step 3, then hawaiian toppings
        let out = run_script(
            "1\n1,2,3,4\n2\n1,2,3\n2\ntomato_sauce,mozzarella,ham,pineapple\n1\n3\n",
        );
        assert!(out.contains("Step 4: how to make Hawaiian"));
        assert!(!out.contains("Step 4: how to make Margherita"));
    }

    #[test]
    fn ingredients_screen_shows_one_pizza() {
        let out = run_script("2\n4\n5\n3\n");
        assert!(out.contains("Hawaiian\n  Essential base: Flour, Water, Yeast, Salt"));
        assert!(out.contains("  Toppings: Tomato Sauce, Mozzarella, Ham, Pineapple"));
    }

    #[test]
    fn sheet_splits_base_and_toppings() {
        let kb = builtin("pizza").unwrap().unwrap();
        let sheet = ingredient_sheet(&kb, "makeable_pizza", &Label::new("margherita")).unwrap();
        assert_eq!(sheet.essential_base.len(), 4);
        assert_eq!(sheet.extra_base.len(), 3);
        assert_eq!(
            sheet.toppings,
            vec![
                Label::new("tomato_sauce"),
                Label::new("mozzarella"),
                Label::new("basil")
            ]
        );
    }
}
