//! Line-oriented wizard front ends.
//!
//! Both wizards talk to the user through a [`Console`] over any
//! `BufRead`/`Write` pair, so they run the same against a terminal and
//! against scripted input. End of input is treated as "quit".

pub(crate) mod health;
pub(crate) mod pizza;

use std::io::{self, BufRead, Write};

use advisor_core::Label;
use advisor_eval::EvalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum WizardError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("catalog '{catalog}' has no items to choose from")]
    EmptyCatalog { catalog: String },
}

/// Parse a yes/no answer. `None` for anything unrecognized.
pub(crate) fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Parse a menu choice: a 1-based number or an option's text.
pub(crate) fn parse_choice(input: &str, options: &[&str]) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(n) = input.parse::<usize>() {
        return (1..=options.len()).contains(&n).then(|| n - 1);
    }
    options
        .iter()
        .position(|opt| opt.eq_ignore_ascii_case(input))
}

/// Parse a multi-select answer over `items`: comma or space separated
/// 1-based numbers or item labels. Duplicates collapse, first mention wins.
/// `None` when the answer is empty or any token does not name an item.
pub(crate) fn parse_selection(input: &str, items: &[Label]) -> Option<Vec<Label>> {
    let mut picked: Vec<Label> = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let item = match token.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => items[n - 1].clone(),
            Ok(_) => return None,
            Err(_) => {
                let label = Label::new(token);
                if !items.contains(&label) {
                    return None;
                }
                label
            }
        };
        if !picked.contains(&item) {
            picked.push(item);
        }
    }
    if picked.is_empty() {
        None
    } else {
        Some(picked)
    }
}

pub(crate) struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Console { input, out }
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Print `prompt`, read one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{} ", prompt)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    pub fn yes_no(&mut self, prompt: &str) -> io::Result<Option<bool>> {
        loop {
            let Some(answer) = self.ask(&format!("{} (yes/no)", prompt))? else {
                return Ok(None);
            };
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(Some(yes)),
                None => self.say("Please answer yes or no.")?,
            }
        }
    }

    /// Show a numbered menu and return the 0-based index picked.
    pub fn choose(&mut self, options: &[&str]) -> io::Result<Option<usize>> {
        for (i, opt) in options.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, opt)?;
        }
        loop {
            let Some(answer) = self.ask(">")? else {
                return Ok(None);
            };
            match parse_choice(&answer, options) {
                Some(i) => return Ok(Some(i)),
                None => writeln!(self.out, "Please choose 1-{}.", options.len())?,
            }
        }
    }

    /// Show a numbered item list and read a non-empty selection,
    /// printing `retry` after every empty or invalid answer.
    pub fn multi_select(
        &mut self,
        items: &[Label],
        retry: &str,
    ) -> io::Result<Option<Vec<Label>>> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "  {}. {}", i + 1, item.display_name())?;
        }
        loop {
            let Some(answer) = self.ask("Enter numbers or names, separated by commas:")? else {
                return Ok(None);
            };
            match parse_selection(&answer, items) {
                Some(picked) => return Ok(Some(picked)),
                None => self.say(retry)?,
            }
        }
    }
}

pub(crate) fn display_list(labels: &[Label]) -> String {
    labels
        .iter()
        .map(Label::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::new(n)).collect()
    }

    #[test]
    fn yes_no_accepts_short_and_long_forms() {
        assert_eq!(parse_yes_no(" Yes "), Some(true));
        assert_eq!(parse_yes_no("n"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn choice_by_number_or_text() {
        let opts = ["Back", "Next"];
        assert_eq!(parse_choice("2", &opts), Some(1));
        assert_eq!(parse_choice("back", &opts), Some(0));
        assert_eq!(parse_choice("3", &opts), None);
        assert_eq!(parse_choice("0", &opts), None);
    }

    #[test]
    fn selection_mixes_numbers_and_labels() {
        let base = items(&["flour", "water", "yeast", "salt"]);
        assert_eq!(
            parse_selection("1, 3 salt", &base),
            Some(items(&["flour", "yeast", "salt"]))
        );
        assert_eq!(
            parse_selection("water,2", &base),
            Some(items(&["water"]))
        );
    }

    #[test]
    fn empty_or_invalid_selection_is_rejected() {
        let base = items(&["flour", "water"]);
        assert_eq!(parse_selection("", &base), None);
        assert_eq!(parse_selection(" , ", &base), None);
        assert_eq!(parse_selection("1, 9", &base), None);
        assert_eq!(parse_selection("flour, cheese", &base), None);
    }

    #[test]
    fn console_reprompts_until_valid() {
        let input = b"perhaps\ny\n".as_slice();
        let mut out = Vec::new();
        let answer = Console::new(input, &mut out).yes_no("Fever?").unwrap();
        assert_eq!(answer, Some(true));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Please answer yes or no."));
    }

    #[test]
    fn console_end_of_input_is_none() {
        let mut out = Vec::new();
        let picked = Console::new(b"".as_slice(), &mut out)
            .multi_select(&items(&["flour"]), "Pick one!")
            .unwrap();
        assert_eq!(picked, None);
    }

    #[test]
    fn console_empty_selection_reprompts() {
        let mut out = Vec::new();
        let picked = Console::new(b"\n1\n".as_slice(), &mut out)
            .multi_select(&items(&["flour", "water"]), "Pick one!")
            .unwrap();
        assert_eq!(picked, Some(items(&["flour"])));
        assert!(String::from_utf8(out).unwrap().contains("Pick one!"));
    }
}
