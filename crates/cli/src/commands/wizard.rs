use std::io;
use std::process;

use crate::commands::{load_or_exit, report_eval_error};
use crate::config::Config;
use crate::wizard::{health, pizza, Console, WizardError};
use crate::{report_error, OutputFormat};

#[derive(Debug, Clone, Copy)]
pub(crate) enum WizardKind {
    Health,
    Pizza,
}

/// Run an interactive wizard on stdin/stdout.
pub(crate) fn cmd_wizard(
    kind: WizardKind,
    kb: &str,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let kb = load_or_exit(kb, config, output, quiet);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let result: Result<(), WizardError> = match kind {
        WizardKind::Health => health::run(&kb, &mut console),
        WizardKind::Pizza => pizza::run(&kb, &mut console),
    };
    match result {
        Ok(()) => {}
        Err(WizardError::Eval(e)) => {
            report_eval_error(&e, output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
