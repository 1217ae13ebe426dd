use advisor_core::Label;
use advisor_eval::{assemble_steps, FactSet};

use crate::commands::{eval_or_exit, load_or_exit, print_json, relation_or_exit};
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_steps(
    kb: &str,
    relation: Option<&str>,
    pizza: &str,
    extras: &[String],
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let kb = load_or_exit(kb, config, output, quiet);
    let relation = relation_or_exit(&kb, relation, output, quiet);
    let extras: FactSet = extras.iter().map(|e| Label::new(e)).collect();
    let steps = eval_or_exit(
        assemble_steps(&kb, &relation, &Label::new(pizza), &extras),
        output,
        quiet,
    );

    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "output": Label::new(pizza),
            "extras": extras,
            "steps": steps,
        })),
        OutputFormat::Text => {
            for (i, step) in steps.iter().enumerate() {
                println!("{}. {}", i + 1, step.text);
            }
        }
    }
}
