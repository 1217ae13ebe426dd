use advisor_core::Label;
use advisor_eval::{evaluate, FactSet, Outcome};

use crate::commands::{eval_or_exit, load_or_exit, print_json};
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_query(
    kb: &str,
    relation: &str,
    facts: &[String],
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let kb = load_or_exit(kb, config, output, quiet);
    let facts: FactSet = facts.iter().map(|f| Label::new(f)).collect();
    let outcome = eval_or_exit(evaluate(&kb, relation, &facts), output, quiet);

    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "relation": relation,
            "facts": facts,
            "matches": outcome.outputs(),
        })),
        OutputFormat::Text => match &outcome {
            Outcome::Success(outputs) => {
                for out in outputs {
                    println!("{}", out);
                }
            }
            Outcome::NotFound => {
                if !quiet {
                    let msg = kb
                        .wizard
                        .as_ref()
                        .filter(|w| w.relation == relation)
                        .map(|w| w.not_found.as_str())
                        .unwrap_or("no match");
                    println!("{}", msg);
                }
            }
        },
    }
}
