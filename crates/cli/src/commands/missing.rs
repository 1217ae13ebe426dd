use advisor_core::Label;
use advisor_eval::{missing_from_catalog, FactSet};

use crate::commands::{eval_or_exit, load_or_exit, print_json};
use crate::config::Config;
use crate::OutputFormat;

pub(crate) fn cmd_missing(
    kb: &str,
    catalog: &str,
    facts: &[String],
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let kb = load_or_exit(kb, config, output, quiet);
    let facts: FactSet = facts.iter().map(|f| Label::new(f)).collect();
    let missing = eval_or_exit(missing_from_catalog(&kb, catalog, &facts), output, quiet);

    match output {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = missing
                .iter()
                .map(|label| {
                    serde_json::json!({
                        "label": label,
                        "effect": kb.effect(label),
                    })
                })
                .collect();
            print_json(&serde_json::json!({ "catalog": catalog, "missing": entries }));
        }
        OutputFormat::Text => {
            if missing.is_empty() && !quiet {
                println!("nothing missing");
            }
            for label in &missing {
                match kb.effect(label) {
                    Some(effect) => println!("{}: {}", label, effect),
                    None => println!("{}", label),
                }
            }
        }
    }
}
