use advisor_core::Label;
use advisor_eval::outputs;

use crate::commands::{eval_or_exit, load_or_exit, print_json, relation_or_exit};
use crate::config::Config;
use crate::wizard::{display_list, pizza::ingredient_sheet};
use crate::OutputFormat;

/// Without a pizza: list the pizza types. With one: its ingredient sheet.
pub(crate) fn cmd_ingredients(
    kb: &str,
    pizza: Option<&str>,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) {
    let kb = load_or_exit(kb, config, output, quiet);
    let relation = relation_or_exit(&kb, None, output, quiet);

    let Some(pizza) = pizza else {
        let pizzas = eval_or_exit(outputs(&kb, &relation), output, quiet);
        match output {
            OutputFormat::Json => print_json(&serde_json::json!({ "pizzas": pizzas })),
            OutputFormat::Text => {
                for p in &pizzas {
                    println!("{}", p);
                }
            }
        }
        return;
    };

    let sheet = eval_or_exit(
        ingredient_sheet(&kb, &relation, &Label::new(pizza)),
        output,
        quiet,
    );
    match output {
        OutputFormat::Json => print_json(&serde_json::json!(sheet)),
        OutputFormat::Text => {
            println!("{}", sheet.pizza.display_name());
            println!("  Essential base: {}", display_list(&sheet.essential_base));
            println!(
                "  Extra base (optional): {}",
                display_list(&sheet.extra_base)
            );
            println!("  Toppings: {}", display_list(&sheet.toppings));
        }
    }
}
