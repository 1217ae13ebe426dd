pub(crate) mod check;
pub(crate) mod elaborate;
pub(crate) mod ingredients;
pub(crate) mod missing;
pub(crate) mod query;
pub(crate) mod steps;
pub(crate) mod wizard;

use std::path::Path;
use std::process;

use advisor_core::{KnowledgeBase, LoadError};
use advisor_eval::EvalError;

use crate::config::Config;
use crate::{report_error, OutputFormat};

/// Resolve a `<kb>` argument: a built-in name (possibly redirected by the
/// config file) or a path to a `.kb` file.
pub(crate) fn resolve_kb(spec: &str, config: &Config) -> Result<KnowledgeBase, LoadError> {
    if let Some(path) = config.knowledge_base_path(spec) {
        tracing::debug!(name = spec, path = %path.display(), "knowledge base from config");
        return advisor_core::load(path);
    }
    if let Some(result) = advisor_core::builtin(spec) {
        return result;
    }
    advisor_core::load(Path::new(spec))
}

pub(crate) fn report_load_error(e: &LoadError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

/// Load the knowledge base or exit with status 1.
pub(crate) fn load_or_exit(
    spec: &str,
    config: &Config,
    output: OutputFormat,
    quiet: bool,
) -> KnowledgeBase {
    match resolve_kb(spec, config) {
        Ok(kb) => kb,
        Err(e) => {
            report_load_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn report_eval_error(e: &EvalError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", e);
            }
        }
    }
}

pub(crate) fn eval_or_exit<T>(result: Result<T, EvalError>, output: OutputFormat, quiet: bool) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            report_eval_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

/// The relation a command works on: `--relation`, else the wizard's.
pub(crate) fn relation_or_exit(
    kb: &KnowledgeBase,
    explicit: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) -> String {
    if let Some(name) = explicit {
        return name.to_owned();
    }
    match &kb.wizard {
        Some(w) => w.relation.clone(),
        None => {
            let msg = format!(
                "error: knowledge base '{}' declares no wizard; pass --relation",
                kb.id
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", pretty);
}
