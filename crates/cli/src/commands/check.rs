use std::path::Path;
use std::process;

use advisor_core::check_str;
use advisor_core::parser::DEFAULT_MAX_ERRORS;

use crate::{report_error, OutputFormat};

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let filename = file.display().to_string();
    let src = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", filename, e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors = check_str(&src, &filename, DEFAULT_MAX_ERRORS);
    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("ok: {}", filename),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
        return;
    }

    match output {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "valid": false,
                "errors": errors.iter().map(|e| e.to_json_value()).collect::<Vec<_>>(),
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&json).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            if !quiet {
                for e in &errors {
                    eprintln!("error: {}", e);
                }
                eprintln!("{} error(s) in {}", errors.len(), filename);
            }
        }
    }
    process::exit(1);
}
