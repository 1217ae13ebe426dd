use crate::commands::{load_or_exit, print_json};
use crate::config::Config;
use crate::OutputFormat;

/// Print the loaded knowledge base as JSON, whatever `--output` says.
pub(crate) fn cmd_elaborate(kb: &str, config: &Config, output: OutputFormat, quiet: bool) {
    let kb = load_or_exit(kb, config, output, quiet);
    print_json(&kb.to_json());
}
