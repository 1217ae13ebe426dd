mod commands;
mod config;
mod logging;
mod wizard;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use commands::wizard::WizardKind;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Rule-based advisor wizards.
#[derive(Parser)]
#[command(name = "advisor", version, about = "Rule-based advisor wizards")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log debug events to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Path to a TOML config file (default: ./advisor.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the symptom checker
    Health {
        /// Built-in name or path to a .kb file
        #[arg(long, default_value = "health")]
        kb: String,
    },

    /// Run the pizza maker
    Pizza {
        /// Built-in name or path to a .kb file
        #[arg(long, default_value = "pizza")]
        kb: String,
    },

    /// Load and validate a .kb file, reporting every error found
    Check {
        /// Path to the .kb source file
        file: PathBuf,
    },

    /// Print a loaded knowledge base as JSON
    Elaborate {
        /// Built-in name or path to a .kb file
        kb: String,
    },

    /// Evaluate a relation against a set of facts
    Query {
        /// Relation name
        relation: String,
        /// Asserted label (repeatable)
        #[arg(long = "fact")]
        facts: Vec<String>,
        /// Built-in name or path to a .kb file
        #[arg(long)]
        kb: String,
    },

    /// List catalog items that are not among the given facts
    Missing {
        /// Catalog name
        #[arg(long)]
        catalog: String,
        /// Present label (repeatable)
        #[arg(long = "fact")]
        facts: Vec<String>,
        /// Built-in name or path to a .kb file
        #[arg(long, default_value = "pizza")]
        kb: String,
    },

    /// Print the preparation steps of one output
    Steps {
        /// Pizza (relation output) name
        pizza: String,
        /// Present extra ingredient (repeatable)
        #[arg(long = "extra")]
        extras: Vec<String>,
        /// Relation to look the output up in (default: the wizard's)
        #[arg(long)]
        relation: Option<String>,
        /// Built-in name or path to a .kb file
        #[arg(long, default_value = "pizza")]
        kb: String,
    },

    /// List pizza types, or the ingredients of one
    Ingredients {
        /// Pizza name
        pizza: Option<String>,
        /// Built-in name or path to a .kb file
        #[arg(long, default_value = "pizza")]
        kb: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };
    logging::init_tracing(cli.verbose, config.log.filter.as_deref());

    let (output, quiet) = (cli.output, cli.quiet);
    match cli.command {
        Commands::Health { kb } => {
            commands::wizard::cmd_wizard(WizardKind::Health, &kb, &config, output, quiet);
        }
        Commands::Pizza { kb } => {
            commands::wizard::cmd_wizard(WizardKind::Pizza, &kb, &config, output, quiet);
        }
        Commands::Check { file } => {
            commands::check::cmd_check(&file, output, quiet);
        }
        Commands::Elaborate { kb } => {
            commands::elaborate::cmd_elaborate(&kb, &config, output, quiet);
        }
        Commands::Query {
            relation,
            facts,
            kb,
        } => {
            commands::query::cmd_query(&kb, &relation, &facts, &config, output, quiet);
        }
        Commands::Missing { catalog, facts, kb } => {
            commands::missing::cmd_missing(&kb, &catalog, &facts, &config, output, quiet);
        }
        Commands::Steps {
            pizza,
            extras,
            relation,
            kb,
        } => {
            commands::steps::cmd_steps(
                &kb,
                relation.as_deref(),
                &pizza,
                &extras,
                &config,
                output,
                quiet,
            );
        }
        Commands::Ingredients { pizza, kb } => {
            commands::ingredients::cmd_ingredients(&kb, pizza.as_deref(), &config, output, quiet);
        }
    }
}

/// Print an error to stderr in the selected format. Silent under `--quiet`.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
