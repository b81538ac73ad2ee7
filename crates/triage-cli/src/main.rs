mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Import service desk messages as reviews and failure reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a JSON batch of messages, store the records and write result files
    Import {
        /// Path to the JSON source file
        input_file: PathBuf,

        /// SQLite database holding previously imported records
        #[arg(long, default_value = "data/triage.db", env = "TRIAGE_DB")]
        db: PathBuf,

        /// Directory for the timestamped result files
        #[arg(long, default_value = "results", env = "TRIAGE_RESULTS_DIR")]
        results_dir: PathBuf,

        /// Region assumed for phone numbers without a country code
        #[arg(long, default_value = "PL", env = "TRIAGE_PHONE_REGION")]
        phone_region: String,

        #[command(flatten)]
        rules: RulesArgs,

        /// Classify and check duplicates without storing anything
        #[arg(long)]
        dry_run: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// List every error and duplicate, not just the counts
        #[arg(long)]
        verbose: bool,
    },
    /// Show how a single description would be classified
    Classify {
        /// Message description
        description: String,

        #[command(flatten)]
        rules: RulesArgs,
    },
    /// List stored records
    List {
        /// SQLite database holding imported records
        #[arg(long, default_value = "data/triage.db", env = "TRIAGE_DB")]
        db: PathBuf,

        /// Only this kind: review or failure-report
        #[arg(short, long)]
        kind: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect keyword rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(clap::Args)]
struct RulesArgs {
    /// Custom JSON keyword rule file
    #[arg(short, long = "rules", value_name = "FILE", conflicts_with = "preset")]
    rules: Option<PathBuf>,

    /// Predefined keyword rules: pl (default), en
    #[arg(short, long = "preset", value_name = "NAME")]
    preset: Option<String>,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined keyword rules
    List,
    /// Explain a preset in plain language
    Explain {
        /// Preset name (e.g., "pl")
        preset: String,
    },
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input_file,
            db,
            results_dir,
            phone_region,
            rules,
            dry_run,
            output,
            verbose,
        } => commands::import::run(commands::import::ImportArgs {
            input_file,
            db,
            results_dir,
            phone_region,
            rules_file: rules.rules,
            preset: rules.preset,
            dry_run,
            output_format: output,
            verbose,
        }),
        Commands::Classify { description, rules } => {
            commands::classify::run(&description, rules.rules, rules.preset)
        }
        Commands::List { db, kind, output } => commands::list::run(&db, kind.as_deref(), &output),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Explain { preset } => commands::rules::explain(&preset),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
