mod commands;
mod config;
mod error;
mod runner;
mod tap;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::runner::BatchOptions;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Token-stream parser for JSON-like input.
#[derive(Parser)]
#[command(
    name = "jtree",
    version,
    about = "Parse token record streams into concrete syntax trees"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a TOML config file (default: ./jtree.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one token record file and print its tree
    Parse {
        /// Path to the token record file
        file: PathBuf,
        /// Spaces per tree level
        #[arg(long)]
        indent: Option<usize>,
        /// Maximum object/list nesting depth
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Parse inputNN.txt jobs from one folder into outputNN.txt results in another
    Batch {
        /// Folder holding input01.txt, input02.txt, ...
        #[arg(long)]
        input_dir: Option<PathBuf>,
        /// Existing folder that receives output01.txt, output02.txt, ...
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Number of jobs to run
        #[arg(long)]
        jobs: Option<usize>,
        /// Spaces per tree level
        #[arg(long)]
        indent: Option<usize>,
    },

    /// Run the conformance suite and print a TAP report
    Test {
        /// Path to the conformance suite directory
        #[arg(default_value = "conformance")]
        suite_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Parse {
            file,
            indent,
            max_depth,
        } => {
            if let Some(depth) = max_depth {
                config.parser.max_depth = depth;
            }
            let indent = indent.unwrap_or(config.render.indent);
            commands::parse::cmd_parse(
                &file,
                indent,
                config.parser_config(),
                cli.output,
                cli.quiet,
            );
        }
        Commands::Batch {
            input_dir,
            output_dir,
            jobs,
            indent,
        } => {
            let opts = BatchOptions {
                input_dir: input_dir.unwrap_or(config.batch.input_dir.clone()),
                output_dir: output_dir.unwrap_or(config.batch.output_dir.clone()),
                jobs: jobs.unwrap_or(config.batch.jobs),
                indent: indent.unwrap_or(config.render.indent),
                parser: config.parser_config(),
            };
            commands::batch::cmd_batch(&opts, cli.output, cli.quiet);
        }
        Commands::Test { suite_dir } => {
            commands::test::cmd_test(&suite_dir, config.render.indent, config.parser_config());
        }
    }
}

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
