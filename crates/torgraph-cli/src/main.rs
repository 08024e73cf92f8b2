#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use torgraph_core::config::load_data_config;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "torgraph: onion-service crawl graph analysis",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Pipeline",
        about = "Merge per-crawl page files into one record file",
        long_about = "Merge gzipped crawl page files into a single record file, dropping page bodies and titles.",
        after_help = "EXAMPLES:\n    # Merge data/pages/*.gz into data/urls/all.json.gz\n    torgraph merge\n\n    # Merge from a custom crawl directory\n    torgraph merge --pages-dir /srv/crawl/pages\n\n    # Emit machine-readable output\n    torgraph merge --json"
    )]
    Merge(cmd::merge::MergeArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Build the domain link graph from crawl records",
        long_about = "Build the directed weighted domain graph from merged crawl records and store it.",
        after_help = "EXAMPLES:\n    # Build from the default record file\n    torgraph build\n\n    # Build from a specific record file\n    torgraph build --input data/urls/all.json.gz\n\n    # Emit machine-readable output\n    torgraph build --json"
    )]
    Build(cmd::build::BuildArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Compute graph metrics and rankings",
        long_about = "Compute PageRank, degree rankings, and global statistics for a stored graph.",
        after_help = "EXAMPLES:\n    # Analyze the default stored graph\n    torgraph analyze\n\n    # Report the top 10 domains per ranking\n    torgraph analyze --top 10\n\n    # Emit machine-readable output\n    torgraph analyze --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Export a stored graph as GraphML",
        long_about = "Export a stored graph to GraphML for external graph tools.",
        after_help = "EXAMPLES:\n    # Export to the configured GraphML path\n    torgraph export\n\n    # Export to stdout\n    torgraph export --output -"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    torgraph completions bash\n\n    # Generate zsh completions\n    torgraph completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TORGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "torgraph=debug,info"
        } else {
            "torgraph=info,warn"
        })
    });

    let format = env::var("TORGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let config = load_data_config(&project_root)?;
    let output = resolve_output_mode(cli.json);

    match cli.command {
        Commands::Merge(ref args) => cmd::merge::run_merge(args, config, output),
        Commands::Build(ref args) => cmd::build::run_build(args, &config, output),
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, &config, output),
        Commands::Export(ref args) => cmd::export::run_export(args, &config, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_before_subcommand() {
        let cli = Cli::parse_from(["torgraph", "--json", "analyze"]);
        assert!(cli.json);
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["torgraph", "analyze", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn merge_subcommand_parses() {
        let cli = Cli::parse_from(["torgraph", "merge", "--pages-dir", "/tmp/pages"]);
        assert!(matches!(cli.command, Commands::Merge(_)));
    }

    #[test]
    fn build_subcommand_parses() {
        let cli = Cli::parse_from(["torgraph", "build", "--name", "testNet"]);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn analyze_flags_parse() {
        let cli = Cli::parse_from([
            "torgraph", "analyze", "--top", "10", "--damping", "0.9", "--max-iter", "200",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze subcommand");
        };
        assert_eq!(args.top, 10);
        assert!((args.damping - 0.9).abs() < f64::EPSILON);
        assert_eq!(args.max_iter, 200);
    }

    #[test]
    fn export_stdout_target_parses() {
        let cli = Cli::parse_from(["torgraph", "export", "--output", "-"]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export subcommand");
        };
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("-")));
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["torgraph", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["torgraph", "merge"],
            vec!["torgraph", "build"],
            vec!["torgraph", "analyze"],
            vec!["torgraph", "export"],
            vec!["torgraph", "completions", "bash"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} — error: {:?}",
                args,
                result.err()
            );
        }
    }
}
