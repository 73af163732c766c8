use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use setpiece::config::AnalysisConfig;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cluster set pieces and recommend target areas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/events.json")]
    events: String,

    #[arg(global = true, long, value_enum, default_value_t = cmd::InputFormat::Auto)]
    format: cmd::InputFormat,

    /// JSON analysis config; explicit flags override its values
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Cluster set pieces and print the recommended target area
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Per-match set-piece counts and success rates
    Summary(cmd::summary::SummaryArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing Set Piece Analyzer...");

    let result = match cli.command {
        Commands::Analyze(args) => {
            let config = match &cli.config {
                Some(path) => {
                    info!("⚖️  Loading config from: {}", path);
                    let mut file_config = AnalysisConfig::load_from_file(path).unwrap_or_else(|e| {
                        error!("❌ Failed to load config '{}': {}", path, e);
                        process::exit(1);
                    });
                    if let Some(sub_matches) = matches.subcommand_matches("analyze") {
                        file_config.merge_from_cli(&args.config, sub_matches);
                    }
                    file_config
                }
                None => args.config.clone(),
            };
            cmd::analyze::run(args, config, &cli.events, cli.format)
        }
        Commands::Summary(args) => cmd::summary::run(args, &cli.events, cli.format),
    };

    if let Err(e) = result {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
