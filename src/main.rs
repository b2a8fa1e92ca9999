use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use keyevolve::config::Config;
use keyevolve::error::KeResult;
use keyevolve::fitness::Evaluator;
use keyevolve::geometry::{KeyboardGeometry, KnownKeyboard};
use std::fs;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Built-in keyboard: ansi_60, columnar_split, minimal_split
    #[arg(global = true, short = 'k', long, default_value = "ansi_60")]
    keyboard: String,

    /// JSON keyboard definition; takes precedence over --keyboard
    #[arg(global = true, long)]
    keyboard_file: Option<String>,

    /// JSON config file; explicit flags override its values
    #[arg(global = true, long = "config")]
    config_path: Option<String>,

    /// Replaces the embedded sample text
    #[arg(global = true, long)]
    text_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Compare(cmd::compare::CompareArgs),
}

fn main() {
    // 1. Parse raw matches (to distinguish user input from defaults)
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    if let Err(e) = execute(&cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli, matches: &clap::ArgMatches) -> KeResult<()> {
    info!("🚀 Initializing KeyEvolve...");

    // 2. Keyboard
    let keyboard = match &cli.keyboard_file {
        Some(path) => {
            info!("📂 Loading keyboard: {}", path);
            KeyboardGeometry::load_from_file(path)?
        }
        None => KnownKeyboard::from_name(&cli.keyboard).geometry(),
    };
    info!(
        "⌨️  Keyboard '{}' ({} keys)",
        keyboard.name(),
        keyboard.key_count()
    );

    // 3. Config: file first, then flags typed on the command line
    let (cli_config, sub_name) = match &cli.command {
        Commands::Search(args) => (&args.config, "search"),
        Commands::Compare(args) => (&args.config, "compare"),
    };
    let config = match (&cli.config_path, matches.subcommand_matches(sub_name)) {
        (Some(path), Some(sub_matches)) => {
            info!("⚖️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        _ => cli_config.clone(),
    };

    // 4. Evaluator
    let evaluator = match &cli.text_file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Evaluator::with_text(config.fitness.clone(), &text)?
        }
        None => Evaluator::new(config.fitness.clone())?,
    };

    // 5. Execute
    let evaluator = Arc::new(evaluator);
    let keyboard = Arc::new(keyboard);
    match &cli.command {
        Commands::Search(args) => cmd::search::run(args, config, evaluator, keyboard),
        Commands::Compare(_) => cmd::compare::run(&evaluator, &keyboard),
    }
}
