use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Weekly study schedule generator")]
struct Cli {
    /// Settings document (defaults to `settings_file` from the config)
    #[arg(long, short, global = true)]
    file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a settings document from the configured defaults
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Weekly availability management
    Availability {
        #[command(subcommand)]
        action: commands::availability::AvailabilityAction,
    },
    /// Session rules stored in the settings document
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Generate the weekly schedule
    Generate(commands::generate::GenerateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("STUDYPLAN_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = cli.file;
    let result = match cli.command {
        Commands::Init { force } => commands::settings::init(file, force),
        Commands::Subject { action } => commands::subject::run(file, action),
        Commands::Availability { action } => commands::availability::run(file, action),
        Commands::Settings { action } => commands::settings::run(file, action),
        Commands::Generate(args) => commands::generate::run(file, args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "studyplan", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
