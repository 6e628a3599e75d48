//! pwmeter CLI: password strength meter and generator.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "pwmeter", version, about = "Password strength meter & generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the strength of a password
    Check {
        /// Password to check (read from stdin when omitted)
        password: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate random passwords
    Generate(GenerateArgs),

    /// Evaluate every password in a file and summarize them
    Batch {
        /// File with one password per line, optionally `account<TAB>password` ("-" for stdin)
        #[arg(long)]
        input: PathBuf,

        /// Write a CSV export (passwords replaced by fingerprints)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Start an interactive session with an in-memory history
    Session {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,

    /// Show password guidelines and a random fact
    Tips,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Password length (default from config, 12 otherwise)
    #[arg(long, short)]
    length: Option<usize>,

    /// Exclude uppercase letters
    #[arg(long)]
    no_upper: bool,

    /// Exclude lowercase letters
    #[arg(long)]
    no_lower: bool,

    /// Exclude digits
    #[arg(long)]
    no_digits: bool,

    /// Exclude special characters
    #[arg(long)]
    no_special: bool,

    /// Number of passwords to generate
    #[arg(long, short, default_value = "1")]
    count: usize,

    /// Print the passwords as JSON
    #[arg(long)]
    json: bool,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pwmeter=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { password, json } => commands::check::execute(password, json),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Batch {
            input,
            export,
            json,
            config,
        } => commands::batch::execute(input, export, json, config),
        Commands::Session { config } => commands::session::execute(config),
        Commands::Init => commands::init::execute(),
        Commands::Tips => commands::tips::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
