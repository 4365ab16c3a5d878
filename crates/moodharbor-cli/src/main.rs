use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "moodharbor-cli", version, about = "Moodharbor emotion quiz CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quiz session control
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Dataset inspection
    Dataset {
        #[command(subcommand)]
        action: commands::dataset::DatasetAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Dataset { action } => commands::dataset::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
