use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "aliman", version, about = "Aliman focus companion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Focus session control
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Talk to the assistant
    Chat {
        #[command(subcommand)]
        action: commands::chat::ChatAction,
    },
    /// Daily plan management
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// End-of-day review
    Review(commands::review::ReviewArgs),
    /// Today's plans, stats and greeting
    Dashboard,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ALIMAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Focus { action } => commands::focus::run(action),
        Commands::Chat { action } => commands::chat::run(action),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Review(args) => commands::review::run(args),
        Commands::Dashboard => commands::dashboard::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "aliman", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
