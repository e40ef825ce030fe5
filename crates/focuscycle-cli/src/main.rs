use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "focuscycle-cli", version, about = "Focuscycle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new cycle
    Start {
        /// Task label for the cycle
        task: String,
        /// Cycle length in minutes
        #[arg(short, long, default_value = "25")]
        minutes: u32,
    },
    /// Interrupt the active cycle
    Stop,
    /// Print the current countdown state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the live countdown until the cycle ends
    Watch,
    /// List recorded cycles
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Start { task, minutes } => commands::timer::start(&task, minutes),
        Commands::Stop => commands::timer::stop(),
        Commands::Status { json } => commands::timer::status(json),
        Commands::Watch => commands::timer::watch(),
        Commands::History { json } => commands::history::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "focuscycle-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
