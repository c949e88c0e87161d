use blinker_core::storage::LoggingConfig;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "blinker-cli", version, about = "Blinker work/break reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the work/break cycle until Ctrl-C
    Run(commands::run::RunArgs),
    /// Show the durations the next run starts with
    Defaults {
        /// Print as JSON
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
        shell: clap_complete::Shell,
    },
}

/// Install the stderr subscriber. `BLINKER_LOG` wins over `logging.level`.
///
/// The config is only read here, never created, and any problem with it is
/// reported once the subscriber is live.
fn init_logging() {
    let mut problem = None;
    let filter = EnvFilter::try_from_env("BLINKER_LOG").unwrap_or_else(|_| {
        let level = match blinker_core::Config::read() {
            Ok(config) => config.unwrap_or_default().logging.level,
            Err(e) => {
                problem = Some(format!("ignoring config for log level: {e}"));
                LoggingConfig::default().level
            }
        };
        EnvFilter::try_new(&level).unwrap_or_else(|e| {
            problem = Some(format!("invalid logging.level {level:?}: {e}"));
            EnvFilter::new("warn")
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    if let Some(problem) = problem {
        tracing::warn!("{problem}");
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Defaults { json } => commands::defaults::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
