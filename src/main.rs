use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use transparency::adapter::inbound::cli::build;
use transparency::adapter::inbound::cli::check;
use transparency::adapter::inbound::cli::command::{CheckCommand, Cli, Commands};
use transparency::adapter::inbound::cli::output::{self, OutputConfig};
use transparency::error::Result;
use transparency::infrastructure::config::settings::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    config.init_logging(cli.verbose);

    tokio::select! {
        result = dispatch(&cli, &config) => {
            if let Err(e) = result {
                error!(error = %e, "Run failed");
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Interrupted, nothing was published");
            std::process::exit(130);
        }
    }
}

async fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Build(args) => build::execute(config, args).await,
        Commands::Check(CheckCommand::Config) => check::config::execute(&cli.config, config),
    }
}
