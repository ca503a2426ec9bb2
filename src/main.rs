use clap::Parser;
use tracing::error;

use fleetledger::cli::{self, Cli};
use fleetledger::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging first, so command failures are traced too.
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.logging.init();

    if let Err(e) = cli::run(cli, config).await {
        error!(error = %e, "command failed");
        cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
