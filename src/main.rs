use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use contentpost_bot::bot::Bot;
use contentpost_bot::Config;

#[derive(Parser)]
#[command(name = "contentpost-bot", about = "Chat bot that posts submitted articles to a static site")]
struct Args {
    /// Path to the JSON config file.
    #[arg(long = "config-path", default_value = "config.json")]
    config_path: PathBuf,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    let config = match Config::load(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid config");
        return ExitCode::FAILURE;
    }

    let bot = match Bot::new(&config).await {
        Ok(bot) => bot,
        Err(e) => {
            error!(error = %e, "failed to start bot");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = bot.run().await {
        error!(error = %e, "bot stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
