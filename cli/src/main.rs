pub mod commands;

use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use log::{debug, error, info, warn};
use shared::{env, logger, result::MandelbrotResult};

/// Mandelbrot set generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = env::init();
    logger::init();
    match env_file {
        Some(path) => debug!("Loaded environment from {}", path.display()),
        None => debug!("No .env file found, using the process environment"),
    }

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> MandelbrotResult<()> {
    match command {
        Commands::Render(args) => {
            let config = args.to_config()?;
            let summary = renderer::run_render(config).await?;
            if summary.interrupted {
                warn!("Render interrupted, the still image shows the last completed iteration");
            }
            info!(
                "{} of {} pixels are members",
                summary.membership.member_count(),
                summary.membership.resolution().pixel_count()
            );
        }
        Commands::Config(args) => {
            let config = args.to_config()?;
            config.validate()?;
            println!("{}", config.to_json()?);
        }
    }
    Ok(())
}
