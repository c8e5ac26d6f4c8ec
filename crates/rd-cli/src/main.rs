use anyhow::Context;
use clap::Parser;
use rd_config::RdConfig;

mod cli;
mod commands;
mod context;
mod output;
mod progress;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("resdeeds error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = RdConfig::load_with_dotenv().context("failed to load resdeeds configuration")?;

    match &cli.command {
        cli::Commands::Config => return commands::config::handle(&config),
        cli::Commands::Template { action } => {
            return commands::template::handle(action, &config, &flags).await;
        }
        _ => {}
    }

    context::warn_unconfigured(&config);

    let mut ctx = context::AppContext::init(config, &flags)
        .await
        .context("failed to initialize resdeeds application context")?;

    let result = commands::dispatch::dispatch(cli.command, &mut ctx, &flags).await;
    match result {
        // One commit per successful request.
        Ok(()) => {
            ctx.coordinator
                .commit()
                .await
                .context("failed to commit datastore changes")?;
            Ok(())
        }
        Err(error) => {
            ctx.coordinator.release().await;
            Err(error)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RESDEEDS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
