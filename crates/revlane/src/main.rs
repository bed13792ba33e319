use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use revlane::cli::{execute, Cli, Report};
use revlane::config::Config;
use revlane::env::RealEnv;
use revlane::output::{render_page, OutputDestination};
use revlane::Session;
use revlane_dispatch::{DispatchError, HttpFetcher};
use revlane_render::Renderer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("revlane=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(&RealEnv, &cli.overrides())?;
    tracing::debug!(base_url = config.base_url.as_str(), "configuration loaded");

    let registry = config
        .template_registry()
        .context("failed to load templates")?;
    let fetcher = HttpFetcher::new(config.timeout()).context("failed to build HTTP client")?;
    let mut session = Session::new(Renderer::new(registry), config.resolver()?, fetcher);

    let report = match execute(&mut session, &cli.command, &cli.then).await {
        Ok(report) => report,
        Err(err @ DispatchError::UnclassifiedRawId(_)) => {
            eprintln!("ERROR: {}", err);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let destination = match &cli.out {
        Some(path) => OutputDestination::File(path.clone()),
        None => OutputDestination::Stdout,
    };
    let content = match report {
        Report::Raw(url) => url,
        Report::Page => render_page(session.lanes(), config.output)?,
    };
    destination
        .write_text(&content)
        .context("failed to write output")?;
    Ok(ExitCode::SUCCESS)
}
