use browser_verify::{
    Config,
    scenario::{self, Orchestrator},
    session::{BrowserKind, SessionFactory},
};
use clap::Parser;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(
    name = "browser-verify",
    about = "Browser-driven UI verification harness",
    version
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "browser-verify.toml")]
    config: PathBuf,

    /// Scenario to run
    #[arg(
        short,
        long,
        default_value = "home",
        value_parser = clap::builder::PossibleValuesParser::new(scenario::SCENARIOS.iter().copied())
    )]
    scenario: String,

    /// Key into [targets] for the start URL
    #[arg(short, long, default_value = "home")]
    target: String,

    /// Browser kind override (chrome, firefox, edge)
    #[arg(short, long)]
    browser: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        for suggestion in e.suggestions() {
            eprintln!("  hint: {}", suggestion);
        }
        process::exit(e.exit_code());
    }
}

async fn run(cli: &Cli) -> browser_verify::Result<()> {
    let config = Config::load(&cli.config)?;

    let kind: BrowserKind = cli
        .browser
        .as_deref()
        .unwrap_or(&config.browser.kind)
        .parse()?;
    let start_url = config.target(&cli.target)?;

    let session = SessionFactory::create(kind, start_url, &config.browser).await?;
    let orchestrator = Orchestrator::new(
        session,
        config.wait_config(),
        config.retry.max_attempts,
    );

    // Teardown runs on both paths; the scenario result wins over a
    // teardown error so verification failures are never masked.
    let result = scenario::run_scenario(&orchestrator, &config, &cli.scenario).await;
    let teardown = orchestrator.teardown().await;

    match (result, teardown) {
        (Ok(()), teardown) => teardown,
        (Err(e), Err(td)) => {
            tracing::warn!("Teardown also failed: {}", td);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("debug").add_directive("chromiumoxide=info".parse().unwrap())
    } else {
        EnvFilter::from_default_env()
            .add_directive("info".parse().unwrap())
            .add_directive("chromiumoxide=off".parse().unwrap())
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
