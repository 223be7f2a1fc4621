//! Catalog router demo.
//!
//! Drives the catalog app through a scripted browsing session on an
//! in-memory history and prints what each step renders.
//!
//! ```text
//! catalog-router /products/3 '?sort=price_desc' back forward --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;

use catalog_router::catalog::{CatalogApp, ProductStore, Step};
use catalog_router::config::{load_config, DeployMode, RouterConfig};
use catalog_router::history::MemoryHistory;
use catalog_router::observability::logging;
use catalog_router::routing::Router;

#[derive(Parser)]
#[command(name = "catalog-router")]
#[command(about = "Scripted browsing session against the catalog router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve under the production base path regardless of config.
    #[arg(long)]
    production: bool,

    /// Print the route state as JSON after each step.
    #[arg(long)]
    json: bool,

    /// Steps: a path (`/products/3`), a query patch (`?page=2&sort=`),
    /// `back`, `forward` or `go:<delta>`.
    steps: Vec<Step>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RouterConfig::default(),
    };
    if cli.production {
        config.deployment.mode = DeployMode::Production;
    }

    if let Err(e) = logging::init_logging(&config.observability.log_level) {
        eprintln!("warning: logging not initialized: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let local = tokio::task::LocalSet::new();
    match local.block_on(&runtime, run(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: RouterConfig) -> Result<(), Box<dyn std::error::Error>> {
    let deployment = &config.deployment;
    let base = deployment.effective_base();
    let history = MemoryHistory::new(&deployment.origin, &base.prepend(&deployment.initial_path))?;

    let router = Rc::new(Router::from_config(&config, history));
    let app = CatalogApp::new(Rc::clone(&router), Rc::new(ProductStore::sample()))?;

    tracing::info!(
        mode = ?deployment.mode,
        base = %base,
        routes = ?router.patterns(),
        "Catalog app initialized"
    );

    router.start()?;
    app.settle().await;
    report(&app, "start", cli.json)?;

    for step in &cli.steps {
        // Navigation failures are already logged; keep going like a browser would.
        let _ = app.apply(step);
        app.settle().await;
        report(&app, &format!("{step:?}"), cli.json)?;
    }

    Ok(())
}

fn report(app: &CatalogApp<MemoryHistory>, label: &str, json: bool) -> Result<(), serde_json::Error> {
    let summary = app.summary();
    println!("== {label} -> {}", summary.url);
    println!("{}", app.screen().html);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
