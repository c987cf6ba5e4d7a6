// File: src/bin/eventdesk.rs
use anyhow::{Context, Result};
use clap::Parser;
use eventdesk::app::App;
use eventdesk::cli::{self, Cli};
use eventdesk::client::EventsClient;
use eventdesk::config::Config;
use eventdesk::logging;
use eventdesk::paths::AppPaths;
use eventdesk::runtime::Runtime;
use eventdesk::session::SessionStore;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if args.command.is_some() {
        logging::init_stderr();
    } else {
        logging::init_file(&AppPaths::log_file()?)?;
    }

    let config_path = AppPaths::config_file()?;
    let mut config = Config::load_from(&config_path)?;
    if let Some(url) = args.url {
        config.url = url;
    }
    config.allow_insecure_certs |= args.insecure;

    let mut client = EventsClient::new(
        &config.url,
        config.allow_insecure_certs,
        Duration::from_secs(config.timeout_secs),
    )
    .with_context(|| format!("Cannot use server {}", config.url))?;
    if config.remember_session {
        client = client.with_session_store(SessionStore::new(AppPaths::session_file()?));
    }
    log::info!("Using events server {}", client.base_url());

    let runtime = Runtime::new(client).with_config_path(config_path);
    let mut app = App::new(&config.username);

    match args.command {
        Some(command) => cli::run(&runtime, &mut app, command).await,
        None => run_tui(runtime, app).await,
    }
}

#[cfg(feature = "tui")]
async fn run_tui(runtime: Runtime, app: App) -> Result<()> {
    eventdesk::tui::run(runtime, app).await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_runtime: Runtime, _app: App) -> Result<()> {
    anyhow::bail!("Built without the terminal UI; pass a subcommand (see --help)")
}
