mod chat_loop;
mod cli;
mod dotenv;
mod setup;

use std::process::ExitCode;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Load .env file before anything else
    let dotenv_file = dotenv::load();

    let args = cli::parse();

    // Config is read before logging so its level can seed the filter;
    // a failure is reported once the subscriber is up.
    let loaded = setup::load_config(args.config.as_deref());
    let config_level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();

    let log_directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("serenity={}", config_level.as_filter_str()));
    let directive = log_directive
        .parse::<Directive>()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Serenity v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = dotenv_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        serenity_config::SerenityConfig::default()
    });
    setup::apply_overrides(&mut config, &args);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        let manager = setup::build_manager(&config)?;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        chat_loop::run(&manager, &config.chat.greeting, stdin, &mut stdout).await?;
        Ok::<(), serenity_common::SerenityError>(())
    });

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
