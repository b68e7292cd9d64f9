mod chat;
mod cli;
mod visualize;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use evergreen_ai::prompts::VISUALIZER_PRESETS;
use evergreen_ai::{ChatSession, GeminiClient, GeminiConfig, GenerationClient, VisualizationSession};
use evergreen_common::{ConfigError, EvergreenError};
use evergreen_config::{validation, EvergreenConfig};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use cli::Command;

const DEFAULT_LOG_DIRECTIVE: &str = "evergreen=info";

/// Parse a full `EnvFilter` directive list, e.g. `evergreen=debug,reqwest=warn`.
fn parse_filter(directives: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(directives)
}

/// `RUST_LOG` wins when set; otherwise the CLI/config directives apply.
fn init_logging(directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| parse_filter(directives))
        .unwrap_or_else(|e| {
            eprintln!("invalid log filter {directives:?} ({e}), using {DEFAULT_LOG_DIRECTIVE}");
            EnvFilter::new(DEFAULT_LOG_DIRECTIVE)
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EvergreenConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = evergreen_config::toml_loader::load_from_path(path)?;
            validation::validate(&config)?;
            Ok(config)
        }
        None => evergreen_config::load_config(),
    }
}

fn build_client(config: &EvergreenConfig) -> Result<Arc<dyn GenerationClient>, EvergreenError> {
    let api_key = config.ai.resolve_api_key();
    if api_key.is_none() {
        tracing::warn!(
            "no API key in ${} or $GEMINI_API_KEY; requests will fail",
            config.ai.api_key_env
        );
    }
    let client = GeminiClient::new(GeminiConfig::from_ai_config(&config.ai, api_key))
        .map_err(|e| EvergreenError::Ai(e.to_string()))?;
    Ok(Arc::new(client))
}

async fn run(command: Command, client: Arc<dyn GenerationClient>) -> Result<(), EvergreenError> {
    let mut stdout = std::io::stdout();
    match command {
        Command::Chat => {
            let session = ChatSession::new(client);
            tracing::info!(session = %session.session_id(), "chat started");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat::run(&session, stdin, &mut stdout).await?;
        }
        Command::Visualize {
            description,
            preset,
            out,
        } => {
            let description = visualize::resolve_description(description, preset)?;
            let session = VisualizationSession::new(client);
            visualize::run(&session, &description, &out, &mut stdout).await?;
        }
        Command::Presets => {
            for (i, preset) in VISUALIZER_PRESETS.iter().enumerate() {
                println!("{}. {preset}", i + 1);
            }
        }
    }
    Ok(())
}

async fn run_app(args: cli::Args, dotenv: Option<PathBuf>) -> Result<(), EvergreenError> {
    let config = load_config(args.config.as_deref());
    let log_directive = args
        .log_level
        .clone()
        .or_else(|| config.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_DIRECTIVE.to_string());
    init_logging(&log_directive);

    tracing::info!("EverGreen v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let config = config.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        EvergreenConfig::default()
    });
    tracing::debug!(ai = ?config.ai, "config loaded");

    let client = build_client(&config)?;
    run(args.command, client).await
}

fn main() -> ExitCode {
    // Environment is mutated only here, before any runtime thread exists.
    let dotenv = dotenvy::dotenv().ok();

    let args = cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run_app(args, dotenv)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_target_filter_parses() {
        let filter = parse_filter("evergreen=debug,reqwest=warn").unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("evergreen=debug"));
        assert!(rendered.contains("reqwest=warn"));
    }

    #[test]
    fn default_directive_parses() {
        assert!(parse_filter(DEFAULT_LOG_DIRECTIVE).is_ok());
        assert!(parse_filter("debug").is_ok());
    }

    #[test]
    fn bad_level_is_rejected() {
        assert!(parse_filter("evergreen=loud").is_err());
    }
}
