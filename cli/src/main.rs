//! CLI entrypoint for wolf
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use wolf_application::{
    AgentProgressNotifier, ConfirmationPort, ConversationLogger, RunAgentInput, RunAgentUseCase,
    ToolExecutor,
};
use wolf_domain::{Provider, RiskPolicy};
use wolf_infrastructure::{
    ConfigLoader, FileConfig, FileLoggingConfig, FunctionSchemaConverter, JsonlConversationLogger,
    build_gateway, default_catalog,
};
use wolf_presentation::{
    Cli, ConsoleFormatter, ConsoleProgress, ProgressLevel, TerminalConfirmation,
};

/// Exit code for a run interrupted with Ctrl+C
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    if let Some(provider) = cli.provider {
        config.provider.kind = provider.to_string();
    }

    let _log_guard = init_logging(cli.verbose, &config.logging);
    info!("Starting wolf");

    if cli.show_config {
        show_config(&cli, &config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("{}", ConsoleFormatter::config_issues(&issues));
    }

    let catalog = Arc::new(default_catalog()?);
    if cli.list_tools {
        println!("{}", ConsoleFormatter::tools_table(&catalog));
        return Ok(ExitCode::SUCCESS);
    }

    let Some(prompt) = cli.prompt_text() else {
        println!("{}", ConsoleFormatter::usage());
        return Ok(ExitCode::FAILURE);
    };

    // === Policy ===
    let trust_level = cli
        .trust_override()
        .unwrap_or_else(|| config.permissions.parse_trust_level().0);
    let rules = config
        .permissions
        .command_rules()
        .context("Invalid command pattern in [permissions]")?;
    let policy = Arc::new(RiskPolicy::new(trust_level, rules));
    info!(trust_level = %trust_level, "Risk policy ready");

    let timeout = config
        .permissions
        .confirmation_timeout_sec
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    let confirmation: Arc<dyn ConfirmationPort> =
        Arc::new(TerminalConfirmation::new().with_timeout(timeout));

    // === Dependency Injection ===
    let provider = config.provider.parse_kind().0;
    let gateway = build_gateway(&config.provider);
    let executor = Arc::new(ToolExecutor::new(catalog, policy, confirmation));

    let level = if cli.quiet {
        ProgressLevel::Quiet
    } else if cli.verbose > 0 {
        ProgressLevel::Verbose
    } else {
        ProgressLevel::Normal
    };
    let progress: Arc<dyn AgentProgressNotifier> = Arc::new(ConsoleProgress::new(level));

    let cancellation = CancellationToken::new();
    spawn_interrupt_listener(cancellation.clone());

    let mut use_case =
        RunAgentUseCase::new(gateway, executor, Arc::new(FunctionSchemaConverter))
            .with_progress(progress)
            .with_cancellation(cancellation);
    if let Some(logger) = open_conversation_log(&config.logging) {
        use_case = use_case.with_conversation_logger(logger);
    }

    // === Run ===
    let model = select_model(&cli, &config, provider);
    let mut params = config.agent.to_execution_params(model.clone());
    if let Some(max) = cli.max_iterations {
        params = params.with_max_tool_iterations(max);
    }

    if !cli.quiet {
        println!("{}", ConsoleFormatter::header(provider, &model));
    }

    let input = RunAgentInput::new(prompt).with_images(cli.image_paths());
    let output = use_case.execute(input, &params).await;

    if output.ok {
        println!("{}", ConsoleFormatter::answer(output.text.as_deref()));
        Ok(ExitCode::SUCCESS)
    } else if output.is_cancelled() {
        eprintln!("{}", ConsoleFormatter::interrupted());
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        let message = output
            .error_message()
            .unwrap_or_else(|| "Run failed".to_string());
        eprintln!("{}", ConsoleFormatter::error(&message));
        Ok(ExitCode::FAILURE)
    }
}

/// `--model`, else the vision model when images are attached, else the provider's model
fn select_model(cli: &Cli, config: &FileConfig, provider: Provider) -> String {
    if let Some(model) = &cli.model {
        return model.clone();
    }
    if !cli.images.is_empty()
        && let Some(vision) = config.provider.vision_model.as_ref().filter(|m| !m.is_empty())
    {
        return vision.clone();
    }
    config.provider.model_for(provider).to_string()
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.no_config {
        println!("Configuration sources: built-in defaults only (--no-config)");
    } else {
        for source in ConfigLoader::describe_sources() {
            println!("{}", source);
        }
        if let Some(path) = &cli.config {
            println!("  [FOUND] Explicit: {}", path.display());
        }
    }
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml().context("Failed to render configuration")?);
    Ok(())
}

/// Initialize logging: stderr by verbosity, plus the log file when enabled.
///
/// The returned guard flushes the file writer when dropped.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let stderr_filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let (file_layer, guard) = if logging.enabled {
        let path = logging.log_file.as_path();
        let directory = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "wolf-cli.log".into());
        let appender = tracing_appender::rolling::never(directory, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let file_level = if verbose < 2 { "info" } else { level };
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(EnvFilter::new(file_level));
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn open_conversation_log(logging: &FileLoggingConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = logging.conversation_log.as_ref()?;
    match JsonlConversationLogger::open(path) {
        Ok(logger) => {
            info!(path = %path.display(), session = logger.session(), "Conversation log enabled");
            Some(Arc::new(logger))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot open conversation log");
            None
        }
    }
}

/// Cancel the run on Ctrl+C
fn spawn_interrupt_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, cancelling");
            token.cancel();
        }
    });
}
