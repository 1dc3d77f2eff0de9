//! CLI entrypoint for twin-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use twin_application::{
    ChatGateway, SendMessageUseCase, SendOutcome, StreamMessageUseCase, StreamOutcome,
    TranscriptLogger,
};
use twin_domain::Conversation;
use twin_infrastructure::{ConfigLoader, FileConfig, HttpChatGateway, JsonlTranscriptLogger};
use twin_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormat, ResponseSpinner, StreamPrinter,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show config file locations and exit
    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let interactive = cli.chat || cli.message.is_none();
    let _guard = init_tracing(cli.verbose, interactive);

    info!("Starting twin-chat");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // === Dependency Injection ===
    // Infrastructure adapter for the digital twin backend
    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.backend.base_url.clone());
    let gateway: Arc<dyn ChatGateway> = Arc::new(HttpChatGateway::new(
        base_url,
        config.backend.connect_timeout(),
    ));

    let transcript = transcript_logger(&config);
    let streaming = cli.streaming().unwrap_or(config.repl.streaming);

    // Chat mode (explicit --chat, or no message given)
    if interactive {
        let mut repl = ChatRepl::new(gateway)
            .with_streaming(streaming)
            .with_spinner(config.repl.show_spinner && !cli.quiet)
            .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from));
        if let Some(logger) = transcript {
            repl = repl.with_transcript_logger(logger);
        }

        repl.run().await?;
        return Ok(());
    }

    let Some(message) = cli.message.as_deref() else {
        // The chat branch above handles a missing message
        return Ok(());
    };

    let mut conversation = Conversation::new();

    match cli.output {
        OutputFormat::Json => {
            let mut use_case = SendMessageUseCase::new(gateway);
            if let Some(logger) = transcript {
                use_case = use_case.with_transcript_logger(logger);
            }

            let output = use_case.execute(&mut conversation, message).await?;
            match output.outcome {
                SendOutcome::Replied(reply) => {
                    println!("{}", ConsoleFormatter::reply_json(message, &reply, false));
                }
                SendOutcome::Failed(e) => bail!("{e}"),
            }
        }
        OutputFormat::Text if streaming => {
            let mut use_case = StreamMessageUseCase::new(gateway);
            if let Some(logger) = transcript {
                use_case = use_case.with_transcript_logger(logger);
            }

            let printer = StreamPrinter::new();
            let cancellation = CancellationToken::new();

            // Ctrl-C aborts the transfer; whatever streamed so far stays on
            // the terminal
            let guard = cancellation.clone();
            let ctrl_c = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    guard.cancel();
                }
            });

            let result = use_case
                .execute(&mut conversation, message, &printer, &cancellation)
                .await;
            ctrl_c.abort();
            printer.finish();

            match result {
                Ok(output) => {
                    if matches!(output.outcome, StreamOutcome::Failed(_)) {
                        // The printer already reported the backend's message
                        bail!("generation failed");
                    }
                }
                Err(e) if e.is_cancelled() => {
                    println!();
                }
                Err(e) => return Err(e.into()),
            }
        }
        OutputFormat::Text => {
            let mut use_case = SendMessageUseCase::new(gateway);
            if let Some(logger) = transcript {
                use_case = use_case.with_transcript_logger(logger);
            }

            let spinner = (config.repl.show_spinner && !cli.quiet).then(ResponseSpinner::start);
            let result = use_case.execute(&mut conversation, message).await;
            if let Some(spinner) = spinner {
                spinner.finish();
            }

            match result?.outcome {
                SendOutcome::Replied(reply) => println!("{}", reply),
                SendOutcome::Failed(e) => bail!("{e}"),
            }
        }
    }

    Ok(())
}

/// Initialize tracing based on verbosity level.
///
/// Interactive sessions route tracing to a daily-rolling file under the
/// user data dir so log lines never interleave with the prompt; the guard
/// must stay alive for the non-blocking writer to flush.
fn init_tracing(
    verbose: u8,
    interactive: bool,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    if interactive {
        if let Some(dir) = dirs::data_dir().map(|d| d.join("twin-chat").join("logs")) {
            let appender = tracing_appender::rolling::daily(dir, "twin-chat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            return Some(guard);
        }
    }

    // Keep stdout clean for replies; one-shot output may be piped
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    None
}

/// Build the transcript logger when `[log] transcript` is enabled.
fn transcript_logger(config: &FileConfig) -> Option<Arc<dyn TranscriptLogger>> {
    if !config.log.transcript {
        return None;
    }

    let path = config
        .log
        .transcript_file
        .as_ref()
        .map(PathBuf::from)
        .or_else(JsonlTranscriptLogger::default_path)?;

    let logger = JsonlTranscriptLogger::new(&path)?;
    info!("Transcript: {}", logger.path().display());
    Some(Arc::new(logger))
}
