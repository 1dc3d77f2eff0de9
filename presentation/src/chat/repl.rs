//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::ResponseSpinner;
use crate::StreamPrinter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use twin_application::{
    ChatGateway, CheckStatusUseCase, SendMessageUseCase, SendOutcome, StreamMessageUseCase,
    TranscriptLogger,
};
use twin_domain::Conversation;

/// Interactive chat REPL
pub struct ChatRepl {
    send: SendMessageUseCase,
    stream: StreamMessageUseCase,
    status: CheckStatusUseCase,
    streaming: bool,
    show_spinner: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self {
            send: SendMessageUseCase::new(gateway.clone()),
            stream: StreamMessageUseCase::new(gateway.clone()),
            status: CheckStatusUseCase::new(gateway),
            streaming: true,
            show_spinner: true,
            history_file: None,
        }
    }

    /// Set whether replies stream token by token
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Set whether to show a spinner during non-streaming replies
    pub fn with_spinner(mut self, show: bool) -> Self {
        self.show_spinner = show;
        self
    }

    /// Override the default history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Log the session to a transcript
    pub fn with_transcript_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.send = self.send.with_transcript_logger(logger.clone());
        self.stream = self.stream.with_transcript_logger(logger);
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("twin-chat").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome().await;

        let mut conversation = Conversation::new();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line, &mut conversation).await {
                            break;
                        }
                        continue;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_message(&mut conversation, line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn print_welcome(&self) {
        let health = self.status.execute().await;

        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            twin-chat - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Backend: {}", ConsoleFormatter::status_badge(&health));
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /status   - Check backend status");
        println!("  /stream   - Toggle streaming replies");
        println!("  /clear    - Clear the conversation");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&mut self, cmd: &str, conversation: &mut Conversation) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /status          - Check backend status");
                println!("  /stream          - Toggle streaming replies");
                println!("  /clear           - Clear the conversation");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/status" => {
                let health = self.status.execute().await;
                println!();
                println!("Backend: {}", ConsoleFormatter::status_badge(&health));
                if health.is_online() {
                    match self.status.health().await {
                        Ok(probe) => println!("Health:  {}", probe),
                        Err(e) => println!("Health:  {}", e),
                    }
                }
                println!();
                false
            }
            "/stream" => {
                self.streaming = !self.streaming;
                println!(
                    "Streaming replies: {}",
                    if self.streaming { "on" } else { "off" }
                );
                false
            }
            "/clear" => {
                conversation.clear();
                println!("Conversation cleared");
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, conversation: &mut Conversation, message: &str) {
        println!();
        if self.streaming {
            self.process_streaming(conversation, message).await;
        } else {
            self.process_blocking(conversation, message).await;
        }
        println!();
    }

    async fn process_streaming(&self, conversation: &mut Conversation, message: &str) {
        let printer = StreamPrinter::new();
        let cancellation = CancellationToken::new();

        // Ctrl-C aborts the reply, not the session. The terminal is not in
        // raw mode while a reply streams, so the signal arrives here rather
        // than through the line editor.
        let guard = cancellation.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                guard.cancel();
            }
        });

        let result = self
            .stream
            .execute(conversation, message, &printer, &cancellation)
            .await;
        ctrl_c.abort();
        printer.finish();

        match result {
            Ok(_) => {
                // A Failed outcome was already rendered by the printer's
                // error callback
            }
            Err(e) if e.is_cancelled() => {
                println!();
                println!("{}", "(cancelled)".dimmed());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    async fn process_blocking(&self, conversation: &mut Conversation, message: &str) {
        let spinner = self.show_spinner.then(ResponseSpinner::start);

        // Ctrl-C abandons the wait; the backend reply is discarded
        let result = tokio::select! {
            result = self.send.execute(conversation, message) => Some(result),
            _ = tokio::signal::ctrl_c() => None,
        };

        if let Some(spinner) = spinner {
            spinner.finish();
        }

        match result {
            Some(Ok(output)) => match output.outcome {
                SendOutcome::Replied(text) => println!("{}", text),
                SendOutcome::Failed(e) => eprintln!("{}", ConsoleFormatter::error_line(&e)),
            },
            Some(Err(e)) => eprintln!("Error: {}", e),
            None => println!("{}", "(cancelled)".dimmed()),
        }
    }
}
