//! Focustick - A Pomodoro countdown timer
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused work
//! - 5 minutes of short break
//! - 15 minutes of long break after 4 focus periods
//!
//! The timer runs as a foreground daemon (`focustick serve`); the other
//! subcommands control it over a Unix socket.

use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::sync::Mutex;

use focustick::cli::{Cli, Commands, Display, IpcClient, ServeArgs};
use focustick::daemon::{default_socket_path, IpcServer, RequestHandler, TickDriver};
use focustick::engine::TimerEngine;
use focustick::notify::TerminalNotifier;
use focustick::sound::custom_sound;
use focustick::types::TimerConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Serve(args)) => {
            run_daemon(args).await?;
        }
        Some(Commands::Start) => {
            let client = IpcClient::new()?;
            let response = client.start().await?;
            Display::show_start_success(&response);
        }
        Some(Commands::Pause) => {
            let client = IpcClient::new()?;
            let response = client.pause().await?;
            Display::show_pause_success(&response);
        }
        Some(Commands::Reset) => {
            let client = IpcClient::new()?;
            let response = client.reset().await?;
            Display::show_reset_success(&response);
        }
        Some(Commands::Switch { mode }) => {
            let client = IpcClient::new()?;
            let response = client.switch(mode).await?;
            Display::show_switch_success(&response);
        }
        Some(Commands::Set(args)) => {
            let client = IpcClient::new()?;
            let response = client.set(&args).await?;
            Display::show_set_success(&response);
        }
        Some(Commands::Status) => {
            let client = IpcClient::new()?;
            let response = client.status().await?;
            Display::show_status(&response);
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the timer daemon in the foreground.
async fn run_daemon(args: ServeArgs) -> Result<()> {
    // Initial configuration: CLI overrides on top of the defaults
    let config = args.config.to_params().apply_to(&TimerConfig::default());

    // Notification adapter: terminal title plus an optional chime thread
    let mut notifier = TerminalNotifier::new("focustick");
    if let Some(path) = &args.sound_file {
        notifier = notifier.with_chime(custom_sound(path));
    }
    if !args.silent {
        notifier = notifier.with_audio();
    }

    let engine = TimerEngine::new(config, Arc::new(notifier))?;
    let engine = Arc::new(Mutex::new(engine));

    // The 1 Hz scheduler lives outside the engine
    tokio::spawn(TickDriver::new(engine.clone()).run());

    let socket_path = match args.socket {
        Some(path) => path,
        None => default_socket_path()?,
    };
    let server = IpcServer::new(&socket_path)?;
    let handler = RequestHandler::new(engine);

    println!("Focustick daemonを起動しました（Ctrl-Cで終了）");
    println!("ソケット: {}", server.socket_path().display());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Daemonを終了します");
                break;
            }
            conn = server.accept() => {
                match conn {
                    Ok(mut stream) => match IpcServer::receive_request(&mut stream).await {
                        Ok(request) => {
                            let response = handler.handle(request).await;
                            if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                                tracing::warn!("レスポンスの送信に失敗しました: {}", e);
                            }
                        }
                        Err(e) => tracing::warn!("リクエストの受信に失敗しました: {}", e),
                    },
                    Err(e) => tracing::warn!("接続の受け付けに失敗しました: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
