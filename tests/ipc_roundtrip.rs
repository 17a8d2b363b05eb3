//! Integration tests for daemon-CLI IPC communication.
//!
//! These tests wire a real `IpcClient` to a real `IpcServer` over a
//! temporary Unix socket, with the request handler driving an actual
//! engine. Time is advanced by ticking the engine directly; the 1 Hz
//! driver is not involved.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use focustick::cli::client::IpcClient;
use focustick::cli::commands::ConfigArgs;
use focustick::daemon::ipc::{IpcServer, RequestHandler};
use focustick::engine::TimerEngine;
use focustick::notify::MockNotificationPort;
use focustick::types::{TimerConfig, TimerMode};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a temporary socket path for testing.
fn create_temp_socket_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roundtrip_test.sock");
    // Keep the directory so it's not deleted
    std::mem::forget(dir);
    path
}

/// Creates a shared engine with the given configuration.
fn create_engine(config: TimerConfig) -> Arc<Mutex<TimerEngine>> {
    let port = Arc::new(MockNotificationPort::new());
    let engine = TimerEngine::new(config, port).unwrap();
    Arc::new(Mutex::new(engine))
}

/// Runs request-response cycles on the server until aborted.
async fn serve_requests(server: Arc<IpcServer>, handler: Arc<RequestHandler>) {
    loop {
        if let Ok(mut stream) = server.accept().await {
            if let Ok(request) = IpcServer::receive_request(&mut stream).await {
                let response = handler.handle(request).await;
                let _ = IpcServer::send_response(&mut stream, &response).await;
            }
        }
    }
}

/// Spawns a serving loop and returns the client plus the join handle.
fn start_server(
    engine: Arc<Mutex<TimerEngine>>,
) -> (IpcClient, tokio::task::JoinHandle<()>) {
    let socket_path = create_temp_socket_path();
    let server = Arc::new(IpcServer::new(&socket_path).unwrap());
    let handler = Arc::new(RequestHandler::new(engine));

    let handle = tokio::spawn(serve_requests(server, handler));
    (IpcClient::with_socket_path(socket_path), handle)
}

// ============================================================================
// Command Round-trips
// ============================================================================

#[tokio::test]
async fn start_command_starts_the_countdown() {
    let engine = create_engine(TimerConfig::default());
    let (client, server) = start_server(engine.clone());

    let response = client.start().await.unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.message, "タイマーを開始しました");

    let data = response.data.unwrap();
    assert_eq!(data.mode, Some("focus".to_string()));
    assert_eq!(data.remaining_seconds, Some(25 * 60));
    assert_eq!(data.running, Some(true));

    assert!(engine.lock().await.snapshot().is_running);
    server.abort();
}

#[tokio::test]
async fn pause_and_resume_roundtrip() {
    let engine = create_engine(TimerConfig::default());
    let (client, server) = start_server(engine.clone());

    client.start().await.unwrap();

    // Let some time pass
    for _ in 0..100 {
        engine.lock().await.tick();
    }

    let response = client.pause().await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.running, Some(false));
    assert_eq!(data.remaining_seconds, Some(25 * 60 - 100));

    // start() resumes from where pause left off
    let response = client.start().await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.running, Some(true));
    assert_eq!(data.remaining_seconds, Some(25 * 60 - 100));

    server.abort();
}

#[tokio::test]
async fn reset_restores_full_duration() {
    let engine = create_engine(TimerConfig::default());
    let (client, server) = start_server(engine.clone());

    client.start().await.unwrap();
    for _ in 0..500 {
        engine.lock().await.tick();
    }

    let response = client.reset().await.unwrap();

    let data = response.data.unwrap();
    assert_eq!(data.remaining_seconds, Some(25 * 60));
    assert_eq!(data.running, Some(false));
    assert_eq!(data.mode, Some("focus".to_string()));

    server.abort();
}

#[tokio::test]
async fn switch_roundtrip_resets_in_cycle_counter() {
    let config = TimerConfig {
        focus_minutes: 1,
        auto_advance: true,
        ..TimerConfig::default()
    };
    let engine = create_engine(config);
    let (client, server) = start_server(engine.clone());

    client.start().await.unwrap();

    // Complete one focus period; the engine lands in the short break
    for _ in 0..60 {
        engine.lock().await.tick();
    }

    let status = client.status().await.unwrap();
    let data = status.data.unwrap();
    assert_eq!(data.mode, Some("short_break".to_string()));
    assert_eq!(data.focus_units_completed, Some(1));

    // Bail out of the break back into focus
    let response = client.switch(TimerMode::Focus).await.unwrap();

    let data = response.data.unwrap();
    assert_eq!(data.mode, Some("focus".to_string()));
    assert_eq!(data.focus_units_completed, Some(0));
    assert_eq!(data.cycles_completed, Some(0));
    assert_eq!(data.running, Some(false));

    server.abort();
}

#[tokio::test]
async fn configure_roundtrip_applies_patch() {
    let engine = create_engine(TimerConfig::default());
    let (client, server) = start_server(engine.clone());

    let args = ConfigArgs {
        focus: Some(50),
        auto_advance: Some(true),
        ..ConfigArgs::default()
    };
    let response = client.set(&args).await.unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.message, "設定を更新しました");

    // Active focus duration changed, so remaining time was reinstalled
    let data = response.data.unwrap();
    assert_eq!(data.remaining_seconds, Some(50 * 60));

    let engine_guard = engine.lock().await;
    assert_eq!(engine_guard.config().focus_minutes, 50);
    assert!(engine_guard.config().auto_advance);
    // Unpatched fields kept their previous values
    assert_eq!(engine_guard.config().short_break_minutes, 5);

    server.abort();
}

#[tokio::test]
async fn configure_rejection_surfaces_as_client_error() {
    let config = TimerConfig {
        // Start from a tight cycle so the rejected patch is distinguishable
        focus_units_per_cycle: 2,
        ..TimerConfig::default()
    };
    let engine = create_engine(config);
    let (client, server) = start_server(engine.clone());

    // 31 is past the short-break bound; built directly, bypassing the
    // clap-side range check, so the engine's own validation must catch it
    let bad = ConfigArgs {
        short_break: Some(31),
        ..ConfigArgs::default()
    };
    let result = client.set(&bad).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("1-30分"));

    // Engine config is untouched
    assert_eq!(engine.lock().await.config().short_break_minutes, 5);
    assert_eq!(engine.lock().await.config().focus_units_per_cycle, 2);

    server.abort();
}

#[tokio::test]
async fn status_reflects_live_countdown() {
    let engine = create_engine(TimerConfig::default());
    let (client, server) = start_server(engine.clone());

    client.start().await.unwrap();

    for _ in 0..60 {
        engine.lock().await.tick();
    }

    let response = client.status().await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.remaining_seconds, Some(25 * 60 - 60));
    assert_eq!(data.running, Some(true));

    let progress = data.progress.unwrap();
    assert!(progress > 0.0 && progress < 1.0);

    server.abort();
}

// ============================================================================
// Workflow Tests
// ============================================================================

#[tokio::test]
async fn full_session_workflow() {
    let config = TimerConfig {
        focus_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        focus_units_per_cycle: 2,
        auto_advance: true,
        ..TimerConfig::default()
    };
    let engine = create_engine(config);
    let (client, server) = start_server(engine.clone());

    client.start().await.unwrap();

    // One full cycle: focus, short break, focus, long break
    for _ in 0..(4 * 60) {
        engine.lock().await.tick();
    }

    let response = client.status().await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.mode, Some("focus".to_string()));
    assert_eq!(data.cycles_completed, Some(1));
    assert_eq!(data.focus_units_completed, Some(0));

    server.abort();
}

#[tokio::test]
async fn connection_refused_without_daemon() {
    let client = IpcClient::with_socket_path(create_temp_socket_path());

    let result = client.status().await;

    assert!(result.is_err());
}
