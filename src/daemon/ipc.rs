//! IPC server for the Focustick daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for timer commands
//! - Integration with the countdown engine for command execution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::engine::TimerEngine;
use crate::types::{ConfigParams, IpcRequest, IpcResponse, ResponseData, TimerMode};

// ============================================================================
// Constants
// ============================================================================

/// Socket directory under the user's home
pub const DEFAULT_SOCKET_DIR: &str = ".focustick";

/// Socket file name
pub const DEFAULT_SOCKET_FILE: &str = "focustick.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

/// Returns the default socket path under the user's home directory.
///
/// # Errors
///
/// Returns an error if `HOME` is not set.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME環境変数が設定されていません")?;
    Ok(PathBuf::from(home)
        .join(DEFAULT_SOCKET_DIR)
        .join(DEFAULT_SOCKET_FILE))
}

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Socket binding error
    #[error("Failed to bind socket: {0}")]
    BindError(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Write error
    #[error("Failed to write response: {0}")]
    WriteError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        // Remove existing socket file if present
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        // Clean up socket file on drop
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the countdown engine.
pub struct RequestHandler {
    /// Shared reference to the engine
    engine: Arc<Mutex<TimerEngine>>,
}

impl RequestHandler {
    /// Creates a new request handler with the given engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Switch { mode } => self.handle_switch(mode).await,
            IpcRequest::Configure { params } => self.handle_configure(params).await,
            IpcRequest::Status => self.handle_status().await,
        }
    }

    /// Projects the engine state into response data.
    fn snapshot_data(engine: &TimerEngine) -> ResponseData {
        ResponseData::from_snapshot(&engine.snapshot(), engine.config().display_style)
    }

    /// Handles the start command.
    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        let was_running = engine.snapshot().is_running;

        engine.start();

        let message = if was_running {
            "タイマーは既に実行中です"
        } else {
            "タイマーを開始しました"
        };
        IpcResponse::success(message, Some(Self::snapshot_data(&engine)))
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        let was_running = engine.snapshot().is_running;

        engine.pause();

        let message = if was_running {
            "タイマーを一時停止しました"
        } else {
            "タイマーは実行されていません"
        };
        IpcResponse::success(message, Some(Self::snapshot_data(&engine)))
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        engine.reset();

        IpcResponse::success(
            "タイマーをリセットしました",
            Some(Self::snapshot_data(&engine)),
        )
    }

    /// Handles the switch command.
    async fn handle_switch(&self, mode: TimerMode) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        engine.switch_mode(mode);

        IpcResponse::success(
            format!("モードを切り替えました: {}", mode.as_str()),
            Some(Self::snapshot_data(&engine)),
        )
    }

    /// Handles the configure command.
    async fn handle_configure(&self, params: ConfigParams) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if params.is_empty() {
            return IpcResponse::success(
                "設定に変更はありません",
                Some(Self::snapshot_data(&engine)),
            );
        }

        let merged = params.apply_to(engine.config());
        match engine.apply_config(merged) {
            Ok(()) => IpcResponse::success(
                "設定を更新しました",
                Some(Self::snapshot_data(&engine)),
            ),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }

    /// Handles the status command.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        IpcResponse::success("", Some(Self::snapshot_data(&engine)))
    }
}

// ============================================================================
// Tests
// ============================================================================
