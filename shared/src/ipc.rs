use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    /// Full text of the editing surface after a user edit.
    TextChanged(String),
    /// Select the active transliteration model by wire id.
    SelectModel(u32),
    Buffer,
    Status,
    Reset,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Response {
    Ok,
    Error(String),
    Buffer(String),
    Status(StatusInfo),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusInfo {
    pub is_running: bool,
    pub active_model: u32,
    pub notice: Option<String>,
    pub debounce_armed: bool,
    pub last_accepted: Option<String>,
}

#[derive(Error, Debug)]
pub enum IpcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Connection refused: is lipikad running?")]
    ConnectionRefused,

    #[error("Connection timeout")]
    Timeout,
}

/// Unix socket path for the daemon.
/// Uses the XDG runtime directory if available, falls back to /tmp/lipikad.sock
pub fn socket_path() -> PathBuf {
    if let Some(runtime_dir) = dirs::runtime_dir() {
        runtime_dir.join("lipikad.sock")
    } else {
        PathBuf::from("/tmp/lipikad.sock")
    }
}
