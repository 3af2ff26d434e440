use shared::ipc::{Command, Response};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixListener;
use tracing::{debug, error, info};

use crate::editor::EditorState;
use crate::model::ModelId;

pub struct EditorServer {
    socket_path: PathBuf,
    state: Arc<EditorState>,
}

impl EditorServer {
    pub fn new(socket_path: PathBuf, state: Arc<EditorState>) -> Self {
        Self { socket_path, state }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let socket_path = self.socket_path.clone();

        if socket_path.exists() {
            std::fs::remove_file(&socket_path)?;
        }

        info!("Starting socket server at {}", socket_path.display());

        let listener = UnixListener::bind(&socket_path)?;
        debug!("Listener bound successfully");

        loop {
            debug!("Waiting for connection...");
            let state = Arc::clone(&self.state);
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("Connection accepted");
                    tokio::spawn(async move {
                        if let Err(e) = Self::handle_connection(state, stream).await {
                            error!("Error handling connection: {}", e);
                        } else {
                            debug!("Connection handled successfully");
                        }
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }

    async fn handle_connection(
        state: Arc<EditorState>,
        mut stream: tokio::net::UnixStream,
    ) -> anyhow::Result<()> {
        // The client shuts down its write half after sending, so the whole
        // command (editor text is unbounded) arrives before EOF.
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await?;

        if buffer.is_empty() {
            return Ok(());
        }

        let command: Command = serde_json::from_slice(&buffer)?;

        debug!("Received command: {:?}", command);

        let response = match command {
            Command::TextChanged(input) => {
                state.handle_text_change(input).await;
                Response::Ok
            }
            Command::SelectModel(id) => match ModelId::try_from(id) {
                Ok(model) => {
                    state.handle_model_change(model).await;
                    Response::Ok
                }
                Err(e) => Response::Error(e.to_string()),
            },
            Command::Buffer => Response::Buffer(state.buffer().await),
            Command::Status => Response::Status(state.status().await),
            Command::Reset => {
                state.reset().await;
                Response::Ok
            }
        };

        let response_json = serde_json::to_vec(&response)?;
        stream.write_all(&response_json).await?;

        debug!("Sent response: {:?}", response);

        Ok(())
    }
}

impl Drop for EditorServer {
    fn drop(&mut self) {
        if self.socket_path.exists() {
            let _ = std::fs::remove_file(&self.socket_path);
        }
    }
}
