use shared::ipc::{socket_path, Command, IpcError, Response};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::{timeout, Duration};
use tracing::warn;

/// Timeout for socket operations (5 seconds)
const SOCKET_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    pub fn new() -> Self {
        Self {
            socket_path: socket_path(),
        }
    }

    pub async fn send_command(&self, cmd: Command) -> Result<Response, IpcError> {
        // Connect with timeout
        let mut stream = match timeout(SOCKET_TIMEOUT, UnixStream::connect(&self.socket_path)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IpcError::ConnectionRefused);
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
                return Err(IpcError::ConnectionRefused);
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                warn!(
                    "Connection timeout: failed to connect to daemon at {} within {:?}",
                    self.socket_path.display(),
                    SOCKET_TIMEOUT
                );
                return Err(IpcError::Timeout);
            }
        };

        // Serialize command
        let command_json = serde_json::to_vec(&cmd)?;

        // Write with timeout, then half-close so the daemon sees EOF and can
        // read arbitrarily long text in full.
        if timeout(SOCKET_TIMEOUT, async {
            stream.write_all(&command_json).await?;
            stream.shutdown().await
        })
        .await
        .is_err()
        {
            warn!(
                "Write timeout: failed to send command to daemon within {:?}",
                SOCKET_TIMEOUT
            );
            return Err(IpcError::Timeout);
        }

        // Read with timeout
        let mut buffer = Vec::new();
        match timeout(SOCKET_TIMEOUT, stream.read_to_end(&mut buffer)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                warn!(
                    "Read timeout: failed to receive response from daemon within {:?}",
                    SOCKET_TIMEOUT
                );
                return Err(IpcError::Timeout);
            }
        }

        let response: Response = serde_json::from_slice(&buffer)?;

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ipc::StatusInfo;
    use tokio::net::UnixListener;

    async fn mock_server(socket: &str, response: Response) {
        let listener = UnixListener::bind(socket).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buffer = Vec::new();
            stream.read_to_end(&mut buffer).await.unwrap();
            let _command: Command = serde_json::from_slice(&buffer).unwrap();

            let response_json = serde_json::to_vec(&response).unwrap();
            stream.write_all(&response_json).await.unwrap();
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_daemon_client_new() {
        let client = DaemonClient::new();
        assert_eq!(client.socket_path, socket_path());
    }

    #[tokio::test]
    async fn test_send_command_socket_not_found() {
        let client = DaemonClient {
            socket_path: PathBuf::from("/tmp/lipika_no_such_socket.sock"),
        };
        let result = client.send_command(Command::Status).await;
        assert!(matches!(result, Err(IpcError::ConnectionRefused)));
    }

    #[tokio::test]
    async fn test_send_command_serialization() {
        let cmd = Command::TextChanged("namaste".to_string());
        let json = serde_json::to_vec(&cmd).unwrap();
        assert!(json.len() > 0);

        let parsed: Command = serde_json::from_slice(&json).unwrap();
        assert_eq!(cmd, parsed);
    }

    #[tokio::test]
    async fn test_send_command_ok_response() {
        let test_socket = "/tmp/test_lipika_ok.sock";
        std::fs::remove_file(test_socket).ok();

        mock_server(test_socket, Response::Ok).await;

        let client = DaemonClient {
            socket_path: PathBuf::from(test_socket),
        };

        let result = client
            .send_command(Command::TextChanged("namaste".to_string()))
            .await;
        assert!(matches!(result, Ok(Response::Ok)));

        std::fs::remove_file(test_socket).ok();
    }

    #[tokio::test]
    async fn test_send_command_status() {
        let test_socket = "/tmp/test_lipika_status.sock";
        std::fs::remove_file(test_socket).ok();

        mock_server(
            test_socket,
            Response::Status(StatusInfo {
                is_running: true,
                active_model: 2,
                notice: Some("Model B activated".to_string()),
                debounce_armed: false,
                last_accepted: None,
            }),
        )
        .await;

        let client = DaemonClient {
            socket_path: PathBuf::from(test_socket),
        };

        let result = client.send_command(Command::Status).await;
        match result {
            Ok(Response::Status(info)) => {
                assert!(info.is_running);
                assert_eq!(info.active_model, 2);
                assert_eq!(info.notice, Some("Model B activated".to_string()));
            }
            other => panic!("expected status response, got {:?}", other),
        }

        std::fs::remove_file(test_socket).ok();
    }

    #[tokio::test]
    async fn test_send_command_buffer_response() {
        let test_socket = "/tmp/test_lipika_buffer.sock";
        std::fs::remove_file(test_socket).ok();

        mock_server(test_socket, Response::Buffer("नमस्ते ".to_string())).await;

        let client = DaemonClient {
            socket_path: PathBuf::from(test_socket),
        };

        let result = client.send_command(Command::Buffer).await;
        assert_eq!(result.unwrap(), Response::Buffer("नमस्ते ".to_string()));

        std::fs::remove_file(test_socket).ok();
    }

    #[tokio::test]
    async fn test_send_command_error_response() {
        let test_socket = "/tmp/test_lipika_error.sock";
        std::fs::remove_file(test_socket).ok();

        mock_server(test_socket, Response::Error("unknown model id 7".to_string())).await;

        let client = DaemonClient {
            socket_path: PathBuf::from(test_socket),
        };

        let result = client.send_command(Command::SelectModel(7)).await;
        assert!(matches!(result, Ok(Response::Error(_))));

        std::fs::remove_file(test_socket).ok();
    }

    #[tokio::test]
    async fn test_send_command_timeout_on_read() {
        let test_socket = "/tmp/test_lipika_timeout_read.sock";
        std::fs::remove_file(test_socket).ok();

        let listener = UnixListener::bind(test_socket).unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer).await.unwrap();

            // Don't send a response - client times out waiting for it.
            tokio::time::sleep(Duration::from_secs(6)).await;
        });

        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = DaemonClient {
            socket_path: PathBuf::from(test_socket),
        };

        let result = client.send_command(Command::Status).await;
        assert!(matches!(result, Err(IpcError::Timeout)));

        std::fs::remove_file(test_socket).ok();
    }
}
