pub mod ipc;

pub use ipc::{socket_path, Command, IpcError, Response, StatusInfo};
