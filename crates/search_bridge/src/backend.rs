use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::{Child, Command};

use crate::BridgeError;

/// Program and arguments used to start the backend process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for BackendCommand {
    fn default() -> Self {
        Self {
            program: "search-backend".to_string(),
            args: Vec::new(),
        }
    }
}

/// An open duplex channel to a backend.
pub struct Connection {
    pub(crate) writer: Box<dyn AsyncWrite + Send + Unpin>,
    pub(crate) reader: Box<dyn AsyncRead + Send + Unpin>,
    child: Option<Child>,
}

impl Connection {
    pub fn new(
        writer: impl AsyncWrite + Send + Unpin + 'static,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            writer: Box::new(writer),
            reader: Box::new(reader),
            child: None,
        }
    }

    /// Ties the lifetime of a child process to this connection.
    pub fn with_child(mut self, child: Child) -> Self {
        self.child = Some(child);
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Box<dyn AsyncWrite + Send + Unpin>,
        Box<dyn AsyncRead + Send + Unpin>,
        Option<Child>,
    ) {
        (self.writer, self.reader, self.child)
    }
}

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn connect(&self) -> Result<Connection, BridgeError>;
}

/// Backend reached through a child process's stdin and stdout.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    command: BackendCommand,
}

impl ProcessBackend {
    pub fn new(command: BackendCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &BackendCommand {
        &self.command
    }
}

#[async_trait::async_trait]
impl Backend for ProcessBackend {
    async fn connect(&self) -> Result<Connection, BridgeError> {
        let mut child = Command::new(&self.command.program)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // The terminal belongs to the UI.
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BridgeError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(BridgeError::MissingPipe("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or(BridgeError::MissingPipe("stdout"))?;

        Ok(Connection::new(stdin, stdout).with_child(child))
    }
}
