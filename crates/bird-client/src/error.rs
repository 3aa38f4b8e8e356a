//! Error types for control socket operations.
//!
//! Every failure is fatal for the call that produced it; nothing is retried.
//! [`BirdError::class`] tells a broken transport apart from a protocol
//! violation or a daemon-reported error.

use bird_types::ServerError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for control socket operations.
pub type BirdResult<T> = Result<T, BirdError>;

/// Errors that can occur while talking to the daemon.
#[derive(Debug, Error)]
pub enum BirdError {
    /// The control socket could not be opened.
    #[error("Could not connect to BIRD UNIX socket {}: {source}", .path.display())]
    Connect {
        /// Filesystem path of the socket.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Reading from or writing to an open socket failed.
    #[error("BIRD UNIX socket {operation} failed: {source}")]
    Io {
        /// "read", "write" or "configure".
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// The peer closed or stalled in the middle of a reply.
    #[error("Could not read additional data from BIRD UNIX socket. Failed after {buffered} bytes.")]
    UnexpectedEof {
        /// Bytes buffered when the read came back empty.
        buffered: usize,
    },

    /// A reply line did not follow the `NNNN[ -]payload` framing.
    #[error("Received invalid result line on BIRD UNIX socket: {line:?}")]
    MalformedLine {
        /// The offending raw line.
        line: String,
    },

    /// The welcome banner was missing or unexpected.
    #[error("Expected WELCOME message on BIRD UNIX socket: {message}")]
    Handshake { message: String },

    /// Reply lines arrived in an order the table builder cannot accept.
    #[error("Unexpected line sequence on BIRD UNIX socket: {message}")]
    Sequence { message: String },

    /// A command or argument that would not go out as exactly one request
    /// line. Nothing was sent.
    #[error("Refusing to send invalid command on BIRD UNIX socket: {command:?}")]
    InvalidCommand { command: String },

    /// The daemon answered with one of its fixed error codes.
    #[error("{0}")]
    Server(ServerError),

    /// Client configuration is invalid or unreadable.
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

/// Broad category of a [`BirdError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Transport could not be opened or broke down.
    Connection,
    /// The byte stream did not follow the reply framing.
    Framing,
    /// Lines arrived out of the expected order.
    Sequencing,
    /// The daemon reported an error.
    Server,
    /// Local configuration problem.
    Config,
}

impl BirdError {
    /// Creates a connect error.
    pub fn connect(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Connect {
            path: path.into(),
            source,
        }
    }

    /// Creates an IO error for an operation on an open socket.
    pub fn io(operation: &'static str, source: io::Error) -> Self {
        Self::Io { operation, source }
    }

    /// Creates a malformed line error.
    pub fn malformed(line: impl Into<String>) -> Self {
        Self::MalformedLine { line: line.into() }
    }

    /// Creates a handshake error.
    pub fn handshake(message: impl Into<String>) -> Self {
        Self::Handshake {
            message: message.into(),
        }
    }

    /// Creates a sequencing error.
    pub fn sequence(message: impl Into<String>) -> Self {
        Self::Sequence {
            message: message.into(),
        }
    }

    /// Creates an invalid command error.
    pub fn invalid_command(command: impl Into<String>) -> Self {
        Self::InvalidCommand {
            command: command.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            BirdError::Connect { .. } | BirdError::Io { .. } => ErrorClass::Connection,
            BirdError::UnexpectedEof { .. } | BirdError::MalformedLine { .. } => {
                ErrorClass::Framing
            }
            BirdError::Handshake { .. }
            | BirdError::Sequence { .. }
            | BirdError::InvalidCommand { .. } => ErrorClass::Sequencing,
            BirdError::Server(_) => ErrorClass::Server,
            BirdError::Config { .. } => ErrorClass::Config,
        }
    }

    /// Returns true if the transport or its framing is broken.
    pub fn is_socket_error(&self) -> bool {
        matches!(self.class(), ErrorClass::Connection | ErrorClass::Framing)
    }

    /// Returns true if the daemon rejected the command or the reply was out
    /// of sequence.
    pub fn is_protocol_error(&self) -> bool {
        matches!(self.class(), ErrorClass::Sequencing | ErrorClass::Server)
    }

    /// Returns the daemon-reported error, if this is one.
    pub fn server_error(&self) -> Option<ServerError> {
        match self {
            BirdError::Server(err) => Some(*err),
            _ => None,
        }
    }
}

impl From<ServerError> for BirdError {
    fn from(err: ServerError) -> Self {
        BirdError::Server(err)
    }
}
