//! Client session on the control socket.

use bird_types::{ProtocolTable, ReplyLine};
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::{BirdError, BirdResult};
use crate::query;
use crate::table::ProtocolTableBuilder;

/// A session with the BIRD daemon.
///
/// Only one command is in flight at a time; the client is not meant to be
/// shared between threads. Open one client per concurrent caller.
///
/// # Example
///
/// ```ignore
/// use bird_client::BirdClient;
///
/// let mut client = BirdClient::connect("/var/run/bird/bird.ctl")?;
/// for (name, protocol) in client.get_protocols()? {
///     println!("{}: {:?}", name, protocol.text("state"));
/// }
/// ```
#[derive(Debug)]
pub struct BirdClient<S = UnixStream> {
    conn: Connection<S>,
    greeted: bool,
}

impl BirdClient<UnixStream> {
    /// Connects to the socket at `path` and checks the welcome banner.
    pub fn connect(path: impl AsRef<Path>) -> BirdResult<Self> {
        Self::from_connection(Connection::connect(path)?).greet()
    }

    /// Connects using `config` and checks the welcome banner.
    pub fn with_config(config: &ClientConfig) -> BirdResult<Self> {
        Self::from_connection(Connection::open(config)?).greet()
    }
}

impl<S: Read + Write> BirdClient<S> {
    /// Wraps a connection that has not been greeted yet.
    ///
    /// [`handshake`](Self::handshake) must succeed before any command is
    /// executed.
    pub fn from_connection(conn: Connection<S>) -> Self {
        Self {
            conn,
            greeted: false,
        }
    }

    /// Reads the welcome banner the daemon sends on connect.
    ///
    /// The banner must be a single `0001` line.
    pub fn handshake(&mut self) -> BirdResult<()> {
        let lines = query::fetch_reply(&mut self.conn)?;

        match lines.as_slice() {
            [line] if line.code.is_welcome() => {
                tracing::debug!(banner = %line.payload, "BIRD greeted");
                self.greeted = true;
                Ok(())
            }
            _ => Err(BirdError::handshake(format!(
                "received unexpected data: {:?}",
                lines.iter().map(ToString::to_string).collect::<Vec<_>>()
            ))),
        }
    }

    pub fn is_greeted(&self) -> bool {
        self.greeted
    }

    /// Sends a raw command and returns its decoded reply.
    pub fn execute(&mut self, command: &str) -> BirdResult<Vec<ReplyLine>> {
        self.ensure_greeted()?;
        query::execute(&mut self.conn, command)
    }

    /// Runs `show protocols all [name]` and folds the reply into a table
    /// keyed by protocol name.
    pub fn get_protocol(&mut self, name: Option<&str>) -> BirdResult<ProtocolTable> {
        let command = match name {
            Some(name) if is_protocol_name(name) => format!("show protocols all {}", name),
            Some(name) => return Err(BirdError::invalid_command(name)),
            None => "show protocols all".to_string(),
        };

        let lines = self.execute(&command)?;
        ProtocolTableBuilder::build(&lines)
    }

    /// All protocols known to the daemon.
    pub fn get_protocols(&mut self) -> BirdResult<ProtocolTable> {
        self.get_protocol(None)
    }

    pub fn into_connection(self) -> Connection<S> {
        self.conn
    }

    fn greet(mut self) -> BirdResult<Self> {
        self.handshake()?;
        Ok(self)
    }

    fn ensure_greeted(&self) -> BirdResult<()> {
        if self.greeted {
            Ok(())
        } else {
            Err(BirdError::handshake(
                "no welcome banner received before the first command",
            ))
        }
    }
}

/// A protocol name must be a single non-empty token.
fn is_protocol_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}
