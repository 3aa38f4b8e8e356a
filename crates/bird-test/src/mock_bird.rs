//! Scripted mock of the BIRD control socket.

use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;

use crate::fixtures;

/// Pause between fragments so the client observes separate reads.
const FRAGMENT_DELAY: Duration = Duration::from_millis(1);

/// A mock daemon serving one client connection from a background thread.
///
/// The daemon writes its banner, then answers each scripted exchange after
/// reading one command line, and finally closes the connection.
pub struct MockBird {
    // Keeps the socket directory alive for the lifetime of the mock.
    _dir: TempDir,
    socket_path: PathBuf,
    handle: Option<JoinHandle<io::Result<Vec<String>>>>,
}

impl MockBird {
    pub fn builder() -> MockBirdBuilder {
        MockBirdBuilder::default()
    }

    /// Path of the listening socket.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Waits for the session to end and returns the commands received, in
    /// order.
    pub fn finish(mut self) -> io::Result<Vec<String>> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "mock daemon panicked"))?,
            None => Ok(Vec::new()),
        }
    }
}

/// Builder for [`MockBird`].
#[derive(Debug, Clone)]
pub struct MockBirdBuilder {
    banner: String,
    exchanges: Vec<String>,
    fragment_size: Option<usize>,
}

impl Default for MockBirdBuilder {
    fn default() -> Self {
        Self {
            banner: fixtures::WELCOME.to_string(),
            exchanges: Vec::new(),
            fragment_size: None,
        }
    }
}

impl MockBirdBuilder {
    /// Replaces the welcome banner with arbitrary raw bytes.
    pub fn banner(mut self, raw: impl Into<String>) -> Self {
        self.banner = raw.into();
        self
    }

    /// Answers the next command with `raw_reply`.
    pub fn reply(mut self, raw_reply: impl Into<String>) -> Self {
        self.exchanges.push(raw_reply.into());
        self
    }

    /// Splits every write into chunks of `size` bytes.
    pub fn fragment(mut self, size: usize) -> Self {
        self.fragment_size = Some(size.max(1));
        self
    }

    /// Binds the socket and starts serving.
    pub fn start(self) -> io::Result<MockBird> {
        let dir = tempfile::tempdir()?;
        let socket_path = dir.path().join("bird.ctl");
        let listener = UnixListener::bind(&socket_path)?;

        tracing::debug!(path = %socket_path.display(), "Mock BIRD listening");

        let handle = thread::spawn(move || self.serve(listener));

        Ok(MockBird {
            _dir: dir,
            socket_path,
            handle: Some(handle),
        })
    }

    fn serve(self, listener: UnixListener) -> io::Result<Vec<String>> {
        let (mut stream, _) = listener.accept()?;
        let mut reader = BufReader::new(stream.try_clone()?);
        let mut commands = Vec::new();

        self.send(&mut stream, &self.banner)?;

        for reply in &self.exchanges {
            let mut command = String::new();
            if reader.read_line(&mut command)? == 0 {
                break;
            }
            let command = command.trim_end_matches('\n').to_string();
            tracing::debug!(command = %command, "Mock BIRD received command");
            commands.push(command);

            self.send(&mut stream, reply)?;
        }

        Ok(commands)
    }

    fn send(&self, stream: &mut UnixStream, data: &str) -> io::Result<()> {
        match self.fragment_size {
            Some(size) => {
                for chunk in data.as_bytes().chunks(size) {
                    stream.write_all(chunk)?;
                    stream.flush()?;
                    thread::sleep(FRAGMENT_DELAY);
                }
            }
            None => stream.write_all(data.as_bytes())?,
        }
        stream.flush()
    }
}
