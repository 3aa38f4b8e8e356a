//! Buffered connection to the control socket.
//!
//! Owns the stream and an accumulating byte buffer. Bytes are consumed only
//! a complete line at a time; a trailing partial line always stays buffered
//! for the next read.

use crate::config::ClientConfig;
use crate::error::{BirdError, BirdResult};
use std::io::{ErrorKind, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;

/// Line delimiter of the control protocol.
pub const LINE_DELIMITER: u8 = b'\n';

/// Default number of bytes requested per read.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A stream plus the bytes read from it that have not been consumed yet.
///
/// Generic over the stream so replies can be replayed from memory; in
/// production `S` is a [`UnixStream`].
#[derive(Debug)]
pub struct Connection<S = UnixStream> {
    stream: S,
    buffer: Vec<u8>,
    /// Start of the unconsumed bytes in `buffer`.
    cursor: usize,
    chunk_size: usize,
}

impl Connection<UnixStream> {
    /// Opens the control socket at `path` with default settings.
    pub fn connect(path: impl AsRef<Path>) -> BirdResult<Self> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path).map_err(|e| BirdError::connect(path, e))?;
        tracing::debug!(path = %path.display(), "Connected to BIRD control socket");
        Ok(Self::new(stream))
    }

    /// Opens the control socket described by `config`, applying its chunk
    /// size and socket timeouts.
    pub fn open(config: &ClientConfig) -> BirdResult<Self> {
        config.validate()?;

        let mut conn = Self::connect(&config.socket_path)?;
        conn.stream
            .set_read_timeout(config.read_timeout())
            .map_err(|e| BirdError::io("configure", e))?;
        conn.stream
            .set_write_timeout(config.write_timeout())
            .map_err(|e| BirdError::io("configure", e))?;
        conn.chunk_size = config.read_chunk_size;
        Ok(conn)
    }
}

impl<S: Read + Write> Connection<S> {
    /// Wraps an already open stream.
    pub fn new(stream: S) -> Self {
        Self::with_chunk_size(stream, DEFAULT_CHUNK_SIZE)
    }

    /// Wraps an already open stream with a custom read size.
    pub fn with_chunk_size(stream: S, chunk_size: usize) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            cursor: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Bytes received but not consumed yet.
    pub fn pending(&self) -> &[u8] {
        &self.buffer[self.cursor..]
    }

    /// Performs one read of up to `max_bytes` and appends the result to the
    /// buffer.
    ///
    /// A read that returns no data means the peer closed the stream in the
    /// middle of a reply and fails with [`BirdError::UnexpectedEof`].
    pub fn read_more(&mut self, max_bytes: usize) -> BirdResult<usize> {
        self.compact();

        let start = self.buffer.len();
        self.buffer.resize(start + max_bytes.max(1), 0);

        let result = loop {
            match self.stream.read(&mut self.buffer[start..]) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        match result {
            Ok(0) => {
                self.buffer.truncate(start);
                Err(BirdError::UnexpectedEof { buffered: start })
            }
            Ok(n) => {
                self.buffer.truncate(start + n);
                tracing::trace!(bytes = n, buffered = self.buffer.len(), "Read from socket");
                Ok(n)
            }
            Err(e) => {
                self.buffer.truncate(start);
                Err(BirdError::io("read", e))
            }
        }
    }

    /// [`read_more`](Self::read_more) with the configured chunk size.
    pub fn fill(&mut self) -> BirdResult<usize> {
        self.read_more(self.chunk_size)
    }

    /// Removes the next complete line from the buffer and returns it without
    /// its delimiter. Returns `None` while only a partial line is buffered.
    pub fn take_line(&mut self) -> Option<String> {
        let offset = self
            .pending()
            .iter()
            .position(|&b| b == LINE_DELIMITER)?;

        let end = self.cursor + offset;
        let line = String::from_utf8_lossy(&self.buffer[self.cursor..end]).into_owned();
        self.cursor = end + 1;

        if self.cursor == self.buffer.len() {
            self.buffer.clear();
            self.cursor = 0;
        }

        Some(line)
    }

    /// Writes `command` followed by the line delimiter in one write.
    pub fn write_command(&mut self, command: &str) -> BirdResult<()> {
        let mut data = Vec::with_capacity(command.len() + 1);
        data.extend_from_slice(command.as_bytes());
        data.push(LINE_DELIMITER);

        self.stream
            .write_all(&data)
            .and_then(|()| self.stream.flush())
            .map_err(|e| BirdError::io("write", e))?;

        tracing::debug!(command = %command, "Sent command");
        Ok(())
    }

    /// Returns the underlying stream, dropping any buffered bytes.
    pub fn into_inner(self) -> S {
        self.stream
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    fn compact(&mut self) {
        if self.cursor > 0 {
            self.buffer.drain(..self.cursor);
            self.cursor = 0;
        }
    }
}
