//! In-memory stream replaying scripted read chunks.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Serves each scripted chunk to at most one `read` call (split further when
/// the caller's buffer is smaller) and records everything written.
#[derive(Debug, Default)]
pub(crate) struct ScriptedStream {
    chunks: VecDeque<Vec<u8>>,
    written: Vec<u8>,
}

impl ScriptedStream {
    pub(crate) fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        Self {
            chunks: chunks.into_iter().map(|c| c.as_ref().to_vec()).collect(),
            written: Vec::new(),
        }
    }

    /// Splits `data` into reads of `size` bytes.
    pub(crate) fn fragmented(data: &str, size: usize) -> Self {
        Self::from_chunks(data.as_bytes().chunks(size.max(1)))
    }

    pub(crate) fn written(&self) -> &[u8] {
        &self.written
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.chunks.pop_front() else {
            return Ok(0);
        };

        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.chunks.push_front(rest);
        }

        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
