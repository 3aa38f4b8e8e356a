//! Command execution: one command in, one decoded reply out.

use bird_types::ReplyLine;
use std::io::{Read, Write};

use crate::connection::Connection;
use crate::decoder::decode_lines;
use crate::error::{BirdError, BirdResult};
use crate::reassembler::read_reply;

/// Reads and decodes the next reply without sending anything.
///
/// Fails on the first line carrying a known server error code; the rest of
/// that reply has already been consumed from the socket and is discarded.
pub fn fetch_reply<S: Read + Write>(conn: &mut Connection<S>) -> BirdResult<Vec<ReplyLine>> {
    let raw = read_reply(conn)?;
    let lines = decode_lines(&raw)?;

    if let Some(err) = lines.iter().find_map(ReplyLine::server_error) {
        tracing::warn!(code = %err.code(), message = err.message(), "BIRD reported an error");
        return Err(BirdError::Server(err));
    }

    tracing::debug!(lines = lines.len(), "Received reply");
    Ok(lines)
}

/// Sends `command` and returns its decoded reply, terminal line included.
///
/// A command containing a line break is rejected before anything is
/// written, since the daemon would answer each line separately.
pub fn execute<S: Read + Write>(
    conn: &mut Connection<S>,
    command: &str,
) -> BirdResult<Vec<ReplyLine>> {
    if command.contains(['\n', '\r']) {
        return Err(BirdError::invalid_command(command));
    }
    conn.write_command(command)?;
    fetch_reply(conn)
}
