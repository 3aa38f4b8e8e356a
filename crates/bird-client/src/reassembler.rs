//! Reassembly of raw reply lines from socket reads.
//!
//! A reply ends with the first line carrying a final code (`NNNN ` with a
//! space). Lines after it stay buffered in the [`Connection`] for the next
//! reply.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Read, Write};

use crate::connection::Connection;
use crate::error::BirdResult;

static LAST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4} ").expect("Invalid regex pattern"));

/// Returns true if `raw` terminates a reply.
pub fn is_last_line(raw: &str) -> bool {
    LAST_LINE_RE.is_match(raw)
}

/// Collects the raw lines of exactly one reply, terminal line included.
///
/// Complete lines already buffered are consumed before the socket is read
/// again. There is no bound on the number of reads: the loop ends on a
/// terminal line or on a read failure.
pub fn read_reply<S: Read + Write>(conn: &mut Connection<S>) -> BirdResult<Vec<String>> {
    let mut lines = Vec::new();

    loop {
        while let Some(line) = conn.take_line() {
            let last = is_last_line(&line);
            lines.push(line);

            if last {
                tracing::trace!(
                    lines = lines.len(),
                    leftover = conn.pending().len(),
                    "Reply complete"
                );
                return Ok(lines);
            }
        }

        conn.fill()?;
    }
}
