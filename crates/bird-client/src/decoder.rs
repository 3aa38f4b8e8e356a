//! Decoding of raw reply lines into [`ReplyLine`]s.
//!
//! Lines look like `NNNN-payload` (more lines with this code follow) or
//! `NNNN payload` (last line with this code). A line starting with a single
//! space is a short continuation of the line above and inherits its code.

use bird_types::{ReplyCode, ReplyLine};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BirdError, BirdResult};

static REPLY_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{4})([ -])(.*)$").expect("Invalid regex pattern"));

/// Stateful decoder for the lines of one reply.
///
/// Remembers the code of the last decoded line so short continuations can
/// inherit it.
#[derive(Debug, Default)]
pub struct LineDecoder {
    previous: Option<ReplyCode>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one raw line.
    ///
    /// Empty lines yield `Ok(None)`. A line that is neither a continuation
    /// nor matches the reply grammar is a framing error.
    pub fn decode(&mut self, raw: &str) -> BirdResult<Option<ReplyLine>> {
        if raw.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = raw.strip_prefix(' ') {
            let code = self.previous.ok_or_else(|| BirdError::malformed(raw))?;
            return Ok(Some(ReplyLine::new(code, true, rest)));
        }

        let caps = REPLY_LINE_RE
            .captures(raw)
            .ok_or_else(|| BirdError::malformed(raw))?;

        let code: ReplyCode = caps[1].parse().map_err(|_| BirdError::malformed(raw))?;
        let continuation = &caps[2] == "-";

        self.previous = Some(code);
        Ok(Some(ReplyLine::new(code, continuation, &caps[3])))
    }
}

/// Decodes the raw lines of one complete reply, preserving their order.
pub fn decode_lines<I, L>(raw_lines: I) -> BirdResult<Vec<ReplyLine>>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut decoder = LineDecoder::new();
    let mut lines = Vec::new();

    for raw in raw_lines {
        if let Some(line) = decoder.decode(raw.as_ref())? {
            lines.push(line);
        }
    }

    Ok(lines)
}
