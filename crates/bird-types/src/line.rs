//! Decoded reply lines.

use crate::{ReplyCode, ServerError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One decoded line of a daemon reply.
///
/// `continuation` is true when the daemon marked the line with `-` (more
/// lines with this code follow) or when the line was a short continuation
/// that inherited the code of the line above it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReplyLine {
    pub code: ReplyCode,
    pub continuation: bool,
    pub payload: String,
}

impl ReplyLine {
    /// Creates a new reply line.
    pub fn new(code: ReplyCode, continuation: bool, payload: impl Into<String>) -> Self {
        Self {
            code,
            continuation,
            payload: payload.into(),
        }
    }

    /// The server error carried by this line, if its code is in the fixed
    /// error table.
    pub fn server_error(&self) -> Option<ServerError> {
        self.code.server_error()
    }
}

impl fmt::Display for ReplyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.continuation { '-' } else { ' ' };
        write!(f, "{}{}{}", self.code, marker, self.payload)
    }
}
