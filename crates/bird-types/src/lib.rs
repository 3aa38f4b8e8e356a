//! Data types spoken over the BIRD routing daemon control socket.
//!
//! This crate provides the typed vocabulary shared by the control-socket
//! client and its consumers:
//!
//! - [`ReplyCode`]: 4-digit reply codes prefixing every daemon line
//! - [`ServerError`]: the fixed table of daemon-reported error codes
//! - [`ReplyLine`]: one decoded line of a daemon reply
//! - [`FieldValue`], [`ProtocolRecord`], [`ProtocolTable`]: parsed
//!   `show protocols all` output

mod code;
mod line;
mod record;

pub use code::{ReplyCode, ServerError};
pub use line::ReplyLine;
pub use record::{FieldValue, ProtocolRecord, ProtocolTable};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid reply code: {0:?} (expected four digits)")]
    InvalidReplyCode(String),
}
