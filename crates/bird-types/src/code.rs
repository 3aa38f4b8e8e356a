//! Reply codes and the daemon's fixed error table.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 4-digit BIRD reply code.
///
/// Every line the daemon writes to the control socket starts with one of
/// these (continuation lines inherit the code of the line above).
///
/// # Examples
///
/// ```
/// use bird_types::ReplyCode;
///
/// let code: ReplyCode = "1006".parse().unwrap();
/// assert!(code.is_protocol_detail());
/// assert_eq!(code.to_string(), "1006");
///
/// let welcome: ReplyCode = "0001".parse().unwrap();
/// assert_eq!(welcome, ReplyCode::WELCOME);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Connection welcome banner (`0001`).
    pub const WELCOME: ReplyCode = ReplyCode(1);

    /// One row of the protocol list table (`1002`).
    pub const PROTOCOL_LIST: ReplyCode = ReplyCode(1002);

    /// Free-form detail line of the current protocol (`1006`).
    pub const PROTOCOL_DETAIL: ReplyCode = ReplyCode(1006);

    /// Creates a reply code from its numeric value.
    ///
    /// Returns `None` if the value does not fit into four digits.
    pub const fn new(value: u16) -> Option<Self> {
        if value <= 9999 {
            Some(ReplyCode(value))
        } else {
            None
        }
    }

    /// Returns the numeric value of the code.
    pub const fn value(&self) -> u16 {
        self.0
    }

    /// Returns true for the welcome banner code.
    pub const fn is_welcome(&self) -> bool {
        self.0 == Self::WELCOME.0
    }

    /// Returns true for a protocol list row.
    pub const fn is_protocol_list(&self) -> bool {
        self.0 == Self::PROTOCOL_LIST.0
    }

    /// Returns true for a protocol detail line.
    pub const fn is_protocol_detail(&self) -> bool {
        self.0 == Self::PROTOCOL_DETAIL.0
    }

    /// Returns true for any table heading (`2xxx`).
    pub const fn is_table_heading(&self) -> bool {
        self.0 >= 2000 && self.0 <= 2999
    }

    /// Looks the code up in the fixed server error table.
    pub fn server_error(&self) -> Option<ServerError> {
        ServerError::from_code(*self)
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for ReplyCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidReplyCode(s.to_string()));
        }

        s.parse::<u16>()
            .map(ReplyCode)
            .map_err(|_| ParseError::InvalidReplyCode(s.to_string()))
    }
}

impl TryFrom<String> for ReplyCode {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ReplyCode> for String {
    fn from(code: ReplyCode) -> String {
        code.to_string()
    }
}

/// Errors reported by the daemon through a reserved reply code.
///
/// Only the codes listed here are treated as failures; any other `8xxx` or
/// `9xxx` line is passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerError {
    /// `8000`
    ReplyTooLong,
    /// `8001`
    RouteNotFound,
    /// `8002`
    ConfigurationFileError,
    /// `8003`
    NoProtocolsMatch,
    /// `8004`
    StoppedDueToReconfiguration,
    /// `8005`
    ProtocolDown,
    /// `8006`
    ReloadFailed,
    /// `8007`
    AccessDenied,
    /// `8008`
    EvaluationRuntimeError,
    /// `9000`
    CommandTooLong,
    /// `9001`
    ParseError,
    /// `9002`
    InvalidSymbolType,
}

impl ServerError {
    /// All known server errors in code order.
    pub const ALL: [ServerError; 12] = [
        ServerError::ReplyTooLong,
        ServerError::RouteNotFound,
        ServerError::ConfigurationFileError,
        ServerError::NoProtocolsMatch,
        ServerError::StoppedDueToReconfiguration,
        ServerError::ProtocolDown,
        ServerError::ReloadFailed,
        ServerError::AccessDenied,
        ServerError::EvaluationRuntimeError,
        ServerError::CommandTooLong,
        ServerError::ParseError,
        ServerError::InvalidSymbolType,
    ];

    /// Maps a reply code to its server error, if it is one.
    pub fn from_code(code: ReplyCode) -> Option<Self> {
        Self::ALL.into_iter().find(|err| err.code() == code)
    }

    /// Returns the reply code the daemon uses for this error.
    pub const fn code(&self) -> ReplyCode {
        let value = match self {
            ServerError::ReplyTooLong => 8000,
            ServerError::RouteNotFound => 8001,
            ServerError::ConfigurationFileError => 8002,
            ServerError::NoProtocolsMatch => 8003,
            ServerError::StoppedDueToReconfiguration => 8004,
            ServerError::ProtocolDown => 8005,
            ServerError::ReloadFailed => 8006,
            ServerError::AccessDenied => 8007,
            ServerError::EvaluationRuntimeError => 8008,
            ServerError::CommandTooLong => 9000,
            ServerError::ParseError => 9001,
            ServerError::InvalidSymbolType => 9002,
        };
        ReplyCode(value)
    }

    /// Returns the canonical human-readable message.
    pub const fn message(&self) -> &'static str {
        match self {
            ServerError::ReplyTooLong => "Reply too long",
            ServerError::RouteNotFound => "Route not found",
            ServerError::ConfigurationFileError => "Configuration file error",
            ServerError::NoProtocolsMatch => "No protocols match",
            ServerError::StoppedDueToReconfiguration => "Stopped due to reconfiguration",
            ServerError::ProtocolDown => "Protocol is down => cannot dump",
            ServerError::ReloadFailed => "Reload failed",
            ServerError::AccessDenied => "Access denied",
            ServerError::EvaluationRuntimeError => "Evaluation runtime error",
            ServerError::CommandTooLong => "Command too long",
            ServerError::ParseError => "Parse error",
            ServerError::InvalidSymbolType => "Invalid symbol type",
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ServerError {}
