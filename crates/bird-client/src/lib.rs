//! Client for the BIRD routing daemon control socket.
//!
//! Opens the daemon's Unix socket, sends line-terminated commands and turns
//! the multi-line, code-prefixed replies into typed data:
//!
//! - [`connection`]: socket plus accumulating read buffer
//! - [`reassembler`]: splits the buffer into the raw lines of one reply
//! - [`decoder`]: classifies raw lines into [`ReplyLine`]s
//! - [`query`]: sends a command and maps server error codes to failures
//! - [`detail`]: pattern table for protocol detail lines
//! - [`table`]: folds `show protocols all` replies into protocol records
//! - [`BirdClient`]: the session tying these together
//!
//! # Example
//!
//! ```ignore
//! use bird_client::{BirdClient, ClientConfig};
//!
//! let config = ClientConfig::load()?;
//! let mut client = BirdClient::with_config(&config)?;
//!
//! let protocols = client.get_protocol(Some("bgp_uplink"))?;
//! if let Some(bgp) = protocols.get("bgp_uplink") {
//!     println!("state: {:?}", bgp.text("bgp_state"));
//! }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod decoder;
pub mod detail;
pub mod error;
pub mod query;
pub mod reassembler;
pub mod table;

#[cfg(test)]
mod mock_stream;

// Re-export commonly used items at crate root
pub use client::BirdClient;
pub use config::ClientConfig;
pub use connection::Connection;
pub use error::{BirdError, BirdResult, ErrorClass};

pub use bird_types::{
    FieldValue, ProtocolRecord, ProtocolTable, ReplyCode, ReplyLine, ServerError,
};
