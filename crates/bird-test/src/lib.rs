//! Test infrastructure for the BIRD control socket client
//!
//! Provides:
//! - A scripted mock daemon listening on a real Unix socket
//! - Canned daemon replies for common commands

pub mod fixtures;
mod mock_bird;

pub use mock_bird::{MockBird, MockBirdBuilder};
