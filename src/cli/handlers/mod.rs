//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod browse;
pub mod import;
pub mod players;

pub use browse::BrowseCommandHandler;
pub use import::ImportCommandHandler;
pub use players::PlayersCommandHandler;
