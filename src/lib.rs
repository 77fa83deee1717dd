pub mod artwork;
pub mod backends;
pub mod card;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod send;
pub mod session;
pub mod sources;
pub mod tui;
