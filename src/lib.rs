//! Term Snake - Snake played over a remote terminal connection
//!
//! This library provides:
//! - Core game logic (game module)
//! - Decoding of client keystrokes and window size reports (input module)
//! - Terminal rendering of a game's view (render module)
//! - The TCP server hosting one isolated game per connection (server module)

pub mod game;
pub mod input;
pub mod render;
pub mod server;
