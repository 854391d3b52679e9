//! Turning the bytes a client types into game keys

pub mod decoder;
pub mod handler;
pub mod telnet;

pub use decoder::{KeyDecoder, TerminalEvent};
pub use handler::InputHandler;
