//! Remote terminal hosting: one TCP connection, one game

pub mod listener;
pub mod session;
pub mod terminal;

pub use listener::{Server, ServerConfig};
pub use session::{SessionEnd, SessionHost};
pub use terminal::RemoteTerminal;
