//! The handful of telnet (RFC 854) codes needed to run a full-screen game:
//! character-at-a-time input with server-side echo, plus window size reports
//! (NAWS, RFC 1073).

pub const IAC: u8 = 255;
pub const DONT: u8 = 254;
pub const DO: u8 = 253;
pub const WONT: u8 = 252;
pub const WILL: u8 = 251;
pub const SB: u8 = 250;
pub const SE: u8 = 240;

pub const ECHO: u8 = 1;
pub const SUPPRESS_GO_AHEAD: u8 = 3;
pub const NAWS: u8 = 31;

/// Sent once when a client connects: we echo (so the client stops echoing),
/// we do not use go-ahead, and the client should report its window size.
pub const NEGOTIATION: [u8; 9] = [
    IAC, WILL, ECHO, //
    IAC, WILL, SUPPRESS_GO_AHEAD, //
    IAC, DO, NAWS,
];
