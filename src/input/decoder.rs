use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use super::telnet::{DO, DONT, IAC, NAWS, SB, SE, WILL, WONT};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

/// Unfinished sequences longer than this are garbage and get dropped
const MAX_PENDING: usize = 64;

/// Something the client's terminal did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

enum Parsed {
    Event(TerminalEvent, usize),
    Skip(usize),
    Incomplete,
}

/// Incremental decoder for the raw byte stream of a telnet-style connection.
///
/// Sequences split across reads (arrow keys, telnet sub-negotiations) are
/// buffered until the rest arrives.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, bytes: &[u8]) -> Vec<TerminalEvent> {
        self.pending.extend_from_slice(bytes);

        let mut events = Vec::new();
        let mut offset = 0;

        while offset < self.pending.len() {
            match parse(&self.pending[offset..]) {
                Parsed::Event(event, consumed) => {
                    events.push(event);
                    offset += consumed;
                }
                Parsed::Skip(consumed) => offset += consumed,
                Parsed::Incomplete => break,
            }
        }

        self.pending.drain(..offset);
        if self.pending.len() > MAX_PENDING {
            trace!(len = self.pending.len(), "dropping unterminated input sequence");
            self.pending.clear();
        }

        events
    }
}

fn parse(buf: &[u8]) -> Parsed {
    match buf[0] {
        IAC => parse_telnet(buf),
        ESC => parse_escape(buf),
        CTRL_C => key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 1),
        byte @ 0x20..=0x7e => key(KeyEvent::new(KeyCode::Char(byte as char), KeyModifiers::NONE), 1),
        // CR, LF, NUL, other controls and non-ASCII
        _ => Parsed::Skip(1),
    }
}

fn key(event: KeyEvent, consumed: usize) -> Parsed {
    Parsed::Event(TerminalEvent::Key(event), consumed)
}

fn parse_telnet(buf: &[u8]) -> Parsed {
    match buf.get(1) {
        None => Parsed::Incomplete,
        Some(&(WILL | WONT | DO | DONT)) => {
            if buf.len() < 3 {
                Parsed::Incomplete
            } else {
                Parsed::Skip(3)
            }
        }
        Some(&SB) => parse_subnegotiation(buf),
        Some(_) => Parsed::Skip(2),
    }
}

fn parse_subnegotiation(buf: &[u8]) -> Parsed {
    let mut payload = Vec::new();
    let mut i = 2;

    while i < buf.len() {
        if buf[i] == IAC {
            match buf.get(i + 1) {
                None => return Parsed::Incomplete,
                Some(&SE) => return subnegotiation_event(&payload, i + 2),
                Some(&IAC) => payload.push(IAC),
                Some(_) => {}
            }
            i += 2;
        } else {
            payload.push(buf[i]);
            i += 1;
        }
    }

    Parsed::Incomplete
}

fn subnegotiation_event(payload: &[u8], consumed: usize) -> Parsed {
    match payload {
        [NAWS, w_hi, w_lo, h_hi, h_lo, ..] => Parsed::Event(
            TerminalEvent::Resize {
                width: u16::from_be_bytes([*w_hi, *w_lo]),
                height: u16::from_be_bytes([*h_hi, *h_lo]),
            },
            consumed,
        ),
        _ => Parsed::Skip(consumed),
    }
}

fn parse_escape(buf: &[u8]) -> Parsed {
    match buf.get(1) {
        None => Parsed::Incomplete,
        Some(&(b'[' | b'O')) => {
            let Some(&last) = buf.get(2) else {
                return Parsed::Incomplete;
            };
            let code = match last {
                b'A' => KeyCode::Up,
                b'B' => KeyCode::Down,
                b'C' => KeyCode::Right,
                b'D' => KeyCode::Left,
                _ => return skip_control_sequence(buf),
            };
            key(KeyEvent::new(code, KeyModifiers::NONE), 3)
        }
        Some(_) => key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), 1),
    }
}

/// Skip a sequence we have no use for, up to and including its final byte
fn skip_control_sequence(buf: &[u8]) -> Parsed {
    buf.iter()
        .skip(2)
        .position(|byte| (0x40..=0x7e).contains(byte))
        .map_or(Parsed::Incomplete, |idx| Parsed::Skip(idx + 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(events: &[TerminalEvent]) -> Vec<KeyCode> {
        events
            .iter()
            .filter_map(|event| match event {
                TerminalEvent::Key(key) => Some(key.code),
                TerminalEvent::Resize { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_printable_keys() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(b"hjq");
        assert_eq!(
            keys(&events),
            vec![KeyCode::Char('h'), KeyCode::Char('j'), KeyCode::Char('q')]
        );
    }

    #[test]
    fn test_line_endings_ignored() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(b"l\r\0k\r\n");
        assert_eq!(keys(&events), vec![KeyCode::Char('l'), KeyCode::Char('k')]);
    }

    #[test]
    fn test_ctrl_c() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(&[CTRL_C]);
        assert_eq!(
            events,
            vec![TerminalEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))]
        );
    }

    #[test]
    fn test_arrow_sequences() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(b"\x1b[A\x1b[B\x1bOC\x1b[D");
        assert_eq!(
            keys(&events),
            vec![KeyCode::Up, KeyCode::Down, KeyCode::Right, KeyCode::Left]
        );
    }

    #[test]
    fn test_arrow_split_across_reads() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed(b"\x1b").is_empty());
        assert!(decoder.feed(b"[").is_empty());
        assert_eq!(keys(&decoder.feed(b"Cq")), vec![KeyCode::Right, KeyCode::Char('q')]);
    }

    #[test]
    fn test_lone_escape() {
        let mut decoder = KeyDecoder::new();
        assert_eq!(keys(&decoder.feed(b"\x1bx")), vec![KeyCode::Esc, KeyCode::Char('x')]);
    }

    #[test]
    fn test_unknown_control_sequence_skipped() {
        let mut decoder = KeyDecoder::new();
        // Page Up followed by a key
        assert_eq!(keys(&decoder.feed(b"\x1b[5~l")), vec![KeyCode::Char('l')]);
    }

    #[test]
    fn test_telnet_commands_ignored() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(&[IAC, DO, 1, b'k', IAC, WILL, NAWS, IAC, 241]);
        assert_eq!(keys(&events), vec![KeyCode::Char('k')]);
    }

    #[test]
    fn test_window_size_report() {
        let mut decoder = KeyDecoder::new();
        let events = decoder.feed(&[IAC, SB, NAWS, 0, 120, 0, 40, IAC, SE]);
        assert_eq!(events, vec![TerminalEvent::Resize { width: 120, height: 40 }]);
    }

    #[test]
    fn test_window_size_split_and_escaped() {
        let mut decoder = KeyDecoder::new();
        assert!(decoder.feed(&[IAC, SB, NAWS, 0, IAC]).is_empty());
        // 255 columns is sent as IAC IAC
        let events = decoder.feed(&[IAC, 0, 50, IAC, SE, b'j']);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TerminalEvent::Resize { width: 255, height: 50 });
        assert_eq!(keys(&events), vec![KeyCode::Char('j')]);
    }

    #[test]
    fn test_garbage_is_bounded() {
        let mut decoder = KeyDecoder::new();
        let mut garbage = vec![IAC, SB];
        garbage.extend(std::iter::repeat(7).take(MAX_PENDING * 2));
        assert!(decoder.feed(&garbage).is_empty());
        assert_eq!(keys(&decoder.feed(b"h")), vec![KeyCode::Char('h')]);
    }
}
