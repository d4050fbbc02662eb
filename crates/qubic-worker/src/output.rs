//! Event output on stdout
//!
//! Stdout carries protocol events only. Logs go to stderr.

use std::io::{self, Write};

use crate::protocol::Event;

/// Write one event as a single JSON line and flush
pub fn write_event<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    let line = serde_json::to_string(event)?;
    writeln!(out, "{line}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_event_is_one_line() {
        let mut buf = Vec::new();
        write_event(&mut buf, &Event::Progress { depth: 1, score: 7 }).unwrap();
        write_event(&mut buf, &Event::result(None)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, [r#"{"type":"progress","depth":1,"score":7}"#, r#"{"type":"result","move":null}"#]);
    }
}
