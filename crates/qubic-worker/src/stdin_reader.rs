use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError};

use crate::protocol::{Request, parse_request};

/// Input seen by the main loop
#[derive(Debug)]
pub enum Input {
    Request(Request),
    /// Line that could not be parsed; reported back as an `error` event
    Malformed(String),
    /// Stdin reached EOF or failed
    Closed,
}

/// Spawn stdin reader thread
pub fn spawn_stdin_reader(tx: Sender<Input>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        read_input(stdin.lock(), &tx);
        log::debug!("Stdin reader thread exiting");
    })
}

/// Forward every non-empty line of `reader` to `tx`, then `Input::Closed`
pub fn read_input<R: BufRead>(reader: R, tx: &Sender<Input>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                match e.kind() {
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => {
                        log::info!("Stdin closed, shutting down gracefully");
                    }
                    _ => log::error!("Stdin read error: {e}"),
                }
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        log::debug!("Received: {line}");
        let input = match parse_request(line) {
            Ok(request) => Input::Request(request),
            Err(e) => {
                log::warn!("Failed to parse request '{line}': {e}");
                Input::Malformed(e.to_string())
            }
        };

        match tx.try_send(input) {
            Ok(()) => {}
            Err(TrySendError::Full(input)) => {
                log::warn!("Command channel full, dropping {input:?}");
            }
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("Command channel disconnected, exiting stdin reader");
                return;
            }
        }
    }

    // The main loop must see EOF even when the channel is momentarily full
    if tx.send(Input::Closed).is_err() {
        log::debug!("Channel closed before EOF could be reported");
    }
}
