// JSON-lines search worker for the 4x4x4 line game

use std::io;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{bounded, select};
use qubic_core::SearchConfig;
use qubic_worker::host::Host;
use qubic_worker::panic::install_panic_hook;
use qubic_worker::protocol::Event;
use qubic_worker::stdin_reader::{Input, spawn_stdin_reader};

const CHANNEL_SIZE: usize = 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Maximum iterative-deepening depth (1..=20), unless a request overrides it
    #[arg(long, default_value_t = SearchConfig::default().max_depth)]
    max_depth: u8,

    /// Time budget used when a request has no timeLimitMs
    #[arg(long, default_value_t = SearchConfig::default().default_time_limit_ms)]
    time_limit_ms: u64,

    /// Expected number of transposition table entries
    #[arg(long, default_value_t = SearchConfig::default().tt_capacity)]
    tt_capacity: usize,
}

impl Args {
    fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.max_depth,
            default_time_limit_ms: self.time_limit_ms,
            tt_capacity: self.tt_capacity,
        }
    }
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    // stdout is reserved for protocol events
    .target(env_logger::Target::Stderr)
    .init();

    install_panic_hook();

    if let Err(e) = run(&args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.search_config();
    config.validate()?;
    log::debug!("Search config: {config:?}");

    let mut host = Host::new(config, io::stdout())?;
    let worker_rx = host.worker_receiver();
    let (cmd_tx, cmd_rx) = bounded::<Input>(CHANNEL_SIZE);
    let stdin_handle = spawn_stdin_reader(cmd_tx);

    // Main event loop - process requests and worker messages concurrently
    loop {
        select! {
            recv(cmd_rx) -> input => {
                match input {
                    Ok(Input::Request(request)) => host.handle_request(request)?,
                    Ok(Input::Malformed(message)) => host.emit(&Event::error(message))?,
                    Ok(Input::Closed) | Err(_) => {
                        log::debug!("Input closed");
                        break;
                    }
                }
            }
            recv(worker_rx) -> msg => {
                match msg {
                    Ok(msg) => host.handle_worker_message(msg)?,
                    Err(_) => log::debug!("Worker channel closed"),
                }
            }
        }
    }

    host.shutdown()?;

    match stdin_handle.join() {
        Ok(()) => log::debug!("Stdin reader thread joined successfully"),
        Err(_) => log::error!("Stdin reader thread panicked"),
    }
    Ok(())
}
