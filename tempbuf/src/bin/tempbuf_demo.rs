//! TempBuffer CLI Demo
//!
//! Stages stdin in memory, then replays it to stdout several times.
//!
//! Usage: `tempbuf_demo [REPEAT]` (default 2). Options JSON may be given in
//! the `TEMPBUF_OPTIONS` environment variable. Log filter from `RUST_LOG`
//! (default `info`), written to stderr.

use std::io;
use tempbuf::{stage_with, BufferOptions, StdIo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let repeat: usize = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 2,
    };
    let options = match std::env::var("TEMPBUF_OPTIONS") {
        Ok(json) => BufferOptions::from_json_str(&json)?,
        Err(_) => BufferOptions::default(),
    };
    tracing::info!("options: {options:?}, repeat: {repeat}");

    let mut buffer = stage_with(StdIo(io::stdin().lock()), &options)?;
    tracing::info!("staged {buffer:?}");

    let mut stdout = StdIo(io::stdout().lock());
    for round in 1..=repeat {
        let n = buffer.replay_into(&mut stdout)?;
        tracing::info!("replay {round}: {n} bytes");
    }

    Ok(())
}
