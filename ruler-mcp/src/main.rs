//! Ruler MCP Server
//!
//! Tools:
//! - convert: Convert a length between cm, m, mm and ft
//! - list_units: List supported units and scale factors
//!
//! Resources:
//! - ruler://units - Unit table as markdown
//!
//! Configuration:
//! - RULER_PARSE_MODE: lenient (default) or strict
//! - RUST_LOG: log filter, logs go to stderr

mod config;
mod protocol;
mod server;
mod tools;

use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;
use config::{ServerConfig, DEFAULT_LOG_FILTER};
use protocol::{PROTOCOL_VERSION, SERVER_VERSION};
use server::Server;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    tracing::info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        parse_mode = config.parse_policy.name(),
        "Ruler MCP server started"
    );

    let server = Server::new(&config);
    let stdin = io::stdin();

    tracing::info!("server ready, waiting for requests");
    if let Err(e) = server.serve(stdin.lock(), io::stdout()) {
        tracing::error!(error = %e, "i/o error, stopping");
    }

    tracing::info!("server shutting down");
}
