//! Serve command handler
//!
//! Builds a tokio runtime and hands off to the web shell. The store itself
//! stays synchronous; the runtime exists only because the HTTP server needs
//! one.

use logger::error;
use roster::config::Config;
use roster::web;
use std::net::SocketAddr;

/// Handle `roster serve`
pub fn run(config: &Config, host: Option<&str>, port: Option<u16>) {
    let host = match host {
        Some(host) => host,
        None if config.server.host.is_empty() => "127.0.0.1",
        None => &config.server.host,
    };
    let port = port.unwrap_or(if config.server.port == 0 {
        5000
    } else {
        config.server.port
    });

    let addr: SocketAddr = match format!("{host}:{port}").parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("✗ Invalid bind address {host}:{port}: {e}");
            return;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to build tokio runtime: {e}");
            eprintln!("✗ Failed to start server: {e}");
            return;
        }
    };

    println!("✓ Serving the roster UI at http://{addr}/");
    if let Err(e) = runtime.block_on(web::run(addr, config.data_file_path())) {
        error!("Web server exited with error: {e}");
        eprintln!("✗ Server error: {e}");
    }
}
