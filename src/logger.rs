//! Console logging.
//!
//! Timestamped line logging to stdout/stderr; access logging is gated by
//! configuration at the call sites.

use chrono::Local;
use hyper::{Method, Uri};
use std::net::SocketAddr;
use std::path::Path;

use crate::config::Settings;

fn stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

pub fn log_server_start(addr: &SocketAddr, settings: &Settings) {
    println!("======================================");
    println!("Management console started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", settings.logging.level);
    println!("Server home: {}", settings.console.home);
    if let Some(workers) = settings.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[{}] [Connection] Accepted from: {peer_addr}", stamp());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[{}] [ERROR] Failed to serve connection: {err:?}", stamp());
}

pub fn log_request(method: &Method, uri: &Uri) {
    println!("[{}] [Request] {method} {uri}", stamp());
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    println!("[{}] [API] {method} {path} - {status}", stamp());
}

pub fn log_error(message: &str) {
    eprintln!("[{}] [ERROR] {message}", stamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[{}] [WARN] {message}", stamp());
}

pub fn log_install_request(request: &str) {
    println!("[{}] [Dependency] Install requested: {request}", stamp());
}

pub fn log_registered_artifact(path: &Path) {
    println!(
        "[{}] [Dependency] Registered artifact: {}",
        stamp(),
        path.display()
    );
}
