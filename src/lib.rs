//! fileserv - minimal HTTP/1.0 file server
//!
//! Core library for request parsing, response writing and file transfer.

pub mod config;
pub mod http;
pub mod server;
