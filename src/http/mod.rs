//! HTTP/1.0 request/response engine.
//!
//! Serves exactly one request per connection and only files named
//! `file<digit>.html` or `image<digit>.jpg` from the serving root.
//!
//! # Architecture
//!
//! - **`header`**: Accumulates bytes until the header terminator
//! - **`request`**: Request line, method and allow-listed filename types
//! - **`parser`**: Matches the request line against the grammar and classifies it
//! - **`response`**: Status codes and the fixed response shapes
//! - **`writer`**: Sends CR LF terminated lines and raw body bytes
//! - **`transfer`**: Streams a file behind a 200 header block
//! - **`mime`**: Content type by file extension
//! - **`connection`**: The per-connection state machine tying these together
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────────┐
//!        │ AwaitingHeader  │ ← Read until CR LF CR LF
//!        └──────┬──────────┘
//!               │ Header read (peer close or read error → Done)
//!               ▼
//!        ┌──────────────────┐
//!        │ Parsed           │ ← 200 / 404 / 400
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ Responding       │ ← Error lines or file transfer
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ Done             │ ← Caller closes the stream
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fileserv::config::Config;
//! use fileserv::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::default();
//!     let listener = TcpListener::bind("127.0.0.1:1701").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let mut conn = Connection::new(socket, cfg.static_files.clone());
//!         if let Err(e) = conn.run().await {
//!             eprintln!("Connection error: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod connection;
pub mod header;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod transfer;
pub mod writer;
