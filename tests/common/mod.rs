#![allow(dead_code)]

use fileserv::config::StaticFilesConfig;
use fileserv::http::connection::Connection;
use fileserv::http::response::StatusCode;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// A throwaway serving root, removed when dropped.
pub struct ServingRoot {
    dir: TempDir,
}

impl ServingRoot {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("fileserv-test-")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> PathBuf {
        let file = self.path().join(name);
        std::fs::write(&file, contents).unwrap();
        file
    }

    pub fn settings(&self) -> StaticFilesConfig {
        StaticFilesConfig {
            root: self.path().to_path_buf(),
            ..StaticFilesConfig::default()
        }
    }
}

/// Runs one connection cycle against `request` over an in-memory stream.
///
/// Returns the status the server reports and every byte it sent.
pub async fn exchange(settings: StaticFilesConfig, request: &[u8]) -> (Option<StatusCode>, Vec<u8>) {
    let (mut client, server) = tokio::io::duplex(64 * 1024);

    let handle = tokio::spawn(async move {
        let mut conn = Connection::new(server, settings);
        conn.run().await
    });

    client.write_all(request).await.unwrap();
    client.shutdown().await.unwrap();

    let mut response = Vec::new();
    client.read_to_end(&mut response).await.unwrap();

    let status = handle.await.unwrap().unwrap();
    (status, response)
}

/// Splits a response into its header lines and the bytes after the blank line.
pub fn split_response(response: &[u8]) -> (Vec<String>, Vec<u8>) {
    let end = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a blank line");
    let head = String::from_utf8_lossy(&response[..end]);
    let lines = head.split("\r\n").map(str::to_string).collect();
    (lines, response[end + 4..].to_vec())
}
