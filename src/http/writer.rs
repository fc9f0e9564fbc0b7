use anyhow::{Context, Result, bail};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::http::response::Response;

/// Writes response lines and raw body bytes to one connection.
pub struct ResponseWriter<'a, W> {
    stream: &'a mut W,
    written: u64,
}

impl<'a, W> ResponseWriter<'a, W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(stream: &'a mut W) -> Self {
        Self { stream, written: 0 }
    }

    /// Sends `line` followed by CR LF in a single write.
    ///
    /// The terminator is always appended, even when `line` already ends
    /// with one. A failed or short write is an error and is not retried.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 2);
        buf.extend_from_slice(line.as_bytes());
        buf.extend_from_slice(b"\r\n");

        let n = self
            .stream
            .write(&buf)
            .await
            .context("failed to write response line")?;
        self.written += n as u64;

        if n < buf.len() {
            bail!("short write: {} of {} bytes of a response line", n, buf.len());
        }

        trace!(line = %line.escape_debug(), "Line sent");
        Ok(())
    }

    /// Sends every line of `response`; body lines only when `include_body`.
    pub async fn send_response(&mut self, response: &Response, include_body: bool) -> Result<()> {
        for line in response.lines(include_body) {
            self.send_line(&line).await?;
        }
        Ok(())
    }

    /// Sends raw body bytes with no terminator.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream
            .write_all(bytes)
            .await
            .context("failed to write response body")?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.stream.flush().await.context("failed to flush response")?;
        Ok(())
    }

    /// Total bytes handed to the stream so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }
}
