//! Streaming an allow-listed file as a 200 response.

use anyhow::{Context, Result, bail};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tracing::{info, warn};

use crate::http::mime;
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Sends the file at `path` and returns the status actually sent.
///
/// The size is read before any byte is written, so a file that vanished
/// since validation is answered with 404 instead. Once the header block is
/// out, open and write failures abort the body and are returned as errors.
/// At most the advertised `Content-Length` bytes are sent.
pub async fn send_file<W>(
    writer: &mut ResponseWriter<'_, W>,
    path: &Path,
    include_body: bool,
    chunk_size: usize,
) -> Result<StatusCode>
where
    W: AsyncWrite + Unpin,
{
    let size = match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "File disappeared before transfer");
            writer
                .send_response(&Response::not_found(), include_body)
                .await?;
            return Ok(StatusCode::NotFound);
        }
    };

    info!(path = %path.display(), bytes = size, "Sending 200 OK");
    writer
        .send_response(&Response::file(size, mime::content_type(path)), false)
        .await?;

    if !include_body {
        return Ok(StatusCode::Ok);
    }

    let file = File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    stream_body(writer, file, size, chunk_size)
        .await
        .with_context(|| format!("transfer of {} aborted", path.display()))?;

    Ok(StatusCode::Ok)
}

/// Copies exactly `size` bytes of `body` in `chunk_size` pieces.
///
/// Never sends more than `size`; running out of input first is an error.
pub async fn stream_body<W, R>(
    writer: &mut ResponseWriter<'_, W>,
    body: R,
    size: u64,
    chunk_size: usize,
) -> Result<u64>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    let mut body = body.take(size);
    let mut buf = vec![0u8; chunk_size];
    let mut sent: u64 = 0;

    loop {
        let n = body.read(&mut buf).await.context("failed to read body")?;
        if n == 0 {
            break;
        }
        writer.send_bytes(&buf[..n]).await?;
        sent += n as u64;
    }

    if sent < size {
        bail!("body ended after {} of {} advertised bytes", sent, size);
    }
    Ok(sent)
}
