use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

const TERMINATOR: &[u8] = b"\r\n\r\n";

/// What the header reader collected from one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderRead {
    /// The terminator was seen. Holds everything read, which may include
    /// bytes past the terminator.
    Complete(String),
    /// The peer stopped sending before a terminator arrived.
    Partial(String),
    /// The peer closed without sending anything.
    Closed,
    /// More than the allowed number of bytes arrived without a terminator.
    TooLarge,
}

/// Reads until the accumulated bytes contain CR LF CR LF.
///
/// Reads at most `chunk_size` bytes per call. Detection does not depend on
/// how the terminator is split across reads. Read errors are returned
/// to the caller.
pub async fn read_header<R>(
    stream: &mut R,
    chunk_size: usize,
    max_bytes: usize,
) -> std::io::Result<HeaderRead>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(chunk_size);
    let mut temp = vec![0u8; chunk_size];

    loop {
        let n = stream.read(&mut temp).await?;

        if n == 0 {
            debug!(bytes = buffer.len(), "Peer closed before header terminator");
            if buffer.is_empty() {
                return Ok(HeaderRead::Closed);
            }
            return Ok(HeaderRead::Partial(into_text(&buffer)));
        }

        // Only the tail of the previous data can start a terminator.
        let search_from = buffer.len().saturating_sub(TERMINATOR.len() - 1);
        buffer.extend_from_slice(&temp[..n]);
        trace!(read = n, total = buffer.len(), "Header bytes read");

        if contains_terminator(&buffer[search_from..]) {
            return Ok(HeaderRead::Complete(into_text(&buffer)));
        }

        if buffer.len() > max_bytes {
            debug!(bytes = buffer.len(), limit = max_bytes, "Header exceeds limit");
            return Ok(HeaderRead::TooLarge);
        }
    }
}

fn contains_terminator(buf: &[u8]) -> bool {
    buf.windows(TERMINATOR.len()).any(|w| w == TERMINATOR)
}

fn into_text(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf).into_owned()
}
