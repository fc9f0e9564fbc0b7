use fileserv::http::header::{HeaderRead, read_header};
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};

const REQUEST: &[u8] = b"GET /file1.html HTTP/1.0\r\nHost: localhost\r\n\r\n";

#[tokio::test]
async fn test_read_complete_header() {
    let mut input = REQUEST;
    let read = read_header(&mut input, 1024, 8192).await.unwrap();

    assert_eq!(
        read,
        HeaderRead::Complete(String::from_utf8_lossy(REQUEST).into_owned())
    );
}

#[tokio::test]
async fn test_terminator_across_any_chunk_size() {
    for chunk in 1..=REQUEST.len() + 1 {
        let mut input = REQUEST;
        let read = read_header(&mut input, chunk, 8192).await.unwrap();
        assert!(
            matches!(read, HeaderRead::Complete(ref text) if text.as_bytes() == REQUEST),
            "chunk size {}",
            chunk
        );
    }
}

#[tokio::test]
async fn test_terminator_split_across_writes() {
    let (mut client, mut server) = tokio::io::duplex(1024);

    let reader = tokio::spawn(async move { read_header(&mut server, 1024, 8192).await });

    client.write_all(b"GET /file1.html HTTP/1.0\r\n\r").await.unwrap();
    tokio::task::yield_now().await;
    client.write_all(b"\n").await.unwrap();

    let read = reader.await.unwrap().unwrap();
    assert_eq!(
        read,
        HeaderRead::Complete("GET /file1.html HTTP/1.0\r\n\r\n".to_string())
    );
}

#[tokio::test]
async fn test_stops_at_first_terminator_chunk() {
    // Bytes past the terminator in the same read are kept but nothing more is read.
    let mut input: &[u8] = b"GET /file1.html HTTP/1.0\r\n\r\nextra";
    let read = read_header(&mut input, 4096, 8192).await.unwrap();

    assert_eq!(
        read,
        HeaderRead::Complete("GET /file1.html HTTP/1.0\r\n\r\nextra".to_string())
    );
}

#[tokio::test]
async fn test_eof_before_terminator_is_partial() {
    let mut input: &[u8] = b"GET /file1.html HTTP/1.0\r\n";
    let read = read_header(&mut input, 8, 8192).await.unwrap();

    assert_eq!(
        read,
        HeaderRead::Partial("GET /file1.html HTTP/1.0\r\n".to_string())
    );
}

#[tokio::test]
async fn test_eof_without_data_is_closed() {
    let mut input: &[u8] = b"";
    let read = read_header(&mut input, 16, 8192).await.unwrap();

    assert_eq!(read, HeaderRead::Closed);
}

#[tokio::test]
async fn test_oversized_header_is_rejected() {
    let big = vec![b'a'; 1000];
    let mut input = big.as_slice();
    let read = read_header(&mut input, 64, 256).await.unwrap();

    assert_eq!(read, HeaderRead::TooLarge);
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() {
    let mut input: &[u8] = b"\xff\xfe\r\n\r\n";
    let read = read_header(&mut input, 16, 8192).await.unwrap();

    assert_eq!(read, HeaderRead::Complete("\u{fffd}\u{fffd}\r\n\r\n".to_string()));
}

struct FailingReader;

impl AsyncRead for FailingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")))
    }
}

#[tokio::test]
async fn test_read_error_is_returned() {
    let mut reader = FailingReader;
    let err = read_header(&mut reader, 16, 8192).await.unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
}
