use anyhow::{Context, Result};
use std::mem;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::config::StaticFilesConfig;
use crate::http::header::{HeaderRead, read_header};
use crate::http::parser::{StatusOutcome, Verdict, validate};
use crate::http::response::{Response, StatusCode};
use crate::http::transfer::send_file;
use crate::http::writer::ResponseWriter;

/// One request/response cycle on one stream.
pub struct Connection<S> {
    stream: S,
    settings: StaticFilesConfig,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    AwaitingHeader,
    Parsed(Verdict),
    Responding(Reply),
    Done,
}

/// The response path chosen for a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    BadRequest,
    NotFound { include_body: bool },
    File { path: PathBuf, include_body: bool },
}

impl From<Verdict> for Reply {
    fn from(verdict: Verdict) -> Self {
        let include_body = verdict.sends_body();
        match verdict.outcome {
            StatusOutcome::BadRequest => Reply::BadRequest,
            StatusOutcome::NotFound => Reply::NotFound { include_body },
            StatusOutcome::Ok(path) => Reply::File { path, include_body },
        }
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, settings: StaticFilesConfig) -> Self {
        Self {
            stream,
            settings,
            state: ConnectionState::AwaitingHeader,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the cycle to `Done`.
    ///
    /// Returns the status that was sent, or `None` when the peer closed
    /// without sending a request. I/O failures end the cycle early and are
    /// returned; the response may then be partial. The caller closes the
    /// stream either way.
    pub async fn run(&mut self) -> Result<Option<StatusCode>> {
        let mut sent = None;

        loop {
            match mem::replace(&mut self.state, ConnectionState::Done) {
                ConnectionState::AwaitingHeader => {
                    let read = read_header(
                        &mut self.stream,
                        self.settings.read_chunk_size,
                        self.settings.max_header_bytes,
                    )
                    .await
                    .context("failed to read request header")?;

                    self.state = match read {
                        HeaderRead::Complete(raw) | HeaderRead::Partial(raw) => {
                            ConnectionState::Parsed(validate(&raw, &self.settings.root).await)
                        }
                        HeaderRead::TooLarge => {
                            info!(limit = self.settings.max_header_bytes, "Request header too large");
                            ConnectionState::Parsed(Verdict::bad_request())
                        }
                        HeaderRead::Closed => ConnectionState::Done,
                    };
                }

                ConnectionState::Parsed(verdict) => {
                    debug!(outcome = ?verdict.outcome, "Request classified");
                    self.state = ConnectionState::Responding(Reply::from(verdict));
                }

                ConnectionState::Responding(reply) => {
                    sent = Some(self.respond(reply).await?);
                }

                ConnectionState::Done => break,
            }
        }

        Ok(sent)
    }

    async fn respond(&mut self, reply: Reply) -> Result<StatusCode> {
        let mut writer = ResponseWriter::new(&mut self.stream);

        let status = match reply {
            Reply::BadRequest => {
                info!("Sending 400 Bad Request");
                writer.send_response(&Response::bad_request(), true).await?;
                StatusCode::BadRequest
            }
            Reply::NotFound { include_body } => {
                info!("Sending 404 Not Found");
                writer
                    .send_response(&Response::not_found(), include_body)
                    .await?;
                StatusCode::NotFound
            }
            Reply::File { path, include_body } => {
                send_file(
                    &mut writer,
                    &path,
                    include_body,
                    self.settings.transfer_chunk_size,
                )
                .await?
            }
        };

        writer.flush().await?;
        debug!(bytes = writer.bytes_written(), "Response complete");
        Ok(status)
    }
}
