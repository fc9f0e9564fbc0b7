/// Status codes the server produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use fileserv::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// The first line sent for this status.
    ///
    /// Only a successful response carries the protocol version; the error
    /// responses start with the bare code and phrase.
    ///
    /// ```
    /// # use fileserv::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.status_line(), "HTTP/1.0 200 OK");
    /// assert_eq!(StatusCode::BadRequest.status_line(), "400 Bad Request");
    /// ```
    pub fn status_line(&self) -> String {
        match self {
            StatusCode::Ok => format!("HTTP/1.0 {} {}", self.as_u16(), self.reason_phrase()),
            _ => format!("{} {}", self.as_u16(), self.reason_phrase()),
        }
    }
}

/// A response made only of text lines.
///
/// `body` lines follow the blank line that ends the header block; a file
/// body is streamed separately and is never part of this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, String)>,
    pub body: &'static [&'static str],
}

impl Response {
    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BadRequest,
            headers: vec![("Content-Type", "text/html".to_string())],
            body: &["Bad Request", "The server could not understand the request"],
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NotFound,
            headers: vec![("Content-Type", "text/html".to_string())],
            body: &[
                "404 Not Found",
                "The requested file could not be found or is not permitted",
            ],
        }
    }

    /// Header block announcing a file of `content_length` bytes.
    pub fn file(content_length: u64, content_type: Option<&str>) -> Self {
        let mut headers = vec![("Content-Length", content_length.to_string())];
        if let Some(ct) = content_type {
            headers.push(("Content-Type", ct.to_string()));
        }
        Self {
            status: StatusCode::Ok,
            headers,
            body: &[],
        }
    }

    /// Every line to transmit, without terminators: the status line, the
    /// headers, an empty line, then the body lines when `include_body`.
    pub fn lines(&self, include_body: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(2 + self.headers.len() + self.body.len());
        lines.push(self.status.status_line());
        for (key, value) in &self.headers {
            lines.push(format!("{}: {}", key, value));
        }
        lines.push(String::new());
        if include_body {
            lines.extend(self.body.iter().map(|line| line.to_string()));
        }
        lines
    }
}
