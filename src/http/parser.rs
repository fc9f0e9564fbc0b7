use crate::http::request::{AllowedFilename, Method, RequestLine};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

static REQUEST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(GET|HEAD) /(file[0-9]\.html|image[0-9]\.jpg) (HTTP/1\.[01])$")
        .expect("request line pattern is valid")
});

/// Why a request line did not match the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not begin with a recognized method.
    UnsupportedMethod,
    /// The line begins with `GET` or `HEAD` but the rest does not match.
    Malformed(Method),
}

impl ParseError {
    /// A recognized method with a bad remainder is a missing resource;
    /// anything else is a malformed request.
    pub fn outcome(&self) -> StatusOutcome {
        match self {
            ParseError::UnsupportedMethod => StatusOutcome::BadRequest,
            ParseError::Malformed(_) => StatusOutcome::NotFound,
        }
    }

    pub fn method(&self) -> Option<Method> {
        match self {
            ParseError::UnsupportedMethod => None,
            ParseError::Malformed(method) => Some(*method),
        }
    }
}

/// The classification of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 200, with the resolved path of an existing file.
    Ok(PathBuf),
    /// 404
    NotFound,
    /// 400
    BadRequest,
}

/// The outcome together with the method it was derived for, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: StatusOutcome,
    pub method: Option<Method>,
}

impl Verdict {
    pub fn bad_request() -> Self {
        Self {
            outcome: StatusOutcome::BadRequest,
            method: None,
        }
    }

    /// HEAD gets the same status and headers as GET, without a body.
    pub fn sends_body(&self) -> bool {
        self.method.is_none_or(|m| m.sends_body())
    }
}

/// Returns the text before the first CR LF, or all of `raw` if there is none.
pub fn request_line(raw: &str) -> &str {
    match raw.find("\r\n") {
        Some(end) => &raw[..end],
        None => raw,
    }
}

/// Matches one request line against
/// `(GET|HEAD) SP "/" (file[0-9].html | image[0-9].jpg) SP HTTP/1.[01]`.
///
/// The match is anchored and case-sensitive.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    if let Some(caps) = REQUEST_LINE.captures(line) {
        let method = Method::from_str(&caps[1]).ok_or(ParseError::UnsupportedMethod)?;
        return Ok(RequestLine {
            method,
            filename: AllowedFilename::new(&caps[2]),
            version: caps[3].to_string(),
        });
    }

    // Literal prefix, checked before any splitting: `GETX` and `GET\t/` count.
    match Method::from_prefix(line) {
        Some(method) => Err(ParseError::Malformed(method)),
        None => Err(ParseError::UnsupportedMethod),
    }
}

/// Classifies a raw header block.
///
/// Only the first line is inspected. A grammatical request is 200 when the
/// file exists as a regular file under `root` and 404 otherwise. This
/// checks the filesystem but never opens the file.
pub async fn validate(raw: &str, root: &Path) -> Verdict {
    let line = request_line(raw);

    let request = match parse_request_line(line) {
        Ok(request) => request,
        Err(e) => {
            info!(reason = ?e, line = %line.escape_debug(), "Request line rejected");
            return Verdict {
                outcome: e.outcome(),
                method: e.method(),
            };
        }
    };

    debug!(
        method = %request.method,
        file = request.filename.as_str(),
        version = %request.version,
        "Request line accepted"
    );

    let path = request.filename.resolve(root);
    let exists = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);

    let outcome = if exists {
        StatusOutcome::Ok(path)
    } else {
        info!(path = %path.display(), "Requested file does not exist");
        StatusOutcome::NotFound
    };

    Verdict {
        outcome,
        method: Some(request.method),
    }
}
