use std::fmt;
use std::path::{Path, PathBuf};

/// Request methods the server answers.
///
/// GET and HEAD share one status/header derivation; HEAD never receives a
/// body. Everything else is a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
}

impl Method {
    /// Parses a method token.
    ///
    /// # Example
    ///
    /// ```
    /// # use fileserv::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("POST"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "HEAD" => Some(Method::HEAD),
            _ => None,
        }
    }

    /// The method a line begins with, by literal prefix.
    ///
    /// ```
    /// # use fileserv::http::request::Method;
    /// assert_eq!(Method::from_prefix("GETX /a HTTP/1.0"), Some(Method::GET));
    /// assert_eq!(Method::from_prefix("HEAD"), Some(Method::HEAD));
    /// assert_eq!(Method::from_prefix(" GET"), None);
    /// ```
    pub fn from_prefix(line: &str) -> Option<Self> {
        if line.starts_with("GET") {
            Some(Method::GET)
        } else if line.starts_with("HEAD") {
            Some(Method::HEAD)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
        }
    }

    /// Whether a response to this method carries a body.
    pub fn sends_body(&self) -> bool {
        matches!(self, Method::GET)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file name of the form `file<digit>.html` or `image<digit>.jpg`.
///
/// Only the parser constructs these, and only from text that matched the
/// request grammar, so a value never contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedFilename(String);

impl AllowedFilename {
    pub(crate) fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path of this file under the serving root.
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

/// The parsed first line of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// The target with its leading `/` removed.
    pub filename: AllowedFilename,
    /// `HTTP/1.0` or `HTTP/1.1`
    pub version: String,
}
