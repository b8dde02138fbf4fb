//! Request/response descriptors and the dispatch-engine boundary.
//!
//! The library never touches a network: a fully-prepared [`MockRequest`] is
//! handed to a [`DispatchEngine`] which invokes the handler code under test
//! in-process and returns a [`MockResponse`]. Any type implementing the trait
//! works, including plain closures:
//!
//! ```
//! use mock_requester::{BoxError, MockRequest, MockResponse, Requester};
//!
//! let engine = |request: MockRequest| -> Result<MockResponse, BoxError> {
//!     Ok(MockResponse::ok().with_body(request.uri().to_string()))
//! };
//!
//! let echoed = Requester::on(engine)
//!     .to("items/{id}", &[&7])?
//!     .get()?
//!     .return_as_primitive::<String>()?;
//! assert_eq!(echoed.as_deref(), Some("/items/7"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constants::HEADER_CONTENT_TYPE;
use crate::error::BoxError;

/// HTTP method of an outgoing mock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP DELETE.
    Delete,
}

impl Method {
    /// Canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One multipart file part of an outgoing request.
///
/// Parts carry the multipart field name, the original filename, an optional
/// MIME type, and the raw content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    name: String,
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl FilePart {
    /// Create a part for the given multipart field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<&str>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: file_name.into(),
            content_type: content_type.map(ToString::to_string),
            data: data.into(),
        }
    }

    /// The multipart field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original filename.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The MIME type, if one was set.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The raw content bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The content as UTF-8 text, if valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// A fully-prepared request descriptor handed to the dispatch engine.
///
/// Parameters and headers are insertion-ordered multimaps: repeated names
/// accumulate, nothing is silently dropped. File parts are unique per field
/// name. Post-processors mutate the descriptor through [`add_param`] and
/// [`add_header`] immediately before dispatch.
///
/// [`add_param`]: MockRequest::add_param
/// [`add_header`]: MockRequest::add_header
#[derive(Debug, Clone)]
pub struct MockRequest {
    method: Method,
    uri: String,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    parts: Vec<FilePart>,
}

impl MockRequest {
    pub(crate) fn new(method: Method, uri: String) -> Self {
        // Query pairs baked into the URI surface as request parameters,
        // the same way a server parses them before invoking a handler.
        let params = uri
            .split_once('?')
            .map(|(_, query)| {
                query
                    .split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| {
                        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                        (percent_decode(name), percent_decode(value))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            method,
            uri,
            params,
            headers: Vec::new(),
            body: None,
            parts: Vec::new(),
        }
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The absolute, encoded target URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The path portion of the URI, before any `?`.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.split('?').next().unwrap_or(&self.uri)
    }

    /// All parameters in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First value of the named parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All values of the named parameter, in insertion order.
    #[must_use]
    pub fn param_all(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// All headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the named header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All values of the named header (case-insensitive), in insertion order.
    #[must_use]
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// The raw request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The request body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// All multipart file parts.
    #[must_use]
    pub fn parts(&self) -> &[FilePart] {
        &self.parts
    }

    /// The file part registered under the given field name.
    #[must_use]
    pub fn part(&self, name: &str) -> Option<&FilePart> {
        self.parts.iter().find(|part| part.name() == name)
    }

    /// Append one parameter value. Repeated names accumulate.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.push((name.into(), value.into()));
    }

    /// Append one header value. Repeated names accumulate.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub(crate) fn set_body(&mut self, content_type: &str, body: Vec<u8>) {
        self.add_header(HEADER_CONTENT_TYPE, content_type);
        self.body = Some(body);
    }

    pub(crate) fn add_part(&mut self, part: FilePart) {
        self.parts.push(part);
    }
}

fn percent_decode(text: &str) -> String {
    urlencoding::decode(text).map_or_else(|_| text.to_string(), std::borrow::Cow::into_owned)
}

/// A completed response descriptor returned by the dispatch engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl MockResponse {
    /// Create an empty response with the given status code.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Create an empty `200 OK` response.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Create a `200 OK` response with a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when serialization fails.
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok()
            .with_header(HEADER_CONTENT_TYPE, "application/json")
            .with_body(serde_json::to_vec(value)?))
    }

    /// Add a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the response body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// All headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of the named header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// The in-process dispatch boundary.
///
/// Implementors accept a fully-prepared request and synchronously produce a
/// response; the trait is also implemented for any matching `Fn` closure.
pub trait DispatchEngine {
    /// Execute one request and produce its response.
    ///
    /// # Errors
    ///
    /// Any error is wrapped into [`crate::RequestError::Dispatch`] at the
    /// dispatch boundary.
    fn dispatch(&self, request: MockRequest) -> Result<MockResponse, BoxError>;
}

impl<F> DispatchEngine for F
where
    F: Fn(MockRequest) -> Result<MockResponse, BoxError>,
{
    fn dispatch(&self, request: MockRequest) -> Result<MockResponse, BoxError> {
        self(request)
    }
}
