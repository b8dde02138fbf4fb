//! Authentication post-processors applied to a request before dispatch.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::constants::{CSRF_HEADER, CSRF_PARAM, CSRF_TOKEN_BYTES, HEADER_AUTHORIZATION};
use crate::engine::MockRequest;

/// A unit of request mutation applied immediately before dispatch.
///
/// Post-processors registered on a request builder run in insertion order,
/// each receiving the descriptor produced by the previous one.
pub trait RequestPostProcessor {
    /// Mutate the outgoing request.
    fn post_process(&self, request: MockRequest) -> MockRequest;
}

/// Adds `Authorization: Bearer <token>`.
///
/// A blank token adds no header at all; the endpoint under test is expected
/// to reject the request itself.
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Post-processor carrying the given OAuth token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl RequestPostProcessor for BearerToken {
    fn post_process(&self, mut request: MockRequest) -> MockRequest {
        if !self.token.trim().is_empty() {
            request.add_header(HEADER_AUTHORIZATION, format!("Bearer {}", self.token));
        }
        request
    }
}

/// Adds `Authorization: Basic <base64(user:password)>`.
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    /// Post-processor carrying the given credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl RequestPostProcessor for BasicAuth {
    fn post_process(&self, mut request: MockRequest) -> MockRequest {
        let credentials = STANDARD.encode(format!("{}:{}", self.username, self.password));
        request.add_header(HEADER_AUTHORIZATION, format!("Basic {credentials}"));
        request
    }
}

/// Adds a generated CSRF token as both the `_csrf` parameter and the
/// `X-CSRF-TOKEN` header.
pub struct Csrf {
    token: String,
}

impl Csrf {
    /// Post-processor carrying a freshly generated token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: random_token(),
        }
    }
}

impl Default for Csrf {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestPostProcessor for Csrf {
    fn post_process(&self, mut request: MockRequest) -> MockRequest {
        request.add_param(CSRF_PARAM, self.token.clone());
        request.add_header(CSRF_HEADER, self.token.clone());
        request
    }
}

fn random_token() -> String {
    let mut bytes = [0u8; CSRF_TOKEN_BYTES];
    if getrandom::fill(&mut bytes).is_err() {
        // An entropy failure must not abort the test; any opaque token works.
        bytes = *b"mock-csrf-token!";
    }
    let mut token = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        token.push_str(&format!("{byte:02x}"));
    }
    token
}
