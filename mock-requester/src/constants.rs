//! Header names and media types shared across the crate.

/// Authorization header name.
pub(crate) const HEADER_AUTHORIZATION: &str = "Authorization";

/// Content-Type header name.
pub(crate) const HEADER_CONTENT_TYPE: &str = "Content-Type";

/// JSON media type set on serialized request bodies.
pub(crate) const MIME_JSON: &str = "application/json";

/// Request parameter carrying the CSRF token.
pub(crate) const CSRF_PARAM: &str = "_csrf";

/// Header carrying the CSRF token.
pub(crate) const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Number of random bytes in a generated CSRF token.
pub(crate) const CSRF_TOKEN_BYTES: usize = 16;
