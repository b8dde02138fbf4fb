//! Response inspection: assertions and body extraction.

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use serde::de::DeserializeOwned;

use crate::convert::Primitive;
use crate::engine::{MockRequest, MockResponse};
use crate::error::{ConvertError, RequestError};
use crate::mapper::JsonMapper;

/// The outcome of one dispatched request.
///
/// Assertions (`expect_*`) panic on mismatch so a failing expectation fails
/// the surrounding test directly; extraction (`return_*`) reports
/// infrastructure problems as [`RequestError`] or [`ConvertError`] instead.
/// Assertion methods return `self`, so a chain can assert and then extract.
#[derive(Debug)]
pub struct RequestResult {
    request: MockRequest,
    response: MockResponse,
    charset: &'static Encoding,
    mapper: JsonMapper,
}

impl RequestResult {
    pub(crate) fn new(request: MockRequest, response: MockResponse, mapper: JsonMapper) -> Self {
        Self {
            request,
            response,
            charset: UTF_8,
            mapper,
        }
    }

    /// Decode the response body with the given charset instead of UTF-8.
    ///
    /// Affects every later extraction on this result.
    #[must_use]
    pub fn charset(mut self, charset: &'static Encoding) -> Self {
        self.charset = charset;
        self
    }

    /// Assert the response status code.
    ///
    /// # Panics
    ///
    /// Panics when the status differs.
    #[track_caller]
    #[must_use]
    pub fn expect_status(self, status: u16) -> Self {
        self.dump();
        if self.response.status() != status {
            panic!(
                "expected status {status}, got {} from {} {}",
                self.response.status(),
                self.request.method(),
                self.request.uri(),
            );
        }
        self
    }

    /// Assert a response header value.
    ///
    /// # Panics
    ///
    /// Panics when the header is absent or differs.
    #[track_caller]
    #[must_use]
    pub fn expect_header(self, name: &str, value: &str) -> Self {
        self.dump();
        let actual = self.response.header(name);
        if actual != Some(value) {
            panic!(
                "expected header {name}: {value}, got {actual:?} from {} {}",
                self.request.method(),
                self.request.uri(),
            );
        }
        self
    }

    /// Run an arbitrary check against the raw response.
    #[must_use]
    pub fn do_expect(self, check: impl FnOnce(&MockResponse)) -> Self {
        self.dump();
        check(&self.response);
        self
    }

    /// Deserialize the response body as JSON.
    ///
    /// A blank body yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Deserialize`] when the body is not valid JSON
    /// for `T`.
    pub fn return_as<T: DeserializeOwned>(&self) -> Result<Option<T>, RequestError> {
        self.dump();
        let text = self.body_text();
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.mapper
            .from_json(&text)
            .map(Some)
            .map_err(RequestError::Deserialize)
    }

    /// Parse the response body as a scalar value.
    ///
    /// A blank body yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError`] when the text is not a valid value of `T`.
    pub fn return_as_primitive<T: Primitive>(&self) -> Result<Option<T>, ConvertError> {
        self.dump();
        let text = self.body_text();
        if text.is_empty() {
            return Ok(None);
        }
        T::from_text(&text).map(Some)
    }

    /// Consume the result and hand back the raw response.
    #[must_use]
    pub fn return_response(self) -> MockResponse {
        self.response
    }

    /// The response body decoded with the configured charset.
    #[must_use]
    pub fn body_text(&self) -> String {
        let (text, _, _) = self.charset.decode(self.response.body());
        text.into_owned()
    }

    /// The request that produced this result.
    #[must_use]
    pub fn request(&self) -> &MockRequest {
        &self.request
    }

    /// The raw response.
    #[must_use]
    pub fn response(&self) -> &MockResponse {
        &self.response
    }

    fn dump(&self) {
        debug!(
            "exchange: {} {} -> {} {:?} body {:?}",
            self.request.method(),
            self.request.uri(),
            self.response.status(),
            self.response.headers(),
            String::from_utf8_lossy(self.response.body()),
        );
    }
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1251;
    use serde::Deserialize;

    use super::*;
    use crate::engine::Method;

    fn result_with(response: MockResponse) -> RequestResult {
        RequestResult::new(
            MockRequest::new(Method::Get, "/test".to_string()),
            response,
            JsonMapper::new(),
        )
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct SimpleObject {
        name: String,
        value: i64,
    }

    #[test]
    fn expect_status_passes_through_on_match() {
        let result = result_with(MockResponse::new(404)).expect_status(404);
        assert_eq!(result.response().status(), 404);
    }

    #[test]
    #[should_panic(expected = "expected status 200, got 404")]
    fn expect_status_panics_on_mismatch() {
        let _ = result_with(MockResponse::new(404)).expect_status(200);
    }

    #[test]
    fn expect_header_matches_case_insensitively() {
        let response = MockResponse::ok().with_header("X-Custom", "yes");
        let _ = result_with(response).expect_header("x-custom", "yes");
    }

    #[test]
    #[should_panic(expected = "expected header X-Custom: yes")]
    fn expect_header_panics_when_absent() {
        let _ = result_with(MockResponse::ok()).expect_header("X-Custom", "yes");
    }

    #[test]
    fn return_as_deserializes_the_body() {
        let response = MockResponse::ok().with_body(r#"{"name":"test","value":42}"#);
        let object: Option<SimpleObject> = result_with(response).return_as().unwrap();
        assert_eq!(
            object,
            Some(SimpleObject {
                name: "test".to_string(),
                value: 42,
            })
        );
    }

    #[test]
    fn return_as_treats_blank_body_as_none() {
        let object: Option<SimpleObject> = result_with(MockResponse::ok()).return_as().unwrap();
        assert_eq!(object, None);
        let blank = MockResponse::ok().with_body("  ");
        let object: Option<SimpleObject> = result_with(blank).return_as().unwrap();
        assert_eq!(object, None);
    }

    #[test]
    fn return_as_reports_malformed_json() {
        let response = MockResponse::ok().with_body("not json");
        let err = result_with(response).return_as::<SimpleObject>().unwrap_err();
        assert!(matches!(err, RequestError::Deserialize(_)));
    }

    #[test]
    fn return_as_primitive_parses_scalars() {
        let response = MockResponse::ok().with_body("1987");
        assert_eq!(
            result_with(response).return_as_primitive::<i32>().unwrap(),
            Some(1987)
        );
        assert_eq!(
            result_with(MockResponse::ok())
                .return_as_primitive::<i32>()
                .unwrap(),
            None
        );
    }

    #[test]
    fn charset_changes_body_decoding() {
        // 0x90 is the cyrillic letter dje in windows-1251.
        let response = MockResponse::ok().with_body(vec![0x90]);
        assert_eq!(result_with(response).charset(WINDOWS_1251).body_text(), "ђ");

        // UTF-8 bytes of the same letter read as windows-1251 text.
        let response = MockResponse::ok().with_body(vec![0xD1, 0x92]);
        assert_eq!(
            result_with(response).charset(WINDOWS_1251).body_text(),
            "С’"
        );
    }

    #[test]
    fn do_expect_hands_out_the_raw_response() {
        let response = MockResponse::new(201).with_body("created");
        let _ = result_with(response).do_expect(|raw| {
            assert_eq!(raw.status(), 201);
            assert_eq!(raw.body(), b"created");
        });
    }
}
