//! Fluent request builder: configuration accumulation and dispatch.

use std::fmt::Display;

use log::debug;
use serde::Serialize;

use crate::auth::{BasicAuth, BearerToken, Csrf, RequestPostProcessor};
use crate::constants::{HEADER_AUTHORIZATION, MIME_JSON};
use crate::engine::{DispatchEngine, FilePart, Method, MockRequest};
use crate::error::RequestError;
use crate::mapper::JsonMapper;
use crate::result::RequestResult;

enum Payload {
    Empty,
    Json(Vec<u8>),
    Multipart { token: Option<String> },
}

/// Accumulates request configuration and performs exactly one dispatch.
///
/// Created by [`crate::Requester::to`]; never shared or reused across
/// requests. Parameters and headers append (repeated names accumulate in
/// insertion order); re-adding a file under the same field name overwrites
/// the previous part; post-processors run in insertion order after all
/// parameters and headers have been applied.
pub struct RequestBuilder<'a, E> {
    engine: &'a E,
    uri: String,
    params: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    files: Vec<FilePart>,
    post_processors: Vec<Box<dyn RequestPostProcessor>>,
    send_mapper: &'a JsonMapper,
    receive_mapper: &'a JsonMapper,
}

impl<'a, E: DispatchEngine> RequestBuilder<'a, E> {
    pub(crate) fn new(
        engine: &'a E,
        uri: String,
        send_mapper: &'a JsonMapper,
        receive_mapper: &'a JsonMapper,
    ) -> Self {
        Self {
            engine,
            uri,
            params: Vec::new(),
            headers: Vec::new(),
            files: Vec::new(),
            post_processors: Vec::new(),
            send_mapper,
            receive_mapper,
        }
    }

    /// Append a request parameter.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Display) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Append several values under one parameter name.
    #[must_use]
    pub fn with_params<I>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.params.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Append a request header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Display) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Append several values under one header name.
    #[must_use]
    pub fn with_headers<I>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Register a multipart file for [`upload`](Self::upload).
    ///
    /// Re-adding the same field name overwrites the earlier part.
    #[must_use]
    pub fn with_file(
        mut self,
        field_name: &str,
        original_file_name: &str,
        mime_type: Option<&str>,
        data: &[u8],
    ) -> Self {
        let part = FilePart::new(field_name, original_file_name, mime_type, data.to_vec());
        match self.files.iter_mut().find(|f| f.name() == field_name) {
            Some(existing) => *existing = part,
            None => self.files.push(part),
        }
        self
    }

    /// Authenticate with an OAuth bearer token.
    #[must_use]
    pub fn with_oauth(self, token: &str) -> Self {
        self.with_post_processor(BearerToken::new(token))
    }

    /// Authenticate with HTTP basic credentials.
    #[must_use]
    pub fn with_basic_auth(self, username: &str, password: &str) -> Self {
        self.with_post_processor(BasicAuth::new(username, password))
    }

    /// Attach a generated CSRF token.
    #[must_use]
    pub fn with_csrf(self) -> Self {
        self.with_post_processor(Csrf::new())
    }

    /// Register a custom post-processor, applied in insertion order at
    /// dispatch time.
    #[must_use]
    pub fn with_post_processor(mut self, post_processor: impl RequestPostProcessor + 'static) -> Self {
        self.post_processors.push(Box::new(post_processor));
        self
    }

    /// Dispatch a GET request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn get(self) -> Result<RequestResult, RequestError> {
        self.dispatch(Method::Get, Payload::Empty)
    }

    /// Dispatch a GET request with a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when serialization or the engine fails.
    pub fn get_json<T: Serialize>(self, body: &T) -> Result<RequestResult, RequestError> {
        let payload = self.serialize(body)?;
        self.dispatch(Method::Get, payload)
    }

    /// Dispatch a POST request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn post(self) -> Result<RequestResult, RequestError> {
        self.dispatch(Method::Post, Payload::Empty)
    }

    /// Dispatch a POST request with a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when serialization or the engine fails.
    pub fn post_json<T: Serialize>(self, body: &T) -> Result<RequestResult, RequestError> {
        let payload = self.serialize(body)?;
        self.dispatch(Method::Post, payload)
    }

    /// Dispatch a PUT request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn put(self) -> Result<RequestResult, RequestError> {
        self.dispatch(Method::Put, Payload::Empty)
    }

    /// Dispatch a PUT request with a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when serialization or the engine fails.
    pub fn put_json<T: Serialize>(self, body: &T) -> Result<RequestResult, RequestError> {
        let payload = self.serialize(body)?;
        self.dispatch(Method::Put, payload)
    }

    /// Dispatch a DELETE request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn delete(self) -> Result<RequestResult, RequestError> {
        self.dispatch(Method::Delete, Payload::Empty)
    }

    /// Dispatch a DELETE request with a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when serialization or the engine fails.
    pub fn delete_json<T: Serialize>(self, body: &T) -> Result<RequestResult, RequestError> {
        let payload = self.serialize(body)?;
        self.dispatch(Method::Delete, payload)
    }

    /// Dispatch a multipart POST with every file registered through
    /// [`with_file`](Self::with_file).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn upload(self) -> Result<RequestResult, RequestError> {
        self.dispatch(Method::Post, Payload::Multipart { token: None })
    }

    /// Multipart POST with a bearer token injected before dispatch.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the engine fails.
    pub fn upload_with_auth(self, token: &str) -> Result<RequestResult, RequestError> {
        self.dispatch(
            Method::Post,
            Payload::Multipart {
                token: Some(token.to_string()),
            },
        )
    }

    fn serialize<T: Serialize>(&self, body: &T) -> Result<Payload, RequestError> {
        let text = self
            .send_mapper
            .to_json(body)
            .map_err(RequestError::Serialize)?;
        Ok(Payload::Json(text.into_bytes()))
    }

    /// The shared prepare-and-dispatch step: parameters, then headers, then
    /// the payload, then post-processors, then exactly one engine call.
    fn dispatch(self, method: Method, payload: Payload) -> Result<RequestResult, RequestError> {
        let Self {
            engine,
            uri,
            params,
            headers,
            files,
            post_processors,
            send_mapper: _,
            receive_mapper,
        } = self;

        let mut request = MockRequest::new(method, uri);
        for (name, value) in params {
            request.add_param(name, value);
        }
        for (name, value) in headers {
            request.add_header(name, value);
        }
        match payload {
            Payload::Empty => {}
            Payload::Json(body) => request.set_body(MIME_JSON, body),
            Payload::Multipart { token } => {
                if let Some(token) = token {
                    if !token.trim().is_empty() {
                        request.add_header(HEADER_AUTHORIZATION, format!("Bearer {token}"));
                    }
                }
                for part in files {
                    request.add_part(part);
                }
            }
        }
        for post_processor in &post_processors {
            request = post_processor.post_process(request);
        }

        debug!("dispatching {} {}", request.method(), request.uri());
        let response = engine
            .dispatch(request.clone())
            .map_err(RequestError::Dispatch)?;
        Ok(RequestResult::new(request, response, receive_mapper.clone()))
    }
}
