//! The requester entry point: engine binding and URI targeting.

use std::fmt::Display;

use crate::engine::DispatchEngine;
use crate::error::UriError;
use crate::mapper::JsonMapper;
use crate::request::RequestBuilder;
use crate::uri;

/// Binds a dispatch engine and the JSON mappers used for every request
/// created from it.
///
/// A requester is cheap to build and is usually created per test from the
/// handler under test. [`to`](Self::to) resolves a URI template and opens a
/// request builder.
#[derive(Debug)]
pub struct Requester<E> {
    engine: E,
    send_mapper: JsonMapper,
    receive_mapper: JsonMapper,
}

impl<E: DispatchEngine> Requester<E> {
    /// Bind an engine with default JSON mappers.
    #[must_use]
    pub fn on(engine: E) -> Self {
        Self::on_with_mappers(engine, JsonMapper::new(), JsonMapper::new())
    }

    /// Bind an engine with one mapper used for both directions.
    #[must_use]
    pub fn on_with_mapper(engine: E, mapper: JsonMapper) -> Self {
        Self::on_with_mappers(engine, mapper.clone(), mapper)
    }

    /// Bind an engine with distinct serialization and deserialization
    /// mappers.
    #[must_use]
    pub fn on_with_mappers(engine: E, send_mapper: JsonMapper, receive_mapper: JsonMapper) -> Self {
        Self {
            engine,
            send_mapper,
            receive_mapper,
        }
    }

    /// Resolve a URI template and open a request builder targeting it.
    ///
    /// Placeholders in `pattern` are replaced positionally from `args`; the
    /// resolved URI is normalized to start with `/` and percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`UriError`] when the template is malformed or `args` runs
    /// out of values.
    pub fn to<'a>(
        &'a self,
        pattern: &str,
        args: &[&dyn Display],
    ) -> Result<RequestBuilder<'a, E>, UriError> {
        let uri = uri::build(pattern, args)?;
        Ok(RequestBuilder::new(
            &self.engine,
            uri,
            &self.send_mapper,
            &self.receive_mapper,
        ))
    }
}
