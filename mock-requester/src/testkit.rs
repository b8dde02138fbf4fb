//! A minimal routing engine for wiring handler functions into tests.
//!
//! [`Router`] matches on method and exact path, which is enough for fixture
//! apps whose URIs are resolved before dispatch. Unmatched requests get an
//! empty `404` response rather than an error, mirroring how a real server
//! answers unknown paths.

use log::trace;

use crate::engine::{DispatchEngine, Method, MockRequest, MockResponse};
use crate::error::BoxError;

type Handler = Box<dyn Fn(&MockRequest) -> Result<MockResponse, BoxError> + Send + Sync>;

/// Dispatch engine routing by method and exact path.
#[derive(Default)]
pub struct Router {
    routes: Vec<(Method, String, Handler)>,
}

impl Router {
    /// An empty router answering every request with `404`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a method and exact path.
    ///
    /// The path is matched against the request path, so query parameters do
    /// not affect routing. Routes are tried in registration order.
    #[must_use]
    pub fn route(
        mut self,
        method: Method,
        path: impl Into<String>,
        handler: impl Fn(&MockRequest) -> Result<MockResponse, BoxError> + Send + Sync + 'static,
    ) -> Self {
        self.routes.push((method, path.into(), Box::new(handler)));
        self
    }
}

impl DispatchEngine for Router {
    fn dispatch(&self, request: MockRequest) -> Result<MockResponse, BoxError> {
        for (method, path, handler) in &self.routes {
            if *method == request.method() && path == request.path() {
                trace!("routing {} {} to a handler", request.method(), request.path());
                return handler(&request);
            }
        }
        trace!("no route for {} {}", request.method(), request.path());
        Ok(MockResponse::new(404))
    }
}
