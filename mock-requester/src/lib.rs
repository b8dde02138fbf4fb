//! Fluent request building and response assertions for testing HTTP
//! handlers in-process.
//!
//! The crate wraps a [`DispatchEngine`] (anything that turns a
//! [`MockRequest`] into a [`MockResponse`], including plain closures and the
//! bundled [`Router`]) behind a chainable API: resolve a URI template, attach
//! parameters, headers, bodies, files, and credentials, dispatch, then assert
//! on the outcome and extract a typed body.
//!
//! ```
//! use mock_requester::{Method, MockResponse, Requester, Router};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Greeting {
//!     text: String,
//! }
//!
//! let app = Router::new().route(Method::Get, "/greetings/7", |_| {
//!     MockResponse::json(&Greeting {
//!         text: "hello".to_string(),
//!     })
//!     .map_err(Into::into)
//! });
//!
//! let greeting = Requester::on(app)
//!     .to("greetings/{id}", &[&7])?
//!     .get()?
//!     .expect_status(200)
//!     .return_as::<Greeting>()?
//!     .unwrap();
//! assert_eq!(greeting.text, "hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Assertion methods panic on mismatch, so a failed expectation fails the
//! surrounding test with a caller-side location. Infrastructure failures
//! (serialization, dispatch, conversion) are ordinary `Result`s.

mod auth;
mod constants;
mod convert;
mod engine;
mod error;
mod mapper;
mod request;
mod requester;
mod result;
mod testkit;
pub mod uri;

pub use auth::{BasicAuth, BearerToken, Csrf, RequestPostProcessor};
pub use convert::Primitive;
pub use engine::{DispatchEngine, FilePart, Method, MockRequest, MockResponse};
pub use error::{BoxError, ConvertError, RequestError, UriError};
pub use mapper::JsonMapper;
pub use request::RequestBuilder;
pub use requester::Requester;
pub use result::RequestResult;
pub use testkit::Router;
