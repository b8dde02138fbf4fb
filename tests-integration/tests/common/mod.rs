//! Fixture app shared by the end-to-end tests.

#![allow(dead_code)]

use mock_requester::{Method, MockResponse, Router};
use serde::{Deserialize, Serialize};

pub const HELLO_BODY: &str = "hello how low";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleObject {
    pub name: String,
    pub value: i64,
}

impl SimpleObject {
    pub fn sample() -> Self {
        Self {
            name: "test".to_string(),
            value: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullableObject {
    pub name: Option<String>,
    pub value: i64,
}

/// The demo application: a handful of endpoints covering text, JSON,
/// parameters, path variables, and non-UTF-8 payloads.
pub fn test_app() -> Router {
    Router::new()
        .route(Method::Get, "/test/hello", |_| {
            Ok(MockResponse::ok().with_body(HELLO_BODY))
        })
        .route(Method::Get, "/test/object", |_| {
            MockResponse::json(&SimpleObject::sample()).map_err(Into::into)
        })
        .route(Method::Get, "/test/7/object", |_| {
            MockResponse::json(&SimpleObject {
                name: "id-7".to_string(),
                value: 7,
            })
            .map_err(Into::into)
        })
        .route(Method::Get, "/test/params", |request| {
            let first = request.param("first").unwrap_or_default();
            let second = request.param("second").unwrap_or_default();
            Ok(MockResponse::ok().with_body(format!("{first}+{second}")))
        })
        .route(Method::Post, "/test/object", |request| {
            // Echo endpoint: returns exactly the JSON it was sent.
            let body = request.body().unwrap_or_default().to_vec();
            Ok(MockResponse::ok()
                .with_header("Content-Type", "application/json")
                .with_body(body))
        })
        .route(Method::Get, "/test/list", |_| {
            MockResponse::json(&vec![
                SimpleObject::sample(),
                SimpleObject {
                    name: "second".to_string(),
                    value: 43,
                },
            ])
            .map_err(Into::into)
        })
        .route(Method::Get, "/test/empty", |_| Ok(MockResponse::ok()))
        .route(Method::Delete, "/test/object", |_| {
            Ok(MockResponse::new(204))
        })
        .route(Method::Get, "/test/charset/cp1251", |_| {
            // The letter dje encoded as windows-1251.
            Ok(MockResponse::ok()
                .with_header("Content-Type", "text/plain;charset=windows-1251")
                .with_body(vec![0x90]))
        })
        .route(Method::Get, "/test/charset/utf8", |_| {
            Ok(MockResponse::ok().with_body("йо-хо-хойя"))
        })
        .route(Method::Get, "/test/header", |_| {
            Ok(MockResponse::ok().with_header("X-Request-Id", "abc-123"))
        })
}
