//! Configurable JSON mappers for outgoing and incoming bodies.
//!
//! A [`JsonMapper`] is a thin layer over `serde_json` whose behavior can be
//! adjusted per requester instance: null-excluding serialization and
//! arbitrary value-rewrite hooks on either side. Distinct send and receive
//! mappers can be bound through [`crate::Requester::on_with_mappers`] to test
//! custom serialization behavior.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

type Rewrite = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// JSON codec with optional per-instance behavior.
#[derive(Clone, Default)]
pub struct JsonMapper {
    skip_nulls: bool,
    outgoing: Option<Rewrite>,
    incoming: Option<Rewrite>,
}

impl fmt::Debug for JsonMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonMapper")
            .field("skip_nulls", &self.skip_nulls)
            .field("outgoing", &self.outgoing.is_some())
            .field("incoming", &self.incoming.is_some())
            .finish()
    }
}

impl JsonMapper {
    /// Default mapper: plain `serde_json`, no rewriting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop null object fields when serializing outgoing bodies.
    #[must_use]
    pub fn skip_nulls(mut self) -> Self {
        self.skip_nulls = true;
        self
    }

    /// Rewrite the serialized JSON tree before it is printed.
    #[must_use]
    pub fn map_outgoing(mut self, rewrite: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.outgoing = Some(Arc::new(rewrite));
        self
    }

    /// Rewrite the parsed JSON tree before it is deserialized.
    #[must_use]
    pub fn map_incoming(mut self, rewrite: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.incoming = Some(Arc::new(rewrite));
        self
    }

    /// Serialize a value to JSON text, applying the configured behavior.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if !self.skip_nulls && self.outgoing.is_none() {
            return serde_json::to_string(value);
        }
        let mut tree = serde_json::to_value(value)?;
        if self.skip_nulls {
            strip_nulls(&mut tree);
        }
        if let Some(rewrite) = &self.outgoing {
            tree = rewrite(tree);
        }
        serde_json::to_string(&tree)
    }

    /// Deserialize JSON text into a value, applying the configured behavior.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error.
    pub fn from_json<T: DeserializeOwned>(&self, text: &str) -> Result<T, serde_json::Error> {
        match &self.incoming {
            None => serde_json::from_str(text),
            Some(rewrite) => {
                let tree: Value = serde_json::from_str(text)?;
                serde_json::from_value(rewrite(tree))
            }
        }
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, field| !field.is_null());
            for field in map.values_mut() {
                strip_nulls(field);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_nulls(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::{Value, json};

    use super::JsonMapper;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct SimpleObject {
        name: Option<String>,
        value: i64,
    }

    #[test]
    fn default_mapper_is_plain_serde_json() {
        let mapper = JsonMapper::new();
        let text = mapper
            .to_json(&SimpleObject {
                name: None,
                value: 123,
            })
            .unwrap();
        assert_eq!(text, r#"{"name":null,"value":123}"#);

        let back: SimpleObject = mapper.from_json(&text).unwrap();
        assert_eq!(back.value, 123);
    }

    #[test]
    fn skip_nulls_drops_null_fields() {
        let mapper = JsonMapper::new().skip_nulls();
        let text = mapper
            .to_json(&SimpleObject {
                name: None,
                value: 123,
            })
            .unwrap();
        assert_eq!(text, r#"{"value":123}"#);
    }

    #[test]
    fn skip_nulls_recurses_into_nested_values() {
        let mapper = JsonMapper::new().skip_nulls();
        let text = mapper
            .to_json(&json!({"outer": {"inner": null, "kept": 1}, "list": [{"gone": null}]}))
            .unwrap();
        assert_eq!(text, r#"{"list":[{}],"outer":{"kept":1}}"#);
    }

    #[test]
    fn incoming_rewrite_runs_before_deserialization() {
        // Mirrors a deserializer that treats empty strings as absent values.
        let mapper = JsonMapper::new().map_incoming(|tree| match tree {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, field)| match field {
                        Value::String(text) if text.is_empty() => (key, Value::Null),
                        other => (key, other),
                    })
                    .collect(),
            ),
            other => other,
        });

        let object: SimpleObject = mapper.from_json(r#"{"name":"","value":123}"#).unwrap();
        assert_eq!(object.name, None);
    }

    #[test]
    fn outgoing_rewrite_runs_after_serialization() {
        let mapper = JsonMapper::new().map_outgoing(|mut tree| {
            if let Value::Object(map) = &mut tree {
                map.insert("stamped".to_string(), json!(true));
            }
            tree
        });
        let text = mapper.to_json(&json!({"value": 1})).unwrap();
        assert_eq!(text, r#"{"stamped":true,"value":1}"#);
    }
}
