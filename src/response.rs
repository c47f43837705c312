use crate::error::{RestError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Response is the parsed JSON body of a successful API call.
/// The API has no strict schema, so access goes through path lookups and
/// ordered fallbacks rather than fixed structs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(pub Value);

impl Response {
    pub fn new(value: Value) -> Self {
        Response(value)
    }

    /// Get the raw JSON value
    pub fn raw(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Get a value by a slash-separated path.
    /// For example, "author/username" reads the "username" field inside "author".
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.0, path)
    }

    /// Get a string value by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Whether the top-level object has `key`, whatever its value
    pub fn has_field(&self, key: &str) -> bool {
        self.0.as_object().is_some_and(|map| map.contains_key(key))
    }

    pub fn is_array(&self) -> bool {
        self.0.is_array()
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        self.0.as_array()
    }

    /// First candidate path holding a non-blank value
    pub fn first_of(&self, candidates: &[&str]) -> Option<&Value> {
        first_present(&self.0, candidates)
    }

    /// Unmarshal the response into the provided type
    pub fn apply<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(self.0.clone()).map_err(RestError::from)
    }
}

impl From<Value> for Response {
    fn from(value: Value) -> Self {
        Response(value)
    }
}

/// Walk a slash-separated path through objects and arrays
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('/').filter(|s| !s.is_empty()) {
        current = match current {
            Value::Object(map) => map.get(part)?,
            Value::Array(arr) => {
                let index: usize = part.parse().ok()?;
                arr.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Blank values are skipped by fallback lookups: null, empty string,
/// `false`, zero, and empty arrays or objects.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Evaluate candidate paths in order and return the first non-blank value
pub fn first_present<'a>(value: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup(value, path))
        .find(|v| !is_blank(v))
}

/// Result of decoding a payload defensively: either the shape the
/// endpoint promises, or whatever came back instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<T> {
    Expected(T),
    Unexpected(Value),
}

impl<T: DeserializeOwned> Shape<T> {
    /// Decode without failing; a mismatch keeps the original value
    pub fn decode(value: Value) -> Self {
        match T::deserialize(&value) {
            Ok(decoded) => Shape::Expected(decoded),
            Err(_) => Shape::Unexpected(value),
        }
    }
}

impl<T> Shape<T> {
    pub fn is_expected(&self) -> bool {
        matches!(self, Shape::Expected(_))
    }

    /// Turn an unexpected payload into a `ResponseShape` error
    pub fn into_result(self, operation: &'static str, expected: &'static str) -> Result<T> {
        match self {
            Shape::Expected(value) => Ok(value),
            Shape::Unexpected(_) => Err(RestError::shape(operation, expected)),
        }
    }
}

/// User reference returned by register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
}

/// Payload of register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Ids arrive as strings or as numbers depending on the backend
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}
