//! OpenAPI specification ingestion
//!
//! The specification is kept as an opaque JSON tree. Only the `paths` object
//! and the operation fields the pipeline needs are destructured.

pub mod endpoint;

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

pub use endpoint::{CategoryMap, ParsedEndpoint};

/// Path item keys that name an operation
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// A parsed API specification snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    document: Value,
}

impl Specification {
    /// Wrap a JSON document, requiring only a `paths` object
    pub fn from_value(document: Value) -> AppResult<Self> {
        match document.get("paths") {
            Some(Value::Object(_)) => Ok(Self { document }),
            Some(_) => Err(AppError::InvalidSpec(
                "`paths` must be an object".to_string(),
            )),
            None => Err(AppError::InvalidSpec(
                "specification has no `paths` object".to_string(),
            )),
        }
    }

    /// Parse a specification from JSON text
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let document: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidSpec(format!("not valid JSON: {}", e)))?;
        Self::from_value(document)
    }

    /// Read and parse a specification file
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::InvalidSpec(format!("cannot read {}: {}", path.display(), e))
        })?;
        let document: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::InvalidSpec(format!("{} is not valid JSON: {}", path.display(), e))
        })?;
        Self::from_value(document)
    }

    /// The underlying document
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    /// `info.title`, when present
    pub fn title(&self) -> Option<&str> {
        self.document
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
    }

    fn paths(&self) -> Option<&Map<String, Value>> {
        self.document.get("paths").and_then(Value::as_object)
    }

    /// Every operation in document order
    pub fn operations(&self) -> impl Iterator<Item = Operation<'_>> {
        self.paths().into_iter().flatten().flat_map(|(path, item)| {
            item.as_object()
                .into_iter()
                .flat_map(|methods| methods.iter())
                .filter(|(method, _)| is_http_method(method))
                .map(move |(method, body)| Operation { method, path, body })
        })
    }

    /// Look up one operation by method (any case) and path
    pub fn operation(&self, method: &str, path: &str) -> Option<&Value> {
        let item = self.paths()?.get(path)?.as_object()?;
        item.iter()
            .find(|(key, _)| is_http_method(key) && key.eq_ignore_ascii_case(method))
            .map(|(_, body)| body)
    }
}

fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// One HTTP method at one path, borrowed from a specification
#[derive(Debug, Clone, Copy)]
pub struct Operation<'a> {
    method: &'a str,
    path: &'a str,
    body: &'a Value,
}

impl<'a> Operation<'a> {
    /// Method as written in the document
    pub fn method(&self) -> &'a str {
        self.method
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The full operation object
    pub fn body(&self) -> &'a Value {
        self.body
    }

    pub fn id(&self) -> OperationId {
        OperationId::new(self.method, self.path)
    }

    pub fn tags(&self) -> Vec<String> {
        self.body
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn summary(&self) -> &'a str {
        self.str_field("summary")
    }

    pub fn description(&self) -> &'a str {
        self.str_field("description")
    }

    fn str_field(&self, name: &str) -> &'a str {
        self.body.get(name).and_then(Value::as_str).unwrap_or("")
    }
}

/// Identity of an operation: upper-cased method plus path template
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId {
    pub method: String,
    pub path: String,
}

impl OperationId {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
