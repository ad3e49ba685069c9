//! Working representation of classified operations

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Operation, OperationId};

/// Normalized, classification-ready view of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedEndpoint {
    /// Upper-cased HTTP method
    pub method: String,
    pub path: String,
    /// Human-readable page title
    pub title: String,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Value>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    pub responses: Map<String, Value>,
}

impl ParsedEndpoint {
    /// Destructure an operation, attaching a generated title
    pub fn from_operation(operation: &Operation<'_>, title: String) -> Self {
        let body = operation.body();
        Self {
            method: operation.method().to_ascii_uppercase(),
            path: operation.path().to_string(),
            title,
            summary: operation.summary().to_string(),
            description: operation.description().to_string(),
            parameters: body
                .get("parameters")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            request_body: body.get("requestBody").cloned(),
            responses: body
                .get("responses")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn id(&self) -> OperationId {
        OperationId::new(&self.method, &self.path)
    }
}

/// Endpoints grouped by category, ordered by first appearance
///
/// Insertion order decides documentation order, so this is a list of groups
/// rather than a hash map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryMap {
    groups: Vec<(String, Vec<ParsedEndpoint>)>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an endpoint to its category, creating the category on first use
    pub fn push(&mut self, category: impl Into<String>, endpoint: ParsedEndpoint) {
        let category = category.into();
        match self.groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, endpoints)) => endpoints.push(endpoint),
            None => self.groups.push((category, vec![endpoint])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParsedEndpoint])> {
        self.groups
            .iter()
            .map(|(name, endpoints)| (name.as_str(), endpoints.as_slice()))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total endpoints across all categories
    pub fn endpoint_count(&self) -> usize {
        self.groups.iter().map(|(_, endpoints)| endpoints.len()).sum()
    }
}
