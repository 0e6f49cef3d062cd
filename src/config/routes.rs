//! Service route table loading.
//!
//! The table comes from a single JSON object mapping logical service names
//! to routing targets. A malformed table must not take the gateway down, so
//! any parse problem is logged and replaced by an empty table.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::error::RouteTableParseError;

/// Logical service name → routing target (URL string or structured value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable(Map<String, Value>);

impl RouteTable {
    pub fn get(&self, service: &str) -> Option<&Value> {
        self.0.get(service)
    }

    /// The target of `service` when it is a plain string.
    pub fn target_url(&self, service: &str) -> Option<&str> {
        self.get(service).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RouteTable {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Parse a route table, falling back to an empty table on any error.
pub fn load_route_table(raw_json: &str) -> RouteTable {
    match parse_route_table(raw_json) {
        Ok(table) => {
            tracing::debug!(routes = ?table.0, "Loaded service routes");
            table
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse SERVICE_ROUTES_JSON, using empty route table");
            RouteTable::default()
        }
    }
}

fn parse_route_table(raw_json: &str) -> Result<RouteTable, RouteTableParseError> {
    match serde_json::from_str::<Value>(raw_json)? {
        Value::Object(map) => Ok(RouteTable(map)),
        other => Err(RouteTableParseError::NotAnObject(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
