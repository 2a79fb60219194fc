use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A single input/output record submitted for evaluation.
///
/// Arbitrary fields (`input`, `actual_output`, `context`, ...) live in
/// `properties` and are flattened into the JSON object next to the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub example_id: String,
    pub created_at: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Example {
    /// Creates an empty example with a fresh id and creation timestamp.
    pub fn new() -> Self {
        Self {
            example_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            name: None,
            properties: Map::new(),
        }
    }

    pub fn builder() -> ExampleBuilder {
        ExampleBuilder {
            example: Example::new(),
        }
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Keys of the user-supplied properties, sorted.
    pub fn property_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for Example {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ExampleBuilder {
    example: Example,
}

impl ExampleBuilder {
    /// Adds a property. `example_id`, `created_at` and `name` set the typed
    /// fields instead so they are never serialized twice.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "example_id" => self.example.example_id = value_to_string(value),
            "created_at" => self.example.created_at = value_to_string(value),
            "name" => {
                self.example.name = match value {
                    Value::Null => None,
                    other => Some(value_to_string(other)),
                }
            }
            _ => {
                self.example.properties.insert(key, value);
            }
        }
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.example.name = Some(name.into());
        self
    }

    pub fn build(self) -> Example {
        self.example
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
