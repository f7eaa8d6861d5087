//! Per-callback resource state.
//!
//! [`ResourceData`] is the context a lifecycle callback reads its inputs from
//! and writes remote state back into. Writes are checked against the resource
//! [`Schema`]; typed inputs are decoded with [`ResourceData::decode`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ProviderError;
use crate::schema::Schema;
use crate::validation::check_type;

/// The attribute holding the tracked identity.
pub const ID_FIELD: &str = "id";

/// State of one resource instance for the duration of a callback.
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Schema,
    id: String,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Empty resource data for `schema`.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            id: String::new(),
            attributes: Map::new(),
        }
    }

    /// Load resource data from a host state object.
    ///
    /// A null state loads as empty. Attributes the schema does not declare are
    /// dropped.
    pub fn from_state(schema: Schema, state: &Value) -> Result<Self, ProviderError> {
        let mut data = Self::new(schema);
        let obj = match state {
            Value::Null => return Ok(data),
            Value::Object(obj) => obj,
            other => {
                return Err(ProviderError::Validation(format!(
                    "resource state must be an object, got {}",
                    other
                )))
            },
        };

        for (name, value) in obj {
            if name == ID_FIELD {
                match value {
                    Value::String(id) => data.id = id.clone(),
                    Value::Null => {},
                    other => {
                        return Err(ProviderError::Validation(format!(
                            "attribute 'id' must be a string, got {}",
                            other
                        )))
                    },
                }
            } else if data.schema.attribute(name).is_some() {
                data.attributes.insert(name.clone(), value.clone());
            }
        }
        Ok(data)
    }

    /// The schema this data is checked against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The tracked identity; empty when the resource is not (or no longer) tracked.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the tracked identity. An empty id marks the resource as gone.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Whether the tracked identity has been cleared.
    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    /// Raw value of an attribute.
    pub fn get(&self, field: &str) -> Option<&Value> {
        if field == ID_FIELD {
            return None;
        }
        self.attributes.get(field)
    }

    /// String value of an attribute; empty when unset.
    pub fn get_string(&self, field: &str) -> Result<String, ProviderError> {
        if field == ID_FIELD {
            return Ok(self.id.clone());
        }
        match self.attributes.get(field) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(ProviderError::Validation(format!(
                "attribute '{}' must be a string, got {}",
                field, other
            ))),
        }
    }

    /// Write an attribute.
    ///
    /// Fails if the schema does not declare `field` or the value has the wrong
    /// type. Writing `id` sets the tracked identity.
    pub fn set(&mut self, field: &str, value: impl Serialize) -> Result<(), ProviderError> {
        let value = serde_json::to_value(value)?;

        if field == ID_FIELD {
            return match value {
                Value::String(id) => {
                    self.id = id;
                    Ok(())
                },
                Value::Null => {
                    self.id.clear();
                    Ok(())
                },
                other => Err(ProviderError::Validation(format!(
                    "attribute 'id' must be a string, got {}",
                    other
                ))),
            };
        }

        let attr = self.schema.attribute(field).ok_or_else(|| {
            ProviderError::Validation(format!("attribute '{}' is not in the schema", field))
        })?;

        if let Some(diagnostic) = check_type(&attr.attr_type, &value, field).into_iter().next() {
            return Err(ProviderError::Validation(format!(
                "{}: {}",
                diagnostic.summary,
                diagnostic.detail.unwrap_or_default()
            )));
        }

        self.attributes.insert(field.to_string(), value);
        Ok(())
    }

    /// Decode the attributes (and `id`) into a typed configuration.
    ///
    /// Null attributes are treated as absent so `#[serde(default)]` applies.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ProviderError> {
        let mut obj: Map<String, Value> = self
            .attributes
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if !self.id.is_empty() {
            obj.insert(ID_FIELD.to_string(), Value::String(self.id.clone()));
        }
        serde_json::from_value(Value::Object(obj)).map_err(|e| {
            ProviderError::Validation(format!("invalid resource configuration: {}", e))
        })
    }

    /// Convert back into a host state object.
    ///
    /// Returns null when the tracked identity was cleared.
    pub fn into_state(self) -> Value {
        if self.id.is_empty() {
            return Value::Null;
        }
        let mut obj = self.attributes;
        obj.insert(ID_FIELD.to_string(), Value::String(self.id));
        Value::Object(obj)
    }
}
