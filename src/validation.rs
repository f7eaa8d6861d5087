//! Schema validation helpers.
//!
//! Validates `serde_json::Value` configuration against a [`Schema`] and reports
//! problems as [`Diagnostic`]s with dotted attribute paths.
//!
//! # Example
//!
//! ```
//! use vercel_provider::schema::{Attribute, Schema};
//! use vercel_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("name", Attribute::required_string())
//!     .with_attribute("target", Attribute::optional_string_list());
//!
//! let diagnostics = validate(&schema, &json!({"name": "web", "target": ["production"]}));
//! assert!(diagnostics.is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"name": "web", "target": ["production", 1]}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("target.1".to_string()));
//! ```

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema};
use serde_json::Value;

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Optional attributes may be absent or null
/// - Computed-only attributes are skipped (the provider sets these)
/// - Attribute types must match the schema
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match value {
        Value::Object(map) => map,
        Value::Null => {
            // An absent configuration only fails if something is required
            for (name, attr) in &schema.attributes {
                validate_attribute(attr, None, name, &mut diagnostics);
            }
            return diagnostics;
        },
        _ => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", value_type_name(value))),
            );
            return diagnostics;
        },
    };

    for (name, attr) in &schema.attributes {
        validate_attribute(attr, obj.get(name), name, &mut diagnostics);
    }

    diagnostics
}

/// Validate a JSON value against a schema, returning Ok if valid or Err with diagnostics.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if a JSON value is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

/// Check a single value against an attribute type.
///
/// Null is accepted for every type. Used when the provider writes attributes
/// back into resource data.
pub fn check_type(attr_type: &AttributeType, value: &Value, path: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if !value.is_null() {
        validate_attribute_type(attr_type, value, path, &mut diagnostics);
    }
    diagnostics
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.is_computed_only() {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => validate_attribute_type(&attr.attr_type, v, path, diagnostics),
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, "string", value));
            }
        },
        AttributeType::List(element_type) => {
            if let Some(arr) = value.as_array() {
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                }
            } else {
                diagnostics.push(type_error(path, "list", value));
            }
        },
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!(
            "Expected {}, got {}",
            expected,
            value_type_name(got)
        ))
        .with_attribute(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Schema};
    use serde_json::json;

    fn env_schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("key", Attribute::required_string())
            .with_attribute("target", Attribute::optional_string_list())
    }

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(validate(&schema, &json!({"name": "web"})).is_empty());

        let diagnostics = validate(&schema, &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("name".to_string()));
        assert!(diagnostics[0].summary.contains("Missing required"));

        let diagnostics = validate(&schema, &json!({"name": null}));
        assert_eq!(diagnostics.len(), 1);

        let diagnostics = validate(&schema, &json!({"name": 123}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
        assert_eq!(
            diagnostics[0].detail,
            Some("Expected string, got number".to_string())
        );
    }

    #[test]
    fn test_validate_optional_attribute() {
        let schema = Schema::v0().with_attribute("redirect", Attribute::optional_string());

        assert!(validate(&schema, &json!({"redirect": "www.example.com"})).is_empty());
        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"redirect": null})).is_empty());
        assert_eq!(validate(&schema, &json!({"redirect": true})).len(), 1);
    }

    #[test]
    fn test_validate_computed_attribute_skipped() {
        let schema = Schema::v0().with_attribute("id", Attribute::computed_string());

        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"id": 123})).is_empty());
    }

    #[test]
    fn test_validate_list() {
        let schema = env_schema();

        let config = json!({"name": "web", "key": "API_URL", "target": ["production", "preview"]});
        assert!(validate(&schema, &config).is_empty());

        let config = json!({"name": "web", "key": "API_URL", "target": []});
        assert!(validate(&schema, &config).is_empty());

        let config = json!({"name": "web", "key": "API_URL", "target": ["production", 7]});
        let diagnostics = validate(&schema, &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("target.1".to_string()));

        let config = json!({"name": "web", "key": "API_URL", "target": "production"});
        let diagnostics = validate(&schema, &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].detail,
            Some("Expected list, got string".to_string())
        );
    }

    #[test]
    fn test_validate_multiple_errors() {
        let diagnostics = validate(&env_schema(), &json!({"name": 1, "target": {}}));
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_validate_null_config() {
        let diagnostics = validate(&env_schema(), &Value::Null);
        assert_eq!(diagnostics.len(), 2);

        let optional_only = Schema::v0().with_attribute("team_id", Attribute::optional_string());
        assert!(validate(&optional_only, &Value::Null).is_empty());
    }

    #[test]
    fn test_validate_root_not_object() {
        let diagnostics = validate(&env_schema(), &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected object"));
        assert!(diagnostics[0].attribute.is_none());
    }

    #[test]
    fn test_check_type() {
        let list = AttributeType::list(AttributeType::String);
        assert!(check_type(&list, &json!(["a", "b"]), "target").is_empty());
        assert!(check_type(&list, &Value::Null, "target").is_empty());
        assert_eq!(check_type(&list, &json!("a"), "target").len(), 1);
        assert_eq!(check_type(&AttributeType::String, &json!(["a"]), "key").len(), 1);
    }

    #[test]
    fn test_helpers() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(is_valid(&schema, &json!({"name": "web"})));
        assert!(!is_valid(&schema, &json!({})));

        assert!(validate_result(&schema, &json!({"name": "web"})).is_ok());
        let result = validate_result(&schema, &json!({}));
        assert_eq!(result.unwrap_err().len(), 1);
    }
}
