//! Planning: diffing prior state against a proposed configuration.

use serde_json::{Map, Value};

use crate::schema::Schema;
use crate::types::{AttributeChange, PlanResult};

/// Compute the plan for one resource instance.
///
/// - `proposed == null` plans a destroy: every set prior attribute is
///   removed and the planned state is null.
/// - No (or null) prior state plans a create.
/// - Otherwise attributes are compared one by one in name order. Computed-only
///   attributes are never diffed; their prior values carry into the planned
///   state. A change to a `force_new` attribute requires replacement.
pub fn plan_changes(schema: &Schema, prior: Option<&Value>, proposed: &Value) -> PlanResult {
    let prior = prior.filter(|p| !p.is_null());

    if proposed.is_null() {
        let changes = match prior {
            Some(prior) => schema
                .attributes
                .keys()
                .filter_map(|name| {
                    attr(prior, name).map(|value| AttributeChange::removed(name, value.clone()))
                })
                .collect(),
            None => Vec::new(),
        };
        return PlanResult::with_changes(Value::Null, changes, false);
    }

    let Some(prior) = prior else {
        let changes = schema
            .attributes
            .iter()
            .filter(|(_, a)| !a.flags.is_computed_only())
            .filter_map(|(name, _)| {
                attr(proposed, name).map(|value| AttributeChange::added(name, value.clone()))
            })
            .collect();
        return PlanResult::with_changes(proposed.clone(), changes, false);
    };

    let mut planned: Map<String, Value> = proposed.as_object().cloned().unwrap_or_default();
    let mut changes = Vec::new();
    let mut requires_replace = false;

    for (name, attribute) in &schema.attributes {
        if attribute.flags.is_computed_only() {
            if let Some(value) = attr(prior, name) {
                planned.insert(name.clone(), value.clone());
            }
            continue;
        }

        let change = match (attr(prior, name), attr(proposed, name)) {
            (None, None) => None,
            (Some(before), Some(after)) if before == after => None,
            (None, Some(after)) => Some(AttributeChange::added(name, after.clone())),
            (Some(before), None) => Some(AttributeChange::removed(name, before.clone())),
            (Some(before), Some(after)) => {
                Some(AttributeChange::modified(name, before.clone(), after.clone()))
            },
        };

        if let Some(change) = change {
            requires_replace |= attribute.force_new;
            changes.push(change);
        }
    }

    let planned = Value::Object(planned);
    if changes.is_empty() {
        PlanResult::no_change(planned)
    } else {
        PlanResult::with_changes(planned, changes, requires_replace)
    }
}

/// A set attribute of a state object.
///
/// Null, `""` and `[]` all count as unset: hydration writes empty values for
/// settings the configuration leaves out.
fn attr<'a>(state: &'a Value, name: &str) -> Option<&'a Value> {
    state.get(name).filter(|v| !is_unset(v))
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("domain", Attribute::required_string().with_force_new())
            .with_attribute("redirect", Attribute::optional_string())
    }

    #[test]
    fn test_plan_create() {
        let proposed = json!({"name": "web", "domain": "example.com", "redirect": null});
        let plan = plan_changes(&schema(), None, &proposed);

        assert_eq!(plan.planned_state, proposed);
        let paths: Vec<&str> = plan.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["domain", "name"]);
        assert!(!plan.requires_replace);
    }

    #[test]
    fn test_plan_null_prior_is_create() {
        let plan = plan_changes(&schema(), Some(&Value::Null), &json!({"name": "web"}));
        assert_eq!(plan.changes, vec![AttributeChange::added("name", json!("web"))]);
    }

    #[test]
    fn test_plan_no_change_carries_id() {
        let prior = json!({"id": "example.com", "name": "web", "domain": "example.com"});
        let proposed = json!({"name": "web", "domain": "example.com"});

        let plan = plan_changes(&schema(), Some(&prior), &proposed);

        assert!(plan.changes.is_empty());
        assert_eq!(plan.planned_state["id"], "example.com");
    }

    #[test]
    fn test_plan_in_place_update() {
        let prior = json!({"id": "example.com", "name": "web", "domain": "example.com"});
        let proposed = json!({"name": "web", "domain": "example.com", "redirect": "www.example.com"});

        let plan = plan_changes(&schema(), Some(&prior), &proposed);

        assert_eq!(
            plan.changes,
            vec![AttributeChange::added("redirect", json!("www.example.com"))]
        );
        assert!(!plan.requires_replace);
    }

    #[test]
    fn test_plan_force_new_requires_replace() {
        let prior = json!({"id": "example.com", "name": "web", "domain": "example.com"});
        let proposed = json!({"name": "web", "domain": "example.org"});

        let plan = plan_changes(&schema(), Some(&prior), &proposed);

        assert_eq!(
            plan.changes,
            vec![AttributeChange::modified(
                "domain",
                json!("example.com"),
                json!("example.org")
            )]
        );
        assert!(plan.requires_replace);
    }

    #[test]
    fn test_plan_removed_attribute() {
        let prior = json!({"id": "d", "name": "web", "domain": "d", "redirect": "x"});
        let proposed = json!({"name": "web", "domain": "d", "redirect": null});

        let plan = plan_changes(&schema(), Some(&prior), &proposed);

        assert_eq!(plan.changes, vec![AttributeChange::removed("redirect", json!("x"))]);
    }

    #[test]
    fn test_plan_empty_values_match_unset() {
        let schema = schema().with_attribute("target", Attribute::optional_string_list());
        let prior = json!({
            "id": "d",
            "name": "web",
            "domain": "d",
            "redirect": "",
            "target": []
        });

        let plan = plan_changes(&schema, Some(&prior), &json!({"name": "web", "domain": "d"}));
        assert!(plan.changes.is_empty());

        let plan = plan_changes(
            &schema,
            Some(&json!({"id": "d", "name": "web", "domain": "d"})),
            &json!({"name": "web", "domain": "d", "redirect": "", "target": []}),
        );
        assert!(plan.changes.is_empty());
    }

    #[test]
    fn test_plan_destroy() {
        let prior = json!({"id": "d", "name": "web", "domain": "d"});

        let plan = plan_changes(&schema(), Some(&prior), &Value::Null);

        assert_eq!(plan.planned_state, Value::Null);
        let paths: Vec<&str> = plan.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["domain", "id", "name"]);
    }
}
