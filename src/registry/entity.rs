//! jCard normalization.
//!
//! RDAP entities carry contact data as `vcardArray`:
//! `["vcard", [[key, params, valueType, value], ...]]`. Each record is
//! flattened into a [`ContactEntity`]. A malformed record becomes
//! [`ContactEntity::Invalid`] in place; the rest are still processed.

use serde_json::{json, Map, Value};

use crate::registry::types::{ContactEntity, UNKNOWN_ADDRESS};

/// Normalize the `entities` array of an RDAP response.
pub fn normalize_entities(entities: &[Value]) -> Vec<ContactEntity> {
    entities.iter().map(|e| normalize_record(contact_record(e))).collect()
}

/// The jCard of an RDAP entity object, or the value itself when it is
/// already a bare record.
fn contact_record(entity: &Value) -> &Value {
    match entity {
        Value::Object(object) => object.get("vcardArray").unwrap_or(&Value::Null),
        other => other,
    }
}

/// Normalize a single `[typeTag, detailList]` record.
pub fn normalize_record(record: &Value) -> ContactEntity {
    let Some(parts) = record.as_array().filter(|parts| parts.len() >= 2) else {
        return ContactEntity::Invalid;
    };
    if parts[0].as_str() != Some("vcard") {
        return ContactEntity::Invalid;
    }
    let Some(details) = parts[1].as_array() else {
        return ContactEntity::Invalid;
    };

    let mut fields = Map::new();
    for detail in details {
        let property = detail.as_array();
        let key = property.and_then(|p| p.first()).and_then(Value::as_str);
        let value = property.and_then(|p| p.get(3));

        let (Some(key), Some(value)) = (key, value) else {
            tracing::debug!(detail = %detail, "Skipping vCard property without key or value");
            continue;
        };

        if key == "adr" {
            let params = property.and_then(|p| p.get(1));
            fields.insert(key.to_string(), address(params, value));
        } else {
            fields.insert(key.to_string(), value.clone());
        }
    }

    ContactEntity::Vcard(fields)
}

fn address(params: Option<&Value>, value: &Value) -> Value {
    let label = params
        .and_then(|p| p.get("label"))
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN_ADDRESS);
    let details = if value.is_array() {
        value.clone()
    } else {
        Value::Array(Vec::new())
    };
    json!({ "label": label, "details": details })
}
