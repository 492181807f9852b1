/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! JSON representation of field instances.
//!
//! A field is a flat object: `"name"` holds the tag and every present
//! component is keyed by its camelCase label, e.g.
//!
//! ```json
//! {"name":"32A","date":"210101","currency":"USD","amount":"1000,"}
//! ```
//!
//! On input, alias keys fill the same component as the canonical key; the
//! canonical key wins when both are present.

use crate::field::Field;
use ironswift_core::error::{DecodeError, Result};
use ironswift_grammar::{FieldGrammar, TAG_JSON_KEY};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Key holding the tag name.
pub const NAME_KEY: &str = TAG_JSON_KEY;

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let present = self.components().iter().filter(|v| v.is_some()).count();
        let mut map = serializer.serialize_map(Some(present + 1))?;
        map.serialize_entry(NAME_KEY, self.name())?;
        for (def, value) in self.grammar().components().iter().zip(self.components()) {
            if let Some(value) = value {
                map.serialize_entry(&def.json_key(), value)?;
            }
        }
        map.end()
    }
}

impl Field {
    /// Serializes the field to a JSON string.
    ///
    /// # Errors
    /// Returns `SwiftError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Creates a field from a JSON string.
    ///
    /// # Errors
    /// Returns `SwiftError::Json` for malformed JSON, and the errors of
    /// [`Field::from_json_value`].
    pub fn from_json(grammar: Arc<FieldGrammar>, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(grammar, &value)
    }

    /// Creates a field from a parsed JSON document.
    ///
    /// Absent keys and `null` leave the component absent. Numbers are kept
    /// in their textual form.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidJson` if the document is not an object
    /// or a component is neither a string nor a number, and
    /// `DecodeError::TagMismatch` if `"name"` names another tag.
    pub fn from_json_value(grammar: Arc<FieldGrammar>, json: &Value) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| invalid(&grammar, "expected an object"))?;

        if let Some(name) = object.get(NAME_KEY) {
            let name = name
                .as_str()
                .ok_or_else(|| invalid(&grammar, "name must be a string"))?;
            if name != grammar.tag() {
                return Err(DecodeError::TagMismatch {
                    expected: grammar.tag().to_string(),
                    actual: name.to_string(),
                }
                .into());
            }
        }

        let mut field = Self::new(Arc::clone(&grammar));
        for def in grammar.components() {
            let canonical = def.json_key();
            let found = std::iter::once(canonical)
                .chain(def.alias_keys())
                .find_map(|key| lookup(object, &key));
            if let Some(value) = found {
                if let Some(text) = component_text(&grammar, &def.label, value)? {
                    field.set_component(def.position, text)?;
                }
            }
        }
        Ok(field)
    }
}

fn lookup<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn component_text(grammar: &FieldGrammar, label: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Null => Ok(None),
        _ => Err(invalid(grammar, &format!("component '{label}' must be a string")).into()),
    }
}

fn invalid(grammar: &FieldGrammar, reason: &str) -> DecodeError {
    DecodeError::InvalidJson {
        tag: grammar.tag().to_string(),
        reason: reason.to_string(),
    }
}
