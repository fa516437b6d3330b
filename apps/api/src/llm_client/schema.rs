//! Typed description of the JSON shape a model response must follow.
//!
//! Serialises to the generative-language API's schema dialect
//! (`{"type": "OBJECT", "properties": {...}, "required": [...]}`).
//! Property order is preserved on the wire.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Revision of the output contracts built from this module. Bump when a
/// field is added, renamed or retyped in any schema.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Object {
        properties: Vec<(&'static str, Schema)>,
        required: Vec<&'static str>,
    },
    Array(Box<Schema>),
    String { allowed: Vec<&'static str> },
    Integer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<&'static str>,
}

impl Schema {
    pub fn string() -> Self {
        Self::from_kind(SchemaKind::String { allowed: vec![] })
    }

    pub fn string_enum(allowed: &[&'static str]) -> Self {
        Self::from_kind(SchemaKind::String {
            allowed: allowed.to_vec(),
        })
    }

    pub fn integer() -> Self {
        Self::from_kind(SchemaKind::Integer)
    }

    pub fn array(items: Schema) -> Self {
        Self::from_kind(SchemaKind::Array(Box::new(items)))
    }

    pub fn string_array() -> Self {
        Self::array(Self::string())
    }

    pub fn object(properties: Vec<(&'static str, Schema)>) -> Self {
        Self::from_kind(SchemaKind::Object {
            properties,
            required: vec![],
        })
    }

    /// Marks every property of an object schema as required.
    pub fn all_required(mut self) -> Self {
        if let SchemaKind::Object {
            properties,
            required,
        } = &mut self.kind
        {
            *required = properties.iter().map(|(name, _)| *name).collect();
        }
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn from_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self.kind {
            SchemaKind::Object { .. } => "OBJECT",
            SchemaKind::Array(_) => "ARRAY",
            SchemaKind::String { .. } => "STRING",
            SchemaKind::Integer => "INTEGER",
        }
    }

    /// Looks up a direct property of an object schema.
    #[cfg(test)]
    pub fn property(&self, name: &str) -> Option<&Schema> {
        match &self.kind {
            SchemaKind::Object { properties, .. } => properties
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }
}

struct OrderedProperties<'a>(&'a [(&'static str, Schema)]);

impl Serialize for OrderedProperties<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, schema) in self.0 {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;
        if let Some(description) = self.description {
            map.serialize_entry("description", description)?;
        }
        match &self.kind {
            SchemaKind::Object {
                properties,
                required,
            } => {
                map.serialize_entry("properties", &OrderedProperties(properties))?;
                if !required.is_empty() {
                    map.serialize_entry("required", required)?;
                }
            }
            SchemaKind::Array(items) => map.serialize_entry("items", items.as_ref())?,
            SchemaKind::String { allowed } if !allowed.is_empty() => {
                map.serialize_entry("enum", allowed)?;
            }
            SchemaKind::String { .. } | SchemaKind::Integer => {}
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_serializes_in_declaration_order() {
        let schema = Schema::object(vec![
            ("zeta", Schema::string()),
            ("alpha", Schema::integer().describe("0-100")),
        ])
        .all_required();

        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"type":"OBJECT","properties":{"zeta":{"type":"STRING"},"#,
                r#""alpha":{"type":"INTEGER","description":"0-100"}},"#,
                r#""required":["zeta","alpha"]}"#,
            )
        );
    }

    #[test]
    fn test_enum_and_array() {
        let schema = Schema::array(Schema::string_enum(&["High", "Low"]));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "ARRAY");
        assert_eq!(value["items"]["enum"], serde_json::json!(["High", "Low"]));
    }

    #[test]
    fn test_plain_object_has_no_required_list() {
        let schema = Schema::object(vec![("title", Schema::string())]);
        let value = serde_json::to_value(&schema).unwrap();
        assert!(value.get("required").is_none());
        assert!(schema.property("title").is_some());
        assert!(schema.property("missing").is_none());
    }
}
