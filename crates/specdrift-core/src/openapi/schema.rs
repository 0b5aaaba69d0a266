//! Typed view over a resolved schema node.
//!
//! The resolver works on raw `serde_json::Value` trees so that fragments can be
//! echoed back verbatim. Detectors work on this tagged representation instead:
//! every keyword they care about is decoded once, and anything malformed is
//! treated as absent rather than raising.

use std::fmt;

use serde_json::Value;

/// A JSON type name as it appears in a schema `type` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
    /// A name outside the JSON-Schema vocabulary. Matches nothing.
    Other(String),
}

impl JsonType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "null" => Self::Null,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
            Self::Other(s) => s.as_str(),
        }
    }

    /// Runtime kind check.
    ///
    /// `integer` only accepts numbers stored as `i64`/`u64`; floats such as
    /// `1.5` or `1.0` and booleans never qualify.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Self::Number, Value::Number(_)) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Null, Value::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared `type` of a node: one name or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDecl {
    Single(JsonType),
    Union(Vec<JsonType>),
}

impl TypeDecl {
    /// Decode a `type` keyword. Empty strings and empty lists mean "unconstrained".
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::Single(JsonType::from_name(s))),
            Value::Array(items) if items.is_empty() => None,
            Value::Array(items) => Some(Self::Union(
                items
                    .iter()
                    .map(|i| match i {
                        Value::String(s) => JsonType::from_name(s),
                        other => JsonType::Other(other.to_string()),
                    })
                    .collect(),
            )),
            Value::Null | Value::Bool(false) => None,
            other => Some(Self::Single(JsonType::Other(other.to_string()))),
        }
    }

    pub fn types(&self) -> &[JsonType] {
        match self {
            Self::Single(t) => std::slice::from_ref(t),
            Self::Union(ts) => ts.as_slice(),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.types().iter().any(|t| t.matches(value))
    }

    pub fn admits_null(&self) -> bool {
        self.types().contains(&JsonType::Null)
    }

    /// The declaration as JSON, for anomaly `expected` fields.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(t) => Value::String(t.name().to_string()),
            Self::Union(ts) => Value::Array(
                ts.iter()
                    .map(|t| Value::String(t.name().to_string()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(t) => write!(f, "{t}"),
            Self::Union(ts) => {
                f.write_str("[")?;
                for (i, t) in ts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A decoded schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub ty: Option<TypeDecl>,
    pub nullable: bool,
    pub enumeration: Option<Vec<Value>>,
    /// Declared properties, in declaration order.
    pub properties: Option<Vec<(String, Schema)>>,
    pub required: Vec<String>,
    /// Single schema applied to every array element.
    pub items: Option<Box<Schema>>,
    empty: bool,
}

impl Schema {
    /// Decode a resolved schema node. Non-object nodes decode to an empty schema.
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            return Self::empty();
        };

        let properties = obj.get("properties").and_then(Value::as_object).map(|props| {
            props
                .iter()
                .map(|(name, s)| (name.clone(), Schema::from_value(s)))
                .collect()
        });

        let required = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let items = obj
            .get("items")
            .filter(|i| i.is_object())
            .map(|i| Box::new(Schema::from_value(i)));

        Self {
            ty: obj.get("type").and_then(TypeDecl::from_value),
            nullable: matches!(obj.get("nullable"), Some(Value::Bool(true))),
            enumeration: obj.get("enum").and_then(Value::as_array).cloned(),
            properties,
            required,
            items,
            empty: obj.is_empty(),
        }
    }

    fn empty() -> Self {
        Self {
            ty: None,
            nullable: false,
            enumeration: None,
            properties: None,
            required: Vec::new(),
            items: None,
            empty: true,
        }
    }

    /// True when the source node declared nothing at all (`{}`).
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Null is acceptable via `nullable: true` or a `null` member of `type`.
    pub fn allows_null(&self) -> bool {
        self.nullable || self.ty.as_ref().is_some_and(TypeDecl::admits_null)
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties
            .as_ref()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_object_schema() {
        let s = Schema::from_value(&json!({
            "type": "object",
            "required": ["id", 7],
            "properties": {
                "id": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "additionalProperties": false
        }));
        assert_eq!(s.ty, Some(TypeDecl::Single(JsonType::Object)));
        assert_eq!(s.required, vec!["id".to_string()]);
        assert!(s.property("id").is_some());
        assert!(s.property("tags").unwrap().items.is_some());
        assert!(s.property("extra").is_none());
        assert!(!s.is_empty());
    }

    #[test]
    fn malformed_keywords_are_absent() {
        let s = Schema::from_value(&json!({
            "properties": "nope",
            "items": [{"type": "string"}],
            "enum": "red"
        }));
        assert!(s.properties.is_none());
        assert!(s.items.is_none());
        assert!(s.enumeration.is_none());
    }

    #[test]
    fn empty_schema() {
        assert!(Schema::from_value(&json!({})).is_empty());
        assert!(Schema::from_value(&json!("string")).is_empty());
    }

    #[test]
    fn union_types_and_null() {
        let s = Schema::from_value(&json!({"type": ["string", "null"]}));
        assert!(s.allows_null());
        assert_eq!(s.ty.as_ref().unwrap().to_string(), "[string, null]");
        assert_eq!(s.ty.unwrap().to_value(), json!(["string", "null"]));
    }

    #[test]
    fn integer_rejects_booleans_and_floats() {
        let t = JsonType::Integer;
        assert!(t.matches(&json!(3)));
        assert!(t.matches(&json!(u64::MAX)));
        assert!(!t.matches(&json!(true)));
        assert!(!t.matches(&json!(1.5)));
        assert!(JsonType::Number.matches(&json!(1.5)));
        assert!(JsonType::Number.matches(&json!(2)));
    }

    #[test]
    fn empty_type_is_unconstrained() {
        assert!(Schema::from_value(&json!({"type": ""})).ty.is_none());
        assert!(Schema::from_value(&json!({"type": []})).ty.is_none());
    }
}
