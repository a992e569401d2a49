use serde_json::Value;
use uuid::Uuid;

use crate::errors::ServiceError;

pub use models::person::Person;

/// What a payload says about one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch {
    /// Field absent from the payload; the stored value is kept.
    #[default]
    Keep,
    /// Field sent as `null`; it is stored and returned as `null`.
    Clear,
    Set(String),
}

impl FieldPatch {
    /// Value after applying this patch on top of `current`.
    pub fn apply(self, current: Option<Option<String>>) -> Option<Option<String>> {
        match self {
            FieldPatch::Keep => current,
            FieldPatch::Clear => Some(None),
            FieldPatch::Set(v) => Some(Some(v)),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, FieldPatch::Keep)
    }
}

/// Create/replace input. Any subset of fields is accepted, unknown fields are
/// dropped, and scalar values are cast to text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonInput {
    pub name: FieldPatch,
    pub image: FieldPatch,
    pub title: FieldPatch,
}

impl PersonInput {
    /// Parse a raw request body. An empty body reads as `{}`.
    pub fn from_body(bytes: &[u8]) -> Result<Self, ServiceError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| ServiceError::InvalidBody(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ServiceError> {
        let Value::Object(mut map) = value else {
            return Err(ServiceError::InvalidBody("expected a JSON object".into()));
        };
        Ok(Self {
            name: cast_field("name", map.remove("name"))?,
            image: cast_field("image", map.remove("image"))?,
            title: cast_field("title", map.remove("title"))?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_keep() && self.image.is_keep() && self.title.is_keep()
    }

    /// Build a fresh person; absent fields stay unset.
    pub fn into_person(self, id: Uuid) -> Person {
        Person {
            id,
            name: self.name.apply(None),
            image: self.image.apply(None),
            title: self.title.apply(None),
        }
    }

    /// Overwrite the fields present in this input.
    pub fn apply_to(self, person: Person) -> Person {
        Person {
            id: person.id,
            name: self.name.apply(person.name),
            image: self.image.apply(person.image),
            title: self.title.apply(person.title),
        }
    }
}

fn cast_field(field: &'static str, value: Option<Value>) -> Result<FieldPatch, ServiceError> {
    match value {
        None => Ok(FieldPatch::Keep),
        Some(Value::Null) => Ok(FieldPatch::Clear),
        Some(Value::String(s)) => Ok(FieldPatch::Set(s)),
        Some(Value::Number(n)) => Ok(FieldPatch::Set(n.to_string())),
        Some(Value::Bool(b)) => Ok(FieldPatch::Set(b.to_string())),
        Some(other) => Err(ServiceError::Cast { field, value: other.to_string() }),
    }
}

/// Parse a path id. Malformed ids are a store-level failure, not "not found".
pub fn parse_id(raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|e| ServiceError::InvalidId { value: raw.to_string(), reason: e.to_string() })
}
