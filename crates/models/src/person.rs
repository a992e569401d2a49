use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bits of [`Model::null_fields`].
pub const NAME_NULL: i16 = 1;
pub const IMAGE_NULL: i16 = 1 << 1;
pub const TITLE_NULL: i16 = 1 << 2;

/// Stored row. `null_fields` and `created_at` never reach clients.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub title: Option<String>,
    pub null_fields: i16,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// A person as returned to clients.
///
/// Each field has three states: `None` was never set and is left out of the
/// JSON object, `Some(None)` was set to `null` and is written as `null`,
/// `Some(Some(_))` holds text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
}

impl Person {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_ref()?.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_ref()?.as_deref()
    }

    /// `null_fields` value for this person's explicit nulls.
    pub fn null_mask(&self) -> i16 {
        [(&self.name, NAME_NULL), (&self.image, IMAGE_NULL), (&self.title, TITLE_NULL)]
            .into_iter()
            .filter(|(field, _)| matches!(field, Some(None)))
            .fold(0, |mask, (_, bit)| mask | bit)
    }
}

fn from_column(value: Option<String>, null_fields: i16, bit: i16) -> Option<Option<String>> {
    match value {
        Some(v) => Some(Some(v)),
        None if null_fields & bit != 0 => Some(None),
        None => None,
    }
}

impl From<Model> for Person {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: from_column(m.name, m.null_fields, NAME_NULL),
            image: from_column(m.image, m.null_fields, IMAGE_NULL),
            title: from_column(m.title, m.null_fields, TITLE_NULL),
        }
    }
}
