//! Board data: columns, items and their column values.
//!
//! These types are read-only inputs for the engine. Field names follow the
//! camelCase interchange shape; the board API's own names (`column_values`,
//! `id` and `value` on column values, `settings_str`) are accepted as aliases.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{ColumnType, OperatorFamily};
use crate::payload::{self, StatusPayload};

/// A board column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default)]
    pub column_type: ColumnType,

    /// Type-specific settings, either an object or its JSON-encoded string.
    #[serde(default, alias = "settings_str", skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            column_type,
            settings: None,
        }
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The operator family for this column's type.
    pub fn family(&self) -> OperatorFamily {
        self.column_type.family()
    }

    /// Decoded settings object, if present and well-formed.
    pub fn decoded_settings(&self) -> Option<Value> {
        payload::decode::<Value>(self.settings.as_ref())
    }

    /// Looks up a label by index in `settings.labels`.
    ///
    /// Status columns use an object keyed by the index (`{"1": "Done"}`);
    /// dropdown columns use an array of `{id, name}`.
    pub fn label_for_index(&self, index: i64) -> Option<String> {
        let settings = self.decoded_settings()?;
        match settings.get("labels")? {
            Value::Object(map) => map
                .get(&index.to_string())
                .and_then(Value::as_str)
                .map(str::to_owned),
            Value::Array(entries) => entries
                .iter()
                .find(|e| e.get("id").and_then(Value::as_i64) == Some(index))
                .and_then(|e| e.get("name"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        }
    }
}

/// One cell of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnValue {
    #[serde(alias = "id")]
    pub column_id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,

    /// Display text as rendered by the board.
    #[serde(default)]
    pub text: Option<String>,

    /// Opaque type-specific payload (see [`crate::payload`]).
    #[serde(default, alias = "value", skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<Value>,
}

impl ColumnValue {
    /// A value carrying only display text.
    pub fn text(column_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            column_type: None,
            text: Some(text.into()),
            raw_value: None,
        }
    }

    /// A value carrying only a raw payload.
    pub fn raw(column_id: impl Into<String>, raw_value: Value) -> Self {
        Self {
            column_id: column_id.into(),
            column_type: None,
            text: None,
            raw_value: Some(raw_value),
        }
    }

    /// Status index from the raw payload, if any.
    pub fn status_index(&self) -> Option<i64> {
        payload::decode::<StatusPayload>(self.raw_value.as_ref())?.index
    }
}

/// Board group an item belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A board row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,

    #[serde(default, rename = "columnValues", alias = "column_values")]
    pub column_values: Vec<ColumnValue>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group: None,
            column_values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: ColumnValue) -> Self {
        self.column_values.push(value);
        self
    }

    /// The item's value for `column_id`. The first entry wins on duplicates.
    pub fn value(&self, column_id: &str) -> Option<&ColumnValue> {
        self.column_values.iter().find(|v| v.column_id == column_id)
    }
}

/// Columns and items of one board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub items: Vec<Item>,
}

/// `boards[0]` of a board API response.
#[derive(Deserialize)]
struct ApiBoard {
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    items_page: Option<ApiItemsPage>,
}

#[derive(Deserialize)]
struct ApiItemsPage {
    #[serde(default)]
    items: Vec<Item>,
}

impl Board {
    /// Parses board data from JSON.
    ///
    /// Accepts the plain `{columns, items}` shape or a raw board API response
    /// (`{"data": {"boards": [{"columns": …, "items_page": {"items": …}}]}}`).
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(s)?;
        match value.pointer("/data/boards/0") {
            Some(api) => {
                let api = ApiBoard::deserialize(api)?;
                Ok(Self {
                    columns: api.columns,
                    items: api.items_page.map(|p| p.items).unwrap_or_default(),
                })
            }
            None => Board::deserialize(&value),
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Columns that rules can target. The item name column is excluded.
    pub fn rule_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| c.column_type != ColumnType::Name)
    }
}
