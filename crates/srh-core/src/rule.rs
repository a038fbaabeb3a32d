//! Conditions and rules -- the user-authored side of the highlighter.
//!
//! Rules are stored in two shapes. Current rules carry a `conditions` list and
//! a `conditionLogic`. Older rules put a single `{columnId, operator, value}`
//! directly on the rule. Deserialization goes through [`RuleRecord`], which
//! normalizes the legacy shape, so the rest of the system only sees the
//! canonical one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::enums::{ConditionLogic, Operator};
use crate::palette::DEFAULT_COLOR_ID;

/// Error type for rule records that cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFormatError {
    #[error("rule '{0}' has no conditions")]
    NoConditions(String),

    #[error("rule '{0}' has a legacy condition without an operator")]
    MissingOperator(String),
}

/// Accepts strings, numbers and booleans for free-form string fields.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn default_color_id() -> String {
    DEFAULT_COLOR_ID.to_string()
}

fn default_enabled() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// One predicate of a rule: `<column> <operator> [value]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub column_id: String,

    #[serde(default)]
    pub operator: Operator,

    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl Condition {
    pub fn new(column_id: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            operator,
            value: Some(value.into()),
        }
    }

    /// A condition whose operator takes no value.
    pub fn valueless(column_id: impl Into<String>, operator: Operator) -> Self {
        Self {
            column_id: column_id.into(),
            operator,
            value: None,
        }
    }

    /// The comparison value, if set and non-empty.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// A highlight rule in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RuleRecord")]
pub struct Rule {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub color_id: String,
    pub enabled: bool,
    pub conditions: Vec<Condition>,
    pub condition_logic: ConditionLogic,
}

impl Rule {
    /// The logic actually applied: a single condition is always AND.
    pub fn effective_logic(&self) -> ConditionLogic {
        if self.conditions.len() == 1 {
            ConditionLogic::And
        } else {
            self.condition_logic
        }
    }

    /// Name for display, falling back for unnamed rules.
    pub fn display_name(&self) -> &str {
        display_name(&self.name)
    }
}

/// `name`, or a placeholder when it is empty.
pub fn display_name(name: &str) -> &str {
    if name.is_empty() { "Unnamed Rule" } else { name }
}

/// Stored rule as found on disk, in either shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_color_id")]
    pub color_id: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub conditions: Option<Vec<Condition>>,

    #[serde(default)]
    pub condition_logic: Option<ConditionLogic>,

    // ===== Legacy single-condition shape =====
    #[serde(default)]
    pub column_id: Option<String>,

    #[serde(default)]
    pub operator: Option<Operator>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

impl TryFrom<RuleRecord> for Rule {
    type Error = RuleFormatError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let conditions = match record.conditions {
            Some(conditions) if !conditions.is_empty() => conditions,
            _ => match record.column_id {
                Some(column_id) => {
                    let operator = record
                        .operator
                        .ok_or_else(|| RuleFormatError::MissingOperator(record.name.clone()))?;
                    vec![Condition {
                        column_id,
                        operator,
                        value: record.value,
                    }]
                }
                None => return Err(RuleFormatError::NoConditions(record.name)),
            },
        };

        Ok(Rule {
            id: record.id.unwrap_or_default(),
            name: record.name,
            color_id: record.color_id,
            enabled: record.enabled,
            conditions,
            condition_logic: record.condition_logic.unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Rule`].
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rule: Rule {
                id: String::new(),
                name: name.into(),
                color_id: default_color_id(),
                enabled: true,
                conditions: Vec::new(),
                condition_logic: ConditionLogic::And,
            },
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.rule.id = id.into();
        self
    }

    pub fn color(mut self, color_id: impl Into<String>) -> Self {
        self.rule.color_id = color_id.into();
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.rule.enabled = enabled;
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.rule.conditions.push(condition);
        self
    }

    pub fn logic(mut self, logic: ConditionLogic) -> Self {
        self.rule.condition_logic = logic;
        self
    }

    pub fn build(self) -> Rule {
        self.rule
    }
}
