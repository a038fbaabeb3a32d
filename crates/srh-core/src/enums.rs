//! Enum types for the highlighter.
//!
//! String-backed enums share one shape:
//! - Serialize as their snake_case string
//! - Deserialize known variants, keeping anything else in a catch-all variant
//! - `as_str()`, `is_default()`, `is_builtin()`, `Display`

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + a Custom(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, custom_variant = $custom_variant:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $custom_variant(String),
        }

        impl $name {
            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::$custom_variant(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is a built-in (non-custom) variant.
            pub fn is_builtin(&self) -> bool {
                !matches!(self, Self::$custom_variant(_))
            }

            /// All built-in variants in declaration order.
            pub fn builtins() -> &'static [&'static str] {
                &[ $( $str, )+ ]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::$custom_variant(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                // Check known variants first to avoid allocation in common case.
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::$custom_variant(s),
                }
            }
        }
    };
}

// ===========================================================================
// ColumnType
// ===========================================================================

define_enum! {
    /// Raw column type as reported by the board API.
    ColumnType, default = Text, custom_variant = Custom,
    variants: [
        (Text, "text"),
        (LongText, "long_text"),
        (Name, "name"),
        (Numbers, "numbers"),
        (Rating, "rating"),
        (Status, "status"),
        (Color, "color"),
        (Dropdown, "dropdown"),
        (Person, "person"),
        (People, "people"),
        (Priority, "priority"),
        (Date, "date"),
        (Checkbox, "checkbox"),
    ]
}

impl ColumnType {
    /// Maps the column type to the family that decides its operators.
    ///
    /// Unrecognized types fall back to the text family.
    pub fn family(&self) -> OperatorFamily {
        match self {
            Self::Text | Self::LongText | Self::Name => OperatorFamily::Text,
            Self::Numbers | Self::Rating => OperatorFamily::Number,
            Self::Status
            | Self::Color
            | Self::Dropdown
            | Self::Person
            | Self::People
            | Self::Priority => OperatorFamily::Choice,
            Self::Date => OperatorFamily::Date,
            Self::Checkbox => OperatorFamily::Checkbox,
            Self::Custom(_) => OperatorFamily::Text,
        }
    }
}

// ===========================================================================
// Operator
// ===========================================================================

define_enum! {
    /// Comparison operator of a condition.
    ///
    /// Unknown operator ids are kept in `Custom` so stored rules round-trip;
    /// they never match.
    Operator, default = Equals, custom_variant = Custom,
    variants: [
        (Equals, "equals"),
        (NotEquals, "not_equals"),
        (Contains, "contains"),
        (NotContains, "not_contains"),
        (IsEmpty, "is_empty"),
        (IsNotEmpty, "is_not_empty"),
        (GreaterThan, "greater_than"),
        (LessThan, "less_than"),
        (GreaterOrEqual, "greater_or_equal"),
        (LessOrEqual, "less_or_equal"),
        (Before, "before"),
        (After, "after"),
        (IsOverdue, "is_overdue"),
        (IsToday, "is_today"),
        (IsThisWeek, "is_this_week"),
        (IsChecked, "is_checked"),
        (IsNotChecked, "is_not_checked"),
    ]
}

impl Operator {
    /// Returns `true` for operators that never take a comparison value.
    pub fn is_valueless(&self) -> bool {
        matches!(
            self,
            Self::IsEmpty
                | Self::IsNotEmpty
                | Self::IsChecked
                | Self::IsNotChecked
                | Self::IsOverdue
                | Self::IsToday
                | Self::IsThisWeek
        )
    }

    /// Returns `true` if a condition using this operator needs a non-empty value.
    ///
    /// Custom operators are never valueless.
    pub fn requires_value(&self) -> bool {
        !self.is_valueless()
    }

    /// Returns `true` for the numeric comparison operators.
    pub fn is_numeric_comparison(&self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::LessThan | Self::GreaterOrEqual | Self::LessOrEqual
        )
    }
}

// ===========================================================================
// OperatorFamily
// ===========================================================================

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::Contains,
    Operator::NotContains,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::GreaterThan,
    Operator::LessThan,
    Operator::GreaterOrEqual,
    Operator::LessOrEqual,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const CHOICE_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const DATE_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::Before,
    Operator::After,
    Operator::IsOverdue,
    Operator::IsToday,
    Operator::IsThisWeek,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const CHECKBOX_OPERATORS: &[Operator] = &[Operator::IsChecked, Operator::IsNotChecked];

/// Operator-relevant classification of a column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorFamily {
    Text,
    Number,
    Choice,
    Date,
    Checkbox,
}

impl OperatorFamily {
    /// The family's legal operators, in display order.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Self::Text => TEXT_OPERATORS,
            Self::Number => NUMBER_OPERATORS,
            Self::Choice => CHOICE_OPERATORS,
            Self::Date => DATE_OPERATORS,
            Self::Checkbox => CHECKBOX_OPERATORS,
        }
    }

    /// Returns `true` if `op` belongs to this family.
    pub fn supports(self, op: &Operator) -> bool {
        self.operators().contains(op)
    }

    /// Returns the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Choice => "choice",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for OperatorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===========================================================================
// ConditionLogic
// ===========================================================================

/// How a rule combines its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConditionLogic {
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl ConditionLogic {
    /// Returns the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for ConditionLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===========================================================================
// Theme
// ===========================================================================

define_enum! {
    /// Board theme reported by the host.
    Theme, default = Light, custom_variant = Custom,
    variants: [
        (Light, "light"),
        (Dark, "dark"),
        (Black, "black"),
    ]
}

impl Theme {
    /// Dark palette variants apply to `dark` and `black`.
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark | Self::Black)
    }
}
