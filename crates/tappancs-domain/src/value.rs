//! Cell values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of a flat or normalized record
///
/// Serialized untagged, so JSON output reads naturally: strings stay
/// strings, ages are numbers, missing data is `null`, and the image list is
/// an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Raw or translated text
    Text(String),
    /// Numeric value (age in fractional years)
    Number(f64),
    /// Unparseable or explicitly unavailable
    Null,
    /// Ordered list of strings (downloaded image URLs)
    List(Vec<String>),
}

impl FieldValue {
    /// Build a text value
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Borrow the text if this is a `Text` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value if this is a `Number`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the list if this is a `List` value
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Flat textual rendering, used for tabular output.
///
/// `Null` renders as an empty string and lists are joined with `;`.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Null => Ok(()),
            FieldValue::List(items) => write!(f, "{}", items.join(";")),
        }
    }
}
