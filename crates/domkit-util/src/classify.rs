//! Runtime shape predicates for `Value`
//!
//! All predicates are total: they never panic and never touch the document
//! except to check element connectivity.

use std::fmt;

use domkit_dom::Document;

use crate::Value;

/// Runtime tag of a `Value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Function,
    Element,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Function => "function",
            ValueKind::Element => "element",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn kind(value: &Value) -> ValueKind {
    match value {
        Value::Undefined => ValueKind::Undefined,
        Value::Null => ValueKind::Null,
        Value::Bool(_) => ValueKind::Boolean,
        Value::Number(_) => ValueKind::Number,
        Value::String(_) => ValueKind::String,
        Value::Array(_) => ValueKind::Array,
        Value::Object(_) => ValueKind::Object,
        Value::Function(_) => ValueKind::Function,
        Value::Element(_) => ValueKind::Element,
    }
}

pub fn is_null_or_undefined(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Undefined)
}

pub fn is_null(value: &Value) -> bool {
    matches!(value, Value::Null)
}

pub fn is_undefined(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

pub fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// True for any `Number`, NaN included
pub fn is_number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn is_function(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

/// Plain string-keyed objects only; arrays and functions are not objects here
pub fn is_object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn is_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Zero-length string or array. Every other shape is never empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// An element reference that is still attached to `doc`
pub fn is_html_element(value: &Value, doc: &Document) -> bool {
    match value {
        Value::Element(id) => doc.is_element(*id) && doc.is_connected(*id),
        _ => false,
    }
}
