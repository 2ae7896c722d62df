use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{GraftError, GraftResult};

/// A typed parameter value evaluated from the scene source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A scalar number.
    Float(f64),
    /// A boolean flag.
    Bool(bool),
    /// A string (resource references, model tags, file paths).
    Text(String),
    /// A fixed-length tuple of numbers (colors, dimensions, bounds).
    Tuple(Vec<f64>),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[f64]> {
        match self {
            Value::Tuple(v) => Some(v),
            _ => None,
        }
    }
}

/// Document formatting: floats print in shortest round-trip form, tuples
/// join with single spaces, booleans print as `true`/`false`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Tuple(vs) => {
                let mut first = true;
                for v in vs {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", v)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// A named attribute: the resolved value plus the default it started from
/// and whether resolution is obliged to replace that default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub required: bool,
    pub default: Value,
    pub value: Value,
}

/// Insertion-ordered attribute store attached to every node.
///
/// The store holds exactly the parameters the document serializer will emit,
/// in emission order. Working data that never reaches the document lives in
/// typed fields on the node instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    attrs: IndexMap<String, Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    /// Set an optional attribute. The value doubles as its own default.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        self.attrs.insert(
            name.clone(),
            Attribute {
                name,
                required: false,
                default: value.clone(),
                value,
            },
        );
    }

    /// Set a required attribute. `default` is the unset sentinel; resolution
    /// must produce a value distinct from it or the node is invalid.
    pub fn set_required(&mut self, name: impl Into<String>, default: Value, value: Value) {
        let name = name.into();
        self.attrs.insert(
            name.clone(),
            Attribute {
                name,
                required: true,
                default,
                value,
            },
        );
    }

    /// Read an attribute value. Absence is an invariant violation reported
    /// against the owning node.
    pub fn get(&self, node: &str, name: &str) -> GraftResult<&Value> {
        self.attrs
            .get(name)
            .map(|a| &a.value)
            .ok_or_else(|| GraftError::missing_attribute(node, name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Iterate attributes in insertion (= emission) order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.values()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Check that every required attribute holds a non-default value.
    pub fn validate_required(&self, node: &str) -> GraftResult<()> {
        for attr in self.attrs.values() {
            if attr.required && attr.value == attr.default {
                return Err(GraftError::missing_attribute(node, attr.name.clone()));
            }
        }
        Ok(())
    }
}
