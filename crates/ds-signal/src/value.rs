//! Typed signal values.

use ds_core::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub enum SignalValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Vector(Vec2),
    List(Vec<f64>),
}

impl SignalValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            SignalValue::Bool(_)   => "bool",
            SignalValue::Int(_)    => "int",
            SignalValue::Float(_)  => "float",
            SignalValue::Vector(_) => "vector",
            SignalValue::List(_)   => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            SignalValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            SignalValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Floats, and integers widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            SignalValue::Float(v) => Some(v),
            SignalValue::Int(i)   => Some(i as f64),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match *self {
            SignalValue::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            SignalValue::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<bool> for SignalValue {
    fn from(v: bool) -> Self {
        SignalValue::Bool(v)
    }
}

impl From<i64> for SignalValue {
    fn from(v: i64) -> Self {
        SignalValue::Int(v)
    }
}

impl From<f64> for SignalValue {
    fn from(v: f64) -> Self {
        SignalValue::Float(v)
    }
}

impl From<Vec2> for SignalValue {
    fn from(v: Vec2) -> Self {
        SignalValue::Vector(v)
    }
}

impl From<Vec<f64>> for SignalValue {
    fn from(v: Vec<f64>) -> Self {
        SignalValue::List(v)
    }
}
