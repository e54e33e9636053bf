use std::fmt;

use serde::Deserialize;

/// A scalar parameter value as it arrives at the declaration boundary.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Falsy scalars stand for "no value": the empty string, `false` and
    /// NaN. The number zero, signed or not, is a real value.
    fn is_absent(&self) -> bool {
        match self {
            ParamValue::Bool(value) => !value,
            ParamValue::Text(value) => value.is_empty(),
            ParamValue::Float(value) => value.is_nan(),
            ParamValue::Int(_) => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::Int(value) => write!(f, "{value}"),
            // -0.0 renders as plain zero.
            ParamValue::Float(value) if *value == 0.0 => f.write_str("0"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Render a value in its query-string wire form. Spaces become `%20`;
/// nothing else is escaped.
pub fn encode(value: &ParamValue) -> String {
    encode_str(&value.to_string())
}

pub fn encode_str(raw: &str) -> String {
    raw.replace(' ', "%20")
}

/// Scalar-or-list input as it appears in catalog files.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValues {
    Many(Vec<ParamValue>),
    One(ParamValue),
}

/// The normalized, ordered value list of a declared parameter.
///
/// Every "scalar or list" input goes through this single conversion before
/// it reaches the engine: lists are kept as-is, a scalar becomes a
/// one-element list, and an absent scalar becomes an empty list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamValues(Vec<ParamValue>);

impl ParamValues {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[ParamValue] {
        &self.0
    }

    /// Wire forms of every value, in declaration order.
    pub fn encoded(&self) -> Vec<String> {
        self.0.iter().map(encode).collect()
    }
}

impl From<ParamValue> for ParamValues {
    fn from(value: ParamValue) -> Self {
        if value.is_absent() {
            Self::empty()
        } else {
            Self(vec![value])
        }
    }
}

impl From<Option<RawValues>> for ParamValues {
    fn from(raw: Option<RawValues>) -> Self {
        match raw {
            None => Self::empty(),
            Some(RawValues::One(value)) => value.into(),
            Some(RawValues::Many(values)) => Self(values),
        }
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValues {
    fn from(values: Vec<T>) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>, const N: usize> From<[T; N]> for ParamValues {
    fn from(values: [T; N]) -> Self {
        Self(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! scalar_param_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValues {
                fn from(value: $ty) -> Self {
                    ParamValue::from(value).into()
                }
            }
        )*
    };
}

scalar_param_values!(&str, String, bool, i64, i32, u32, f64);
