//! Scalar parameter values.
//!
//! A parameter holds one JSON-representable scalar or nothing at all.
//! `NotSet` is the "absent" state and stays distinct from every scalar,
//! so an explicit JSON `null` survives a decode/encode cycle.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The type of a parameter value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterType {
    NotSet,
    Bool,
    Integer,
    Double,
    String,
}

/// A typed parameter value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParameterValue {
    #[default]
    NotSet,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(std::string::String),
}

macro_rules! impl_scalar_accessors {
    ($($method:ident -> $variant:ident : $ty:ty),* $(,)?) => {
        impl ParameterValue {
            $(
                #[doc = concat!("Try to extract as ", stringify!($ty), ".")]
                pub fn $method(&self) -> Option<$ty> {
                    match self {
                        ParameterValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

impl_scalar_accessors! {
    as_bool -> Bool: bool,
    as_i64 -> Integer: i64,
    as_f64 -> Double: f64,
}

impl ParameterValue {
    /// Returns the parameter type of this value.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::NotSet => ParameterType::NotSet,
            Self::Bool(_) => ParameterType::Bool,
            Self::Integer(_) => ParameterType::Integer,
            Self::Double(_) => ParameterType::Double,
            Self::String(_) => ParameterType::String,
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::NotSet)
    }

    /// Try to extract as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Convert a JSON scalar.
    ///
    /// Integers that fit in `i64` become `Integer`, every other number becomes
    /// `Double`. Returns `None` for objects and arrays.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::NotSet),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Double)),
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Convert to the native JSON scalar; `NotSet` and non-finite doubles become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::NotSet => Value::Null,
            Self::Bool(v) => Value::Bool(*v),
            Self::Integer(v) => Value::from(*v),
            Self::Double(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::String(v) => Value::String(v.clone()),
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParameterValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for ParameterValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for ParameterValue {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<std::string::String> for ParameterValue {
    fn from(v: std::string::String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotSet => serializer.serialize_none(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::String(v) => serializer.serialize_str(v),
        }
    }
}

struct ParameterValueVisitor;

impl<'de> Visitor<'de> for ParameterValueVisitor {
    type Value = ParameterValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(ParameterValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ParameterValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v)
            .map(ParameterValue::Integer)
            .unwrap_or(ParameterValue::Double(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(ParameterValue::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(ParameterValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: std::string::String) -> Result<Self::Value, E> {
        Ok(ParameterValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParameterValue::NotSet)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParameterValue::NotSet)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for ParameterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParameterValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(
            ParameterValue::from_json(&json!("lorum ipsum")),
            Some(ParameterValue::String("lorum ipsum".into()))
        );
        assert_eq!(
            ParameterValue::from_json(&json!(132)),
            Some(ParameterValue::Integer(132))
        );
        assert_eq!(
            ParameterValue::from_json(&json!(66.67)),
            Some(ParameterValue::Double(66.67))
        );
        assert_eq!(
            ParameterValue::from_json(&json!(true)),
            Some(ParameterValue::Bool(true))
        );
        assert_eq!(
            ParameterValue::from_json(&Value::Null),
            Some(ParameterValue::NotSet)
        );
    }

    #[test]
    fn test_from_json_rejects_nested() {
        assert_eq!(ParameterValue::from_json(&json!([1, 2])), None);
        assert_eq!(ParameterValue::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_large_unsigned_becomes_double() {
        let v = ParameterValue::from_json(&json!(u64::MAX)).unwrap();
        assert_eq!(v.parameter_type(), ParameterType::Double);

        let v: ParameterValue = serde_json::from_str("18446744073709551615").unwrap();
        assert_eq!(v.parameter_type(), ParameterType::Double);
    }

    #[test]
    fn test_not_set_serializes_as_null() {
        assert_eq!(ParameterValue::NotSet.to_json(), Value::Null);
        assert_eq!(serde_json::to_string(&ParameterValue::NotSet).unwrap(), "null");
        assert_eq!(ParameterValue::Double(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_deserialize_rejects_composites() {
        assert!(serde_json::from_str::<ParameterValue>("[1]").is_err());
        assert!(serde_json::from_str::<ParameterValue>("{\"a\":1}").is_err());
        assert_eq!(
            serde_json::from_str::<ParameterValue>("null").unwrap(),
            ParameterValue::NotSet
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ParameterValue::from(Some(3i64)), ParameterValue::Integer(3));
        assert_eq!(ParameterValue::from(None::<bool>), ParameterValue::NotSet);
        assert_eq!(ParameterValue::from("x").as_str(), Some("x"));
        assert_eq!(ParameterValue::from(1.5).as_f64(), Some(1.5));
        assert!(!ParameterValue::default().is_set());
    }

    #[test]
    fn test_parameter_type_names() {
        assert_eq!(ParameterType::NotSet.to_string(), "not_set");
        assert_eq!(ParameterType::from_str("double").unwrap(), ParameterType::Double);
    }
}
