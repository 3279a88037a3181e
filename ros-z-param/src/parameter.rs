//! Parameter records and the capability set a store element must provide.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::ParameterValue;

/// Capability set for store elements: a mutable name and a mutable value.
///
/// Decoding builds elements through `Default` and these setters only, so an
/// element type never needs a constructor taking arguments.
pub trait ParameterLike: fmt::Debug + 'static {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn value(&self) -> &ParameterValue;

    fn set_value(&mut self, value: ParameterValue);

    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete element type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl ParameterLike for Box<dyn ParameterLike> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_name(&mut self, name: String) {
        (**self).set_name(name)
    }

    fn value(&self) -> &ParameterValue {
        (**self).value()
    }

    fn set_value(&mut self, value: ParameterValue) {
        (**self).set_value(value)
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }
}

impl dyn ParameterLike {
    /// Check whether the element is of concrete type `P`.
    pub fn is<P: ParameterLike>(&self) -> bool {
        self.as_any().is::<P>()
    }

    pub fn downcast_ref<P: ParameterLike>(&self) -> Option<&P> {
        self.as_any().downcast_ref::<P>()
    }
}

/// Implement [`ParameterLike`] for a struct with `name: String` and
/// `value: ParameterValue` fields.
///
/// # Example
///
/// ```
/// use ros_z_param::{ParameterValue, define_parameter};
///
/// #[derive(Debug, Default, Clone)]
/// pub struct TunedParameter {
///     name: String,
///     value: ParameterValue,
/// }
///
/// define_parameter!(TunedParameter);
/// ```
#[macro_export]
macro_rules! define_parameter {
    ($ty:ty) => {
        impl $crate::ParameterLike for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: ::std::string::String) {
                self.name = name;
            }

            fn value(&self) -> &$crate::ParameterValue {
                &self.value
            }

            fn set_value(&mut self, value: $crate::ParameterValue) {
                self.value = value;
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

/// A parameter with its name and value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: ParameterValue,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

define_parameter!(Parameter);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Tagged {
        name: String,
        value: ParameterValue,
    }

    define_parameter!(Tagged);

    #[test]
    fn test_default_parameter_is_unset() {
        let p = Parameter::default();
        assert_eq!(p.name(), "");
        assert_eq!(p.value(), &ParameterValue::NotSet);
    }

    #[test]
    fn test_setters() {
        let mut p = Parameter::default();
        p.set_name("deleted".to_string());
        p.set_value(ParameterValue::Bool(true));
        assert_eq!(p, Parameter::new("deleted", true));
    }

    #[test]
    fn test_boxed_element_keeps_concrete_type() {
        let boxed: Box<dyn ParameterLike> = Box::new(Tagged::default());
        assert!(boxed.is::<Tagged>());
        assert!(!boxed.is::<Parameter>());
        assert!(boxed.type_name().ends_with("Tagged"));
        assert!(ParameterLike::type_name(&boxed).ends_with("Tagged"));
    }
}
