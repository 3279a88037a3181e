//! Host type descriptors.
//!
//! A store field is declared to the host serializer as
//! `{"name": "ParameterStore", "params": [...]}`. The first generic argument,
//! if any, names the element type, either as a bare token (`"Parameter"`)
//! or as a nested descriptor object (`{"name": "Parameter"}`).

use serde::{Deserialize, Serialize};

use crate::codec::ParameterCodec;

/// Generic argument of a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeParam {
    Name(String),
    Descriptor { name: String },
}

impl TypeParam {
    pub fn name(&self) -> &str {
        match self {
            TypeParam::Name(name) | TypeParam::Descriptor { name } => name,
        }
    }
}

impl From<&str> for TypeParam {
    fn from(name: &str) -> Self {
        TypeParam::Name(name.to_string())
    }
}

impl From<String> for TypeParam {
    fn from(name: String) -> Self {
        TypeParam::Name(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub params: Vec<TypeParam>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Descriptor for a store field with no declared element type.
    pub fn store() -> Self {
        Self::new(ParameterCodec::TYPE_TAG)
    }

    pub fn with_param(mut self, param: impl Into<TypeParam>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Name of the declared element type, if any.
    pub fn element_name(&self) -> Option<&str> {
        self.params.first().map(TypeParam::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_param_forms_parse() {
        let by_token: TypeDescriptor =
            serde_json::from_str(r#"{"name":"ParameterStore","params":["Custom"]}"#).unwrap();
        let by_object: TypeDescriptor =
            serde_json::from_str(r#"{"name":"ParameterStore","params":[{"name":"Custom"}]}"#)
                .unwrap();

        assert_eq!(by_token.element_name(), Some("Custom"));
        assert_eq!(by_object.element_name(), Some("Custom"));
    }

    #[test]
    fn test_missing_params_means_no_element() {
        let descriptor: TypeDescriptor =
            serde_json::from_str(r#"{"name":"ParameterStore"}"#).unwrap();
        assert_eq!(descriptor, TypeDescriptor::store());
        assert_eq!(descriptor.element_name(), None);
    }

    #[test]
    fn test_builder() {
        let descriptor = TypeDescriptor::store().with_param("Parameter");
        assert_eq!(descriptor.name, "ParameterStore");
        assert_eq!(descriptor.params, vec![TypeParam::Name("Parameter".into())]);
    }
}
