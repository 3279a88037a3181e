//! serde integration for `ParameterStore`.
//!
//! Lets a store live as a plain field of a host struct:
//!
//! ```
//! use ros_z_param::{Parameter, ParameterStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Request {
//!     #[serde(default, skip_serializing_if = "ParameterStore::is_omitted")]
//!     params: ParameterStore,
//! }
//!
//! let mut request = Request::default();
//! request.params.set(Parameter::new("key", "val"));
//! assert_eq!(
//!     serde_json::to_string(&request).unwrap(),
//!     r#"{"params":{"key":"val"}}"#
//! );
//! ```
//!
//! The plain `Serialize` impl follows the default host policy (unset values
//! are skipped). Use [`ParameterStore::encoded`] or the [`with_nulls`] field
//! module to write them as `null`.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::context::SerializationContext;
use crate::parameter::ParameterLike;
use crate::store::ParameterStore;
use crate::value::ParameterValue;

/// A store paired with the context it should be written under.
pub struct Encoded<'a, P> {
    store: &'a ParameterStore<P>,
    ctx: SerializationContext,
}

impl<P: ParameterLike> ParameterStore<P> {
    /// Borrow the store for serialization under the given context.
    ///
    /// Always writes an object; field omission is up to the enclosing type.
    pub fn encoded(&self, ctx: &SerializationContext) -> Encoded<'_, P> {
        Encoded {
            store: self,
            ctx: *ctx,
        }
    }

    /// `skip_serializing_if` predicate: true when no parameter has a value.
    pub fn is_omitted(&self) -> bool {
        !self.iter().any(|p| p.value().is_set())
    }
}

impl<P: ParameterLike> Serialize for Encoded<'_, P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let serialize_null = self.ctx.serialize_null();
        let mut map = serializer.serialize_map(None)?;
        for parameter in self.store {
            if serialize_null || parameter.value().is_set() {
                map.serialize_entry(parameter.name(), parameter.value())?;
            }
        }
        map.end()
    }
}

impl<P: ParameterLike> Serialize for ParameterStore<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encoded(&SerializationContext::default())
            .serialize(serializer)
    }
}

struct ParameterStoreVisitor<P> {
    marker: PhantomData<fn() -> P>,
}

impl<P: ParameterLike + Default> ParameterStoreVisitor<P> {
    fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }

    fn push(store: &mut ParameterStore<P>, name: String, value: ParameterValue) {
        let mut parameter = P::default();
        parameter.set_name(name);
        parameter.set_value(value);
        store.set(parameter);
    }
}

impl<'de, P: ParameterLike + Default> Visitor<'de> for ParameterStoreVisitor<P> {
    type Value = ParameterStore<P>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object/array of parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = ParameterStore::new();
        while let Some((name, value)) = access.next_entry::<String, ParameterValue>()? {
            Self::push(&mut store, name, value);
        }
        Ok(store)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut store = ParameterStore::new();
        let mut index = 0usize;
        while let Some(value) = access.next_element::<ParameterValue>()? {
            Self::push(&mut store, index.to_string(), value);
            index += 1;
        }
        Ok(store)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParameterStore::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ParameterStore::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, P: ParameterLike + Default> Deserialize<'de> for ParameterStore<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParameterStoreVisitor::new())
    }
}

/// Field module writing unset values as `null`.
///
/// ```
/// use ros_z_param::{Parameter, ParameterStore, ParameterValue};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Request {
///     #[serde(with = "ros_z_param::serde_store::with_nulls")]
///     params: ParameterStore,
/// }
///
/// let request = Request {
///     params: ParameterStore::from_parameters([
///         Parameter::new("key", "val"),
///         Parameter::new("empty", ParameterValue::NotSet),
///     ]),
/// };
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"params":{"key":"val","empty":null}}"#
/// );
///
/// let back: Request = serde_json::from_str(r#"{"params":{"empty":null}}"#).unwrap();
/// assert_eq!(back.params.count(), 1);
/// ```
pub mod with_nulls {
    use super::*;

    pub fn serialize<P, S>(store: &ParameterStore<P>, serializer: S) -> Result<S::Ok, S::Error>
    where
        P: ParameterLike,
        S: Serializer,
    {
        store
            .encoded(&SerializationContext::new().with_serialize_null(true))
            .serialize(serializer)
    }

    pub fn deserialize<'de, P, D>(deserializer: D) -> Result<ParameterStore<P>, D::Error>
    where
        P: ParameterLike + Default,
        D: Deserializer<'de>,
    {
        ParameterStore::deserialize(deserializer)
    }
}
