//! JSON codec for parameter stores.
//!
//! The wire form of a store is a flat JSON object mapping parameter names to
//! scalar values:
//!
//! ```text
//! {"text": "lorum ipsum", "number": 132, "deleted": true, "empty": null}
//! ```
//!
//! Encoding honours the host's null-emission policy. With the policy off,
//! unset parameters are dropped and a store with nothing left to write
//! encodes to `None`, telling the host to omit the field. With the policy on,
//! unset parameters become `null` and an absent store becomes `{}`.
//!
//! Decoding always materializes JSON `null` as a parameter whose value is
//! `NotSet`, whatever the null-emission policy.

use serde_json::error::Category;
use serde_json::{Map, Value};
use tracing::debug;

use crate::context::SerializationContext;
use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::parameter::ParameterLike;
use crate::registry::ElementRegistry;
use crate::store::{DynParameterStore, ParameterStore};
use crate::value::ParameterValue;

/// Stateless encoder/decoder between `ParameterStore` and JSON objects.
pub struct ParameterCodec;

impl ParameterCodec {
    /// Type tag the codec is registered under, for both directions.
    pub const TYPE_TAG: &'static str = "ParameterStore";

    /// Encode a store as a JSON object.
    ///
    /// Returns `None` when the host should omit the field entirely.
    pub fn encode<P: ParameterLike>(
        store: Option<&ParameterStore<P>>,
        ctx: &SerializationContext,
    ) -> Option<Map<String, Value>> {
        let serialize_null = ctx.serialize_null();
        let Some(store) = store else {
            debug!("[CODEC] Encoding absent store, serialize_null={}", serialize_null);
            return serialize_null.then(Map::new);
        };

        let mut result = Map::new();
        for parameter in store {
            if !serialize_null && !parameter.value().is_set() {
                continue;
            }
            result.insert(parameter.name().to_string(), parameter.value().to_json());
        }

        debug!(
            "[CODEC] Encoded {} of {} parameters, serialize_null={}",
            result.len(),
            store.count(),
            serialize_null
        );

        if result.is_empty() && !serialize_null {
            None
        } else {
            Some(result)
        }
    }

    /// Encode a store to a JSON string; `None` when the field is omitted.
    pub fn encode_to_string<P: ParameterLike>(
        store: Option<&ParameterStore<P>>,
        ctx: &SerializationContext,
    ) -> Result<Option<String>> {
        Self::encode(store, ctx)
            .map(|object| serde_json::to_string(&object))
            .transpose()
            .map_err(Error::from)
    }

    /// Decode a JSON object into a store of `P` elements.
    #[tracing::instrument(name = "param_decode", skip_all)]
    pub fn decode<P: ParameterLike + Default>(data: Option<&Value>) -> Result<ParameterStore<P>> {
        let Some(entries) = parameter_entries(data)? else {
            return Ok(ParameterStore::new());
        };
        Ok(build_store(entries, P::default))
    }

    /// Parse and decode a JSON document into a store of `P` elements.
    ///
    /// The text is read straight into the store, so a key repeated in the
    /// document keeps its first occurrence.
    pub fn decode_str<P: ParameterLike + Default>(json: &str) -> Result<ParameterStore<P>> {
        let store: ParameterStore<P> = serde_json::from_str(json).map_err(|err| {
            match err.classify() {
                Category::Data => Error::invalid_input_shape(err.to_string()),
                _ => Error::Json(err),
            }
        })?;
        debug!("[CODEC] Decoded {} parameters from text", store.count());
        Ok(store)
    }

    /// Decode a JSON object with the element type named by a host descriptor.
    ///
    /// The element type is looked up in `registry`; a descriptor without a
    /// generic argument yields default `Parameter` elements.
    #[tracing::instrument(name = "param_decode_with", skip_all, fields(descriptor = %descriptor.name))]
    pub fn decode_with(
        data: Option<&Value>,
        descriptor: &TypeDescriptor,
        registry: &ElementRegistry,
    ) -> Result<DynParameterStore> {
        let Some(entries) = parameter_entries(data)? else {
            return Ok(ParameterStore::new());
        };
        let factory = registry.resolve_descriptor(descriptor)?;
        debug!("[CODEC] Decoding elements as {}", factory.type_name());
        Ok(build_store(entries, || factory.create()))
    }
}

/// Name/value pairs of a decode payload in document order.
///
/// `Ok(None)` for an absent or `null` payload. Arrays yield their positions
/// as names.
fn parameter_entries(data: Option<&Value>) -> Result<Option<Vec<(String, ParameterValue)>>> {
    let pairs: Vec<(String, &Value)> = match data {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(object)) => object.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Some(other) => {
            return Err(Error::invalid_input_shape(format!(
                "got {}",
                json_kind(other)
            )));
        }
    };

    pairs
        .into_iter()
        .map(|(name, value)| match ParameterValue::from_json(value) {
            Some(value) => Ok((name, value)),
            None => Err(Error::invalid_input_shape(format!(
                "parameter '{}' holds a nested {}",
                name,
                json_kind(value)
            ))),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn build_store<P: ParameterLike>(
    entries: Vec<(String, ParameterValue)>,
    mut create: impl FnMut() -> P,
) -> ParameterStore<P> {
    let total = entries.len();
    let mut store = ParameterStore::new();
    for (name, value) in entries {
        let mut parameter = create();
        parameter.set_name(name);
        parameter.set_value(value);
        store.set(parameter);
    }
    debug!("[CODEC] Decoded {} of {} entries", store.count(), total);
    store
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
