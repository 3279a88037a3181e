//! Per-call serialization context.

/// Serialization options the host hands to the codec for a single call.
///
/// The null-emission policy is the codec's only setting: when enabled, unset
/// parameters are written as JSON `null` and an absent or empty store is
/// written as `{}` instead of being omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializationContext {
    serialize_null: bool,
}

impl SerializationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the null-emission policy
    pub fn with_serialize_null(mut self, serialize_null: bool) -> Self {
        self.serialize_null = serialize_null;
        self
    }

    pub fn serialize_null(&self) -> bool {
        self.serialize_null
    }
}
