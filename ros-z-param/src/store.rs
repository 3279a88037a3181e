//! Ordered, name-unique parameter storage.
//!
//! `ParameterStore` keeps its records in insertion order and can be addressed
//! either by position or by parameter name. Names are resolved by a linear
//! scan over the current contents; there is no secondary index to keep in
//! sync, so positions shifting after a removal never leave stale lookups.

use std::any::Any;

use tracing::trace;

use crate::error::Result;
use crate::parameter::{Parameter, ParameterLike};
use crate::registry::ElementRegistry;

/// Key addressing a record either by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for ParameterKey<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl<'a> From<&'a str> for ParameterKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for ParameterKey<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

/// Parameter store holding named records in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore<P = Parameter> {
    parameters: Vec<P>,
}

/// Store of type-erased elements, produced by registry-driven decoding.
pub type DynParameterStore = ParameterStore<Box<dyn ParameterLike>>;

impl<P> Default for ParameterStore<P> {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }
}

impl<P: ParameterLike> ParameterStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an initial sequence; later duplicates are dropped.
    pub fn from_parameters<I: IntoIterator<Item = P>>(parameters: I) -> Self {
        let mut store = Self::new();
        store.extend(parameters);
        store
    }

    /// Position of the first record with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    fn resolve(&self, key: ParameterKey<'_>) -> Option<usize> {
        match key {
            ParameterKey::Index(index) => (index < self.parameters.len()).then_some(index),
            ParameterKey::Name(name) => self.position(name),
        }
    }

    /// Check whether the key resolves to a record.
    pub fn exists<'k>(&self, key: impl Into<ParameterKey<'k>>) -> bool {
        self.resolve(key.into()).is_some()
    }

    /// Get a record by position or name; `None` when the key does not resolve.
    pub fn get<'k>(&self, key: impl Into<ParameterKey<'k>>) -> Option<&P> {
        self.resolve(key.into()).map(|i| &self.parameters[i])
    }

    pub fn get_mut<'k>(&mut self, key: impl Into<ParameterKey<'k>>) -> Option<&mut P> {
        self.resolve(key.into()).map(|i| &mut self.parameters[i])
    }

    /// Append a record unless its name is already present.
    ///
    /// Returns `true` when the record was appended. A duplicate name leaves
    /// the existing record and its position untouched.
    pub fn set(&mut self, parameter: P) -> bool {
        if self.exists(parameter.name()) {
            trace!("[STORE] Dropping duplicate parameter '{}'", parameter.name());
            return false;
        }
        self.parameters.push(parameter);
        true
    }

    /// Remove a record, shifting later records down by one position.
    pub fn remove<'k>(&mut self, key: impl Into<ParameterKey<'k>>) -> Option<P> {
        self.resolve(key.into()).map(|i| self.parameters.remove(i))
    }

    /// Number of records currently held.
    pub fn count(&self) -> usize {
        self.parameters.len()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterate records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.parameters.iter()
    }

    /// Iterate record names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name())
    }
}

impl DynParameterStore {
    /// Insert an untyped value coming from a host boundary.
    ///
    /// The value must be one of the element types known to `registry`;
    /// anything else fails with `InvalidElementType`.
    pub fn set_any(&mut self, value: Box<dyn Any>, registry: &ElementRegistry) -> Result<bool> {
        let parameter = registry.upcast(value)?;
        Ok(self.set(parameter))
    }
}

impl<P: ParameterLike> FromIterator<P> for ParameterStore<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_parameters(iter)
    }
}

impl<P: ParameterLike> Extend<P> for ParameterStore<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for parameter in iter {
            self.set(parameter);
        }
    }
}

impl<P> IntoIterator for ParameterStore<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a ParameterStore<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}
