//! Element type registry for dynamic decoding.
//!
//! Hosts name the element type of a store with a string token (the generic
//! argument of a `ParameterStore<...>` type descriptor). The registry maps
//! those tokens to factories registered ahead of time, so element types are
//! resolved without any reflection.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use tracing::debug;

use crate::descriptor::TypeDescriptor;
use crate::error::{Error, Result};
use crate::parameter::{Parameter, ParameterLike};

fn create<P: ParameterLike + Default>() -> Box<dyn ParameterLike> {
    Box::new(P::default())
}

fn upcast<P: ParameterLike>(
    value: Box<dyn Any>,
) -> std::result::Result<Box<dyn ParameterLike>, Box<dyn Any>> {
    match value.downcast::<P>() {
        Ok(parameter) => Ok(parameter),
        Err(value) => Err(value),
    }
}

/// Constructs default instances of one element type.
#[derive(Clone, Copy)]
pub struct ElementFactory {
    type_name: &'static str,
    create: fn() -> Box<dyn ParameterLike>,
    upcast: fn(Box<dyn Any>) -> std::result::Result<Box<dyn ParameterLike>, Box<dyn Any>>,
}

impl ElementFactory {
    pub fn of<P: ParameterLike + Default>() -> Self {
        Self {
            type_name: std::any::type_name::<P>(),
            create: create::<P>,
            upcast: upcast::<P>,
        }
    }

    /// Full Rust path of the element type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Create a default-initialized element.
    pub fn create(&self) -> Box<dyn ParameterLike> {
        (self.create)()
    }
}

impl fmt::Debug for ElementFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementFactory")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Registry of element types usable inside a `ParameterStore`.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    elements: HashMap<String, ElementFactory>,
}

impl ElementRegistry {
    /// Name under which the default element type is registered.
    pub const DEFAULT_ELEMENT: &'static str = "Parameter";

    /// Create a registry that knows the default `Parameter` type.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<Parameter>(Self::DEFAULT_ELEMENT);
        registry.register::<Parameter>(std::any::type_name::<Parameter>());
        registry
    }

    /// Create a registry without any element types.
    pub fn empty() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }

    /// Get the global registry (lazy initialized).
    pub fn global() -> &'static RwLock<ElementRegistry> {
        static REGISTRY: OnceLock<RwLock<ElementRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| RwLock::new(ElementRegistry::new()))
    }

    /// Register `P` under the given type token.
    pub fn register<P: ParameterLike + Default>(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(
            "[REGISTRY] Registering element type {} as '{}'",
            std::any::type_name::<P>(),
            name
        );
        self.elements.insert(name, ElementFactory::of::<P>());
    }

    /// Check if a type token is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Look up the factory for a type token.
    pub fn resolve(&self, name: &str) -> Result<ElementFactory> {
        self.elements.get(name).copied().ok_or_else(|| {
            Error::invalid_element_type(format!("'{}' is not a registered element type", name))
        })
    }

    /// Resolve the element type named by a store's type descriptor.
    ///
    /// A descriptor without generic arguments selects the default `Parameter`.
    pub fn resolve_descriptor(&self, descriptor: &TypeDescriptor) -> Result<ElementFactory> {
        match descriptor.element_name() {
            None => Ok(ElementFactory::of::<Parameter>()),
            Some(name) => self.resolve(name),
        }
    }

    /// Turn an untyped value into an element, if its type is registered.
    pub fn upcast(&self, mut value: Box<dyn Any>) -> Result<Box<dyn ParameterLike>> {
        for factory in self.elements.values() {
            match (factory.upcast)(value) {
                Ok(parameter) => return Ok(parameter),
                Err(rejected) => value = rejected,
            }
        }
        Err(Error::invalid_element_type(
            "value is not an instance of a registered element type",
        ))
    }

    /// List all registered type tokens.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register an element type in the global registry.
pub fn register_element<P: ParameterLike + Default>(name: impl Into<String>) {
    ElementRegistry::global().write().register::<P>(name);
}

/// Check if a type token is registered globally.
pub fn has_element(name: &str) -> bool {
    ElementRegistry::global().read().contains(name)
}
