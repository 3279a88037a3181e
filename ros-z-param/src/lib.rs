//! Named parameter stores for ROS-Z.
//!
//! This crate provides an ordered, name-unique parameter collection that can
//! be addressed by position or by name, and the JSON codec that maps it to
//! and from a flat JSON object.
//!
//! ```
//! use ros_z_param::{ParameterCodec, ParameterStore, SerializationContext};
//!
//! let store: ParameterStore = ParameterCodec::decode_str(r#"{"rate": 10, "frame": null}"#)?;
//! assert_eq!(store.count(), 2);
//!
//! let ctx = SerializationContext::new();
//! let json = ParameterCodec::encode_to_string(Some(&store), &ctx)?;
//! assert_eq!(json.as_deref(), Some(r#"{"rate":10}"#));
//! # Ok::<(), ros_z_param::Error>(())
//! ```

pub mod codec;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod parameter;
pub mod registry;
pub mod serde_store;
pub mod store;
pub mod value;

// Re-export main types for convenience
pub use codec::ParameterCodec;
pub use context::SerializationContext;
pub use descriptor::{TypeDescriptor, TypeParam};
pub use error::{Error, Result};
pub use parameter::{Parameter, ParameterLike};
pub use registry::{ElementFactory, ElementRegistry, has_element, register_element};
pub use store::{DynParameterStore, ParameterKey, ParameterStore};
pub use value::{ParameterType, ParameterValue};
