//! Components and the registry that owns them.
//!
//! # Mental Model
//!
//! A [`Component`] is a named unit of the container runtime: an id, the class
//! that implements it, and for request handlers and servlets the network
//! paths it answers on. Components are owned by a [`ComponentRegistry`], which
//! guarantees unique ids and remembers insertion order.
//!
//! The registry never reorders on read. Presentation order (for config output)
//! is chosen by the consumer; see [`Component::natural_cmp`].

pub mod capability;
pub mod component;
pub mod error;
pub mod registry;

pub use capability::{CapabilitySet, ComponentKind};
pub use component::{Component, Servlet};
pub use error::RegistryError;
pub use registry::{ComponentRegistry, Enumerate, RegistryEntry};
