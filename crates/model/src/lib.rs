//! Value types for the container cluster model.
//!
//! Everything in this crate is an immutable value: identifiers for components,
//! references to the code artifacts that implement them, and the deployment
//! facts (zone, application metadata) that the cluster projects into config.

pub mod bundle;
pub mod error;
pub mod id;
pub mod metadata;
pub mod zone;

pub use bundle::{BundleInstantiation, DISK_BUNDLE_PREFIX, FileReference, PlatformBundle};
pub use error::ModelError;
pub use id::{ComponentId, ComponentSpecification};
pub use metadata::ApplicationMetadata;
pub use zone::Zone;
