//! Code artifacts shipped to container hosts.

use core::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::id::{ComponentId, ComponentSpecification};

/// Prefix marking a bundle that is already present on the host's disk.
pub const DISK_BUNDLE_PREFIX: &str = "file:";

/// Which class to instantiate for a component, and from which bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleInstantiation {
	pub id: ComponentId,
	pub class_id: ComponentSpecification,
	pub bundle: ComponentSpecification,
}

impl BundleInstantiation {
	pub fn new(
		id: ComponentId,
		class_id: ComponentSpecification,
		bundle: ComponentSpecification,
	) -> Self {
		Self {
			id,
			class_id,
			bundle,
		}
	}

	/// Builds an instantiation where omitted parts fall back along the chain
	/// id → class → bundle: the class defaults to the id, the bundle to the
	/// class name.
	pub fn from_strings(id: ComponentId, class: Option<&str>, bundle: Option<&str>) -> Self {
		let class_id = class.map_or_else(|| ComponentSpecification::from(&id), Into::into);
		let bundle = bundle.map_or_else(
			|| ComponentSpecification::new(class_id.name()),
			ComponentSpecification::from,
		);
		Self {
			id,
			class_id,
			bundle,
		}
	}

	/// Instantiation for a component named after its class.
	pub fn from_class(class: &str) -> Self {
		Self::from_strings(ComponentId::new(class), None, None)
	}
}

/// Reference to a file handed out by the file-distribution service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReference(String);

impl FileReference {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn value(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FileReference {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A bundle installed at a known location on every container host,
/// e.g. `$HOME/lib/jars/foo.jar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformBundle(PathBuf);

impl PlatformBundle {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self(path.into())
	}

	pub fn path(&self) -> &Path {
		&self.0
	}

	/// The bundle entry as it appears in bundle config.
	pub fn to_file_reference_string(&self) -> String {
		format!("{DISK_BUNDLE_PREFIX}{}", self.0.display())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_instantiation_defaults_follow_id() {
		let spec = BundleInstantiation::from_class("container.handler.StateHandler");
		assert_eq!(spec.id.to_string(), "container.handler.StateHandler");
		assert_eq!(spec.class_id.as_str(), "container.handler.StateHandler");
		assert_eq!(spec.bundle.as_str(), "container.handler.StateHandler");
	}

	#[test]
	fn test_instantiation_bundle_defaults_to_class_name() {
		let spec = BundleInstantiation::from_strings(
			ComponentId::new("my-searcher"),
			Some("com.acme.Searcher@acme"),
			None,
		);
		assert_eq!(spec.class_id.as_str(), "com.acme.Searcher@acme");
		assert_eq!(spec.bundle.as_str(), "com.acme.Searcher");
	}

	#[test]
	fn test_platform_bundle_is_disk_prefixed() {
		let bundle = PlatformBundle::new("/opt/harbor/lib/jars/metrics.jar");
		assert_eq!(
			bundle.to_file_reference_string(),
			"file:/opt/harbor/lib/jars/metrics.jar"
		);
	}
}
