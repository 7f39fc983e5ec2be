//! Consumer types owned by the container cluster itself.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

/// Components to instantiate in every container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentsConfig {
	pub components: Vec<ComponentEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentEntry {
	pub id: String,
	pub class_id: String,
	pub bundle: String,
	pub config_id: String,
	pub inject: Vec<String>,
	pub files: Vec<FileEntry>,
}

/// A user-configured file setting, resolved during prepare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileEntry {
	pub key: String,
	pub reference: String,
}

/// Request handler bindings, keyed by handler id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JdiscBindingsConfig {
	pub handlers: BTreeMap<String, HandlerBindings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HandlerBindings {
	pub server_bindings: Vec<String>,
	pub client_bindings: Vec<String>,
}

/// Servlet mount paths, keyed by servlet id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServletPathsConfig {
	pub servlets: IndexMap<String, ServletPath>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServletPath {
	pub path: String,
}

/// Bundles to install, application bundles first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundlesConfig {
	pub bundle: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadpoolConfig {
	pub max_threads: i32,
	/// Zero means a synchronous hand-off queue.
	pub queue_size: i32,
	pub max_thread_execution_time_seconds: i32,
}

impl Default for ThreadpoolConfig {
	fn default() -> Self {
		Self {
			max_threads: 500,
			queue_size: 0,
			max_thread_execution_time_seconds: 190,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthMonitorConfig {
	/// Seconds between health snapshots.
	pub snapshot_interval: f64,
}

impl Default for HealthMonitorConfig {
	fn default() -> Self {
		Self {
			snapshot_interval: 60.0,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationMetadataConfig {
	pub name: String,
	pub user: String,
	pub path: String,
	pub timestamp: i64,
	pub checksum: String,
	pub generation: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerMbusConfig {
	pub max_concurrent_factor: f64,
	pub document_expansion_factor: f64,
	/// In MB.
	pub container_core_memory: i32,
	pub max_pending_count: i32,
}

impl Default for ContainerMbusConfig {
	fn default() -> Self {
		Self {
			max_concurrent_factor: 0.2,
			document_expansion_factor: 80.0,
			container_core_memory: 150,
			max_pending_count: 2048,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentManagerConfig {
	pub enable_compression: bool,
}

/// Factories for concrete document types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerDocumentConfig {
	pub doctype: Vec<Doctype>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Doctype {
	#[serde(rename = "type")]
	pub type_name: String,
	pub factory_component: String,
}
