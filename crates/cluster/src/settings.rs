//! Cluster-wide scalar settings.
//!
//! Settings can be assigned one by one on a draft cluster or loaded as a whole
//! from a TOML document:
//!
//! ```toml
//! memory-percentage = 60
//! gc-opts = "-XX:+UseG1GC"
//! default-metric-consumer-factory = "state-monitor"
//!
//! [mbus]
//! max-concurrent-factor = 0.4
//! container-core-memory = 200
//!
//! [concrete-document-types]
//! music = "com.acme.MusicFactory"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::MetricConsumerFactory;

/// Message-bus tuning for document processing containers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MbusParams {
	/// Share of max pending bytes to process concurrently, typically 0.2.
	pub max_concurrent_factor: Option<f64>,
	/// How much documents temporarily expand while being processed.
	pub document_expansion_factor: Option<f64>,
	/// Memory reserved for the container itself, in MB.
	pub container_core_memory: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClusterSettings {
	/// Percentage of host physical memory the cluster's containers may use.
	pub memory_percentage: Option<u32>,
	pub gc_opts: Option<String>,
	/// Content cluster whose nodes host this container cluster (hosted only).
	pub host_cluster_id: Option<String>,
	pub mbus: Option<MbusParams>,
	pub default_metric_consumer_factory: Option<MetricConsumerFactory>,
	/// Health snapshot interval in seconds, from the monitoring setup.
	pub health_snapshot_interval: Option<f64>,
	pub rpc_server_enabled: bool,
	pub http_server_enabled: bool,
	pub service_aliases: Vec<String>,
	pub endpoint_aliases: Vec<String>,
	/// Document type → factory component.
	pub concrete_document_types: IndexMap<String, String>,
}

impl Default for ClusterSettings {
	fn default() -> Self {
		Self {
			memory_percentage: None,
			gc_opts: None,
			host_cluster_id: None,
			mbus: None,
			default_metric_consumer_factory: None,
			health_snapshot_interval: None,
			rpc_server_enabled: true,
			http_server_enabled: true,
			service_aliases: Vec::new(),
			endpoint_aliases: Vec::new(),
			concrete_document_types: IndexMap::new(),
		}
	}
}

/// Errors loading [`ClusterSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("failed to read {path:?}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},
	#[error("invalid cluster settings: {0}")]
	Parse(#[from] toml::de::Error),
}

impl ClusterSettings {
	/// Parses settings from a TOML string. Missing keys keep their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|error| SettingsError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}
}
