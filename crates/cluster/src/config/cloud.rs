//! Consumer types projected from cluster-wide settings and deployment facts.

use serde::{Deserialize, Serialize};

/// Which metrics consumer the container reports to by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricConsumerFactory {
	#[default]
	Unknown,
	StateMonitor,
	Scoreboard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricDefaultsConfig {
	pub factory: MetricConsumerFactory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterInfoConfig {
	pub cluster_id: String,
	pub node_count: i32,
	pub services: Vec<ClusterInfoService>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterInfoService {
	pub index: i32,
	pub hostname: String,
	pub ports: Vec<ClusterInfoPort>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterInfoPort {
	pub number: i32,
	pub tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingProviderConfig {
	pub enabled: bool,
}

impl Default for RoutingProviderConfig {
	fn default() -> Self {
		Self { enabled: true }
	}
}

/// The zone part of the config server config, so containers can tell where
/// they run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigserverConfig {
	pub system: String,
	pub environment: String,
	pub region: String,
}

impl Default for ConfigserverConfig {
	fn default() -> Self {
		Self {
			system: "main".to_string(),
			environment: "prod".to_string(),
			region: "default".to_string(),
		}
	}
}
