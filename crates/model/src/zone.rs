use serde::{Deserialize, Serialize};

/// The zone a cluster is deployed in.
///
/// Self-hosted deployments run in [`Zone::default`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
	pub system: String,
	pub environment: String,
	pub region: String,
}

impl Zone {
	pub fn new(
		system: impl Into<String>,
		environment: impl Into<String>,
		region: impl Into<String>,
	) -> Self {
		Self {
			system: system.into(),
			environment: environment.into(),
			region: region.into(),
		}
	}
}

impl Default for Zone {
	fn default() -> Self {
		Self::new("main", "prod", "default")
	}
}
