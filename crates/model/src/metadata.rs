use serde::{Deserialize, Serialize};

/// Facts about the deployed application package, captured once during prepare.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationMetadata {
	pub name: String,
	pub deployed_by_user: String,
	pub deploy_path: String,
	/// Milliseconds since the Unix epoch.
	pub deploy_timestamp: i64,
	pub checksum: String,
	pub generation: i64,
}
