//! Consumer types contributed by document processing and the document API.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocprocConfig {
	/// Negative means unbounded.
	pub max_messages_in_queue: i32,
	pub max_queue_time_ms: i64,
}

impl Default for DocprocConfig {
	fn default() -> Self {
		Self {
			max_messages_in_queue: -1,
			max_queue_time_ms: 0,
		}
	}
}

/// Field name mappings between documents and processors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemamappingConfig {
	pub fieldmapping: Vec<FieldMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldMapping {
	pub chain: String,
	pub docproc: String,
	pub indocument: String,
	pub inprocessor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeederConfig {
	pub abortondocumenterror: bool,
	pub route: String,
	pub maxpendingdocs: i32,
	/// Seconds.
	pub timeout: f64,
}

impl Default for FeederConfig {
	fn default() -> Self {
		Self {
			abortondocumenterror: true,
			route: "default".to_string(),
			maxpendingdocs: 0,
			timeout: 180.0,
		}
	}
}
