//! Consumer types contributed by the search sub-producer and content clusters.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexInfoConfig {
	pub indexinfo: Vec<IndexInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexInfo {
	pub name: String,
	pub command: Vec<IndexCommand>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexCommand {
	pub indexname: String,
	pub command: String,
}

/// Indexing scripts, one per document type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IlscriptsConfig {
	pub ilscript: Vec<Ilscript>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ilscript {
	pub doctype: String,
	pub docfield: Vec<String>,
	pub content: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QrSearchersConfig {
	pub searchcluster: Vec<SearchCluster>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchCluster {
	pub name: String,
	pub searchdef: Vec<String>,
	pub rankprofiles_configid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QrStartConfig {
	pub jvm: QrStartJvm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrStartJvm {
	/// Zero leaves the heap size to the start script.
	pub heap_size_as_percentage_of_physical_memory: i32,
	pub gcopts: String,
	pub verbosegc: bool,
}

impl Default for QrStartJvm {
	fn default() -> Self {
		Self {
			heap_size_as_percentage_of_physical_memory: 0,
			gcopts: String::new(),
			verbosegc: true,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryProfilesConfig {
	pub queryprofile: Vec<QueryProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryProfile {
	pub id: String,
	pub inherit: Vec<String>,
	pub property: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageTemplatesConfig {
	pub page: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SemanticRulesConfig {
	pub rulebase: Vec<Rulebase>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rulebase {
	pub name: String,
	pub is_default: bool,
	pub rules: String,
}
