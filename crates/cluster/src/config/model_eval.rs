use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankProfilesConfig {
	pub rankprofile: Vec<RankProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankProfile {
	pub name: String,
	pub fef_properties: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingConstantsConfig {
	pub constant: Vec<RankingConstant>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankingConstant {
	pub name: String,
	pub fileref: String,
	#[serde(rename = "type")]
	pub tensor_type: String,
}
