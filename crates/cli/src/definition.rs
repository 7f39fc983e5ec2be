//! TOML cluster definitions.
//!
//! A definition describes one container cluster:
//!
//! ```toml
//! name = "default"
//! defaults = true
//! platform-bundles = ["/opt/harbor/lib/jars/config-bundle.jar"]
//!
//! [settings]
//! memory-percentage = 60
//!
//! [[component]]
//! id = "my.SearchHandler"
//! kind = "handler"
//! server-bindings = ["http://*/search/*"]
//!
//! [[container]]
//! name = "c0"
//! host = "host0.example.com"
//! port = [{ number = 4080, tags = ["http"] }]
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use harbor_cluster::{
	Chain, Chains, ClusterSettings, Container, DeployState, DraftCluster, Http, Port, RestApi,
};
use harbor_components::{Component, Servlet};
use harbor_model::{ApplicationMetadata, BundleInstantiation, ComponentId, PlatformBundle, Zone};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClusterDefinition {
	pub name: String,
	/// Defaults to `name`.
	#[serde(default)]
	pub sub_id: Option<String>,
	#[serde(default)]
	pub hosted: bool,
	#[serde(default)]
	pub zone: Zone,
	/// Install the platform components and handlers.
	#[serde(default)]
	pub defaults: bool,
	#[serde(default)]
	pub settings: ClusterSettings,
	#[serde(default, rename = "component")]
	pub components: Vec<ComponentDefinition>,
	#[serde(default, rename = "servlet")]
	pub servlets: Vec<ServletDefinition>,
	#[serde(default, rename = "rest-api")]
	pub rest_apis: Vec<RestApiDefinition>,
	#[serde(default)]
	pub processing: Option<ProcessingDefinition>,
	#[serde(default)]
	pub http: Option<HttpDefinition>,
	#[serde(default, rename = "container")]
	pub containers: Vec<ContainerDefinition>,
	#[serde(default)]
	pub platform_bundles: Vec<PathBuf>,
	#[serde(default)]
	pub application: ApplicationMetadata,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKindDefinition {
	Generic,
	#[default]
	Simple,
	Handler,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ComponentDefinition {
	pub id: ComponentId,
	#[serde(default)]
	pub class: Option<String>,
	#[serde(default)]
	pub bundle: Option<String>,
	#[serde(default)]
	pub kind: ComponentKindDefinition,
	#[serde(default)]
	pub server_bindings: Vec<String>,
	#[serde(default)]
	pub client_bindings: Vec<String>,
	#[serde(default)]
	pub inject: Vec<ComponentId>,
	/// File-valued settings, relative to the application package.
	#[serde(default)]
	pub files: IndexMap<String, PathBuf>,
	#[serde(default, rename = "child")]
	pub children: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServletDefinition {
	pub id: ComponentId,
	#[serde(default)]
	pub class: Option<String>,
	#[serde(default)]
	pub bundle: Option<String>,
	pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RestApiDefinition {
	pub binding_path: String,
	#[serde(default, rename = "resource")]
	pub resources: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChainDefinition {
	pub id: ComponentId,
	#[serde(default)]
	pub inherits: Vec<ComponentId>,
	#[serde(default, rename = "component")]
	pub components: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ProcessingDefinition {
	pub bindings: Vec<String>,
	#[serde(default, rename = "chain")]
	pub chains: Vec<ChainDefinition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpDefinition {
	#[serde(default, rename = "component")]
	pub components: Vec<ComponentDefinition>,
	#[serde(default, rename = "filter-chain")]
	pub filter_chains: Vec<ChainDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContainerDefinition {
	pub name: String,
	pub host: String,
	#[serde(default, rename = "port")]
	pub ports: Vec<PortDefinition>,
	#[serde(default, rename = "component")]
	pub components: Vec<ComponentDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortDefinition {
	pub number: u16,
	#[serde(default)]
	pub tags: Vec<String>,
}

impl ClusterDefinition {
	pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
		toml::from_str(input).context("invalid cluster definition")
	}

	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read {}", path.display()))?;
		Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
	}

	/// Builds the draft cluster this definition describes.
	pub fn into_cluster(self) -> anyhow::Result<DraftCluster> {
		let deploy = DeployState {
			zone: self.zone,
			hosted: self.hosted,
		};
		let sub_id = self.sub_id.unwrap_or_else(|| self.name.clone());
		let mut cluster = DraftCluster::new(sub_id, self.name, &deploy);
		cluster.apply_settings(self.settings);

		if self.defaults {
			cluster.add_default_components()?;
			cluster.add_metric_state_handler()?;
			cluster.add_application_status_handler()?;
			cluster.add_vip_handler()?;
			cluster.add_statistics_handler()?;
		}

		for component in &self.components {
			cluster
				.add_component(component.to_component())
				.with_context(|| format!("component {}", component.id))?;
		}
		for servlet in &self.servlets {
			cluster.add_servlet(servlet.to_servlet())?;
		}
		for api in &self.rest_apis {
			let mut rest_api = RestApi::new(api.binding_path.as_str())
				.with_context(|| format!("rest api {:?}", api.binding_path))?;
			for resource in &api.resources {
				rest_api.add_resource(resource.to_component());
			}
			cluster.add_rest_api(rest_api)?;
		}
		if let Some(processing) = &self.processing {
			let chains = to_chains("processing-chains", &processing.chains)?;
			cluster.set_processing_chains(chains, processing.bindings.iter().cloned())?;
		}
		if let Some(http) = &self.http {
			cluster.set_http(Box::new(http.to_http()?));
		}
		cluster.add_containers(self.containers.iter().map(ContainerDefinition::to_container))?;
		for bundle in self.platform_bundles {
			cluster.add_platform_bundle(PlatformBundle::new(bundle));
		}

		// After user handlers, so a user-bound root wins.
		if self.defaults {
			cluster.add_default_root_handler()?;
		}
		Ok(cluster)
	}
}

impl ComponentDefinition {
	pub fn to_component(&self) -> Component {
		let model = BundleInstantiation::from_strings(
			self.id.clone(),
			self.class.as_deref(),
			self.bundle.as_deref(),
		);
		let mut component = match self.kind {
			ComponentKindDefinition::Generic => Component::new(model),
			ComponentKindDefinition::Simple => Component::simple(model),
			ComponentKindDefinition::Handler => Component::handler(model),
		};
		component.add_server_bindings(self.server_bindings.iter().cloned());
		component.add_client_bindings(self.client_bindings.iter().cloned());
		for id in &self.inject {
			component.inject(id.clone());
		}
		for (key, path) in &self.files {
			component.set_user_file(key.clone(), path.clone());
		}
		for child in &self.children {
			component.add_child(child.to_component());
		}
		component
	}
}

impl ServletDefinition {
	fn to_servlet(&self) -> Servlet {
		Servlet::new(
			BundleInstantiation::from_strings(
				self.id.clone(),
				self.class.as_deref(),
				self.bundle.as_deref(),
			),
			self.path.clone(),
		)
	}
}

impl HttpDefinition {
	fn to_http(&self) -> anyhow::Result<Http> {
		let mut http = Http::default();
		for component in &self.components {
			http.add_component(component.to_component());
		}
		if !self.filter_chains.is_empty() {
			http.set_filter_chains(to_chains("filter-chains", &self.filter_chains)?);
		}
		Ok(http)
	}
}

impl ContainerDefinition {
	fn to_container(&self) -> Container {
		let mut container = Container::new(self.name.as_str(), self.host.as_str());
		for port in &self.ports {
			container = container.with_port(Port::new(port.number, port.tags.iter().cloned()));
		}
		for component in &self.components {
			container.add_component(component.to_component());
		}
		container
	}
}

fn to_chains(label: &'static str, definitions: &[ChainDefinition]) -> anyhow::Result<Chains> {
	let mut chains = Chains::new(label);
	for definition in definitions {
		let mut chain = Chain::new(definition.id.clone());
		for parent in &definition.inherits {
			chain = chain.inheriting(parent.clone());
		}
		for component in &definition.components {
			chain = chain.with_component(component.to_component());
		}
		chains
			.add(chain)
			.with_context(|| format!("chain {}", definition.id))?;
	}
	Ok(chains)
}

#[cfg(test)]
mod tests;
