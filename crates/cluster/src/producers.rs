//! Sub-producer contracts.
//!
//! Optional modules of a cluster (search, document processing, document API,
//! HTTP, model evaluation) are attached as trait objects. Each contract names
//! the consumer types the module contributes to as [`ConfigProducer`]
//! supertraits, so the cluster can delegate to it without knowing its concrete
//! type.

use std::fmt;
use std::sync::Arc;

use harbor_components::{Component, RegistryEntry, Servlet};
use harbor_model::{BundleInstantiation, ComponentId, ModelError};

use crate::chains::Chains;
use crate::config::{
	ConfigProducer, ContainerMbusConfig, DocprocConfig, FeederConfig, IlscriptsConfig,
	IndexInfoConfig, PageTemplatesConfig, QrSearchersConfig, QrStartConfig, QueryProfilesConfig,
	RankProfilesConfig, RankingConstantsConfig, SchemamappingConfig, SemanticRulesConfig,
};
use crate::container::Container;
use crate::tree::{Node, ProducerNode};

/// The search module of a container cluster.
pub trait SearchProducer:
	ProducerNode
	+ ConfigProducer<QrSearchersConfig>
	+ ConfigProducer<QrStartConfig>
	+ ConfigProducer<QueryProfilesConfig>
	+ ConfigProducer<PageTemplatesConfig>
	+ ConfigProducer<SemanticRulesConfig>
	+ ConfigProducer<IndexInfoConfig>
	+ fmt::Debug
	+ Send
	+ Sync
{
	fn chains(&self) -> &Chains;

	/// Called once during prepare with every search cluster attached to the
	/// owning container cluster.
	fn connect_search_clusters(&mut self, clusters: &[Arc<dyn SearchClusterProducer>]);
}

/// The document processing module of a container cluster.
pub trait DocprocProducer:
	ProducerNode
	+ ConfigProducer<DocprocConfig>
	+ ConfigProducer<SchemamappingConfig>
	+ ConfigProducer<ContainerMbusConfig>
	+ fmt::Debug
	+ Send
	+ Sync
{
	fn chains(&self) -> &Chains;

	/// Whether documents are compressed between processors.
	fn compress_documents(&self) -> bool;
}

/// The document API module of a container cluster.
pub trait DocumentApiProducer:
	ProducerNode + ConfigProducer<FeederConfig> + fmt::Debug + Send + Sync
{
}

/// The HTTP server setup of a container cluster, such as filters and their
/// chains.
pub trait HttpProducer: ProducerNode + fmt::Debug + Send + Sync {}

/// Stateless model evaluation.
pub trait ModelEvaluationProducer:
	ProducerNode
	+ ConfigProducer<RankProfilesConfig>
	+ ConfigProducer<RankingConstantsConfig>
	+ fmt::Debug
	+ Send
	+ Sync
{
	/// Ships model files to `containers`. Called once during prepare.
	fn prepare(&mut self, containers: &[Container]);
}

/// A content cluster that indexes documents fed through this container
/// cluster.
pub trait SearchClusterProducer: ConfigProducer<IlscriptsConfig> + fmt::Debug + Send + Sync {
	fn name(&self) -> &str;
}

/// A secret store the application reads credentials from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretStore {
	groups: Vec<SecretGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretGroup {
	pub name: String,
	pub environment: String,
}

impl SecretStore {
	pub fn add_group(&mut self, name: impl Into<String>, environment: impl Into<String>) {
		self.groups.push(SecretGroup {
			name: name.into(),
			environment: environment.into(),
		});
	}

	pub fn groups(&self) -> &[SecretGroup] {
		&self.groups
	}
}

/// Components and filter chains of the HTTP server.
#[derive(Debug, Clone, Default)]
pub struct Http {
	components: Vec<Component>,
	filter_chains: Option<Chains>,
}

impl Http {
	pub fn add_component(&mut self, component: Component) {
		self.components.push(component);
	}

	pub fn set_filter_chains(&mut self, chains: Chains) {
		self.filter_chains = Some(chains);
	}

	pub fn components(&self) -> &[Component] {
		&self.components
	}

	pub fn filter_chains(&self) -> Option<&Chains> {
		self.filter_chains.as_ref()
	}
}

impl ProducerNode for Http {
	fn children(&self) -> Vec<Node<'_>> {
		let mut children: Vec<_> = self.components.iter().map(Node::Component).collect();
		if let Some(chains) = &self.filter_chains {
			children.push(Node::Producer(chains));
		}
		children
	}
}

impl HttpProducer for Http {}

const REST_API_SERVLET_CLASS: &str = "container.jaxrs.RestApiServlet";

/// A REST API mounted at a binding path, served by a servlet facade.
///
/// The servlet facade only learns which resources it serves when the API is
/// prepared.
#[derive(Debug, Clone)]
pub struct RestApi {
	binding_path: String,
	id: ComponentId,
	servlet: Servlet,
	resources: Vec<Component>,
	prepared: bool,
}

impl RestApi {
	/// Creates a REST API mounted at `binding_path`, which doubles as its
	/// identity.
	pub fn new(binding_path: impl Into<String>) -> Result<Self, ModelError> {
		let binding_path = binding_path.into();
		let id: ComponentId = binding_path.parse()?;
		let servlet_id = id.nest_in_namespace(&ComponentId::new("rest-api"));
		let servlet = Servlet::new(
			BundleInstantiation::from_strings(servlet_id, Some(REST_API_SERVLET_CLASS), None),
			format!("{binding_path}/*"),
		);
		Ok(Self {
			binding_path,
			id,
			servlet,
			resources: Vec::new(),
			prepared: false,
		})
	}

	pub fn add_resource(&mut self, resource: Component) {
		self.resources.push(resource);
	}

	pub fn with_resource(mut self, resource: Component) -> Self {
		self.add_resource(resource);
		self
	}

	pub fn binding_path(&self) -> &str {
		&self.binding_path
	}

	pub fn servlet(&self) -> &Servlet {
		&self.servlet
	}

	pub fn resources(&self) -> &[Component] {
		&self.resources
	}

	pub fn is_prepared(&self) -> bool {
		self.prepared
	}

	/// Injects every resource into the servlet facade. Preparing twice has no
	/// further effect.
	pub fn prepare(&mut self) {
		if self.prepared {
			return;
		}
		let mut ids: Vec<_> = self.resources.iter().map(|r| r.id().clone()).collect();
		ids.sort();
		let facade = self.servlet.as_component_mut();
		for id in ids {
			facade.inject(id);
		}
		self.prepared = true;
	}
}

impl RegistryEntry for RestApi {
	fn id(&self) -> &ComponentId {
		&self.id
	}
}

impl ProducerNode for RestApi {
	fn children(&self) -> Vec<Node<'_>> {
		std::iter::once(Node::Component(self.servlet.as_component()))
			.chain(self.resources.iter().map(Node::Component))
			.collect()
	}
}
