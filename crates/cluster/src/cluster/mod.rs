//! The container cluster aggregator.
//!
//! # Purpose
//!
//! Owns every build-time contribution to a container cluster and exposes the
//! read-only views config generation is computed from.
//!
//! # Mental Model
//!
//! [`ContainerCluster`] is parameterized by its lifecycle phase. Build
//! operations exist only on [`Draft`]; config queries exist only on [`Sealed`].
//! [`ContainerCluster::prepare`] is the single transition and consumes the
//! draft, so a cluster can neither be prepared twice nor queried unprepared.
//!
//! # Invariants
//!
//! - Must keep at most one processing chain collection.
//!   - Enforced in: [`ContainerCluster::set_processing_chains`].
//!   - Tested by: `cluster::tests::test_processing_chains_set_twice_fails`.
//!   - Failure symptom: two processing handlers bound to the same paths.
//!
//! - Must leave the cluster unchanged when an admission fails.
//!   - Enforced in: [`ContainerCluster::add_component`],
//!     [`ContainerCluster::add_container`].
//!   - Tested by: `cluster::tests::test_duplicate_component_leaves_registry_unchanged`,
//!     `cluster::tests::test_rejected_container_is_not_added`.

mod defaults;
mod discovery;
mod dispatch;
mod prepare;

use std::sync::Arc;

use harbor_components::{Component, ComponentRegistry, Servlet};
use harbor_model::{
	ApplicationMetadata, BundleInstantiation, ComponentId, FileReference, PlatformBundle, Zone,
};
use indexmap::IndexSet;

use crate::chains::Chains;
use crate::config::MetricConsumerFactory;
use crate::container::Container;
use crate::deploy::{DeployState, ResolvedFile};
use crate::error::ClusterError;
use crate::policy::{AcceptAll, ClusterPolicy, ComponentVerdict, ContainerVerdict};
use crate::producers::{
	DocprocProducer, DocumentApiProducer, HttpProducer, ModelEvaluationProducer, RestApi,
	SearchClusterProducer, SearchProducer, SecretStore,
};
use crate::settings::{ClusterSettings, MbusParams};

pub use defaults::ROOT_HANDLER_BINDING;

const PROCESSING_HANDLER_CLASS: &str = "container.processing.handler.ProcessingHandler";

mod sealed {
	pub trait Sealed {}
}

/// Lifecycle phase of a [`ContainerCluster`].
pub trait Phase: sealed::Sealed + std::fmt::Debug {}

/// A cluster still being built.
#[derive(Debug, Clone, Copy, Default)]
pub struct Draft;

/// A prepared cluster. Carries what prepare resolved.
#[derive(Debug, Clone)]
pub struct Sealed {
	metadata: ApplicationMetadata,
	/// Aligned with [`ContainerCluster::all_components`].
	resolved_files: Vec<Vec<ResolvedFile>>,
}

impl sealed::Sealed for Draft {}
impl sealed::Sealed for Sealed {}
impl Phase for Draft {}
impl Phase for Sealed {}

pub type DraftCluster = ContainerCluster<Draft>;
pub type SealedCluster = ContainerCluster<Sealed>;

/// A cluster of container hosts and everything they run.
#[derive(Debug)]
pub struct ContainerCluster<P: Phase = Draft> {
	sub_id: String,
	name: String,
	zone: Zone,
	hosted: bool,
	policy: Box<dyn ClusterPolicy>,
	components: ComponentRegistry<Component>,
	rest_apis: ComponentRegistry<RestApi>,
	servlets: ComponentRegistry<Servlet>,
	containers: Vec<Container>,
	http: Option<Box<dyn HttpProducer>>,
	processing_chains: Option<Chains>,
	search: Option<Box<dyn SearchProducer>>,
	docproc: Option<Box<dyn DocprocProducer>>,
	document_api: Option<Box<dyn DocumentApiProducer>>,
	model_evaluation: Option<Box<dyn ModelEvaluationProducer>>,
	secret_store: Option<SecretStore>,
	search_clusters: Vec<Arc<dyn SearchClusterProducer>>,
	application_bundles: IndexSet<FileReference>,
	platform_bundles: IndexSet<PlatformBundle>,
	settings: ClusterSettings,
	phase: P,
}

impl ContainerCluster<Draft> {
	/// Creates an empty cluster that admits every component and container.
	pub fn new(sub_id: impl Into<String>, name: impl Into<String>, deploy: &DeployState) -> Self {
		Self::with_policy(sub_id, name, deploy, Box::new(AcceptAll))
	}

	pub fn with_policy(
		sub_id: impl Into<String>,
		name: impl Into<String>,
		deploy: &DeployState,
		policy: Box<dyn ClusterPolicy>,
	) -> Self {
		Self {
			sub_id: sub_id.into(),
			name: name.into(),
			zone: deploy.zone.clone(),
			hosted: deploy.hosted,
			policy,
			components: ComponentRegistry::new("component"),
			rest_apis: ComponentRegistry::new("rest-api"),
			servlets: ComponentRegistry::new("servlet"),
			containers: Vec::new(),
			http: None,
			processing_chains: None,
			search: None,
			docproc: None,
			document_api: None,
			model_evaluation: None,
			secret_store: None,
			search_clusters: Vec::new(),
			application_bundles: IndexSet::new(),
			platform_bundles: IndexSet::new(),
			settings: ClusterSettings::default(),
			phase: Draft,
		}
	}

	/// Registers `component` if the cluster policy accepts it.
	///
	/// A component the policy drops is skipped without error.
	pub fn add_component(&mut self, component: Component) -> Result<(), ClusterError> {
		if self.policy.accept_component(&component) == ComponentVerdict::SilentlyDropped {
			tracing::debug!(
				cluster = %self.name,
				id = %component.id(),
				"component dropped by cluster policy"
			);
			return Ok(());
		}
		self.components.add(component)?;
		Ok(())
	}

	/// Registers a simple component. The class defaults to the id and the
	/// bundle to the class.
	pub fn add_simple_component(
		&mut self,
		id: ComponentId,
		class: Option<&str>,
		bundle: Option<&str>,
	) -> Result<(), ClusterError> {
		self.add_component(Component::simple(BundleInstantiation::from_strings(
			id, class, bundle,
		)))
	}

	pub fn remove_component(&mut self, id: &ComponentId) -> Option<Component> {
		self.components.remove(id)
	}

	/// Admits `container` and assigns it the next index.
	pub fn add_container(&mut self, mut container: Container) -> Result<(), ClusterError> {
		if let ContainerVerdict::Rejected(reason) = self.policy.accept_container(&container) {
			return Err(ClusterError::RejectedByPolicy {
				cluster: self.name.clone(),
				container: container.to_string(),
				reason,
			});
		}
		let index = self.containers.len();
		container.attach(&self.name, index);
		tracing::debug!(
			cluster = %self.name,
			index,
			host = container.host_name(),
			"container added"
		);
		self.containers.push(container);
		Ok(())
	}

	/// Admits every container in order, stopping at the first rejection.
	pub fn add_containers(
		&mut self,
		containers: impl IntoIterator<Item = Container>,
	) -> Result<(), ClusterError> {
		containers
			.into_iter()
			.try_for_each(|container| self.add_container(container))
	}

	/// Installs the processing chains and a handler serving them on `bindings`.
	pub fn set_processing_chains<I, S>(
		&mut self,
		chains: Chains,
		bindings: I,
	) -> Result<(), ClusterError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if self.processing_chains.is_some() {
			return Err(ClusterError::AlreadySet {
				cluster: self.name.clone(),
				what: "processing chains",
			});
		}
		let handler =
			Component::handler_from_class(PROCESSING_HANDLER_CLASS).with_server_bindings(bindings);
		self.add_component(handler)?;
		self.processing_chains = Some(chains);
		Ok(())
	}

	/// Replaces the HTTP setup. It becomes part of the ownership tree.
	pub fn set_http(&mut self, http: Box<dyn HttpProducer>) {
		self.http = Some(http);
	}

	pub fn set_search(&mut self, search: Box<dyn SearchProducer>) {
		self.search = Some(search);
	}

	pub fn set_docproc(&mut self, docproc: Box<dyn DocprocProducer>) {
		self.docproc = Some(docproc);
	}

	pub fn set_document_api(&mut self, document_api: Box<dyn DocumentApiProducer>) {
		self.document_api = Some(document_api);
	}

	pub fn set_model_evaluation(&mut self, model_evaluation: Box<dyn ModelEvaluationProducer>) {
		self.model_evaluation = Some(model_evaluation);
	}

	pub fn set_secret_store(&mut self, secret_store: SecretStore) {
		self.secret_store = Some(secret_store);
	}

	/// Registers a REST API under its binding path.
	pub fn add_rest_api(&mut self, api: RestApi) -> Result<(), ClusterError> {
		self.rest_apis.add(api)?;
		Ok(())
	}

	/// Registers a servlet under its global id.
	pub fn add_servlet(&mut self, servlet: Servlet) -> Result<(), ClusterError> {
		self.servlets.insert(servlet.global_id().clone(), servlet)?;
		Ok(())
	}

	/// Adds a bundle that is already installed on the container hosts.
	pub fn add_platform_bundle(&mut self, bundle: PlatformBundle) {
		self.platform_bundles.insert(bundle);
	}

	/// Attaches a content cluster whose indexing scripts this cluster serves.
	/// The search module is connected to every attached cluster during prepare.
	pub fn attach_search_cluster(&mut self, cluster: Arc<dyn SearchClusterProducer>) {
		self.search_clusters.push(cluster);
	}

	pub fn set_zone(&mut self, zone: Zone) {
		self.zone = zone;
	}

	/// Replaces every cluster-wide setting at once.
	pub fn apply_settings(&mut self, settings: ClusterSettings) {
		self.settings = settings;
	}

	pub fn set_memory_percentage(&mut self, percentage: u32) {
		self.settings.memory_percentage = Some(percentage);
	}

	pub fn set_gc_opts(&mut self, gc_opts: impl Into<String>) {
		self.settings.gc_opts = Some(gc_opts.into());
	}

	pub fn set_host_cluster_id(&mut self, cluster_id: impl Into<String>) {
		self.settings.host_cluster_id = Some(cluster_id.into());
	}

	pub fn set_mbus_params(&mut self, params: MbusParams) {
		self.settings.mbus = Some(params);
	}

	pub fn set_default_metric_consumer_factory(&mut self, factory: MetricConsumerFactory) {
		self.settings.default_metric_consumer_factory = Some(factory);
	}

	pub fn set_health_snapshot_interval(&mut self, seconds: f64) {
		self.settings.health_snapshot_interval = Some(seconds);
	}

	pub fn set_rpc_server_enabled(&mut self, enabled: bool) {
		self.settings.rpc_server_enabled = enabled;
	}

	pub fn set_http_server_enabled(&mut self, enabled: bool) {
		self.settings.http_server_enabled = enabled;
	}

	pub fn add_service_alias(&mut self, alias: impl Into<String>) {
		self.settings.service_aliases.push(alias.into());
	}

	pub fn add_endpoint_alias(&mut self, alias: impl Into<String>) {
		self.settings.endpoint_aliases.push(alias.into());
	}

	/// Maps a concrete document type to the component that creates it.
	pub fn add_concrete_document_type(
		&mut self,
		document_type: impl Into<String>,
		factory_component: impl Into<String>,
	) {
		self.settings
			.concrete_document_types
			.insert(document_type.into(), factory_component.into());
	}
}

impl<P: Phase> ContainerCluster<P> {
	fn into_phase<Q: Phase>(self, phase: Q) -> ContainerCluster<Q> {
		ContainerCluster {
			sub_id: self.sub_id,
			name: self.name,
			zone: self.zone,
			hosted: self.hosted,
			policy: self.policy,
			components: self.components,
			rest_apis: self.rest_apis,
			servlets: self.servlets,
			containers: self.containers,
			http: self.http,
			processing_chains: self.processing_chains,
			search: self.search,
			docproc: self.docproc,
			document_api: self.document_api,
			model_evaluation: self.model_evaluation,
			secret_store: self.secret_store,
			search_clusters: self.search_clusters,
			application_bundles: self.application_bundles,
			platform_bundles: self.platform_bundles,
			settings: self.settings,
			phase,
		}
	}

	/// Identifier of the cluster within its parent, used to build config ids.
	pub fn sub_id(&self) -> &str {
		&self.sub_id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn zone(&self) -> &Zone {
		&self.zone
	}

	pub fn is_hosted(&self) -> bool {
		self.hosted
	}

	pub fn policy(&self) -> &dyn ClusterPolicy {
		self.policy.as_ref()
	}

	/// Components registered directly on the cluster, in registration order.
	pub fn components(&self) -> &ComponentRegistry<Component> {
		&self.components
	}

	pub fn rest_apis(&self) -> &ComponentRegistry<RestApi> {
		&self.rest_apis
	}

	pub fn servlets(&self) -> &ComponentRegistry<Servlet> {
		&self.servlets
	}

	pub fn containers(&self) -> &[Container] {
		&self.containers
	}

	pub fn http(&self) -> Option<&dyn HttpProducer> {
		self.http.as_deref()
	}

	pub fn processing_chains(&self) -> Option<&Chains> {
		self.processing_chains.as_ref()
	}

	pub fn search(&self) -> Option<&dyn SearchProducer> {
		self.search.as_deref()
	}

	pub fn docproc(&self) -> Option<&dyn DocprocProducer> {
		self.docproc.as_deref()
	}

	pub fn document_api(&self) -> Option<&dyn DocumentApiProducer> {
		self.document_api.as_deref()
	}

	pub fn model_evaluation(&self) -> Option<&dyn ModelEvaluationProducer> {
		self.model_evaluation.as_deref()
	}

	pub fn secret_store(&self) -> Option<&SecretStore> {
		self.secret_store.as_ref()
	}

	pub fn search_clusters(&self) -> &[Arc<dyn SearchClusterProducer>] {
		&self.search_clusters
	}

	/// Bundles shipped with the application, in resolution order.
	pub fn application_bundles(&self) -> impl Iterator<Item = &FileReference> {
		self.application_bundles.iter()
	}

	pub fn platform_bundles(&self) -> impl Iterator<Item = &PlatformBundle> {
		self.platform_bundles.iter()
	}

	pub fn settings(&self) -> &ClusterSettings {
		&self.settings
	}
}

impl ContainerCluster<Sealed> {
	/// Application metadata captured during prepare.
	pub fn metadata(&self) -> &ApplicationMetadata {
		&self.phase.metadata
	}

	/// Every component in natural order, paired with the files resolved for
	/// its file-valued settings during prepare.
	///
	/// Components that share an id each keep their own files.
	pub fn components_with_files(&self) -> Vec<(&Component, &[ResolvedFile])> {
		self.all_components()
			.into_iter()
			.enumerate()
			.map(|(position, component)| {
				let files = self
					.phase
					.resolved_files
					.get(position)
					.map_or(&[][..], Vec::as_slice);
				(component, files)
			})
			.collect()
	}
}

impl<P: Phase> std::fmt::Display for ContainerCluster<P> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "container cluster '{}'", self.name)
	}
}

#[cfg(test)]
mod tests;
