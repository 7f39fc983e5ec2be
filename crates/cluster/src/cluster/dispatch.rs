//! Config production for a sealed cluster.
//!
//! Each consumer type is filled in one of three ways: by enumerating the
//! cluster's own contents, by projecting a setting, or by delegating to an
//! optional sub-producer. An absent sub-producer leaves the builder at its
//! defaults.

use std::collections::BTreeMap;

use harbor_components::Component;

use super::{ContainerCluster, Sealed};
use crate::config::{
	self, ApplicationMetadataConfig, BundlesConfig, ClusterInfoConfig, ClusterInfoPort,
	ClusterInfoService, ComponentEntry, ComponentsConfig, ConfigDef, ConfigProducer,
	ConfigSnapshot, ConfigserverConfig, ConsumerKind, ContainerDocumentConfig,
	ContainerMbusConfig, DocprocConfig, Doctype, DocumentManagerConfig, FeederConfig, FileEntry,
	HandlerBindings, HealthMonitorConfig, IlscriptsConfig, IndexInfoConfig, JdiscBindingsConfig,
	MetricDefaultsConfig, PageTemplatesConfig, QrSearchersConfig, QrStartConfig,
	QueryProfilesConfig, RankProfilesConfig, RankingConstantsConfig, RoutingProviderConfig,
	SchemamappingConfig, SemanticRulesConfig, ServletPath, ServletPathsConfig, ThreadpoolConfig,
	delegate,
};
use crate::container::Container;

/// Index reported for a container that was never assigned one.
const UNKNOWN_INDEX: i32 = 99999;

impl ContainerCluster<Sealed> {
	/// Produces a fresh config of type `C`.
	pub fn config<C: ConfigDef>(&self) -> C
	where
		Self: ConfigProducer<C>,
	{
		let mut builder = C::default();
		ConfigProducer::<C>::get_config(self, &mut builder);
		builder
	}

	/// Produces a fresh config of the consumer type named by `kind`.
	pub fn fill_config(&self, kind: ConsumerKind) -> ConfigSnapshot {
		config::fill(self, kind)
	}

	/// Produces a config for every consumer type.
	pub fn snapshot_all(&self) -> BTreeMap<ConsumerKind, ConfigSnapshot> {
		ConsumerKind::ALL
			.iter()
			.map(|&kind| (kind, self.fill_config(kind)))
			.collect()
	}

	fn config_id(&self, component: &Component) -> String {
		format!("{}/component/{}", self.sub_id, component.id())
	}
}

impl ConfigProducer<ComponentsConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ComponentsConfig) {
		for (component, files) in self.components_with_files() {
			let model = component.model();
			builder.components.push(ComponentEntry {
				id: component.id().to_string(),
				class_id: model.class_id.as_str().to_string(),
				bundle: model.bundle.as_str().to_string(),
				config_id: self.config_id(component),
				inject: component.injected().iter().map(ToString::to_string).collect(),
				files: files
					.iter()
					.map(|file| FileEntry {
						key: file.key.clone(),
						reference: file.reference.value().to_string(),
					})
					.collect(),
			});
		}
	}
}

impl ConfigProducer<JdiscBindingsConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut JdiscBindingsConfig) {
		for handler in self.handlers() {
			builder.handlers.insert(
				handler.id().to_string(),
				HandlerBindings {
					server_bindings: handler.server_bindings().to_vec(),
					client_bindings: handler.client_bindings().to_vec(),
				},
			);
		}
	}
}

impl ConfigProducer<ServletPathsConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ServletPathsConfig) {
		for servlet in self.all_servlets() {
			builder.servlets.insert(
				servlet.id().to_string(),
				ServletPath {
					path: servlet.path().to_string(),
				},
			);
		}
	}
}

impl ConfigProducer<BundlesConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut BundlesConfig) {
		builder.bundle.extend(
			self.application_bundles
				.iter()
				.map(|bundle| bundle.value().to_string())
				.chain(
					self.platform_bundles
						.iter()
						.map(|bundle| bundle.to_file_reference_string()),
				),
		);
	}
}

impl ConfigProducer<DocumentManagerConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut DocumentManagerConfig) {
		if self
			.docproc
			.as_deref()
			.is_some_and(|docproc| docproc.compress_documents())
		{
			builder.enable_compression = true;
		}
	}
}

impl ConfigProducer<ContainerDocumentConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ContainerDocumentConfig) {
		for (type_name, factory) in &self.settings.concrete_document_types {
			builder.doctype.push(Doctype {
				type_name: type_name.clone(),
				factory_component: factory.clone(),
			});
		}
	}
}

impl ConfigProducer<ContainerMbusConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ContainerMbusConfig) {
		if let Some(mbus) = &self.settings.mbus {
			if let Some(factor) = mbus.max_concurrent_factor {
				builder.max_concurrent_factor = factor;
			}
			if let Some(factor) = mbus.document_expansion_factor {
				builder.document_expansion_factor = factor;
			}
			if let Some(memory) = mbus.container_core_memory {
				builder.container_core_memory = memory;
			}
		}
		delegate(self.docproc.as_deref(), builder);
	}
}

impl ConfigProducer<HealthMonitorConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut HealthMonitorConfig) {
		if let Some(interval) = self.settings.health_snapshot_interval {
			builder.snapshot_interval = interval;
		}
	}
}

impl ConfigProducer<ApplicationMetadataConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ApplicationMetadataConfig) {
		let metadata = self.metadata();
		builder.name = metadata.name.clone();
		builder.user = metadata.deployed_by_user.clone();
		builder.path = metadata.deploy_path.clone();
		builder.timestamp = metadata.deploy_timestamp;
		builder.checksum = metadata.checksum.clone();
		builder.generation = metadata.generation;
	}
}

impl ConfigProducer<QrStartConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut QrStartConfig) {
		if let Some(percentage) = self.settings.memory_percentage {
			builder.jvm.heap_size_as_percentage_of_physical_memory =
				i32::try_from(percentage).unwrap_or(i32::MAX);
		}
		if let Some(gc_opts) = &self.settings.gc_opts {
			builder.jvm.gcopts = gc_opts.clone();
		}
		delegate(self.search.as_deref(), builder);
	}
}

impl ConfigProducer<IlscriptsConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut IlscriptsConfig) {
		for cluster in &self.search_clusters {
			cluster.get_config(builder);
		}
	}
}

impl ConfigProducer<MetricDefaultsConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut MetricDefaultsConfig) {
		if let Some(factory) = self.settings.default_metric_consumer_factory {
			builder.factory = factory;
		}
	}
}

impl ConfigProducer<ClusterInfoConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ClusterInfoConfig) {
		builder.cluster_id = self.name.clone();
		builder.node_count = i32::try_from(self.containers.len()).unwrap_or(i32::MAX);
		builder
			.services
			.extend(self.containers.iter().map(cluster_info_service));
	}
}

fn cluster_info_service(container: &Container) -> ClusterInfoService {
	ClusterInfoService {
		index: container
			.property("index")
			.and_then(|index| index.parse().ok())
			.unwrap_or(UNKNOWN_INDEX),
		hostname: container.host_name().to_string(),
		ports: container
			.ports()
			.iter()
			.map(|port| ClusterInfoPort {
				number: i32::from(port.number),
				tags: port.tags.join(" "),
			})
			.collect(),
	}
}

impl ConfigProducer<RoutingProviderConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut RoutingProviderConfig) {
		builder.enabled = self.hosted;
	}
}

impl ConfigProducer<ConfigserverConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ConfigserverConfig) {
		builder.system = self.zone.system.clone();
		builder.environment = self.zone.environment.clone();
		builder.region = self.zone.region.clone();
	}
}

impl ConfigProducer<ThreadpoolConfig> for ContainerCluster<Sealed> {
	fn get_config(&self, builder: &mut ThreadpoolConfig) {
		self.policy.threadpool_defaults(builder);
	}
}

macro_rules! delegating {
	($($slot:ident => $($config:ty),+;)*) => {
		$($(
			impl ConfigProducer<$config> for ContainerCluster<Sealed> {
				fn get_config(&self, builder: &mut $config) {
					delegate(self.$slot.as_deref(), builder);
				}
			}
		)+)*
	};
}

delegating! {
	search => QrSearchersConfig, QueryProfilesConfig, PageTemplatesConfig, SemanticRulesConfig,
		IndexInfoConfig;
	docproc => DocprocConfig, SchemamappingConfig;
	document_api => FeederConfig;
	model_evaluation => RankProfilesConfig, RankingConstantsConfig;
}
