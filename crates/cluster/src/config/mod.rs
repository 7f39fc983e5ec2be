//! Config consumer types and the dispatch table.
//!
//! Every consumer type is a plain builder struct with defaults. A producer
//! fills a builder through [`ConfigProducer::get_config`]; contributions from
//! several producers are merged by letting each of them fill the same builder.
//!
//! [`ConsumerKind`] and [`ConfigSnapshot`] are generated from one table so the
//! typed and the dynamic query paths cannot drift apart.

mod cloud;
mod container;
mod docproc;
mod model_eval;
mod search;

use std::fmt;
use std::str::FromStr;

pub use cloud::{
	ClusterInfoConfig, ClusterInfoPort, ClusterInfoService, ConfigserverConfig,
	MetricConsumerFactory, MetricDefaultsConfig, RoutingProviderConfig,
};
pub use container::{
	ApplicationMetadataConfig, BundlesConfig, ComponentEntry, ComponentsConfig,
	ContainerDocumentConfig, ContainerMbusConfig, Doctype, DocumentManagerConfig, FileEntry,
	HandlerBindings, HealthMonitorConfig, JdiscBindingsConfig, ServletPath, ServletPathsConfig,
	ThreadpoolConfig,
};
pub use docproc::{DocprocConfig, FeederConfig, FieldMapping, SchemamappingConfig};
pub use model_eval::{RankProfile, RankingConstant, RankingConstantsConfig, RankProfilesConfig};
pub use search::{
	IlscriptsConfig, Ilscript, IndexCommand, IndexInfo, IndexInfoConfig, PageTemplatesConfig,
	QrSearchersConfig, QrStartConfig, QrStartJvm, QueryProfile, QueryProfilesConfig, Rulebase,
	SearchCluster, SemanticRulesConfig,
};
use serde::{Serialize, Serializer};

/// A config consumer type.
pub trait ConfigDef: Default + Clone + fmt::Debug + Serialize {
	/// Name of the consumer type, as used by the distribution layer.
	const NAME: &'static str;
	const KIND: ConsumerKind;
}

/// Fills builders of consumer type `C`.
///
/// Implementations must be pure: calling `get_config` any number of times, in
/// any order relative to other consumer types, yields the same contribution.
pub trait ConfigProducer<C: ConfigDef> {
	fn get_config(&self, builder: &mut C);
}

/// Lets `producer` contribute to `builder` when present. An absent producer
/// contributes nothing.
pub(crate) fn delegate<C, P>(producer: Option<&P>, builder: &mut C)
where
	C: ConfigDef,
	P: ConfigProducer<C> + ?Sized,
{
	if let Some(producer) = producer {
		producer.get_config(builder);
	}
}

macro_rules! consumers {
	($($kind:ident => $config:ty, $name:literal;)*) => {
		/// Every consumer type a cluster produces config for.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum ConsumerKind {
			$($kind,)*
		}

		impl ConsumerKind {
			/// All consumer kinds, in dispatch order.
			pub const ALL: &'static [ConsumerKind] = &[$(ConsumerKind::$kind,)*];

			pub const fn name(self) -> &'static str {
				match self {
					$(ConsumerKind::$kind => $name,)*
				}
			}
		}

		/// A filled builder of any consumer type.
		#[derive(Debug, Clone, PartialEq, Serialize)]
		#[serde(untagged)]
		pub enum ConfigSnapshot {
			$($kind($config),)*
		}

		impl ConfigSnapshot {
			pub fn kind(&self) -> ConsumerKind {
				match self {
					$(ConfigSnapshot::$kind(_) => ConsumerKind::$kind,)*
				}
			}
		}

		$(
			impl ConfigDef for $config {
				const NAME: &'static str = $name;
				const KIND: ConsumerKind = ConsumerKind::$kind;
			}

			impl From<$config> for ConfigSnapshot {
				fn from(config: $config) -> Self {
					ConfigSnapshot::$kind(config)
				}
			}
		)*

		/// Fills a fresh builder of `kind` from `producer`.
		pub(crate) fn fill<P>(producer: &P, kind: ConsumerKind) -> ConfigSnapshot
		where
			P: ?Sized $(+ ConfigProducer<$config>)*,
		{
			match kind {
				$(ConsumerKind::$kind => {
					let mut builder = <$config>::default();
					ConfigProducer::<$config>::get_config(producer, &mut builder);
					ConfigSnapshot::$kind(builder)
				})*
			}
		}
	};
}

consumers! {
	Components => ComponentsConfig, "components";
	JdiscBindings => JdiscBindingsConfig, "jdisc-bindings";
	ServletPaths => ServletPathsConfig, "servlet-paths";
	Bundles => BundlesConfig, "bundles";
	DocumentManager => DocumentManagerConfig, "document-manager";
	ContainerDocument => ContainerDocumentConfig, "container-document";
	ContainerMbus => ContainerMbusConfig, "container-mbus";
	HealthMonitor => HealthMonitorConfig, "health-monitor";
	ApplicationMetadata => ApplicationMetadataConfig, "application-metadata";
	Feeder => FeederConfig, "feeder";
	IndexInfo => IndexInfoConfig, "index-info";
	Ilscripts => IlscriptsConfig, "ilscripts";
	Schemamapping => SchemamappingConfig, "schema-mapping";
	QrSearchers => QrSearchersConfig, "qr-searchers";
	QrStart => QrStartConfig, "qr-start";
	QueryProfiles => QueryProfilesConfig, "query-profiles";
	PageTemplates => PageTemplatesConfig, "page-templates";
	SemanticRules => SemanticRulesConfig, "semantic-rules";
	Docproc => DocprocConfig, "docproc";
	MetricDefaults => MetricDefaultsConfig, "metric-defaults";
	ClusterInfo => ClusterInfoConfig, "cluster-info";
	RoutingProvider => RoutingProviderConfig, "routing-provider";
	Configserver => ConfigserverConfig, "configserver";
	Threadpool => ThreadpoolConfig, "threadpool";
	RankProfiles => RankProfilesConfig, "rank-profiles";
	RankingConstants => RankingConstantsConfig, "ranking-constants";
}

impl fmt::Display for ConsumerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl Serialize for ConsumerKind {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.name())
	}
}

/// Error for an unrecognized consumer name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown config consumer {0:?}")]
pub struct UnknownConsumer(pub String);

impl FromStr for ConsumerKind {
	type Err = UnknownConsumer;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ConsumerKind::ALL
			.iter()
			.copied()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| UnknownConsumer(s.to_string()))
	}
}
