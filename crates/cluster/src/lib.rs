//! Container cluster model and config snapshot generation.
//!
//! # Purpose
//!
//! A [`ContainerCluster`] aggregates everything a cluster of container hosts
//! runs: components, handlers and servlets, processing/search/docproc chains,
//! optional sub-producers, bundles and cluster-wide settings. From that tree
//! it produces one config snapshot per consumer type.
//!
//! # Mental Model
//!
//! 1. **Build:** a [`DraftCluster`] is populated by the model builder
//!    (`add_component`, `add_container`, `set_search`, ...).
//! 2. **Prepare:** [`ContainerCluster::prepare`] consumes the draft exactly once,
//!    ships bundles and user files through a [`FileDistribution`], captures
//!    application metadata, and returns a [`SealedCluster`].
//! 3. **Query:** the sealed cluster fills config builders via
//!    [`ConfigProducer`], [`SealedCluster::fill_config`] or
//!    [`SealedCluster::snapshot_all`]. Queries never mutate.
//!
//! # Invariants
//!
//! - Must produce config independent of build-time call order.
//!   - Enforced in: [`ContainerCluster::all_components`] (sorted by
//!     [`Component::natural_cmp`]).
//!   - Tested by: `tests/ordering.rs`.
//!
//! - Must not discover components nested inside containers.
//!   - Enforced in: [`tree::collect_components`].
//!   - Tested by: `tests/discovery.rs`.
//!
//! - Must prepare exactly once before any query.
//!   - Enforced in: the type system ([`Draft`] → [`Sealed`]).
//!
//! [`Component`]: harbor_components::Component
//! [`Component::natural_cmp`]: harbor_components::Component::natural_cmp

pub mod chains;
pub mod cluster;
pub mod config;
pub mod container;
pub mod deploy;
pub mod error;
pub mod policy;
pub mod producers;
pub mod settings;
pub mod tree;

pub use chains::{Chain, Chains};
pub use cluster::{
	ContainerCluster, Draft, DraftCluster, Phase, ROOT_HANDLER_BINDING, Sealed, SealedCluster,
};
pub use config::{ConfigDef, ConfigProducer, ConfigSnapshot, ConsumerKind, UnknownConsumer};
pub use container::{Container, Port};
pub use deploy::{
	ComponentInfo, DeployContext, DeployLogger, DeployState, FileDistribution, LogLevel,
	ResolvedFile, TracingDeployLogger,
};
pub use error::{ClusterError, FileResolutionError};
pub use policy::{AcceptAll, ClusterPolicy, ComponentVerdict, ContainerVerdict};
pub use producers::{
	DocprocProducer, DocumentApiProducer, Http, HttpProducer, ModelEvaluationProducer, RestApi,
	SearchClusterProducer, SearchProducer, SecretGroup, SecretStore,
};
pub use settings::{ClusterSettings, MbusParams, SettingsError};
pub use tree::{Node, ProducerNode};
