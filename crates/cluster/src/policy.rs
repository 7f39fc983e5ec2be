//! Admission policy for components and containers.
//!
//! Rejecting a component and rejecting a container are different outcomes:
//! a dropped component is an intentional filter and silently skipped, while a
//! rejected container fails the build. The two verdict types keep them apart.

use std::fmt;

use harbor_components::Component;

use crate::config::ThreadpoolConfig;
use crate::container::Container;

/// Policy verdict for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentVerdict {
	Accepted,
	SilentlyDropped,
}

/// Policy verdict for a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerVerdict {
	Accepted,
	Rejected(String),
}

/// Decides what a cluster admits, and contributes thread pool defaults.
pub trait ClusterPolicy: fmt::Debug + Send + Sync {
	fn accept_component(&self, component: &Component) -> ComponentVerdict;

	fn accept_container(&self, container: &Container) -> ContainerVerdict;

	/// Contributes to the cluster's thread pool config. The default keeps the
	/// config defaults.
	fn threadpool_defaults(&self, _builder: &mut ThreadpoolConfig) {}
}

/// Admits everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ClusterPolicy for AcceptAll {
	fn accept_component(&self, _component: &Component) -> ComponentVerdict {
		ComponentVerdict::Accepted
	}

	fn accept_container(&self, _container: &Container) -> ContainerVerdict {
		ContainerVerdict::Accepted
	}
}
