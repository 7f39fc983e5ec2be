use std::path::PathBuf;

use harbor_components::RegistryError;
use harbor_model::{ComponentId, ModelError};

/// Fatal errors raised while building, preparing or querying a cluster.
///
/// Component rejection by the cluster policy is not an error;
/// see [`crate::ComponentVerdict::SilentlyDropped`].
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
	#[error(transparent)]
	DuplicateIdentity(#[from] RegistryError),

	#[error(transparent)]
	InvalidId(#[from] ModelError),

	#[error("cluster {cluster} does not accept container {container}: {reason}")]
	RejectedByPolicy {
		cluster: String,
		container: String,
		reason: String,
	},

	#[error("{what} should only be set once in cluster {cluster}")]
	AlreadySet {
		cluster: String,
		what: &'static str,
	},

	#[error("{producer} components not found in container cluster '{cluster}': {hint}")]
	MissingRequiredSubProducer {
		cluster: String,
		producer: &'static str,
		hint: &'static str,
	},

	#[error("prepare failed: {0}")]
	FileResolution(#[from] FileResolutionError),
}

/// A bundle or user-configured file could not be resolved for distribution.
#[derive(Debug, thiserror::Error)]
pub enum FileResolutionError {
	#[error("file {path:?} not found in application package")]
	NotFound { path: PathBuf },

	#[error("failed to read {path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("component {component}: setting {key:?}: {source}")]
	UserFile {
		component: ComponentId,
		key: String,
		#[source]
		source: Box<FileResolutionError>,
	},
}
