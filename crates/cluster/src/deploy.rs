//! Collaborators consulted while constructing and preparing a cluster.

use std::path::{Path, PathBuf};

use harbor_components::Component;
use harbor_model::{ApplicationMetadata, FileReference, Zone};

use crate::container::Container;
use crate::error::FileResolutionError;

/// Deployment facts known when the cluster is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployState {
	pub zone: Zone,
	/// Whether the application runs on the hosted platform.
	pub hosted: bool,
}

impl DeployState {
	pub fn hosted(zone: Zone) -> Self {
		Self { zone, hosted: true }
	}
}

/// A component bundle listed in the application package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
	pub path_relative_to_app_dir: PathBuf,
}

impl ComponentInfo {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path_relative_to_app_dir: path.into(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	Info,
	Warning,
}

/// Receives messages meant for the person deploying the application.
pub trait DeployLogger {
	fn log(&self, level: LogLevel, message: &str);
}

/// Forwards deploy messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDeployLogger;

impl DeployLogger for TracingDeployLogger {
	fn log(&self, level: LogLevel, message: &str) {
		match level {
			LogLevel::Info => tracing::info!(target: "harbor::deploy", "{message}"),
			LogLevel::Warning => tracing::warn!(target: "harbor::deploy", "{message}"),
		}
	}
}

/// The application package being deployed.
pub trait DeployContext {
	/// Component bundles shipped with the application.
	///
	/// A package that cannot be listed is an error, not an empty package.
	fn application_components(&self) -> Result<Vec<ComponentInfo>, FileResolutionError>;

	fn application_metadata(&self) -> ApplicationMetadata;

	fn deploy_logger(&self) -> &dyn DeployLogger;
}

/// A user-configured file setting resolved to a distributable reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
	pub key: String,
	pub reference: FileReference,
}

/// Ships files from the application package to container hosts.
pub trait FileDistribution {
	/// Resolves `relative_path` and schedules it for every container in
	/// `targets`.
	fn send_file(
		&self,
		relative_path: &Path,
		targets: &[Container],
	) -> Result<FileReference, FileResolutionError>;

	/// Resolves every file-valued setting of `component` and ships it to
	/// `targets`.
	///
	/// The default implementation sends each setting with [`Self::send_file`]
	/// and stops at the first failure.
	fn send_user_configured_files(
		&self,
		component: &Component,
		targets: &[Container],
		logger: &dyn DeployLogger,
	) -> Result<Vec<ResolvedFile>, FileResolutionError> {
		let mut resolved = Vec::new();
		for (key, path) in component.user_files() {
			let reference =
				self.send_file(path, targets)
					.map_err(|source| FileResolutionError::UserFile {
						component: component.id().clone(),
						key: key.to_string(),
						source: Box::new(source),
					})?;
			if targets.is_empty() {
				logger.log(
					LogLevel::Warning,
					&format!(
						"File {} for component {} is not sent to any container",
						path.display(),
						component.id()
					),
				);
			}
			resolved.push(ResolvedFile {
				key: key.to_string(),
				reference,
			});
		}
		Ok(resolved)
	}
}
