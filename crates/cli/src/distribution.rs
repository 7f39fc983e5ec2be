//! An application package on local disk.
//!
//! Stands in for the deploy-time file distribution service: files are read
//! from the package directory and referenced by a digest of their content.

use std::hash::Hasher;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use harbor_cluster::{
	ComponentInfo, Container, DeployContext, DeployLogger, FileDistribution, FileResolutionError,
	TracingDeployLogger,
};
use harbor_model::{ApplicationMetadata, FileReference};
use rustc_hash::FxHasher;

/// Directory of component bundles inside an application package.
const COMPONENTS_DIR: &str = "components";
const BUNDLE_EXTENSION: &str = "jar";

/// The application package rooted at a directory.
#[derive(Debug)]
pub struct DiskApplication {
	root: PathBuf,
	metadata: ApplicationMetadata,
	logger: TracingDeployLogger,
}

impl DiskApplication {
	/// An empty `deploy_path` in `metadata` is filled in with `root`.
	pub fn new(root: impl Into<PathBuf>, mut metadata: ApplicationMetadata) -> Self {
		let root = root.into();
		if metadata.deploy_path.is_empty() {
			metadata.deploy_path = root.display().to_string();
		}
		Self {
			root,
			metadata,
			logger: TracingDeployLogger,
		}
	}
}

impl DeployContext for DiskApplication {
	/// Bundles in `components/`, sorted by file name. A package without a
	/// `components/` directory has no bundles.
	fn application_components(&self) -> Result<Vec<ComponentInfo>, FileResolutionError> {
		let dir = self.root.join(COMPONENTS_DIR);
		let io_error = |source| FileResolutionError::Io {
			path: dir.clone(),
			source,
		};
		let entries = match std::fs::read_dir(&dir) {
			Ok(entries) => entries,
			Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
			Err(error) => return Err(io_error(error)),
		};
		let mut bundles = Vec::new();
		for entry in entries {
			let path = entry.map_err(io_error)?.path();
			if !path.is_file() || path.extension().is_none_or(|ext| ext != BUNDLE_EXTENSION) {
				continue;
			}
			if let Some(name) = path.file_name() {
				bundles.push(Path::new(COMPONENTS_DIR).join(name));
			}
		}
		bundles.sort();
		tracing::debug!(dir = %dir.display(), count = bundles.len(), "listed component bundles");
		Ok(bundles.into_iter().map(ComponentInfo::new).collect())
	}

	fn application_metadata(&self) -> ApplicationMetadata {
		self.metadata.clone()
	}

	fn deploy_logger(&self) -> &dyn DeployLogger {
		&self.logger
	}
}

/// Resolves files relative to the package root.
#[derive(Debug, Clone)]
pub struct DiskFileDistribution {
	root: PathBuf,
}

impl DiskFileDistribution {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl FileDistribution for DiskFileDistribution {
	fn send_file(
		&self,
		relative_path: &Path,
		targets: &[Container],
	) -> Result<FileReference, FileResolutionError> {
		let path = self.root.join(relative_path);
		let content = std::fs::read(&path).map_err(|source| match source.kind() {
			ErrorKind::NotFound => FileResolutionError::NotFound {
				path: relative_path.to_path_buf(),
			},
			_ => FileResolutionError::Io {
				path: path.clone(),
				source,
			},
		})?;

		let mut hasher = FxHasher::default();
		hasher.write(relative_path.as_os_str().as_encoded_bytes());
		hasher.write(&content);
		let reference = FileReference::new(format!("{:016x}", hasher.finish()));

		let hosts: Vec<_> = targets.iter().map(Container::host_name).collect();
		tracing::debug!(
			path = %relative_path.display(),
			%reference,
			?hosts,
			"file scheduled for distribution"
		);
		Ok(reference)
	}
}
