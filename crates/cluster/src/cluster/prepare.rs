use super::{ContainerCluster, Draft, Sealed};
use crate::deploy::{DeployContext, FileDistribution, ResolvedFile};
use crate::error::ClusterError;

impl ContainerCluster<Draft> {
	/// Resolves everything that depends on the application package and seals
	/// the cluster for config queries.
	///
	/// Application bundles and user-configured files are sent to every
	/// container. Any file that cannot be resolved aborts prepare; the draft is
	/// consumed either way.
	pub fn prepare(
		mut self,
		ctx: &dyn DeployContext,
		files: &dyn FileDistribution,
	) -> Result<ContainerCluster<Sealed>, ClusterError> {
		tracing::info!(
			cluster = %self.name,
			containers = self.containers.len(),
			"preparing container cluster"
		);

		if let Some(search) = self.search.as_deref_mut() {
			search.connect_search_clusters(&self.search_clusters);
		}

		for bundle in ctx.application_components()? {
			let reference = files.send_file(&bundle.path_relative_to_app_dir, &self.containers)?;
			tracing::debug!(
				path = %bundle.path_relative_to_app_dir.display(),
				%reference,
				"application bundle sent"
			);
			self.application_bundles.insert(reference);
		}

		if let Some(model_evaluation) = self.model_evaluation.as_deref_mut() {
			model_evaluation.prepare(&self.containers);
			tracing::debug!("model evaluation prepared");
		}

		// Injections change the natural order, so they must precede file resolution.
		for api in self.rest_apis.values_mut() {
			api.prepare();
		}

		let resolved_files = self.send_user_configured_files(ctx, files)?;

		let metadata = ctx.application_metadata();
		tracing::debug!(
			application = %metadata.name,
			generation = metadata.generation,
			"application metadata captured"
		);

		Ok(self.into_phase(Sealed {
			metadata,
			resolved_files,
		}))
	}

	/// Resolves user files for every component, in [`Self::all_components`] order.
	fn send_user_configured_files(
		&self,
		ctx: &dyn DeployContext,
		files: &dyn FileDistribution,
	) -> Result<Vec<Vec<ResolvedFile>>, ClusterError> {
		self.all_components()
			.into_iter()
			.map(|component| -> Result<_, ClusterError> {
				let sent = files.send_user_configured_files(
					component,
					&self.containers,
					ctx.deploy_logger(),
				)?;
				if !sent.is_empty() {
					tracing::debug!(id = %component.id(), count = sent.len(), "user files sent");
				}
				Ok(sent)
			})
			.collect()
	}
}
