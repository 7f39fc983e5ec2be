#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use harbor_cluster::config::{
	ContainerMbusConfig, DocprocConfig, FeederConfig, IlscriptsConfig, Ilscript, IndexInfo,
	IndexInfoConfig, PageTemplatesConfig, QrSearchersConfig, QrStartConfig, QueryProfilesConfig,
	RankProfile, RankProfilesConfig, RankingConstantsConfig, SchemamappingConfig, SearchCluster,
	SemanticRulesConfig,
};
use harbor_cluster::{
	Chains, ComponentInfo, ConfigProducer, Container, DeployContext, DeployLogger, DeployState,
	DocprocProducer, DocumentApiProducer, DraftCluster, FileDistribution, FileResolutionError,
	LogLevel, ModelEvaluationProducer, Node, ProducerNode, SearchClusterProducer, SearchProducer,
};
use harbor_components::Component;
use harbor_model::{ApplicationMetadata, FileReference};

pub fn draft(name: &str) -> DraftCluster {
	DraftCluster::new(name, name, &DeployState::default())
}

/// Collects deploy log messages.
#[derive(Debug, Default)]
pub struct RecordingLogger {
	pub messages: RefCell<Vec<(LogLevel, String)>>,
}

impl DeployLogger for RecordingLogger {
	fn log(&self, level: LogLevel, message: &str) {
		self.messages.borrow_mut().push((level, message.to_string()));
	}
}

/// An application package with fixed contents.
#[derive(Debug, Default)]
pub struct FakeApp {
	pub bundles: Vec<PathBuf>,
	/// Listing the package fails.
	pub unlistable: bool,
	pub metadata: ApplicationMetadata,
	pub logger: RecordingLogger,
}

impl FakeApp {
	pub fn with_bundle(mut self, path: &str) -> Self {
		self.bundles.push(PathBuf::from(path));
		self
	}

	pub fn unlistable() -> Self {
		Self {
			unlistable: true,
			..Self::default()
		}
	}
}

impl DeployContext for FakeApp {
	fn application_components(&self) -> Result<Vec<ComponentInfo>, FileResolutionError> {
		if self.unlistable {
			return Err(FileResolutionError::Io {
				path: PathBuf::from("components"),
				source: std::io::Error::other("not a directory"),
			});
		}
		Ok(self.bundles.iter().cloned().map(ComponentInfo::new).collect())
	}

	fn application_metadata(&self) -> ApplicationMetadata {
		self.metadata.clone()
	}

	fn deploy_logger(&self) -> &dyn DeployLogger {
		&self.logger
	}
}

/// Hands out `ref:<path>` references and records every send.
#[derive(Debug, Default)]
pub struct FakeFiles {
	pub missing: BTreeSet<PathBuf>,
	pub sent: RefCell<Vec<(PathBuf, usize)>>,
}

impl FakeFiles {
	pub fn missing(path: &str) -> Self {
		Self {
			missing: BTreeSet::from([PathBuf::from(path)]),
			..Self::default()
		}
	}
}

impl FileDistribution for FakeFiles {
	fn send_file(
		&self,
		relative_path: &Path,
		targets: &[Container],
	) -> Result<FileReference, FileResolutionError> {
		if self.missing.contains(relative_path) {
			return Err(FileResolutionError::NotFound {
				path: relative_path.to_path_buf(),
			});
		}
		self.sent
			.borrow_mut()
			.push((relative_path.to_path_buf(), targets.len()));
		Ok(FileReference::new(format!("ref:{}", relative_path.display())))
	}
}

#[derive(Debug)]
pub struct FakeSearch {
	pub chains: Chains,
	pub components: Vec<Component>,
	pub connected: Vec<String>,
}

impl FakeSearch {
	pub fn new() -> Self {
		Self {
			chains: Chains::new("search-chains"),
			components: Vec::new(),
			connected: Vec::new(),
		}
	}

	pub fn with_component(mut self, component: Component) -> Self {
		self.components.push(component);
		self
	}
}

impl ProducerNode for FakeSearch {
	fn children(&self) -> Vec<Node<'_>> {
		let mut children: Vec<Node<'_>> = self.components.iter().map(Node::Component).collect();
		children.push(Node::Producer(&self.chains));
		children
	}
}

impl ConfigProducer<QrSearchersConfig> for FakeSearch {
	fn get_config(&self, builder: &mut QrSearchersConfig) {
		for name in &self.connected {
			builder.searchcluster.push(SearchCluster {
				name: name.clone(),
				..SearchCluster::default()
			});
		}
	}
}

impl ConfigProducer<QrStartConfig> for FakeSearch {
	fn get_config(&self, builder: &mut QrStartConfig) {
		builder.jvm.verbosegc = false;
	}
}

impl ConfigProducer<QueryProfilesConfig> for FakeSearch {
	fn get_config(&self, _builder: &mut QueryProfilesConfig) {}
}

impl ConfigProducer<PageTemplatesConfig> for FakeSearch {
	fn get_config(&self, builder: &mut PageTemplatesConfig) {
		builder.page.push("default".to_string());
	}
}

impl ConfigProducer<SemanticRulesConfig> for FakeSearch {
	fn get_config(&self, _builder: &mut SemanticRulesConfig) {}
}

impl ConfigProducer<IndexInfoConfig> for FakeSearch {
	fn get_config(&self, builder: &mut IndexInfoConfig) {
		builder.indexinfo.push(IndexInfo {
			name: "music".to_string(),
			command: Vec::new(),
		});
	}
}

impl SearchProducer for FakeSearch {
	fn chains(&self) -> &Chains {
		&self.chains
	}

	fn connect_search_clusters(&mut self, clusters: &[Arc<dyn SearchClusterProducer>]) {
		self.connected = clusters.iter().map(|c| c.name().to_string()).collect();
	}
}

#[derive(Debug)]
pub struct FakeDocproc {
	pub chains: Chains,
	pub compress: bool,
}

impl FakeDocproc {
	pub fn new(compress: bool) -> Self {
		Self {
			chains: Chains::new("docproc-chains"),
			compress,
		}
	}
}

impl ProducerNode for FakeDocproc {
	fn children(&self) -> Vec<Node<'_>> {
		vec![Node::Producer(&self.chains)]
	}
}

impl ConfigProducer<DocprocConfig> for FakeDocproc {
	fn get_config(&self, builder: &mut DocprocConfig) {
		builder.max_messages_in_queue = 100;
	}
}

impl ConfigProducer<SchemamappingConfig> for FakeDocproc {
	fn get_config(&self, _builder: &mut SchemamappingConfig) {}
}

impl ConfigProducer<ContainerMbusConfig> for FakeDocproc {
	fn get_config(&self, builder: &mut ContainerMbusConfig) {
		builder.max_pending_count = 4096;
	}
}

impl DocprocProducer for FakeDocproc {
	fn chains(&self) -> &Chains {
		&self.chains
	}

	fn compress_documents(&self) -> bool {
		self.compress
	}
}

#[derive(Debug)]
pub struct FakeDocumentApi;

impl ProducerNode for FakeDocumentApi {
	fn children(&self) -> Vec<Node<'_>> {
		Vec::new()
	}
}

impl ConfigProducer<FeederConfig> for FakeDocumentApi {
	fn get_config(&self, builder: &mut FeederConfig) {
		builder.route = "indexing".to_string();
	}
}

impl DocumentApiProducer for FakeDocumentApi {}

/// Records how many containers it was prepared for.
#[derive(Debug, Default)]
pub struct FakeModelEvaluation {
	pub prepared_for: Option<usize>,
}

impl ProducerNode for FakeModelEvaluation {
	fn children(&self) -> Vec<Node<'_>> {
		Vec::new()
	}
}

impl ConfigProducer<RankProfilesConfig> for FakeModelEvaluation {
	fn get_config(&self, builder: &mut RankProfilesConfig) {
		builder.rankprofile.push(RankProfile {
			name: format!("prepared-for-{}", self.prepared_for.unwrap_or_default()),
			fef_properties: Vec::new(),
		});
	}
}

impl ConfigProducer<RankingConstantsConfig> for FakeModelEvaluation {
	fn get_config(&self, _builder: &mut RankingConstantsConfig) {}
}

impl ModelEvaluationProducer for FakeModelEvaluation {
	fn prepare(&mut self, containers: &[Container]) {
		self.prepared_for = Some(containers.len());
	}
}

#[derive(Debug)]
pub struct FakeSearchCluster {
	pub name: String,
	pub doctype: String,
}

impl FakeSearchCluster {
	pub fn new(name: &str, doctype: &str) -> Arc<dyn SearchClusterProducer> {
		Arc::new(Self {
			name: name.to_string(),
			doctype: doctype.to_string(),
		})
	}
}

impl ConfigProducer<IlscriptsConfig> for FakeSearchCluster {
	fn get_config(&self, builder: &mut IlscriptsConfig) {
		builder.ilscript.push(Ilscript {
			doctype: self.doctype.clone(),
			..Ilscript::default()
		});
	}
}

impl SearchClusterProducer for FakeSearchCluster {
	fn name(&self) -> &str {
		&self.name
	}
}
