use harbor_components::{Component, Servlet};

use super::{ContainerCluster, Phase};
use crate::chains::Chains;
use crate::error::ClusterError;
use crate::tree::{self, Node, ProducerNode};

impl<P: Phase> ProducerNode for ContainerCluster<P> {
	fn children(&self) -> Vec<Node<'_>> {
		let mut children: Vec<Node<'_>> = self.components.values().map(Node::Component).collect();
		children.extend(
			self.rest_apis
				.values()
				.map(|api| Node::Producer(api as &dyn ProducerNode)),
		);
		children.extend(
			self.servlets
				.values()
				.map(|servlet| Node::Component(servlet.as_component())),
		);
		if let Some(chains) = &self.processing_chains {
			children.push(Node::Producer(chains));
		}
		if let Some(search) = self.search.as_deref() {
			children.push(Node::Producer(search));
		}
		if let Some(docproc) = self.docproc.as_deref() {
			children.push(Node::Producer(docproc));
		}
		if let Some(http) = self.http.as_deref() {
			children.push(Node::Producer(http));
		}
		if let Some(document_api) = self.document_api.as_deref() {
			children.push(Node::Producer(document_api));
		}
		if let Some(model_evaluation) = self.model_evaluation.as_deref() {
			children.push(Node::Producer(model_evaluation));
		}
		children.extend(self.containers.iter().map(Node::Container));
		children
	}
}

impl<P: Phase> ContainerCluster<P> {
	/// Every component in the cluster's tree, in natural order.
	///
	/// Includes nested components, chain members and the components of every
	/// attached sub-producer. Components that belong to a single container are
	/// not included.
	pub fn all_components(&self) -> Vec<&Component> {
		let mut components = tree::collect_components(self);
		components.sort_by(|a, b| a.natural_cmp(b));
		components
	}

	/// REST API servlet facades followed by explicitly added servlets.
	pub fn all_servlets(&self) -> Vec<&Servlet> {
		self.rest_apis
			.values()
			.map(|api| api.servlet())
			.chain(self.servlets.values())
			.collect()
	}

	/// The request handlers among [`Self::all_components`].
	pub fn handlers(&self) -> Vec<&Component> {
		self.all_components()
			.into_iter()
			.filter(|component| component.is_handler())
			.collect()
	}

	pub fn has_handler_with_binding(&self, binding: &str) -> bool {
		self.handlers()
			.iter()
			.any(|handler| handler.server_bindings().iter().any(|b| b == binding))
	}

	pub fn search_chains(&self) -> Result<&Chains, ClusterError> {
		self.search
			.as_deref()
			.map(|search| search.chains())
			.ok_or_else(|| ClusterError::MissingRequiredSubProducer {
				cluster: self.sub_id.clone(),
				producer: "Search",
				hint: "add a search section to the cluster definition",
			})
	}

	pub fn docproc_chains(&self) -> Result<&Chains, ClusterError> {
		self.docproc
			.as_deref()
			.map(|docproc| docproc.chains())
			.ok_or_else(|| ClusterError::MissingRequiredSubProducer {
				cluster: self.sub_id.clone(),
				producer: "Document processing",
				hint: "add a document-processing section to the cluster definition",
			})
	}
}
