//! Processing, search and docproc chains.
//!
//! A chain is an ordered list of components a request or document passes
//! through. Chains are grouped in a [`Chains`] collection owned by the
//! sub-producer that runs them.

use harbor_components::{Component, ComponentRegistry, RegistryEntry, RegistryError};
use harbor_model::ComponentId;

use crate::tree::{Node, ProducerNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
	id: ComponentId,
	inherits: Vec<ComponentId>,
	components: Vec<Component>,
}

impl Chain {
	pub fn new(id: ComponentId) -> Self {
		Self {
			id,
			inherits: Vec::new(),
			components: Vec::new(),
		}
	}

	pub fn with_component(mut self, component: Component) -> Self {
		self.components.push(component);
		self
	}

	pub fn inheriting(mut self, parent: ComponentId) -> Self {
		self.inherits.push(parent);
		self
	}

	pub fn id(&self) -> &ComponentId {
		&self.id
	}

	pub fn inherits(&self) -> &[ComponentId] {
		&self.inherits
	}

	pub fn components(&self) -> &[Component] {
		&self.components
	}
}

impl RegistryEntry for Chain {
	fn id(&self) -> &ComponentId {
		&self.id
	}
}

impl ProducerNode for Chain {
	fn children(&self) -> Vec<Node<'_>> {
		self.components.iter().map(Node::Component).collect()
	}
}

/// A uniquely keyed group of chains.
#[derive(Debug, Clone)]
pub struct Chains {
	chains: ComponentRegistry<Chain>,
}

impl Chains {
	pub fn new(label: &'static str) -> Self {
		Self {
			chains: ComponentRegistry::new(label),
		}
	}

	pub fn add(&mut self, chain: Chain) -> Result<(), RegistryError> {
		self.chains.add(chain)
	}

	pub fn with_chain(mut self, chain: Chain) -> Result<Self, RegistryError> {
		self.add(chain)?;
		Ok(self)
	}

	pub fn get(&self, id: &ComponentId) -> Option<&Chain> {
		self.chains.get(id)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Chain> {
		self.chains.values()
	}

	pub fn len(&self) -> usize {
		self.chains.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chains.is_empty()
	}
}

impl ProducerNode for Chains {
	fn children(&self) -> Vec<Node<'_>> {
		self.chains
			.values()
			.map(|chain| Node::Producer(chain as &dyn ProducerNode))
			.collect()
	}
}
