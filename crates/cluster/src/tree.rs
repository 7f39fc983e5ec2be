//! Ownership tree traversal.
//!
//! The cluster and its sub-producers form a tree. Components can appear at any
//! depth and may nest further components; containers are leaves whose own
//! contents are not part of cluster-wide discovery.

use harbor_components::Component;

use crate::container::Container;

/// A child in the ownership tree.
#[derive(Clone, Copy)]
pub enum Node<'a> {
	Component(&'a Component),
	Container(&'a Container),
	Producer(&'a (dyn ProducerNode + 'a)),
}

/// Something that owns children in the cluster's tree.
pub trait ProducerNode {
	/// Returns the direct children, in ownership order.
	fn children(&self) -> Vec<Node<'_>>;
}

/// Collects every component reachable from `root`, depth first.
///
/// Nested components of a component are visited after it. Containers are not
/// entered.
pub fn collect_components<'a>(root: &'a (dyn ProducerNode + 'a)) -> Vec<&'a Component> {
	let mut out = Vec::new();
	walk(root.children(), &mut out);
	out
}

fn walk<'a>(children: Vec<Node<'a>>, out: &mut Vec<&'a Component>) {
	for child in children {
		match child {
			Node::Component(component) => push_component(component, out),
			Node::Container(_) => {}
			Node::Producer(producer) => walk(producer.children(), out),
		}
	}
}

fn push_component<'a>(component: &'a Component, out: &mut Vec<&'a Component>) {
	out.push(component);
	for child in component.children() {
		push_component(child, out);
	}
}
