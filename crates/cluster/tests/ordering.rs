//! Config output must not depend on the order components were added in.

#![allow(unused_crate_dependencies)]

mod common;

use harbor_cluster::config::ComponentsConfig;
use harbor_cluster::{Chain, Chains, Container, SealedCluster};
use harbor_components::Component;
use harbor_model::{BundleInstantiation, ComponentId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{FakeApp, FakeFiles, draft};

fn components() -> Vec<Component> {
	vec![
		Component::simple_from_class("container.logging.AccessLog"),
		Component::handler_from_class("my.SearchHandler").with_server_bindings(["http://*/search/*"]),
		Component::handler_from_class("my.DocumentHandler")
			.with_server_bindings(["http://*/document/*", "https://*/document/*"]),
		Component::new(BundleInstantiation::from_strings(
			ComponentId::new("tokenizer"),
			Some("my.Tokenizer"),
			Some("linguistics"),
		))
		.with_child(Component::simple_from_class("my.TokenizerModel")),
		Component::simple_from_class("my.Cache").with_user_file("dictionary", "files/dict.txt"),
		Component::new(BundleInstantiation::from_class("my.Metrics")),
	]
}

fn build(order: &[Component]) -> SealedCluster {
	let mut cluster = draft("default");
	for component in order {
		cluster.add_component(component.clone()).unwrap();
	}
	let chains = Chains::new("processing-chains")
		.with_chain(
			Chain::new(ComponentId::new("default"))
				.with_component(Component::new(BundleInstantiation::from_class("my.Processor"))),
		)
		.unwrap();
	cluster
		.set_processing_chains(chains, ["http://*/processing/*"])
		.unwrap();
	cluster
		.add_container(Container::new("c0", "host0.example.com"))
		.unwrap();
	cluster
		.prepare(&FakeApp::default().with_bundle("components/app.jar"), &FakeFiles::default())
		.unwrap()
}

fn ids(cluster: &SealedCluster) -> Vec<String> {
	cluster
		.all_components()
		.iter()
		.map(|c| c.id().to_string())
		.collect()
}

#[test]
fn test_all_components_in_natural_order() {
	let cluster = build(&components());

	assert_eq!(
		ids(&cluster),
		[
			"container.logging.AccessLog",
			"container.processing.handler.ProcessingHandler",
			"my.Cache",
			"my.DocumentHandler",
			"my.Metrics",
			"my.Processor",
			"my.SearchHandler",
			"my.TokenizerModel",
			"tokenizer",
		]
	);
}

#[test]
fn test_components_config_carries_resolved_files() {
	let cluster = build(&components());
	let config: ComponentsConfig = cluster.config();

	let cache = config
		.components
		.iter()
		.find(|entry| entry.id == "my.Cache")
		.unwrap();
	assert_eq!(cache.config_id, "default/component/my.Cache");
	assert_eq!(cache.files.len(), 1);
	assert_eq!(cache.files[0].key, "dictionary");
	assert_eq!(cache.files[0].reference, "ref:files/dict.txt");

	let tokenizer = config
		.components
		.iter()
		.find(|entry| entry.id == "tokenizer")
		.unwrap();
	assert_eq!(tokenizer.class_id, "my.Tokenizer");
	assert_eq!(tokenizer.bundle, "linguistics");
	assert!(tokenizer.files.is_empty());
}

fn build_with_chain_order(chain_ids: &[&str]) -> SealedCluster {
	let mut chains = Chains::new("processing-chains");
	for id in chain_ids {
		let cache =
			Component::simple_from_class("my.Cache").with_user_file("dict", format!("files/{id}.txt"));
		chains
			.add(Chain::new(ComponentId::new(*id)).with_component(cache))
			.unwrap();
	}
	let mut cluster = draft("default");
	cluster
		.set_processing_chains(chains, ["http://*/processing/*"])
		.unwrap();
	cluster
		.add_container(Container::new("c0", "host0.example.com"))
		.unwrap();
	cluster
		.prepare(&FakeApp::default(), &FakeFiles::default())
		.unwrap()
}

#[test]
fn test_same_id_components_keep_their_own_files() {
	let forward = build_with_chain_order(&["a", "b"]);
	let backward = build_with_chain_order(&["b", "a"]);

	let config: ComponentsConfig = forward.config();
	let references: Vec<_> = config
		.components
		.iter()
		.filter(|entry| entry.id == "my.Cache")
		.map(|entry| entry.files[0].reference.as_str())
		.collect();
	assert_eq!(references, ["ref:files/a.txt", "ref:files/b.txt"]);

	assert_eq!(
		serde_json::to_string(&forward.config::<ComponentsConfig>()).unwrap(),
		serde_json::to_string(&backward.config::<ComponentsConfig>()).unwrap()
	);
}

proptest! {
	#[test]
	fn prop_snapshots_independent_of_insertion_order(
		order in Just(components()).prop_shuffle()
	) {
		let baseline = build(&components());
		let shuffled = build(&order);

		prop_assert_eq!(ids(&shuffled), ids(&baseline));
		prop_assert_eq!(
			serde_json::to_string(&shuffled.snapshot_all()).unwrap(),
			serde_json::to_string(&baseline.snapshot_all()).unwrap()
		);
	}
}
