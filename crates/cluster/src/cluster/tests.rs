use harbor_components::{Component, RegistryError, Servlet};
use harbor_model::{BundleInstantiation, ComponentId};
use pretty_assertions::assert_eq;

use super::*;
use crate::chains::{Chain, Chains};
use crate::policy::{ComponentVerdict, ContainerVerdict};

#[derive(Debug)]
struct NoHandlers;

impl ClusterPolicy for NoHandlers {
	fn accept_component(&self, component: &Component) -> ComponentVerdict {
		if component.is_handler() {
			ComponentVerdict::SilentlyDropped
		} else {
			ComponentVerdict::Accepted
		}
	}

	fn accept_container(&self, container: &Container) -> ContainerVerdict {
		if container.host_name().ends_with(".invalid") {
			ContainerVerdict::Rejected("host is not in the allowed domain".to_string())
		} else {
			ContainerVerdict::Accepted
		}
	}
}

fn cluster() -> DraftCluster {
	ContainerCluster::new("default", "default", &DeployState::default())
}

fn ids(components: &[&Component]) -> Vec<String> {
	components.iter().map(|c| c.id().to_string()).collect()
}

#[test]
fn test_duplicate_component_leaves_registry_unchanged() {
	let mut cluster = cluster();
	cluster
		.add_component(Component::simple_from_class("a.First"))
		.unwrap();
	let duplicate = Component::new(BundleInstantiation::from_strings(
		ComponentId::new("a.First"),
		Some("other.Class"),
		None,
	));

	let err = cluster.add_component(duplicate).unwrap_err();

	assert!(matches!(
		err,
		ClusterError::DuplicateIdentity(RegistryError::DuplicateIdentity { .. })
	));
	assert_eq!(cluster.components().len(), 1);
	let kept = cluster
		.components()
		.get(&ComponentId::new("a.First"))
		.unwrap();
	assert_eq!(kept.model().class_id.as_str(), "a.First");
}

#[test]
fn test_policy_drops_component_silently() {
	let mut cluster = ContainerCluster::with_policy(
		"default",
		"default",
		&DeployState::default(),
		Box::new(NoHandlers),
	);
	cluster
		.add_component(Component::handler_from_class("my.Handler"))
		.unwrap();
	cluster
		.add_component(Component::simple_from_class("my.Component"))
		.unwrap();

	assert_eq!(ids(&cluster.components().snapshot()), ["my.Component"]);
}

#[test]
fn test_rejected_container_is_not_added() {
	let mut cluster = ContainerCluster::with_policy(
		"default",
		"search",
		&DeployState::default(),
		Box::new(NoHandlers),
	);
	cluster
		.add_container(Container::new("c0", "host0.example.com"))
		.unwrap();

	let err = cluster
		.add_container(Container::new("c1", "host1.invalid"))
		.unwrap_err();

	match err {
		ClusterError::RejectedByPolicy {
			cluster: name,
			reason,
			..
		} => {
			assert_eq!(name, "search");
			assert_eq!(reason, "host is not in the allowed domain");
		}
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(cluster.containers().len(), 1);
}

#[test]
fn test_add_containers_stops_at_first_rejection() {
	let mut cluster = ContainerCluster::with_policy(
		"default",
		"default",
		&DeployState::default(),
		Box::new(NoHandlers),
	);
	let result = cluster.add_containers([
		Container::new("a", "a.example.com"),
		Container::new("b", "b.invalid"),
		Container::new("c", "c.example.com"),
	]);

	assert!(result.is_err());
	let names: Vec<_> = cluster.containers().iter().map(Container::name).collect();
	assert_eq!(names, ["a"]);
}

#[test]
fn test_processing_chains_set_twice_fails() {
	let mut cluster = cluster();
	cluster
		.set_processing_chains(Chains::new("processing-chains"), ["http://*/processing/*"])
		.unwrap();

	let err = cluster
		.set_processing_chains(Chains::new("processing-chains"), ["http://*/other/*"])
		.unwrap_err();

	assert!(matches!(
		err,
		ClusterError::AlreadySet {
			what: "processing chains",
			..
		}
	));
	let handlers = cluster.handlers();
	assert_eq!(handlers.len(), 1);
	assert_eq!(handlers[0].server_bindings(), ["http://*/processing/*"]);
}

#[test]
fn test_processing_chain_components_are_discovered() {
	let mut cluster = cluster();
	let chains = Chains::new("processing-chains")
		.with_chain(
			Chain::new(ComponentId::new("default"))
				.with_component(Component::new(BundleInstantiation::from_class("my.Processor"))),
		)
		.unwrap();
	cluster
		.set_processing_chains(chains, ["http://*/processing/*"])
		.unwrap();

	assert_eq!(
		ids(&cluster.all_components()),
		["container.processing.handler.ProcessingHandler", "my.Processor"]
	);
}

#[test]
fn test_missing_sub_producers_fail_chain_lookup() {
	let cluster = cluster();

	let err = cluster.search_chains().unwrap_err();
	assert_eq!(
		err.to_string(),
		"Search components not found in container cluster 'default': \
		 add a search section to the cluster definition"
	);
	assert!(matches!(
		cluster.docproc_chains(),
		Err(ClusterError::MissingRequiredSubProducer {
			producer: "Document processing",
			..
		})
	));
}

#[test]
fn test_default_root_handler_is_added_once() {
	let mut cluster = cluster();
	cluster.add_default_root_handler().unwrap();
	cluster.add_default_root_handler().unwrap();

	assert_eq!(cluster.handlers().len(), 1);
	assert!(cluster.has_handler_with_binding(ROOT_HANDLER_BINDING));
}

#[test]
fn test_default_root_handler_skipped_when_root_is_bound() {
	let mut cluster = cluster();
	cluster
		.add_component(
			Component::handler_from_class("my.RootHandler").with_server_bindings([ROOT_HANDLER_BINDING]),
		)
		.unwrap();
	cluster.add_default_root_handler().unwrap();

	assert_eq!(ids(&cluster.handlers()), ["my.RootHandler"]);
}

#[test]
fn test_default_handlers_register_bindings() {
	let mut cluster = cluster();
	cluster.add_metric_state_handler().unwrap();
	cluster.add_application_status_handler().unwrap();
	cluster.add_vip_handler().unwrap();
	cluster.add_statistics_handler().unwrap();

	assert_eq!(cluster.handlers().len(), 4);
	assert!(cluster.has_handler_with_binding("http://*/state/v1/*"));
	assert!(cluster.has_handler_with_binding("https://*/ApplicationStatus"));
	assert!(cluster.has_handler_with_binding("http://*/status.html"));
	assert!(cluster.has_handler_with_binding("https://*/statistics/*"));
}

#[test]
fn test_default_components_cannot_be_added_twice() {
	let mut cluster = cluster();
	cluster.add_default_components().unwrap();
	let count = cluster.components().len();
	assert!(count > 0);

	assert!(cluster.add_default_components().is_err());
	assert_eq!(cluster.components().len(), count);
}

#[test]
fn test_mbus_server_is_nested_under_chain() {
	let mut cluster = cluster();
	cluster
		.add_mbus_server(&ComponentId::new("indexing"))
		.unwrap();

	let components = cluster.all_components();
	assert_eq!(ids(&components), ["indexing@MbusServer"]);
	assert_eq!(
		components[0].model().class_id.as_str(),
		"container.messagebus.MbusServerProvider"
	);
}

#[test]
fn test_search_access_log_depends_on_hosting() {
	let mut self_hosted = cluster();
	self_hosted.add_default_search_access_log().unwrap();
	let mut hosted = ContainerCluster::new(
		"default",
		"default",
		&DeployState::hosted(Zone::default()),
	);
	hosted.add_default_search_access_log().unwrap();

	assert_eq!(
		ids(&self_hosted.all_components()),
		["container.logging.QueryAccessLog@default"]
	);
	assert_eq!(
		ids(&hosted.all_components()),
		["container.logging.JsonAccessLog@default"]
	);
}

#[test]
fn test_remove_component_returns_it() {
	let mut cluster = cluster();
	cluster
		.add_simple_component(ComponentId::new("x"), Some("my.X"), None)
		.unwrap();

	let removed = cluster.remove_component(&ComponentId::new("x")).unwrap();
	assert_eq!(removed.model().bundle.as_str(), "my.X");
	assert!(cluster.remove_component(&ComponentId::new("x")).is_none());
	assert!(cluster.components().is_empty());
}

#[test]
fn test_servlets_keyed_by_global_id() {
	let mut cluster = cluster();
	let servlet = Servlet::new(BundleInstantiation::from_class("my.Servlet"), "app/*");
	cluster.add_servlet(servlet.clone()).unwrap();

	assert!(cluster.add_servlet(servlet).is_err());
	assert_eq!(cluster.servlets().len(), 1);
}

#[test]
fn test_platform_bundles_are_deduplicated() {
	let mut cluster = cluster();
	cluster.add_platform_bundle(PlatformBundle::new("/opt/lib/jars/a.jar"));
	cluster.add_platform_bundle(PlatformBundle::new("/opt/lib/jars/b.jar"));
	cluster.add_platform_bundle(PlatformBundle::new("/opt/lib/jars/a.jar"));

	let paths: Vec<_> = cluster
		.platform_bundles()
		.map(|b| b.to_file_reference_string())
		.collect();
	assert_eq!(paths, ["file:/opt/lib/jars/a.jar", "file:/opt/lib/jars/b.jar"]);
}

#[test]
fn test_setting_setters_update_settings() {
	let mut cluster = cluster();
	cluster.set_memory_percentage(70);
	cluster.set_gc_opts("-XX:+UseG1GC");
	cluster.set_rpc_server_enabled(false);
	cluster.add_service_alias("search");
	cluster.add_concrete_document_type("music", "my.MusicFactory");

	let settings = cluster.settings();
	assert_eq!(settings.memory_percentage, Some(70));
	assert_eq!(settings.gc_opts.as_deref(), Some("-XX:+UseG1GC"));
	assert!(!settings.rpc_server_enabled);
	assert!(settings.http_server_enabled);
	assert_eq!(settings.service_aliases, ["search"]);
	assert_eq!(
		settings.concrete_document_types.get("music").map(String::as_str),
		Some("my.MusicFactory")
	);
}
