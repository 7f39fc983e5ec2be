use harbor_cluster::ROOT_HANDLER_BINDING;
use pretty_assertions::assert_eq;

use super::*;

const DEFINITION: &str = r#"
name = "search"
hosted = true
platform-bundles = ["/opt/harbor/lib/jars/platform.jar"]

[zone]
system = "public"
environment = "prod"
region = "us-east-1"

[settings]
memory-percentage = 60

[[component]]
id = "my.SearchHandler"
kind = "handler"
server-bindings = ["http://*/search/*"]

[[component]]
id = "tokenizer"
class = "my.Tokenizer"
bundle = "linguistics"
inject = ["my.Dictionary"]
files = { model = "files/tokenizer.bin" }

[[component.child]]
id = "my.TokenizerModel"

[[servlet]]
id = "my.Servlet"
path = "my/*"

[[rest-api]]
binding-path = "api"

[[rest-api.resource]]
id = "my.Resource"

[processing]
bindings = ["http://*/processing/*"]

[[processing.chain]]
id = "default"

[[processing.chain.component]]
id = "my.Processor"
kind = "generic"

[[container]]
name = "c0"
host = "host0.example.com"
port = [{ number = 4080, tags = ["http"] }]

[[container]]
name = "c1"
host = "host1.example.com"
"#;

fn ids(cluster: &DraftCluster) -> Vec<String> {
	cluster
		.all_components()
		.iter()
		.map(|c| c.id().to_string())
		.collect()
}

#[test]
fn test_definition_builds_cluster() {
	let cluster = ClusterDefinition::from_toml_str(DEFINITION)
		.unwrap()
		.into_cluster()
		.unwrap();

	assert_eq!(cluster.name(), "search");
	assert_eq!(cluster.sub_id(), "search");
	assert!(cluster.is_hosted());
	assert_eq!(cluster.zone().region, "us-east-1");
	assert_eq!(cluster.settings().memory_percentage, Some(60));
	assert_eq!(
		ids(&cluster),
		[
			"api@rest-api",
			"container.processing.handler.ProcessingHandler",
			"my.Processor",
			"my.Resource",
			"my.SearchHandler",
			"my.Servlet",
			"my.TokenizerModel",
			"tokenizer",
		]
	);
	let names: Vec<_> = cluster.containers().iter().map(Container::name).collect();
	assert_eq!(names, ["c0", "c1"]);
	assert_eq!(cluster.containers()[1].index(), Some(1));
	assert_eq!(cluster.platform_bundles().count(), 1);
}

#[test]
fn test_component_details_are_kept() {
	let definition = ClusterDefinition::from_toml_str(DEFINITION).unwrap();
	let tokenizer = definition.components[1].to_component();

	assert_eq!(tokenizer.model().class_id.as_str(), "my.Tokenizer");
	assert_eq!(tokenizer.model().bundle.as_str(), "linguistics");
	assert_eq!(tokenizer.injected(), [ComponentId::new("my.Dictionary")]);
	let files: Vec<_> = tokenizer.user_files().collect();
	assert_eq!(files, [("model", Path::new("files/tokenizer.bin"))]);
	assert_eq!(tokenizer.children().len(), 1);
}

#[test]
fn test_defaults_install_platform_handlers() {
	let cluster = ClusterDefinition::from_toml_str("name = \"default\"\ndefaults = true")
		.unwrap()
		.into_cluster()
		.unwrap();

	assert!(cluster.has_handler_with_binding(ROOT_HANDLER_BINDING));
	assert!(cluster.has_handler_with_binding("http://*/state/v1"));
	assert!(cluster.components().len() > 20);
}

#[test]
fn test_user_root_handler_replaces_default() {
	let cluster = ClusterDefinition::from_toml_str(
		r#"
		name = "default"
		defaults = true

		[[component]]
		id = "my.Root"
		kind = "handler"
		server-bindings = ["*://*/"]
		"#,
	)
	.unwrap()
	.into_cluster()
	.unwrap();

	let root: Vec<_> = cluster
		.handlers()
		.into_iter()
		.filter(|h| h.server_bindings().iter().any(|b| b == ROOT_HANDLER_BINDING))
		.map(|h| h.id().to_string())
		.collect();
	assert_eq!(root, ["my.Root"]);
}

#[test]
fn test_duplicate_component_is_reported() {
	let err = ClusterDefinition::from_toml_str(
		r#"
		name = "default"

		[[component]]
		id = "dup"

		[[component]]
		id = "dup"
		"#,
	)
	.unwrap()
	.into_cluster()
	.unwrap_err();

	assert!(format!("{err:#}").contains("component dup"));
}

#[test]
fn test_unknown_keys_are_rejected() {
	assert!(ClusterDefinition::from_toml_str("name = \"x\"\nreplicas = 3").is_err());
	assert!(ClusterDefinition::from_toml_str("name = \"x\"\n[[component]]\nid = \"\"").is_err());
}

#[test]
fn test_file_settings_keep_authored_order() {
	let definition = ClusterDefinition::from_toml_str(
		r#"
		name = "default"

		[[component]]
		id = "my.Ranker"
		files = { weights = "files/w.bin", bias = "files/b.bin", alpha = "files/a.bin" }
		"#,
	)
	.unwrap();

	let ranker = definition.components[0].to_component();
	let keys: Vec<_> = ranker.user_files().map(|(key, _)| key).collect();
	assert_eq!(keys, ["weights", "bias", "alpha"]);
}
