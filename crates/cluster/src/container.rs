use harbor_components::Component;
use indexmap::IndexMap;

/// A port exposed by a container service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
	pub number: u16,
	pub tags: Vec<String>,
}

impl Port {
	pub fn new(number: u16, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			number,
			tags: tags.into_iter().map(Into::into).collect(),
		}
	}
}

/// One container service running on a host of the cluster.
///
/// A container is a leaf of the cluster's ownership tree: the components it
/// carries itself are configured per host and never show up in cluster-wide
/// discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
	name: String,
	host_name: String,
	ports: Vec<Port>,
	properties: IndexMap<String, String>,
	components: Vec<Component>,
	cluster_name: Option<String>,
	index: Option<usize>,
}

impl Container {
	pub fn new(name: impl Into<String>, host_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			host_name: host_name.into(),
			ports: Vec::new(),
			properties: IndexMap::new(),
			components: Vec::new(),
			cluster_name: None,
			index: None,
		}
	}

	pub fn with_port(mut self, port: Port) -> Self {
		self.ports.push(port);
		self
	}

	pub fn add_component(&mut self, component: Component) {
		self.components.push(component);
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn host_name(&self) -> &str {
		&self.host_name
	}

	pub fn ports(&self) -> &[Port] {
		&self.ports
	}

	pub fn components(&self) -> &[Component] {
		&self.components
	}

	pub fn cluster_name(&self) -> Option<&str> {
		self.cluster_name.as_deref()
	}

	/// Zero-based position in the owning cluster, assigned on admission.
	pub fn index(&self) -> Option<usize> {
		self.index
	}

	pub fn property(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	pub fn set_property(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
		self.properties.insert(key.into(), value.to_string());
		self
	}

	pub(crate) fn attach(&mut self, cluster_name: &str, index: usize) {
		self.cluster_name = Some(cluster_name.to_string());
		self.index = Some(index);
		self.set_property("clustername", cluster_name)
			.set_property("index", index);
	}
}

impl std::fmt::Display for Container {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "container '{}' on {}", self.name, self.host_name)
	}
}
