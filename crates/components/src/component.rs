use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use harbor_model::{BundleInstantiation, ComponentId};
use indexmap::IndexMap;

use crate::capability::{CapabilitySet, ComponentKind};

/// A named unit of the container runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
	model: BundleInstantiation,
	kind: ComponentKind,
	inject: Vec<ComponentId>,
	/// File-valued settings, keyed by setting name, relative to the application package.
	user_files: IndexMap<String, PathBuf>,
	children: Vec<Component>,
}

impl Component {
	/// Creates a component without a typed capability.
	pub fn new(model: BundleInstantiation) -> Self {
		Self::with_kind(model, ComponentKind::Generic)
	}

	pub fn simple(model: BundleInstantiation) -> Self {
		Self::with_kind(model, ComponentKind::Simple)
	}

	/// A simple component whose id, class and bundle are all `class`.
	pub fn simple_from_class(class: &str) -> Self {
		Self::simple(BundleInstantiation::from_class(class))
	}

	pub fn handler(model: BundleInstantiation) -> Self {
		Self::with_kind(model, ComponentKind::handler())
	}

	pub fn handler_from_class(class: &str) -> Self {
		Self::handler(BundleInstantiation::from_class(class))
	}

	fn with_kind(model: BundleInstantiation, kind: ComponentKind) -> Self {
		Self {
			model,
			kind,
			inject: Vec::new(),
			user_files: IndexMap::new(),
			children: Vec::new(),
		}
	}

	pub fn id(&self) -> &ComponentId {
		&self.model.id
	}

	pub fn model(&self) -> &BundleInstantiation {
		&self.model
	}

	pub fn kind(&self) -> &ComponentKind {
		&self.kind
	}

	pub fn capabilities(&self) -> CapabilitySet {
		self.kind.capabilities()
	}

	pub fn is_handler(&self) -> bool {
		self.capabilities().contains(CapabilitySet::HANDLER)
	}

	/// Adds server bindings to a handler. Bindings already present are skipped.
	///
	/// Has no effect on components that are not handlers.
	pub fn add_server_bindings<I, S>(&mut self, bindings: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if let ComponentKind::Handler {
			server_bindings, ..
		} = &mut self.kind
		{
			push_unique(server_bindings, bindings);
		}
	}

	/// Adds client bindings to a handler. Bindings already present are skipped.
	pub fn add_client_bindings<I, S>(&mut self, bindings: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		if let ComponentKind::Handler {
			client_bindings, ..
		} = &mut self.kind
		{
			push_unique(client_bindings, bindings);
		}
	}

	pub fn with_server_bindings<I, S>(mut self, bindings: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.add_server_bindings(bindings);
		self
	}

	pub fn server_bindings(&self) -> &[String] {
		match &self.kind {
			ComponentKind::Handler {
				server_bindings, ..
			} => server_bindings,
			_ => &[],
		}
	}

	pub fn client_bindings(&self) -> &[String] {
		match &self.kind {
			ComponentKind::Handler {
				client_bindings, ..
			} => client_bindings,
			_ => &[],
		}
	}

	pub fn servlet_path(&self) -> Option<&str> {
		match &self.kind {
			ComponentKind::Servlet { path } => Some(path),
			_ => None,
		}
	}

	/// Declares a dependency on another component.
	pub fn inject(&mut self, id: ComponentId) {
		if !self.inject.contains(&id) {
			self.inject.push(id);
		}
	}

	pub fn injected(&self) -> &[ComponentId] {
		&self.inject
	}

	/// Sets a file-valued setting, replacing an earlier value for `key`.
	pub fn set_user_file(&mut self, key: impl Into<String>, path: impl Into<PathBuf>) {
		self.user_files.insert(key.into(), path.into());
	}

	pub fn with_user_file(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		self.set_user_file(key, path);
		self
	}

	pub fn user_files(&self) -> impl Iterator<Item = (&str, &Path)> {
		self.user_files
			.iter()
			.map(|(key, path)| (key.as_str(), path.as_path()))
	}

	/// Nests `child` under this component.
	pub fn add_child(&mut self, child: Component) {
		self.children.push(child);
	}

	pub fn with_child(mut self, child: Component) -> Self {
		self.add_child(child);
		self
	}

	pub fn children(&self) -> &[Component] {
		&self.children
	}

	/// The natural order of components: by id, then class, then bundle.
	///
	/// Every config enumeration sorts with this comparator, so output does not
	/// depend on the order components were added in. Ties on all three are
	/// broken by the rest of the component's content, so only equal components
	/// compare equal.
	pub fn natural_cmp(&self, other: &Self) -> Ordering {
		self.model
			.id
			.cmp(&other.model.id)
			.then_with(|| self.model.class_id.cmp(&other.model.class_id))
			.then_with(|| self.model.bundle.cmp(&other.model.bundle))
			.then_with(|| self.content_cmp(other))
	}

	fn content_cmp(&self, other: &Self) -> Ordering {
		self.capabilities()
			.bits()
			.cmp(&other.capabilities().bits())
			.then_with(|| self.server_bindings().cmp(other.server_bindings()))
			.then_with(|| self.client_bindings().cmp(other.client_bindings()))
			.then_with(|| self.servlet_path().cmp(&other.servlet_path()))
			.then_with(|| self.inject.cmp(&other.inject))
			.then_with(|| self.user_files().cmp(other.user_files()))
			.then_with(|| {
				let mut ours = self.children.iter();
				let mut theirs = other.children.iter();
				loop {
					match (ours.next(), theirs.next()) {
						(None, None) => return Ordering::Equal,
						(None, Some(_)) => return Ordering::Less,
						(Some(_), None) => return Ordering::Greater,
						(Some(a), Some(b)) => match a.natural_cmp(b) {
							Ordering::Equal => {}
							unequal => return unequal,
						},
					}
				}
			})
	}
}

fn push_unique<I, S>(target: &mut Vec<String>, items: I)
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	for item in items {
		let item = item.into();
		if !target.contains(&item) {
			target.push(item);
		}
	}
}

/// A component that is guaranteed to be a servlet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Servlet(Component);

impl Servlet {
	pub fn new(model: BundleInstantiation, path: impl Into<String>) -> Self {
		Self(Component::with_kind(
			model,
			ComponentKind::Servlet { path: path.into() },
		))
	}

	pub fn id(&self) -> &ComponentId {
		self.0.id()
	}

	/// The id under which the servlet is registered cluster-wide.
	pub fn global_id(&self) -> &ComponentId {
		self.0.id()
	}

	pub fn path(&self) -> &str {
		self.0.servlet_path().unwrap_or_default()
	}

	pub fn as_component(&self) -> &Component {
		&self.0
	}

	pub fn as_component_mut(&mut self) -> &mut Component {
		&mut self.0
	}

	pub fn into_component(self) -> Component {
		self.0
	}
}
