bitflags::bitflags! {
	/// Capabilities a component exposes to the registry's typed views.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CapabilitySet: u8 {
		/// Serves requests on one or more bindings.
		const HANDLER = 1 << 0;
		/// Mounted on a servlet path.
		const SERVLET = 1 << 1;
		/// Plain component instantiated from a class name.
		const SIMPLE = 1 << 2;
	}
}

/// The variant of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentKind {
	/// A component with no typed capability.
	Generic,
	/// A plain component instantiated from a class name.
	Simple,
	/// A request handler.
	Handler {
		server_bindings: Vec<String>,
		client_bindings: Vec<String>,
	},
	/// A servlet mounted on `path`.
	Servlet { path: String },
}

impl ComponentKind {
	/// Returns the capability set of this variant.
	pub const fn capabilities(&self) -> CapabilitySet {
		match self {
			Self::Generic => CapabilitySet::empty(),
			Self::Simple => CapabilitySet::SIMPLE,
			Self::Handler { .. } => CapabilitySet::HANDLER,
			Self::Servlet { .. } => CapabilitySet::SERVLET,
		}
	}

	pub(crate) fn handler() -> Self {
		Self::Handler {
			server_bindings: Vec::new(),
			client_bindings: Vec::new(),
		}
	}
}
