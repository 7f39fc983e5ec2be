use harbor_model::ComponentId;

/// Registry insertion errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	/// An entry with the same id is already registered.
	#[error("duplicate id in {registry}: {id}")]
	DuplicateIdentity {
		registry: &'static str,
		id: ComponentId,
	},
}
