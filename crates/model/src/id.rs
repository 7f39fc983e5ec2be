//! Hierarchical component identifiers.
//!
//! A [`ComponentId`] is a name optionally nested in a namespace, which is itself a
//! [`ComponentId`]. The string form joins the segments with `@`, innermost first:
//! `MbusServer` nested in `chain` nested in `docproc` reads `MbusServer@chain@docproc`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const NAMESPACE_SEPARATOR: char = '@';

/// Identity of a component, unique within the registry that owns it.
///
/// Ordering is by name, then by namespace chain. Config generation relies on this
/// ordering being total and independent of how the id was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentId {
	name: String,
	namespace: Option<Box<ComponentId>>,
}

impl ComponentId {
	/// Creates an id without a namespace.
	///
	/// # Panics
	///
	/// Panics if `name` is empty or contains the namespace separator. Use
	/// [`ComponentId::from_str`] for untrusted input.
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		assert!(
			!name.is_empty() && !name.contains(NAMESPACE_SEPARATOR),
			"invalid component name {name:?}"
		);
		Self {
			name,
			namespace: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn namespace(&self) -> Option<&ComponentId> {
		self.namespace.as_deref()
	}

	/// Returns a copy of this id nested in `namespace`.
	///
	/// An existing namespace chain is kept and `namespace` becomes its outermost
	/// segment.
	pub fn nest_in_namespace(&self, namespace: &ComponentId) -> Self {
		let nested = match &self.namespace {
			None => namespace.clone(),
			Some(inner) => inner.nest_in_namespace(namespace),
		};
		Self {
			name: self.name.clone(),
			namespace: Some(Box::new(nested)),
		}
	}

	/// Returns the canonical string form.
	pub fn string_value(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)?;
		if let Some(ns) = &self.namespace {
			write!(f, "{NAMESPACE_SEPARATOR}{ns}")?;
		}
		Ok(())
	}
}

impl FromStr for ComponentId {
	type Err = ModelError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let mut segments = input.split(NAMESPACE_SEPARATOR).rev();
		let mut id: Option<ComponentId> = None;
		for segment in segments.by_ref() {
			if segment.is_empty() {
				return Err(ModelError::EmptyId {
					input: input.to_string(),
				});
			}
			if segment.chars().any(char::is_whitespace) {
				return Err(ModelError::InvalidId {
					input: input.to_string(),
					reason: "whitespace in name",
				});
			}
			id = Some(ComponentId {
				name: segment.to_string(),
				namespace: id.map(Box::new),
			});
		}
		id.ok_or_else(|| ModelError::EmptyId {
			input: input.to_string(),
		})
	}
}

impl TryFrom<String> for ComponentId {
	type Error = ModelError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<ComponentId> for String {
	fn from(id: ComponentId) -> Self {
		id.to_string()
	}
}

/// A reference to a class or bundle by name.
///
/// Unlike [`ComponentId`], a specification is only a lookup key for the runtime
/// and is never required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentSpecification(String);

impl ComponentSpecification {
	pub fn new(spec: impl Into<String>) -> Self {
		Self(spec.into())
	}

	/// The bare name, without namespace.
	pub fn name(&self) -> &str {
		self.0
			.split_once(NAMESPACE_SEPARATOR)
			.map_or(self.0.as_str(), |(name, _)| name)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ComponentSpecification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&ComponentId> for ComponentSpecification {
	fn from(id: &ComponentId) -> Self {
		Self(id.to_string())
	}
}

impl From<&str> for ComponentSpecification {
	fn from(spec: &str) -> Self {
		Self(spec.to_string())
	}
}
