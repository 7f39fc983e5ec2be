/// Errors raised while parsing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
	/// An identifier or one of its namespace segments was empty.
	#[error("empty component id in {input:?}")]
	EmptyId { input: String },
	/// An identifier contained a character that cannot appear in a name.
	#[error("invalid component id {input:?}: {reason}")]
	InvalidId { input: String, reason: &'static str },
}
