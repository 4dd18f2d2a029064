use std::path::PathBuf;

use jloader_core::{InvalidName, Kind, MethodDescriptor, ResourceName, Type};
use thiserror::Error;

pub type ClassResult<T> = Result<T, ClassError>;

#[derive(Error, Debug)]
pub enum ClassError {
	#[error(transparent)]
	InvalidName(#[from] InvalidName),
	#[error("class root {path:?} is not usable: {source}")]
	InvalidRoot {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("{path:?} escapes the class root {root:?}")]
	PathEscape { root: PathBuf, path: PathBuf },
	#[error("{name} was not found")]
	NotFound { name: String },
	#[error("failed to read {path:?}: {source}")]
	ResourceUnreadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("malformed class data for {name}: {reason}")]
	MalformedClassData { name: ResourceName, reason: String },
	#[error("class file for {expected} defines {found}")]
	NameMismatch { expected: ResourceName, found: String },
	#[error("{name} is already defined by this loader")]
	DuplicateDefinition { name: ResourceName },
	#[error("cannot define {name}: this loader has no class ids left")]
	DefinitionLimit { name: ResourceName },
	#[error("{class} has no constructor {descriptor}")]
	NoMatchingConstructor {
		class: ResourceName,
		descriptor: MethodDescriptor,
	},
	#[error("expected {expected} arguments, got {found}")]
	ArgumentArityMismatch { expected: usize, found: usize },
	#[error("argument {index} of kind {found} cannot be passed as {expected}")]
	ArgumentTypeMismatch {
		index: usize,
		expected: Type,
		found: Kind,
	},
}

impl ClassError {
	/// Absence is the one recoverable outcome of a lookup.
	pub fn is_not_found(&self) -> bool {
		matches!(self, ClassError::NotFound { .. })
	}

	pub fn is_path_escape(&self) -> bool {
		matches!(self, ClassError::PathEscape { .. })
	}
}
