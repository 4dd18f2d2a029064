use std::fmt::{Display, Formatter};
use std::sync::Arc;

use thiserror::Error;

/// The file extension of compiled class data.
pub const CLASS_EXTENSION: &str = ".class";

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid resource name {name:?}: {reason}")]
pub struct InvalidName {
	pub name: String,
	pub reason: &'static str,
}

impl InvalidName {
	fn new(name: &str, reason: &'static str) -> InvalidName {
		InvalidName {
			name: name.to_string(),
			reason,
		}
	}
}

/// A validated class or resource name.
///
/// Stored in dotted form (`a.b.C`). Every segment is non-empty and is never
/// `.` or `..`, so the path form produced by [`ResourceName::to_path_segments`]
/// always stays below whatever directory it is joined onto.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ResourceName {
	dotted: Arc<str>,
}

impl ResourceName {
	pub fn from_dotted(name: &str) -> Result<ResourceName, InvalidName> {
		Self::from_segments(name, name.split('.'), '/')
	}

	/// Parses the slash separated form used inside class files (`a/b/C`).
	pub fn from_internal(name: &str) -> Result<ResourceName, InvalidName> {
		Self::from_segments(name, name.split('/'), '.')
	}

	/// Accepts either the dotted or the internal form, but not a mix of both.
	pub fn parse(name: &str) -> Result<ResourceName, InvalidName> {
		if name.contains('/') {
			Self::from_internal(name)
		} else {
			Self::from_dotted(name)
		}
	}

	fn from_segments<'a>(
		name: &str,
		segments: impl Iterator<Item = &'a str>,
		foreign: char,
	) -> Result<ResourceName, InvalidName> {
		if name.is_empty() {
			return Err(InvalidName::new(name, "name is empty"));
		}

		let mut dotted = String::with_capacity(name.len());
		for segment in segments {
			match segment {
				"" => return Err(InvalidName::new(name, "empty segment")),
				"." | ".." => return Err(InvalidName::new(name, "reserved segment")),
				_ => {}
			}

			if segment.contains(|c: char| c == foreign || c == '\\' || c == '\0') {
				return Err(InvalidName::new(name, "segment contains a reserved character"));
			}

			if !dotted.is_empty() {
				dotted.push('.');
			}
			dotted.push_str(segment);
		}

		Ok(ResourceName {
			dotted: dotted.into(),
		})
	}

	pub fn as_dotted(&self) -> &str {
		&self.dotted
	}

	/// The slash separated form without an extension.
	pub fn internal(&self) -> String {
		self.dotted.replace('.', "/")
	}

	/// The slash separated form with `extension` appended verbatim,
	/// `a.b.C` + `.class` becomes `a/b/C.class`.
	pub fn to_path_segments(&self, extension: &str) -> String {
		let mut path = self.internal();
		path.push_str(extension);
		path
	}

	pub fn to_class_path(&self) -> String {
		self.to_path_segments(CLASS_EXTENSION)
	}

	pub fn package(&self) -> Option<&str> {
		self.dotted.rsplit_once('.').map(|(package, _)| package)
	}

	pub fn simple_name(&self) -> &str {
		match self.dotted.rsplit_once('.') {
			Some((_, name)) => name,
			None => &self.dotted,
		}
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.dotted.split('.')
	}
}

impl Display for ResourceName {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.dotted)
	}
}

impl std::str::FromStr for ResourceName {
	type Err = InvalidName;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ResourceName::parse(s)
	}
}
