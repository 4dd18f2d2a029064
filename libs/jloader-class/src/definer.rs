use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use jloader_core::{InsertError, ResourceName, Storage};
use jloader_reader::ClassInfo;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::{Class, ClassError, ClassResult};

/// Turns class bytes into [`Class`] handles, at most once per name.
///
/// The name table lives and dies with the definer; two definers never share
/// classes.
pub struct ClassDefiner {
	classes: RwLock<Storage<ResourceName, Arc<Class>>>,
}

impl ClassDefiner {
	pub fn new() -> ClassDefiner {
		ClassDefiner {
			classes: RwLock::new(Storage::new()),
		}
	}

	/// Defines `name` from `data`.
	///
	/// Fails with [`ClassError::DuplicateDefinition`] if this definer already
	/// holds `name`, and leaves the table untouched on any failure.
	pub fn define(&self, name: &ResourceName, data: &[u8]) -> ClassResult<Arc<Class>> {
		if data.is_empty() {
			return Err(self.malformed(name, "class data is empty"));
		}

		if self.classes.read().contains(name) {
			warn!("Refusing to redefine {name}");
			return Err(ClassError::DuplicateDefinition { name: name.clone() });
		}

		let info = ClassInfo::parse_complete(data)
			.map_err(|report| self.malformed(name, format!("{report:#}")))?;

		match info.name() {
			Some(found) if found == name.internal() => {}
			found => {
				return Err(ClassError::NameMismatch {
					expected: name.clone(),
					found: found.unwrap_or_default().to_string(),
				});
			}
		}

		let class = Class::new(info).map_err(|report| self.malformed(name, format!("{report:#}")))?;
		debug!("Parsed class {name} ({} constructors)", class.constructors.len());

		let class = Arc::new(class);
		// Check and insert happen under one write lock, so of two racing
		// definitions exactly one gets in.
		let result = self
			.classes
			.write()
			.try_insert(name.clone(), |_| class.clone());

		match result {
			Ok(id) => {
				info!("Defined class {name} at {id:?}");
				Ok(class)
			}
			Err(InsertError::Occupied(_)) => {
				warn!("Refusing to redefine {name}");
				Err(ClassError::DuplicateDefinition { name: name.clone() })
			}
			Err(InsertError::Exhausted) => {
				warn!("No class ids left for {name}");
				Err(ClassError::DefinitionLimit { name: name.clone() })
			}
		}
	}

	/// The class previously defined under `name`.
	pub fn get(&self, name: &ResourceName) -> Option<Arc<Class>> {
		self.classes.read().get_keyed(name).cloned()
	}

	pub fn contains(&self, name: &ResourceName) -> bool {
		self.classes.read().contains(name)
	}

	/// All classes in definition order.
	pub fn classes(&self) -> Vec<Arc<Class>> {
		self.classes.read().iter().to_vec()
	}

	pub fn len(&self) -> usize {
		self.classes.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.read().is_empty()
	}

	fn malformed(&self, name: &ResourceName, reason: impl Into<String>) -> ClassError {
		let reason = reason.into();
		warn!("Malformed class data for {name}: {reason}");
		ClassError::MalformedClassData {
			name: name.clone(),
			reason,
		}
	}
}

impl Debug for ClassDefiner {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClassDefiner")
			.field("classes", &self.len())
			.finish()
	}
}

impl Default for ClassDefiner {
	fn default() -> Self {
		ClassDefiner::new()
	}
}
