use std::sync::Arc;

use jloader_core::ResourceName;
use tracing::{debug, info};

use crate::{Class, ClassDefiner, ClassError, ClassResult, LoaderChain};

/// A named loader: its own sources and definer, plus an optional parent that
/// is always asked first.
#[derive(Debug)]
pub struct ClassLoader {
	name: String,
	parent: Option<Arc<ClassLoader>>,
	chain: LoaderChain,
	definer: ClassDefiner,
}

impl ClassLoader {
	pub fn new(name: impl Into<String>, chain: LoaderChain) -> ClassLoader {
		ClassLoader {
			name: name.into(),
			parent: None,
			chain,
			definer: ClassDefiner::new(),
		}
	}

	pub fn with_parent(
		name: impl Into<String>,
		parent: Arc<ClassLoader>,
		chain: LoaderChain,
	) -> ClassLoader {
		ClassLoader {
			parent: Some(parent),
			..ClassLoader::new(name, chain)
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn parent(&self) -> Option<&Arc<ClassLoader>> {
		self.parent.as_ref()
	}

	pub fn chain(&self) -> &LoaderChain {
		&self.chain
	}

	pub fn definer(&self) -> &ClassDefiner {
		&self.definer
	}

	/// A class this loader itself has defined.
	pub fn find_loaded(&self, name: &ResourceName) -> Option<Arc<Class>> {
		self.definer.get(name)
	}

	/// Loads `name`: classes already defined here first, then the parent,
	/// then this loader's own sources.
	pub fn load(&self, name: &ResourceName) -> LoadResult {
		if let Some(class) = self.definer.get(name) {
			return LoadResult::Existing(class);
		}

		if let Some(parent) = &self.parent {
			match parent.load(name) {
				LoadResult::New(Err(error)) if error.is_not_found() => {
					debug!("{} did not find {name}, trying {}", parent.name, self.name);
				}
				result => return result,
			}
		}

		LoadResult::New(self.load_own(name))
	}

	fn load_own(&self, name: &ResourceName) -> ClassResult<Arc<Class>> {
		let resource = self.chain.resolve(name).map_err(|error| match error {
			ClassError::NotFound { .. } => ClassError::NotFound {
				name: name.to_string(),
			},
			error => error,
		})?;

		match self.definer.define(name, &resource.data) {
			Ok(class) => {
				info!("{} loaded {name} from {:?}", self.name, resource.path);
				Ok(class)
			}
			// Another thread defined it between our lookup and define.
			Err(ClassError::DuplicateDefinition { .. }) if self.definer.contains(name) => self
				.definer
				.get(name)
				.ok_or_else(|| ClassError::DuplicateDefinition { name: name.clone() }),
			Err(error) => Err(error),
		}
	}
}

pub enum LoadResult {
	Existing(Arc<Class>),
	New(ClassResult<Arc<Class>>),
}

impl LoadResult {
	pub fn to_result(self) -> ClassResult<Arc<Class>> {
		match self {
			LoadResult::Existing(class) => Ok(class),
			LoadResult::New(result) => result,
		}
	}

	pub fn is_existing(&self) -> bool {
		matches!(self, LoadResult::Existing(_))
	}
}
