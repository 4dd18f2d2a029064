use std::sync::Arc;

use jloader_core::ResourceName;
use tracing::{debug, instrument};

use crate::resource::ResolvedResource;
use crate::{ClassError, ClassResult, ClassSource};

/// An ordered, fixed list of sources. The first source holding a resource
/// wins, so a parent placed before a child takes precedence.
#[derive(Clone, Debug, Default)]
pub struct LoaderChain {
	sources: Vec<Arc<dyn ClassSource>>,
}

impl LoaderChain {
	pub fn new(sources: impl IntoIterator<Item = Arc<dyn ClassSource>>) -> LoaderChain {
		LoaderChain {
			sources: sources.into_iter().collect(),
		}
	}

	pub fn sources(&self) -> &[Arc<dyn ClassSource>] {
		&self.sources
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Looks up the class file of `name`.
	pub fn resolve(&self, name: &ResourceName) -> ClassResult<ResolvedResource> {
		self.resolve_path(&name.to_class_path())
	}

	/// Looks up a raw relative path. A rejected path aborts the whole lookup
	/// instead of falling through to the next source.
	#[instrument(skip(self), level = "debug")]
	pub fn resolve_path(&self, relative: &str) -> ClassResult<ResolvedResource> {
		for (index, source) in self.sources.iter().enumerate() {
			if let Some(resource) = source.try_load(relative)? {
				debug!(
					"Found {relative} in source {index} ({} bytes)",
					resource.len()
				);
				return Ok(resource);
			}
		}

		debug!("{relative} not found in {} sources", self.sources.len());
		Err(ClassError::NotFound {
			name: relative.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemorySource;

	fn widget() -> ResourceName {
		ResourceName::from_dotted("pkg.Widget").unwrap()
	}

	#[test]
	fn first_source_wins() {
		let parent: Arc<dyn ClassSource> =
			Arc::new(MemorySource::new().with_class(&widget(), vec![1u8]));
		let child: Arc<dyn ClassSource> =
			Arc::new(MemorySource::new().with_class(&widget(), vec![2u8]));

		let chain = LoaderChain::new([parent.clone(), child.clone()]);
		assert_eq!(chain.resolve(&widget()).unwrap().data, vec![1u8]);

		let chain = LoaderChain::new([child, parent]);
		assert_eq!(chain.resolve(&widget()).unwrap().data, vec![2u8]);
	}

	#[test]
	fn falls_through_to_later_sources() {
		let empty: Arc<dyn ClassSource> = Arc::new(MemorySource::new());
		let full: Arc<dyn ClassSource> =
			Arc::new(MemorySource::new().with_class(&widget(), vec![3u8]));

		let chain = LoaderChain::new([empty, full]);
		assert_eq!(chain.resolve(&widget()).unwrap().data, vec![3u8]);
	}

	#[test]
	fn missing_and_escape_are_distinct() {
		let chain = LoaderChain::new([Arc::new(MemorySource::new()) as Arc<dyn ClassSource>]);

		assert!(chain.resolve(&widget()).unwrap_err().is_not_found());
		let escape = chain.resolve_path("../../etc/passwd").unwrap_err();
		assert!(escape.is_path_escape());
		assert!(!escape.is_not_found());

		assert!(LoaderChain::default().resolve(&widget()).unwrap_err().is_not_found());
	}
}
