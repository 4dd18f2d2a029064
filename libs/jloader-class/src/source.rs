use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ahash::AHashMap;
use jloader_core::{ResourceName, CLASS_EXTENSION};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::path::normalize_lexically;
use crate::resource::{self, ResolvedResource};
use crate::{ClassError, ClassResult, ClassRoot};

/// A backing store that class bytes can be looked up in.
///
/// `resolve` must reject anything outside of the store with
/// [`ClassError::PathEscape`]; a missing resource is reported by `exists`,
/// never as an error.
pub trait ClassSource: Send + Sync + Debug {
	fn resolve(&self, relative: &str) -> ClassResult<PathBuf>;

	fn exists(&self, path: &Path) -> bool;

	fn read_all(&self, path: &Path) -> ClassResult<Vec<u8>>;

	fn try_load(&self, relative: &str) -> ClassResult<Option<ResolvedResource>> {
		let path = self.resolve(relative)?;
		if !self.exists(&path) {
			return Ok(None);
		}

		let data = self.read_all(&path)?;
		Ok(Some(ResolvedResource { path, data }))
	}
}

impl<S: ClassSource + ?Sized> ClassSource for Arc<S> {
	fn resolve(&self, relative: &str) -> ClassResult<PathBuf> {
		(**self).resolve(relative)
	}

	fn exists(&self, path: &Path) -> bool {
		(**self).exists(path)
	}

	fn read_all(&self, path: &Path) -> ClassResult<Vec<u8>> {
		(**self).read_all(path)
	}

	fn try_load(&self, relative: &str) -> ClassResult<Option<ResolvedResource>> {
		(**self).try_load(relative)
	}
}

/// Class files laid out below a directory, `a/b/C.class` for `a.b.C`.
#[derive(Debug)]
pub struct DirectoryClassSource {
	root: ClassRoot,
}

impl DirectoryClassSource {
	pub fn new(dir: impl AsRef<Path>) -> ClassResult<DirectoryClassSource> {
		Ok(DirectoryClassSource {
			root: ClassRoot::new(dir)?,
		})
	}

	pub fn root(&self) -> &ClassRoot {
		&self.root
	}

	/// Every class below the root, sorted by name. Files whose path does
	/// not form a valid name are skipped.
	pub fn class_names(&self) -> Vec<ResourceName> {
		let mut names = Vec::new();
		for entry in WalkDir::new(self.root.path()).follow_links(false) {
			let entry = match entry {
				Ok(entry) => entry,
				Err(error) => {
					warn!("Skipping unreadable entry below {:?}: {error}", self.root.path());
					continue;
				}
			};

			if !entry.file_type().is_file() {
				continue;
			}

			let Ok(relative) = entry.path().strip_prefix(self.root.path()) else {
				continue;
			};
			let Some(relative) = relative.to_str() else {
				continue;
			};
			let Some(internal) = relative.strip_suffix(CLASS_EXTENSION) else {
				continue;
			};

			match ResourceName::from_internal(&internal.replace('\\', "/")) {
				Ok(name) => names.push(name),
				Err(error) => debug!("Ignoring {relative}: {error}"),
			}
		}

		names.sort();
		names
	}
}

impl ClassSource for DirectoryClassSource {
	fn resolve(&self, relative: &str) -> ClassResult<PathBuf> {
		self.root.resolve(relative)
	}

	fn exists(&self, path: &Path) -> bool {
		resource::exists(path)
	}

	fn read_all(&self, path: &Path) -> ClassResult<Vec<u8>> {
		resource::read_all(path)
	}
}

/// Class bytes held in memory, keyed by their relative path.
#[derive(Debug, Default)]
pub struct MemorySource {
	files: AHashMap<PathBuf, Arc<[u8]>>,
}

impl MemorySource {
	pub fn new() -> MemorySource {
		MemorySource::default()
	}

	/// Adds the class file of `name`, replacing any previous bytes.
	pub fn with_class(mut self, name: &ResourceName, data: impl Into<Arc<[u8]>>) -> Self {
		self.files
			.insert(PathBuf::from(name.to_class_path()), data.into());
		self
	}

	pub fn with_resource(
		mut self,
		relative: &str,
		data: impl Into<Arc<[u8]>>,
	) -> ClassResult<Self> {
		let path = self.resolve(relative)?;
		self.files.insert(path, data.into());
		Ok(self)
	}

	pub fn len(&self) -> usize {
		self.files.len()
	}

	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}

impl ClassSource for MemorySource {
	fn resolve(&self, relative: &str) -> ClassResult<PathBuf> {
		normalize_lexically(relative).ok_or_else(|| {
			warn!(requested = relative, "Rejected resource path outside of the memory source");
			ClassError::PathEscape {
				root: PathBuf::new(),
				path: PathBuf::from(relative),
			}
		})
	}

	fn exists(&self, path: &Path) -> bool {
		self.files.contains_key(path)
	}

	fn read_all(&self, path: &Path) -> ClassResult<Vec<u8>> {
		match self.files.get(path) {
			Some(data) => Ok(data.to_vec()),
			None => Err(ClassError::ResourceUnreadable {
				path: path.to_path_buf(),
				source: std::io::ErrorKind::NotFound.into(),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn directory_try_load() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("pkg")).unwrap();
		fs::write(dir.path().join("pkg/Widget.class"), [1u8; 42]).unwrap();
		let source = DirectoryClassSource::new(dir.path()).unwrap();

		let found = source.try_load("pkg/Widget.class").unwrap().unwrap();
		assert_eq!(found.len(), 42);
		assert!(source.try_load("pkg/Missing.class").unwrap().is_none());
		assert!(source.try_load("../../etc/passwd").unwrap_err().is_path_escape());
	}

	#[test]
	fn directory_class_names() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("a/b")).unwrap();
		fs::write(dir.path().join("a/b/C.class"), [0u8]).unwrap();
		fs::write(dir.path().join("Top.class"), [0u8]).unwrap();
		fs::write(dir.path().join("a/readme.txt"), [0u8]).unwrap();
		fs::write(dir.path().join("a/bad.name.class"), [0u8]).unwrap();

		let source = DirectoryClassSource::new(dir.path()).unwrap();
		let names: Vec<String> = source
			.class_names()
			.iter()
			.map(ToString::to_string)
			.collect();
		assert_eq!(names, vec!["Top", "a.b.C"]);
	}

	#[test]
	fn memory_source() {
		let name = ResourceName::from_dotted("pkg.Widget").unwrap();
		let source = MemorySource::new()
			.with_class(&name, vec![7u8; 3])
			.with_resource("pkg/../other/Thing.class", vec![1u8])
			.unwrap();

		assert_eq!(source.len(), 2);
		let found = source.try_load(&name.to_class_path()).unwrap().unwrap();
		assert_eq!(found.data, vec![7u8; 3]);
		assert!(source.try_load("other/Thing.class").unwrap().is_some());
		assert!(source.try_load("pkg/Missing.class").unwrap().is_none());
		assert!(source.try_load("../x.class").unwrap_err().is_path_escape());
	}
}
