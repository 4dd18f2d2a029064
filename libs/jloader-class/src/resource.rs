use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{ClassError, ClassResult};

/// Bytes found for a lookup, together with where they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedResource {
	pub path: PathBuf,
	pub data: Vec<u8>,
}

impl ResolvedResource {
	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

/// Whether `path` names a readable regular file. Never fails.
pub fn exists(path: &Path) -> bool {
	path.is_file()
}

/// The length in bytes of the file at `path`, if there is one.
pub fn length(path: &Path) -> Option<u64> {
	let metadata = path.metadata().ok()?;
	metadata.is_file().then(|| metadata.len())
}

/// Reads the whole file at `path`.
pub fn read_all(path: &Path) -> ClassResult<Vec<u8>> {
	let unreadable = |source| ClassError::ResourceUnreadable {
		path: path.to_path_buf(),
		source,
	};

	let mut file = File::open(path).map_err(unreadable)?;
	let mut data = Vec::with_capacity(length(path).unwrap_or(0) as usize);
	// read_to_end keeps going across short reads until EOF
	file.read_to_end(&mut data).map_err(unreadable)?;
	Ok(data)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn reads_whole_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("A.class");
		let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
		fs::write(&path, &content).unwrap();

		assert!(exists(&path));
		assert_eq!(length(&path), Some(10_000));
		assert_eq!(read_all(&path).unwrap(), content);
	}

	#[test]
	fn missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Missing.class");

		assert!(!exists(&path));
		assert_eq!(length(&path), None);
		assert!(matches!(
			read_all(&path),
			Err(ClassError::ResourceUnreadable { .. })
		));
	}

	#[test]
	fn directory_is_not_a_resource() {
		let dir = tempfile::tempdir().unwrap();
		assert!(!exists(dir.path()));
		assert!(read_all(dir.path()).is_err());
	}
}
