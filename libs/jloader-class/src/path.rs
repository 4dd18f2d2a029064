use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{trace, warn};

use crate::{ClassError, ClassResult};

/// The canonical directory a [`DirectoryClassSource`](crate::DirectoryClassSource)
/// resolves against. Fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRoot {
	dir: PathBuf,
}

impl ClassRoot {
	pub fn new(dir: impl AsRef<Path>) -> ClassResult<ClassRoot> {
		let dir = dir.as_ref();
		let canonical = fs::canonicalize(dir).map_err(|source| ClassError::InvalidRoot {
			path: dir.to_path_buf(),
			source,
		})?;

		if !canonical.is_dir() {
			return Err(ClassError::InvalidRoot {
				path: dir.to_path_buf(),
				source: io::Error::new(io::ErrorKind::Other, "not a directory"),
			});
		}

		Ok(ClassRoot { dir: canonical })
	}

	pub fn path(&self) -> &Path {
		&self.dir
	}

	/// Maps `relative` to a canonical path at or below the root.
	///
	/// The containment check always runs on the canonical result, so symlinks
	/// and absolute fragments are caught as well as explicit `..` segments.
	/// The resolved file does not need to exist.
	pub fn resolve(&self, relative: &str) -> ClassResult<PathBuf> {
		let joined = self.dir.join(relative);
		let canonical = canonicalize_lenient(&joined).map_err(|source| {
			ClassError::ResourceUnreadable {
				path: joined.clone(),
				source,
			}
		})?;

		if !canonical.starts_with(&self.dir) {
			warn!(
				root = ?self.dir,
				requested = relative,
				resolved = ?canonical,
				"Rejected resource path outside of the class root"
			);
			return Err(ClassError::PathEscape {
				root: self.dir.clone(),
				path: canonical,
			});
		}

		trace!("Resolved {relative} to {canonical:?}");
		Ok(canonical)
	}
}

/// Canonicalizes the deepest existing ancestor of `path` and reapplies the
/// remaining components lexically. Components past that ancestor do not
/// exist, so they cannot be symlinks.
pub(crate) fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
	let mut base = path.to_path_buf();
	let mut rest: Vec<OsString> = Vec::new();

	let mut canonical = loop {
		match fs::canonicalize(&base) {
			Ok(canonical) => break canonical,
			Err(error) => {
				let Some(last) = base.components().next_back() else {
					return Err(error);
				};
				rest.push(last.as_os_str().to_os_string());
				if !base.pop() {
					return Err(error);
				}
			}
		}
	};

	for component in rest.iter().rev() {
		match Path::new(component).components().next() {
			Some(Component::ParentDir) => {
				canonical.pop();
			}
			Some(Component::Normal(name)) => canonical.push(name),
			_ => {}
		}
	}

	Ok(canonical)
}

/// Lexical normalization for stores without a real filesystem behind them.
/// Returns `None` when `relative` climbs above its starting point.
pub(crate) fn normalize_lexically(relative: &str) -> Option<PathBuf> {
	let mut normalized = PathBuf::new();
	for component in Path::new(relative).components() {
		match component {
			Component::Normal(name) => normalized.push(name),
			Component::CurDir => {}
			Component::ParentDir => {
				if !normalized.pop() {
					return None;
				}
			}
			Component::RootDir | Component::Prefix(_) => return None,
		}
	}
	Some(normalized)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_inside_root() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("pkg")).unwrap();
		let root = ClassRoot::new(dir.path()).unwrap();

		let path = root.resolve("pkg/Widget.class").unwrap();
		assert!(path.starts_with(root.path()));
		assert!(path.ends_with("pkg/Widget.class"));
		assert_eq!(path, root.resolve("pkg/Widget.class").unwrap());
		assert_eq!(path, root.resolve("pkg/../pkg/./Widget.class").unwrap());
	}

	#[test]
	fn rejects_escape() {
		let dir = tempfile::tempdir().unwrap();
		let root = ClassRoot::new(dir.path()).unwrap();

		for relative in ["../../etc/passwd", "..", "missing/../../x.class", "/etc/passwd"] {
			let error = root.resolve(relative).unwrap_err();
			assert!(error.is_path_escape(), "{relative}: {error}");
		}
	}

	#[test]
	fn sibling_with_common_prefix_is_outside() {
		let parent = tempfile::tempdir().unwrap();
		fs::create_dir_all(parent.path().join("root")).unwrap();
		fs::create_dir_all(parent.path().join("root-evil")).unwrap();
		let root = ClassRoot::new(parent.path().join("root")).unwrap();

		let error = root.resolve("../root-evil/A.class").unwrap_err();
		assert!(error.is_path_escape());
	}

	#[test]
	fn missing_root() {
		let dir = tempfile::tempdir().unwrap();
		let error = ClassRoot::new(dir.path().join("nope")).unwrap_err();
		assert!(matches!(error, ClassError::InvalidRoot { .. }));
	}

	#[test]
	fn lexical() {
		assert_eq!(normalize_lexically("a/./b/../c"), Some(PathBuf::from("a/c")));
		assert_eq!(normalize_lexically("a/../../c"), None);
		assert_eq!(normalize_lexically("/a"), None);
	}
}
