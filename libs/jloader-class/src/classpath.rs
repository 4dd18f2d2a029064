use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::{ClassLoader, ClassResult, ClassSource, DirectoryClassSource, LoaderChain};

/// Boot class path, read by [`ClassPath::from_env`].
pub const BOOT_CLASSPATH_ENV: &str = "JLOADER_BOOT_CLASSPATH";
/// User class path, read by [`ClassPath::from_env`].
pub const CLASSPATH_ENV: &str = "CLASSPATH";

#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Where the bootstrap and application loaders look for classes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassPath {
	pub boot: Vec<PathBuf>,
	pub user: Vec<PathBuf>,
}

impl ClassPath {
	pub fn new(boot: Vec<PathBuf>, user: Vec<PathBuf>) -> ClassPath {
		ClassPath { boot, user }
	}

	/// Splits a path list on [`PATH_LIST_SEPARATOR`], dropping empty entries.
	pub fn parse_list(list: &str) -> Vec<PathBuf> {
		list.split(PATH_LIST_SEPARATOR)
			.map(str::trim)
			.filter(|entry| !entry.is_empty())
			.map(PathBuf::from)
			.collect()
	}

	/// Reads the boot and user class paths from the environment. The user
	/// class path defaults to the working directory.
	pub fn from_env() -> ClassPath {
		let boot = env::var(BOOT_CLASSPATH_ENV)
			.map(|list| Self::parse_list(&list))
			.unwrap_or_default();
		let user = env::var(CLASSPATH_ENV)
			.map(|list| Self::parse_list(&list))
			.unwrap_or_default();

		Self::new(boot, user).or_working_dir()
	}

	/// Replaces an empty user class path with `.`.
	pub fn or_working_dir(mut self) -> ClassPath {
		if self.user.is_empty() {
			self.user.push(PathBuf::from("."));
		}
		self
	}

	pub fn boot_chain(&self) -> ClassResult<LoaderChain> {
		chain(&self.boot)
	}

	pub fn user_chain(&self) -> ClassResult<LoaderChain> {
		chain(&self.user)
	}

	/// Builds the `bootstrap` loader and the `app` loader that delegates to
	/// it, returning the latter.
	pub fn build(&self) -> ClassResult<Arc<ClassLoader>> {
		let bootstrap = Arc::new(ClassLoader::new("bootstrap", self.boot_chain()?));
		Ok(Arc::new(ClassLoader::with_parent(
			"app",
			bootstrap,
			self.user_chain()?,
		)))
	}
}

fn chain(entries: &[PathBuf]) -> ClassResult<LoaderChain> {
	let mut sources: Vec<Arc<dyn ClassSource>> = Vec::with_capacity(entries.len());
	for entry in entries {
		debug!("Adding class path entry {entry:?}");
		sources.push(Arc::new(DirectoryClassSource::new(entry)?));
	}
	Ok(LoaderChain::new(sources))
}
