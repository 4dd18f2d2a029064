use std::fs;

use jloader_class::{resource, ClassError, ClassRoot, ClassSource, DirectoryClassSource};
use jloader_core::ResourceName;

use crate::write_class;

#[test]
fn resolving_is_deterministic() {
	let dir = tempfile::tempdir().unwrap();
	let root = ClassRoot::new(dir.path()).unwrap();

	for name in ["pkg.Widget", "a.b.c.D", "Top", "pkg.Outer$Inner"] {
		let name = ResourceName::from_dotted(name).unwrap();
		let first = root.resolve(&name.to_class_path()).unwrap();
		let second = root.resolve(&name.to_class_path()).unwrap();
		assert_eq!(first, second);
		assert!(first.starts_with(root.path()));
	}
}

#[test]
fn up_level_escape_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir_all(dir.path().join("classes/pkg")).unwrap();
	let source = DirectoryClassSource::new(dir.path().join("classes")).unwrap();

	let escapes = [
		"../../etc/passwd",
		"pkg/../../Secret.class",
		"pkg/../../../../../../etc/passwd",
	];
	for relative in escapes {
		match source.try_load(relative) {
			Err(ClassError::PathEscape { .. }) => {}
			other => panic!("{relative} resolved to {other:?}"),
		}
	}
}

#[test]
fn escape_into_existing_file_is_still_rejected() {
	let dir = tempfile::tempdir().unwrap();
	fs::create_dir_all(dir.path().join("classes")).unwrap();
	fs::write(dir.path().join("Secret.class"), [1u8, 2, 3]).unwrap();
	let source = DirectoryClassSource::new(dir.path().join("classes")).unwrap();

	let error = source.try_load("../Secret.class").unwrap_err();
	assert!(error.is_path_escape());
	assert!(!error.is_not_found());
}

#[test]
fn up_level_inside_root_is_allowed() {
	let dir = tempfile::tempdir().unwrap();
	let name = ResourceName::from_dotted("pkg.Widget").unwrap();
	write_class(dir.path(), &name, &[9u8; 5]).unwrap();
	let source = DirectoryClassSource::new(dir.path()).unwrap();

	let found = source.try_load("other/../pkg/Widget.class").unwrap().unwrap();
	assert_eq!(found.data, vec![9u8; 5]);
}

#[test]
fn missing_resource_is_absent_not_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let root = ClassRoot::new(dir.path()).unwrap();

	let path = root.resolve("pkg/Missing.class").unwrap();
	assert!(!resource::exists(&path));
	assert!(matches!(
		resource::read_all(&path),
		Err(ClassError::ResourceUnreadable { .. })
	));
}

#[cfg(unix)]
#[test]
fn symlink_escape_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let outside = dir.path().join("outside");
	fs::create_dir_all(&outside).unwrap();
	fs::write(outside.join("Evil.class"), [0xcau8]).unwrap();
	fs::create_dir_all(dir.path().join("classes")).unwrap();
	std::os::unix::fs::symlink(&outside, dir.path().join("classes/pkg")).unwrap();

	let source = DirectoryClassSource::new(dir.path().join("classes")).unwrap();
	let error = source.try_load("pkg/Evil.class").unwrap_err();
	assert!(error.is_path_escape(), "{error}");
	let error = source.try_load("pkg/Missing.class").unwrap_err();
	assert!(error.is_path_escape(), "{error}");
}

#[cfg(unix)]
#[test]
fn symlink_inside_root_is_allowed() {
	let dir = tempfile::tempdir().unwrap();
	let name = ResourceName::from_dotted("real.Widget").unwrap();
	write_class(dir.path(), &name, &[4u8; 4]).unwrap();
	std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

	let source = DirectoryClassSource::new(dir.path()).unwrap();
	let found = source.try_load("alias/Widget.class").unwrap().unwrap();
	assert_eq!(found.len(), 4);
}
