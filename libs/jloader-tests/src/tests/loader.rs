use std::sync::Arc;

use jloader_class::{ClassError, ClassLoader, ClassPath, ClassSource, LoaderChain, MemorySource};
use jloader_core::ResourceName;

use crate::{write_class, ClassFileBuilder};

fn name(dotted: &str) -> ResourceName {
	ResourceName::from_dotted(dotted).unwrap()
}

fn memory(classes: &[&str]) -> LoaderChain {
	let mut source = MemorySource::new();
	for class in classes {
		let data = ClassFileBuilder::new(class).constructor("()V").build();
		source = source.with_class(&name(class), data);
	}
	LoaderChain::new([Arc::new(source) as Arc<dyn ClassSource>])
}

#[test]
fn parent_defines_shared_classes() {
	let parent = Arc::new(ClassLoader::new("parent", memory(&["pkg.Widget"])));
	let child = ClassLoader::with_parent(
		"child",
		parent.clone(),
		memory(&["pkg.Widget", "pkg.Local"]),
	);

	let widget = child.load(&name("pkg.Widget")).to_result().unwrap();
	assert!(Arc::ptr_eq(&widget, &parent.find_loaded(&name("pkg.Widget")).unwrap()));
	assert!(child.find_loaded(&name("pkg.Widget")).is_none());

	let local = child.load(&name("pkg.Local")).to_result().unwrap();
	assert!(Arc::ptr_eq(&local, &child.find_loaded(&name("pkg.Local")).unwrap()));
	assert!(parent.find_loaded(&name("pkg.Local")).is_none());
}

#[test]
fn repeated_loads_reuse_the_class() {
	let loader = ClassLoader::new("app", memory(&["pkg.Widget"]));

	let first = loader.load(&name("pkg.Widget"));
	assert!(!first.is_existing());
	let first = first.to_result().unwrap();

	let second = loader.load(&name("pkg.Widget"));
	assert!(second.is_existing());
	assert!(Arc::ptr_eq(&first, &second.to_result().unwrap()));
	assert_eq!(loader.definer().len(), 1);
}

#[test]
fn missing_class_is_not_found() {
	let parent = Arc::new(ClassLoader::new("parent", memory(&[])));
	let child = ClassLoader::with_parent("child", parent, memory(&[]));

	let error = child.load(&name("pkg.Missing")).to_result().unwrap_err();
	match error {
		ClassError::NotFound { name } => assert_eq!(name, "pkg.Missing"),
		other => panic!("unexpected {other}"),
	}
}

#[test]
fn parent_errors_are_not_masked() {
	let broken = MemorySource::new().with_class(&name("pkg.Widget"), &b"junk"[..]);
	let parent = Arc::new(ClassLoader::new(
		"parent",
		LoaderChain::new([Arc::new(broken) as Arc<dyn ClassSource>]),
	));
	let child = ClassLoader::with_parent("child", parent, memory(&["pkg.Widget"]));

	let error = child.load(&name("pkg.Widget")).to_result().unwrap_err();
	assert!(matches!(error, ClassError::MalformedClassData { .. }), "{error}");
}

#[test]
fn class_path_hierarchy() {
	let boot = tempfile::tempdir().unwrap();
	let user = tempfile::tempdir().unwrap();
	let classes = [
		(boot.path(), "java.lang.Thing"),
		(user.path(), "app.Main"),
		(user.path(), "java.lang.Thing"),
	];
	for (root, class) in classes {
		write_class(root, &name(class), &ClassFileBuilder::new(class).build()).unwrap();
	}

	let app = ClassPath::new(vec![boot.path().to_path_buf()], vec![user.path().to_path_buf()])
		.build()
		.unwrap();
	let bootstrap = app.parent().unwrap().clone();

	let thing = app.load(&name("java.lang.Thing")).to_result().unwrap();
	assert!(Arc::ptr_eq(&thing, &bootstrap.find_loaded(&name("java.lang.Thing")).unwrap()));

	app.load(&name("app.Main")).to_result().unwrap();
	assert!(app.find_loaded(&name("app.Main")).is_some());
	assert!(bootstrap.find_loaded(&name("app.Main")).is_none());
}

#[test]
fn concurrent_loads_agree() {
	let loader = Arc::new(ClassLoader::new("app", memory(&["pkg.Widget"])));

	let classes: Vec<_> = std::thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| scope.spawn(|| loader.load(&name("pkg.Widget")).to_result().unwrap()))
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	for class in &classes {
		assert!(Arc::ptr_eq(class, &classes[0]));
	}
	assert_eq!(loader.definer().len(), 1);
}
