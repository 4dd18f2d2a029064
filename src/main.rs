use std::env;

use eyre::{bail, Context};
use jloader_class::{ClassPath, CONSTRUCTOR_NAME};
use jloader_core::ResourceName;
use tracing::info;

fn main() -> eyre::Result<()> {
	jloader_core::init();

	let mut args = env::args().skip(1);
	let Some(class) = args.next() else {
		bail!("usage: jloader <class-name> [class-path]");
	};

	let name = ResourceName::parse(&class)?;
	let class_path = match args.next() {
		Some(list) => ClassPath {
			user: ClassPath::parse_list(&list),
			..ClassPath::from_env()
		},
		None => ClassPath::from_env(),
	};

	let loader = class_path.build().wrap_err("Failed to open class path")?;
	let class = loader
		.load(&name)
		.to_result()
		.wrap_err_with(|| format!("Failed to load {name}"))?;

	info!("Loaded {} (version {}.{})", class.name, class.version.0, class.version.1);
	if let Some(super_name) = &class.super_name {
		println!("class {} extends {super_name}", class.name);
	} else {
		println!("class {}", class.name);
	}
	for constructor in &class.constructors {
		println!("  {}{}", CONSTRUCTOR_NAME, constructor.descriptor);
	}
	for method in class.declared_methods() {
		println!("  {}{}", method.name, method.descriptor);
	}
	Ok(())
}
