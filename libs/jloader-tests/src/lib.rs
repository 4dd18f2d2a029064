use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jloader_core::{MethodAccessFlags, ResourceName, Type};

#[cfg(test)]
mod tests;

/// Writes minimal but well formed class files: a constant pool, the class
/// header and method entries without code.
pub struct ClassFileBuilder {
	name: String,
	super_name: Option<String>,
	interfaces: Vec<String>,
	methods: Vec<(MethodAccessFlags, String, String)>,
}

impl ClassFileBuilder {
	/// `name` may be dotted or internal.
	pub fn new(name: &str) -> ClassFileBuilder {
		ClassFileBuilder {
			name: name.replace('.', "/"),
			super_name: Some(Type::OBJECT.to_string()),
			interfaces: vec![],
			methods: vec![],
		}
	}

	pub fn super_class(mut self, name: Option<&str>) -> Self {
		self.super_name = name.map(|v| v.replace('.', "/"));
		self
	}

	pub fn interface(mut self, name: &str) -> Self {
		self.interfaces.push(name.replace('.', "/"));
		self
	}

	pub fn constructor(self, descriptor: &str) -> Self {
		self.method(MethodAccessFlags::PUBLIC, "<init>", descriptor)
	}

	pub fn method(mut self, flags: MethodAccessFlags, name: &str, descriptor: &str) -> Self {
		self.methods
			.push((flags, name.to_string(), descriptor.to_string()));
		self
	}

	pub fn build(&self) -> Vec<u8> {
		let mut pool = ConstantPoolWriter::default();
		let this_class = pool.class(&self.name);
		let super_class = self
			.super_name
			.as_ref()
			.map(|name| pool.class(name))
			.unwrap_or(0);
		let interfaces: Vec<u16> = self.interfaces.iter().map(|name| pool.class(name)).collect();
		let methods: Vec<(u16, u16, u16)> = self
			.methods
			.iter()
			.map(|(flags, name, desc)| (flags.bits(), pool.utf8(name), pool.utf8(desc)))
			.collect();

		let mut out = vec![0xca, 0xfe, 0xba, 0xbe];
		push_u16(&mut out, 0);
		push_u16(&mut out, 52);
		push_u16(&mut out, pool.count + 1);
		out.extend(&pool.data);

		push_u16(&mut out, 0x0021);
		push_u16(&mut out, this_class);
		push_u16(&mut out, super_class);

		push_u16(&mut out, interfaces.len() as u16);
		for interface in interfaces {
			push_u16(&mut out, interface);
		}

		// fields
		push_u16(&mut out, 0);

		push_u16(&mut out, methods.len() as u16);
		for (flags, name, desc) in methods {
			push_u16(&mut out, flags);
			push_u16(&mut out, name);
			push_u16(&mut out, desc);
			push_u16(&mut out, 0);
		}

		// attributes
		push_u16(&mut out, 0);
		out
	}
}

#[derive(Default)]
struct ConstantPoolWriter {
	data: Vec<u8>,
	count: u16,
	utf8: Vec<(String, u16)>,
}

impl ConstantPoolWriter {
	fn utf8(&mut self, value: &str) -> u16 {
		if let Some((_, index)) = self.utf8.iter().find(|(v, _)| v == value) {
			return *index;
		}

		self.data.push(1);
		push_u16(&mut self.data, value.len() as u16);
		self.data.extend(value.as_bytes());
		self.count += 1;
		self.utf8.push((value.to_string(), self.count));
		self.count
	}

	fn class(&mut self, name: &str) -> u16 {
		let name = self.utf8(name);
		self.data.push(7);
		push_u16(&mut self.data, name);
		self.count += 1;
		self.count
	}
}

fn push_u16(out: &mut Vec<u8>, value: u16) {
	out.extend(value.to_be_bytes());
}

/// Writes `data` as the class file of `name` below `root`.
pub fn write_class(root: &Path, name: &ResourceName, data: &[u8]) -> io::Result<PathBuf> {
	write_resource(root, &name.to_class_path(), data)
}

pub fn write_resource(root: &Path, relative: &str, data: &[u8]) -> io::Result<PathBuf> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(&path, data)?;
	Ok(path)
}
