use std::fmt::{Debug, Formatter};

use eyre::{eyre, Context};
use jloader_core::{
	ClassAccessFlags, MethodAccessFlags, MethodDescriptor, ResourceName, StorageValue, Type,
};
use jloader_reader::{ClassInfo, ConstantPool, MethodInfo};

pub const CONSTRUCTOR_NAME: &str = "<init>";

/// A defined class. Owned by the [`ClassDefiner`](crate::ClassDefiner) that
/// produced it and only meaningful within that definer.
pub struct Class {
	pub name: ResourceName,
	pub flags: ClassAccessFlags,
	pub super_name: Option<ResourceName>,
	pub interfaces: Vec<ResourceName>,
	pub constructors: Vec<Constructor>,
	pub methods: Vec<MethodSignature>,
	pub version: (u16, u16),
}

impl Class {
	pub(crate) fn new(info: ClassInfo) -> eyre::Result<Class> {
		let name = info
			.name()
			.ok_or_else(|| eyre!("Missing this_class"))
			.and_then(|v| ResourceName::from_internal(v).wrap_err("This class"))?;

		let super_name = info
			.super_name()
			.map(ResourceName::from_internal)
			.transpose()
			.wrap_err("Super class")?;

		let interfaces = info
			.interfaces
			.iter()
			.map(|ptr| {
				let name = info
					.cp
					.class_name(*ptr)
					.ok_or_else(|| eyre!("Interface {ptr:?} is not a class constant"))?;
				Ok(ResourceName::from_internal(name)?)
			})
			.collect::<eyre::Result<Vec<_>>>()
			.wrap_err("Interfaces")?;

		let mut constructors = Vec::new();
		let mut methods = Vec::new();
		for method in &info.methods {
			let signature = MethodSignature::parse(method, &info.cp)
				.wrap_err_with(|| format!("in METHOD #{}", methods.len()))?;

			if signature.name == CONSTRUCTOR_NAME {
				constructors.push(Constructor {
					descriptor: signature.descriptor.clone(),
					flags: signature.flags,
				});
			}
			methods.push(signature);
		}

		Ok(Class {
			name,
			flags: info.access_flags,
			super_name,
			interfaces,
			constructors,
			methods,
			version: (info.major_version, info.minor_version),
		})
	}

	/// The constructor whose parameter types are exactly `parameters`.
	pub fn constructor(&self, parameters: &[Type]) -> Option<&Constructor> {
		self.constructors
			.iter()
			.find(|ctor| ctor.descriptor.parameters == parameters)
	}

	/// Methods other than constructors.
	pub fn declared_methods(&self) -> impl Iterator<Item = &MethodSignature> {
		self.methods
			.iter()
			.filter(|method| method.name != CONSTRUCTOR_NAME)
	}

	pub fn is_interface(&self) -> bool {
		self.flags.contains(ClassAccessFlags::INTERFACE)
	}

	pub fn is_abstract(&self) -> bool {
		self.flags.contains(ClassAccessFlags::ABSTRACT)
	}

	/// Whether a reference to this class may be stored in a `target` typed slot.
	/// Only the direct super class and interfaces are known here.
	pub fn is_assignable_to(&self, target: &str) -> bool {
		let internal = self.name.internal();
		target == internal
			|| target == Type::OBJECT
			|| self
				.super_name
				.iter()
				.chain(self.interfaces.iter())
				.any(|name| name.internal() == target)
	}
}

impl Debug for Class {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Class")
			.field("name", &self.name)
			.field("constructors", &self.constructors)
			.finish_non_exhaustive()
	}
}

impl StorageValue for Class {
	type Idx = u32;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
	pub descriptor: MethodDescriptor,
	pub flags: MethodAccessFlags,
}

impl Constructor {
	pub fn parameters(&self) -> &[Type] {
		&self.descriptor.parameters
	}

	pub fn is_public(&self) -> bool {
		self.flags.contains(MethodAccessFlags::PUBLIC)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
	pub name: String,
	pub descriptor: MethodDescriptor,
	pub flags: MethodAccessFlags,
}

impl MethodSignature {
	fn parse(info: &MethodInfo, cp: &ConstantPool) -> eyre::Result<MethodSignature> {
		let name = cp
			.utf8(info.name)
			.ok_or_else(|| eyre!("Name {:?} is not a UTF-8 constant", info.name))?;
		let desc = cp
			.utf8(info.descriptor)
			.ok_or_else(|| eyre!("Descriptor {:?} is not a UTF-8 constant", info.descriptor))?;
		let descriptor =
			MethodDescriptor::parse(desc).ok_or_else(|| eyre!("Invalid descriptor {desc:?}"))?;

		Ok(MethodSignature {
			name: name.to_string(),
			descriptor,
			flags: MethodAccessFlags::from_bits_retain(info.access_flags),
		})
	}

	pub fn is_static(&self) -> bool {
		self.flags.contains(MethodAccessFlags::STATIC)
	}
}
