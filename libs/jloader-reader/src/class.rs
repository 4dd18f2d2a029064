use eyre::{bail, eyre};
use jloader_core::ClassAccessFlags;
use nom::bytes::complete::tag;
use nom::combinator::map;
use nom::error::{context, VerboseError, VerboseErrorKind};
use nom::multi::length_count;
use nom::number::complete::be_u16;
use tracing::trace;

use crate::{AttributeInfo, ClassConst, ConstPtr, ConstantPool, FieldInfo, IResult, MethodInfo};

pub const MAGIC: [u8; 4] = [0xca, 0xfe, 0xba, 0xbe];

pub struct ClassInfo {
	pub minor_version: u16,
	pub major_version: u16,
	pub cp: ConstantPool,
	pub access_flags: ClassAccessFlags,

	pub this_class: ConstPtr<ClassConst>,
	pub super_class: ConstPtr<ClassConst>,

	pub interfaces: Vec<ConstPtr<ClassConst>>,
	pub fields: Vec<FieldInfo>,
	pub methods: Vec<MethodInfo>,
	pub attributes: Vec<AttributeInfo>,
}

impl ClassInfo {
	pub fn parse(input: &[u8]) -> IResult<Self> {
		let (input, _) = context("CAFE", tag(&MAGIC[..]))(input)?;
		let (input, minor_version) = context("Java Minor Version", be_u16)(input)?;
		let (input, major_version) = context("Java Major Version", be_u16)(input)?;
		trace!("class file version {major_version}.{minor_version}");

		let (input, cp) = context("Constant Pool", ConstantPool::parse)(input)?;
		let (input, access_flags) = context(
			"Access flags",
			map(be_u16, ClassAccessFlags::from_bits_retain),
		)(input)?;
		let (input, this_class) = context("This class", be_u16)(input)?;
		let (input, super_class) = context("Class Superclass", be_u16)(input)?;
		let (input, interfaces) = context(
			"Interfaces",
			length_count(be_u16, map(be_u16, ConstPtr::new)),
		)(input)?;

		let (input, fields) = context("Fields", length_count(be_u16, FieldInfo::parse))(input)?;
		let (input, methods) = context("Methods", length_count(be_u16, MethodInfo::parse))(input)?;
		let (input, attributes) =
			context("Attributes", length_count(be_u16, AttributeInfo::parse))(input)?;

		Ok((
			input,
			ClassInfo {
				minor_version,
				major_version,
				cp,
				access_flags,
				this_class: ConstPtr::new(this_class),
				super_class: ConstPtr::new(super_class),
				interfaces,
				fields,
				methods,
				attributes,
			},
		))
	}

	/// Parses a whole class file, rejecting truncated input and trailing bytes.
	pub fn parse_complete(data: &[u8]) -> eyre::Result<ClassInfo> {
		let (remaining, info) = match Self::parse(data) {
			Ok(value) => value,
			Err(nom::Err::Incomplete(_)) => bail!("Class file is truncated"),
			Err(nom::Err::Error(error) | nom::Err::Failure(error)) => {
				return Err(describe(data, error));
			}
		};

		if !remaining.is_empty() {
			bail!("{} trailing bytes after class file", remaining.len());
		}

		if info.cp.class_name(info.this_class).is_none() {
			bail!("this_class does not point at a class constant");
		}

		Ok(info)
	}

	/// The internal name of the class this file defines.
	pub fn name(&self) -> Option<&str> {
		self.cp.class_name(self.this_class)
	}

	/// The internal name of the super class, `None` for `java/lang/Object`.
	pub fn super_name(&self) -> Option<&str> {
		if self.super_class.index() == 0 {
			return None;
		}
		self.cp.class_name(self.super_class)
	}
}

fn describe(source: &[u8], error: VerboseError<&[u8]>) -> eyre::Report {
	let mut contexts = Vec::new();
	let mut location = 0;
	for (remaining, kind) in &error.errors {
		location = location.max(source.len() - remaining.len());
		match kind {
			VerboseErrorKind::Context(context) => contexts.push(*context),
			VerboseErrorKind::Nom(kind) => contexts.push(kind.description()),
			VerboseErrorKind::Char(c) => {
				return eyre!("[{location}..] expected {c:?}");
			}
		}
	}

	if contexts.is_empty() {
		return eyre!("[{location}..] Unknown error");
	}
	contexts.reverse();
	eyre!("[{location}..] {}", contexts.join(" > "))
}
